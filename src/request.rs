//! Request descriptors: which (subject, predicate) pairs to resolve
//!
//! A compiled service call holds one `LabelRequest` per resolved output
//! variable. Output-variable names are either given explicitly by the
//! caller or derived from the subject position and predicate local name
//! by [`derived_var_name`], a pure function kept out of the row loop.

use crate::field::{LabelField, SUFFIX_MATCH_ORDER};
use crate::var_registry::VarId;
use std::sync::Arc;

/// Subject position of a label request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectSpec {
    /// Fixed entity identifier (constant in the service block)
    Iri(Arc<str>),
    /// Row variable, resolved against each row's bindings
    Var(VarId),
}

/// One compiled resolution request: (subject position, predicate kind,
/// output variable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    /// Where the entity identifier comes from
    pub subject: SubjectSpec,
    /// Which multilingual property to resolve
    pub field: LabelField,
    /// Variable the resolved literal is bound to
    pub out_var: VarId,
}

/// Derive an output-variable name from a subject variable and a predicate
/// local name
///
/// `("s", "label")` → `"sLabel"`; `("obj", "altLabel")` → `"objAltLabel"`.
pub fn derived_var_name(subject_var: &str, local_name: &str) -> String {
    let mut name = String::with_capacity(subject_var.len() + local_name.len());
    name.push_str(subject_var);
    let mut chars = local_name.chars();
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Parse a projection-variable name into (subject variable, field)
///
/// Recognizes names of the form `<subjectVar><Suffix>` where `Suffix` is
/// a capitalized field local name and the subject-variable part is
/// non-empty. Longest suffix wins, so "sAltLabel" parses as ("s",
/// AltLabel) rather than ("sAlt", Label). Returns None for names that
/// carry no known suffix.
pub fn parse_projection_var(name: &str) -> Option<(&str, LabelField)> {
    for field in SUFFIX_MATCH_ORDER {
        if let Some(prefix) = name.strip_suffix(field.var_suffix()) {
            if !prefix.is_empty() {
                return Some((prefix, field));
            }
        }
    }
    None
}
