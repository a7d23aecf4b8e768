//! Predicate kinds resolved by the label service

use crate::vocab;
use serde::{Deserialize, Serialize};

/// A multilingual property the label service can resolve
///
/// `Label` and `Description` are single-valued per language: at most one
/// literal is expected per (entity, language) key, and when an index holds
/// genuine duplicates the first value in index order wins. `AltLabel` is
/// multi-valued: all literals for the matched language are surfaced,
/// joined with `", "`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelField {
    /// Primary human-readable name (rdfs:label)
    Label,
    /// Alternative names (skos:altLabel)
    AltLabel,
    /// Short description (schema:description)
    Description,
}

/// All fields, in canonical declaration order
pub const ALL_FIELDS: [LabelField; 3] = [
    LabelField::Label,
    LabelField::AltLabel,
    LabelField::Description,
];

/// Fields ordered for suffix matching: longer suffixes first so that
/// "sAltLabel" parses as (s, altLabel) rather than (sAlt, label).
pub(crate) const SUFFIX_MATCH_ORDER: [LabelField; 3] = [
    LabelField::AltLabel,
    LabelField::Description,
    LabelField::Label,
];

impl LabelField {
    /// Bare local name, as written in query surfaces ("label", "altLabel",
    /// "description")
    pub fn local_name(self) -> &'static str {
        match self {
            LabelField::Label => "label",
            LabelField::AltLabel => "altLabel",
            LabelField::Description => "description",
        }
    }

    /// Local name with the first character upper-cased, used as the
    /// derived-variable suffix ("Label", "AltLabel", "Description")
    pub fn var_suffix(self) -> &'static str {
        match self {
            LabelField::Label => "Label",
            LabelField::AltLabel => "AltLabel",
            LabelField::Description => "Description",
        }
    }

    /// Full predicate IRI
    pub fn iri(self) -> &'static str {
        match self {
            LabelField::Label => vocab::rdfs::LABEL,
            LabelField::AltLabel => vocab::skos::ALT_LABEL,
            LabelField::Description => vocab::schema_org::DESCRIPTION,
        }
    }

    /// Whether multiple literals may share one language for this field
    pub fn is_multi_valued(self) -> bool {
        matches!(self, LabelField::AltLabel)
    }

    /// Parse a predicate reference: full IRI, common prefixed form, or
    /// bare local name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "label" | "rdfs:label" => Some(LabelField::Label),
            "altLabel" | "skos:altLabel" => Some(LabelField::AltLabel),
            "description" | "schema:description" => Some(LabelField::Description),
            _ => ALL_FIELDS.iter().copied().find(|f| f.iri() == name),
        }
    }
}
