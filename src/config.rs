//! Tokenized service-call configuration and its compiler
//!
//! The host query layer recognizes a label-service block, tokenizes it,
//! and hands the pieces here: language parameter entries, the declared
//! (subject, predicate, object) patterns, and the outer query's projection
//! variables. Compilation happens once per service call, before any row
//! is processed; everything it produces is immutable for the evaluation.

use crate::error::{Result, ServiceError};
use crate::field::LabelField;
use crate::lang::LanguagePreference;
use crate::request::{derived_var_name, parse_projection_var, LabelRequest, SubjectSpec};
use crate::var_registry::{VarId, VarRegistry};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Subject position as declared in the service block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectDecl {
    /// Fixed entity identifier
    Iri(String),
    /// Row variable name (no sigil)
    Var(String),
}

/// One declared pattern inside the service block
///
/// `object_var` is the explicitly requested output variable; when absent
/// the name is derived from the subject position and predicate local name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPatternDecl {
    /// Subject position
    pub subject: SubjectDecl,
    /// Predicate reference: full IRI, prefixed form, or bare local name
    pub predicate: String,
    /// Explicit output variable, overriding derivation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_var: Option<String>,
}

/// Tokenized label-service call surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Language parameter entries, in declaration order
    pub languages: Vec<String>,
    /// Declared resolution patterns (may be empty)
    #[serde(default)]
    pub patterns: Vec<LabelPatternDecl>,
    /// Outer query's requested variables, used to synthesize requests
    /// when no patterns are declared
    #[serde(default)]
    pub projection: Vec<String>,
}

/// A compiled service call: immutable language preference plus ordered
/// resolution requests
#[derive(Debug, Clone)]
pub struct CompiledService {
    languages: LanguagePreference,
    requests: Vec<LabelRequest>,
}

impl CompiledService {
    /// Language preference list
    pub fn languages(&self) -> &LanguagePreference {
        &self.languages
    }

    /// Resolution requests, in declaration (or synthesis) order
    pub fn requests(&self) -> &[LabelRequest] {
        &self.requests
    }

    /// Split into (languages, requests) for operator construction
    pub fn into_parts(self) -> (LanguagePreference, Vec<LabelRequest>) {
        (self.languages, self.requests)
    }
}

impl ServiceConfig {
    /// Compile the tokenized surface into a [`CompiledService`]
    ///
    /// Validation order matters: the language list is checked first so a
    /// service call with no languages fails regardless of its patterns.
    /// Registers every output variable (and referenced subject variable)
    /// in `vars`.
    pub fn compile(&self, vars: &mut VarRegistry) -> Result<CompiledService> {
        let languages = LanguagePreference::parse(&self.languages)?;

        let requests = if self.patterns.is_empty() {
            self.synthesize_requests(vars)
        } else {
            self.compile_patterns(vars)?
        };

        let mut seen: FxHashSet<VarId> = FxHashSet::default();
        for request in &requests {
            if !seen.insert(request.out_var) {
                return Err(ServiceError::Config(format!(
                    "duplicate output variable in label service call: {}",
                    vars.name(request.out_var)
                )));
            }
        }

        tracing::debug!(
            languages = languages.len(),
            requests = requests.len(),
            "compiled label service call"
        );

        Ok(CompiledService {
            languages,
            requests,
        })
    }

    /// Compile explicitly declared patterns
    fn compile_patterns(&self, vars: &mut VarRegistry) -> Result<Vec<LabelRequest>> {
        let mut requests = Vec::with_capacity(self.patterns.len());

        for decl in &self.patterns {
            let field = LabelField::from_name(&decl.predicate).ok_or_else(|| {
                ServiceError::Config(format!(
                    "unknown label service predicate: {}",
                    decl.predicate
                ))
            })?;

            let (subject, out_name) = match &decl.subject {
                SubjectDecl::Iri(iri) => {
                    let name = decl
                        .object_var
                        .clone()
                        .unwrap_or_else(|| field.local_name().to_string());
                    (SubjectSpec::Iri(Arc::from(iri.as_str())), name)
                }
                SubjectDecl::Var(subject_var) => {
                    let name = decl
                        .object_var
                        .clone()
                        .unwrap_or_else(|| derived_var_name(subject_var, field.local_name()));
                    (
                        SubjectSpec::Var(vars.get_or_insert(subject_var)),
                        name,
                    )
                }
            };

            requests.push(LabelRequest {
                subject,
                field,
                out_var: vars.get_or_insert(&out_name),
            });
        }

        Ok(requests)
    }

    /// Synthesize requests from the outer projection
    ///
    /// A projection variable shaped like `<subjectVar><Suffix>` yields one
    /// request binding that variable directly; anything else is ignored.
    /// An empty result is not an error - the service call then passes rows
    /// through untouched.
    fn synthesize_requests(&self, vars: &mut VarRegistry) -> Vec<LabelRequest> {
        let mut requests = Vec::new();

        for name in &self.projection {
            if let Some((subject_var, field)) = parse_projection_var(name) {
                let subject = SubjectSpec::Var(vars.get_or_insert(subject_var));
                requests.push(LabelRequest {
                    subject,
                    field,
                    out_var: vars.get_or_insert(name),
                });
            }
        }

        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(
        languages: &[&str],
        patterns: Vec<LabelPatternDecl>,
        projection: &[&str],
    ) -> ServiceConfig {
        ServiceConfig {
            languages: languages.iter().map(|s| s.to_string()).collect(),
            patterns,
            projection: projection.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn var_pattern(subject: &str, predicate: &str) -> LabelPatternDecl {
        LabelPatternDecl {
            subject: SubjectDecl::Var(subject.to_string()),
            predicate: predicate.to_string(),
            object_var: None,
        }
    }

    #[test]
    fn test_compile_derives_output_names() {
        let mut vars = VarRegistry::new();
        let compiled = config(
            &["en"],
            vec![var_pattern("s", "label"), var_pattern("s", "altLabel")],
            &[],
        )
        .compile(&mut vars)
        .unwrap();

        let requests = compiled.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(vars.name(requests[0].out_var), "sLabel");
        assert_eq!(vars.name(requests[1].out_var), "sAltLabel");
        assert_eq!(requests[0].field, LabelField::Label);
        assert_eq!(requests[1].field, LabelField::AltLabel);
    }

    #[test]
    fn test_compile_constant_subject_uses_local_name() {
        let mut vars = VarRegistry::new();
        let compiled = config(
            &["en"],
            vec![LabelPatternDecl {
                subject: SubjectDecl::Iri("http://example.org/Q123".to_string()),
                predicate: "rdfs:label".to_string(),
                object_var: None,
            }],
            &[],
        )
        .compile(&mut vars)
        .unwrap();

        assert_eq!(vars.name(compiled.requests()[0].out_var), "label");
        assert!(matches!(
            compiled.requests()[0].subject,
            SubjectSpec::Iri(_)
        ));
    }

    #[test]
    fn test_compile_explicit_object_var_overrides_derivation() {
        let mut vars = VarRegistry::new();
        let compiled = config(
            &["en"],
            vec![LabelPatternDecl {
                subject: SubjectDecl::Var("s".to_string()),
                predicate: "label".to_string(),
                object_var: Some("name".to_string()),
            }],
            &[],
        )
        .compile(&mut vars)
        .unwrap();

        assert_eq!(vars.name(compiled.requests()[0].out_var), "name");
    }

    #[test]
    fn test_compile_synthesizes_from_projection() {
        let mut vars = VarRegistry::new();
        let compiled = config(&["en"], vec![], &["pLabel", "count", "pAltLabel"])
            .compile(&mut vars)
            .unwrap();

        let requests = compiled.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(vars.name(requests[0].out_var), "pLabel");
        assert_eq!(requests[0].field, LabelField::Label);
        assert_eq!(vars.name(requests[1].out_var), "pAltLabel");
        assert_eq!(requests[1].field, LabelField::AltLabel);
        // Both resolve the same subject variable
        assert_eq!(requests[0].subject, requests[1].subject);
    }

    #[test]
    fn test_compile_without_languages_fails_before_patterns() {
        let mut vars = VarRegistry::new();
        let err = config(&[], vec![var_pattern("s", "nonsense")], &[])
            .compile(&mut vars)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("must provide the label service a list of languages"));
    }

    #[test]
    fn test_compile_rejects_unknown_predicate() {
        let mut vars = VarRegistry::new();
        let err = config(&["en"], vec![var_pattern("s", "comment")], &[])
            .compile(&mut vars)
            .unwrap_err();
        assert!(err.to_string().contains("unknown label service predicate"));
    }

    #[test]
    fn test_compile_rejects_output_collision() {
        let mut vars = VarRegistry::new();
        let err = config(
            &["en"],
            vec![
                LabelPatternDecl {
                    subject: SubjectDecl::Var("s".to_string()),
                    predicate: "label".to_string(),
                    object_var: Some("out".to_string()),
                },
                LabelPatternDecl {
                    subject: SubjectDecl::Var("p".to_string()),
                    predicate: "description".to_string(),
                    object_var: Some("out".to_string()),
                },
            ],
            &[],
        )
        .compile(&mut vars)
        .unwrap_err();
        assert!(err.to_string().contains("duplicate output variable"));
    }

    #[test]
    fn test_compile_empty_projection_yields_no_requests() {
        let mut vars = VarRegistry::new();
        let compiled = config(&["en"], vec![], &["x", "y"])
            .compile(&mut vars)
            .unwrap();
        assert!(compiled.requests().is_empty());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let original = config(
            &["en,de"],
            vec![LabelPatternDecl {
                subject: SubjectDecl::Var("s".to_string()),
                predicate: "altLabel".to_string(),
                object_var: None,
            }],
            &["sAltLabel"],
        );

        let json = serde_json::to_string(&original).unwrap();
        let parsed: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
