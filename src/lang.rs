//! Language preference list parsing
//!
//! The service call supplies one or more language parameter entries. Each
//! entry may itself carry several alternative tags separated by `,` or `.`
//! (both shapes exist in the query surface: a single "en,de" parameter, or
//! one parameter per language). The compiled list is ordered, deduplicated
//! and immutable for the lifetime of one evaluation.

use crate::error::{Result, ServiceError};
use std::sync::Arc;

/// Ordered, deduplicated list of language tags
///
/// Tags are normalized to ASCII lowercase at parse time; matching against
/// the label index is exact-string after normalization, with no regional
/// subtag widening.
#[derive(Debug, Clone)]
pub struct LanguagePreference {
    tags: Vec<Arc<str>>,
}

impl LanguagePreference {
    /// Parse a preference list from configuration entries
    ///
    /// Fails with [`ServiceError::Config`] when zero tags survive parsing.
    /// This runs at service-call compile time, before any row is
    /// processed.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut tags: Vec<Arc<str>> = Vec::new();

        for entry in entries {
            for fragment in entry.as_ref().split([',', '.']) {
                let tag = fragment.trim();
                if tag.is_empty() {
                    continue;
                }
                let tag = tag.to_ascii_lowercase();
                if tags.iter().any(|t| **t == *tag) {
                    continue;
                }
                tags.push(Arc::from(tag.as_str()));
            }
        }

        if tags.is_empty() {
            return Err(ServiceError::Config(
                "must provide the label service a list of languages".to_string(),
            ));
        }

        Ok(Self { tags })
    }

    /// Iterate tags in preference order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.as_ref())
    }

    /// Tags in preference order
    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.tags
    }

    /// Number of tags (always at least 1)
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Never true for a successfully parsed list
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(prefs: &LanguagePreference) -> Vec<&str> {
        prefs.iter().collect()
    }

    #[test]
    fn test_single_entry_single_tag() {
        let prefs = LanguagePreference::parse(&["en"]).unwrap();
        assert_eq!(tags(&prefs), vec!["en"]);
    }

    #[test]
    fn test_comma_delimited_entry() {
        let prefs = LanguagePreference::parse(&["en,de"]).unwrap();
        assert_eq!(tags(&prefs), vec!["en", "de"]);
    }

    #[test]
    fn test_dot_delimited_entry() {
        let prefs = LanguagePreference::parse(&["dummy.en"]).unwrap();
        assert_eq!(tags(&prefs), vec!["dummy", "en"]);
    }

    #[test]
    fn test_multiple_entries_keep_order() {
        let prefs = LanguagePreference::parse(&["ru", "de"]).unwrap();
        assert_eq!(tags(&prefs), vec!["ru", "de"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let prefs = LanguagePreference::parse(&["en,ru", "en", "ru"]).unwrap();
        assert_eq!(tags(&prefs), vec!["en", "ru"]);
    }

    #[test]
    fn test_tags_are_lowercased_and_trimmed() {
        let prefs = LanguagePreference::parse(&[" EN , De "]).unwrap();
        assert_eq!(tags(&prefs), vec!["en", "de"]);
    }

    #[test]
    fn test_empty_fragments_skipped() {
        let prefs = LanguagePreference::parse(&["en,,de,"]).unwrap();
        assert_eq!(tags(&prefs), vec!["en", "de"]);
    }

    #[test]
    fn test_no_languages_is_config_error() {
        let err = LanguagePreference::parse::<&str>(&[]).unwrap_err();
        assert!(err
            .to_string()
            .contains("must provide the label service a list of languages"));

        // Entries that parse to nothing are just as empty
        let err = LanguagePreference::parse(&["", " , "]).unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }
}
