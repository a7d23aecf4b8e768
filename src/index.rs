//! Label index adapter boundary
//!
//! The operator never touches the triple store directly: it queries an
//! injected [`LabelIndex`] capability, one lookup per (entity, field,
//! language) key. The index is read-only for the duration of one
//! evaluation and safe to call repeatedly and concurrently.

use crate::field::LabelField;
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors surfaced by a label index adapter
///
/// These propagate unchanged through the operator - no retry, no masking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The backing index cannot be reached
    #[error("index unavailable: {0}")]
    Unavailable(String),

    /// A lookup failed inside the backing index
    #[error("lookup failed: {0}")]
    Lookup(String),
}

/// Read-only lookup capability over (entity, predicate kind, language)
///
/// # Ordering contract
///
/// The returned values must come back in a stable order within one query
/// evaluation: multi-valued resolution concatenates them in exactly the
/// order returned, so an adapter that reorders values between calls would
/// make results non-reproducible. Implementations document the order they
/// preserve; [`MemoryLabelIndex`] preserves insertion order.
///
/// Language tags arrive normalized to ASCII lowercase; adapters over
/// case-preserving stores must fold their keys accordingly.
#[async_trait]
pub trait LabelIndex: Send + Sync {
    /// Fetch all literal texts for (entity, field, language)
    ///
    /// An unknown key yields an empty vector, not an error.
    async fn lookup(
        &self,
        entity: &str,
        field: LabelField,
        lang: &str,
    ) -> Result<Vec<Arc<str>>, IndexError>;
}

type Key = (String, LabelField, String);

/// In-memory label index
///
/// Backed by a map from (entity, field, language) to the literals inserted
/// for that key, in insertion order. Interior mutability keeps `insert`
/// usable through shared references, matching how an evaluation shares one
/// immutable index snapshot across operators.
#[derive(Debug, Default, Clone)]
pub struct MemoryLabelIndex {
    data: Arc<RwLock<FxHashMap<Key, Vec<Arc<str>>>>>,
}

impl MemoryLabelIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a literal for (entity, field, language)
    ///
    /// Values accumulate per key in insertion order. The language tag is
    /// folded to lowercase so lookups with normalized tags match.
    pub fn insert(
        &self,
        entity: impl Into<String>,
        field: LabelField,
        lang: &str,
        text: impl Into<Arc<str>>,
    ) {
        let key = (entity.into(), field, lang.to_ascii_lowercase());
        self.data
            .write()
            .expect("RwLock poisoned")
            .entry(key)
            .or_default()
            .push(text.into());
    }
}

#[async_trait]
impl LabelIndex for MemoryLabelIndex {
    async fn lookup(
        &self,
        entity: &str,
        field: LabelField,
        lang: &str,
    ) -> Result<Vec<Arc<str>>, IndexError> {
        let data = self.data.read().expect("RwLock poisoned");
        Ok(data
            .get(&(entity.to_string(), field, lang.to_ascii_lowercase()))
            .cloned()
            .unwrap_or_default())
    }
}
