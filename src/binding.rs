//! Binding types for pipeline rows
//!
//! This module contains:
//! - `Binding`: a bound value in a solution (cheap to clone, Arc-backed)
//! - `Batch`: columnar batch of solutions with schema invariants
//!
//! The label service only ever observes three binding shapes: an unbound
//! variable, an entity reference (IRI), and a literal with an optional
//! language tag. Upstream engines with richer value models adapt into
//! these at the operator boundary.

use crate::var_registry::VarId;
use std::sync::Arc;
use thiserror::Error;

/// A bound value in a solution - cheap to clone (Arc-backed strings)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Variable is not bound
    Unbound,
    /// Entity reference (IRI)
    Iri(Arc<str>),
    /// Literal value with optional language tag
    ///
    /// `text` is never empty for literals produced by label resolution.
    /// `lang` is None for language-neutral literals.
    Lit {
        /// Literal text
        text: Arc<str>,
        /// Language tag (lowercase), e.g. "en"
        lang: Option<Arc<str>>,
    },
}

impl Binding {
    /// Create an IRI binding
    pub fn iri(iri: impl Into<Arc<str>>) -> Self {
        Binding::Iri(iri.into())
    }

    /// Create a language-neutral literal binding
    pub fn lit(text: impl Into<Arc<str>>) -> Self {
        Binding::Lit {
            text: text.into(),
            lang: None,
        }
    }

    /// Create a language-tagged literal binding
    pub fn lit_lang(text: impl Into<Arc<str>>, lang: impl Into<Arc<str>>) -> Self {
        Binding::Lit {
            text: text.into(),
            lang: Some(lang.into()),
        }
    }

    /// Check if this binding is bound (not Unbound)
    pub fn is_bound(&self) -> bool {
        !matches!(self, Binding::Unbound)
    }

    /// Get the IRI string if this is an entity reference
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Binding::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Get (text, lang) if this is a literal
    pub fn as_lit(&self) -> Option<(&str, Option<&str>)> {
        match self {
            Binding::Lit { text, lang } => Some((text, lang.as_deref())),
            _ => None,
        }
    }
}

/// Batch construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// Schema and column counts differ
    #[error("Schema has {schema_len} variables but {columns_len} columns were provided")]
    SchemaColumnMismatch {
        schema_len: usize,
        columns_len: usize,
    },

    /// Same VarId appears twice in a schema
    #[error("Duplicate variable in schema: {0:?}")]
    DuplicateVar(VarId),

    /// Columns of unequal length
    #[error("Column {column} has {got} rows, expected {expected}")]
    ColumnLengthMismatch {
        expected: usize,
        got: usize,
        column: usize,
    },

    /// Row width does not match schema
    #[error("Row {row} has {got} bindings, expected {expected}")]
    RowWidthMismatch {
        expected: usize,
        got: usize,
        row: usize,
    },
}

/// Columnar batch of solutions
///
/// Invariants (enforced by [`Batch::new`]):
/// - one column per schema variable, in schema order
/// - no duplicate VarIds in the schema
/// - all columns have the same length
#[derive(Debug, Clone)]
pub struct Batch {
    /// Number of rows in this batch
    len: usize,
    /// Schema: which variables this batch contains, in column order
    schema: Arc<[VarId]>,
    /// One column per variable in schema order
    columns: Vec<Vec<Binding>>,
}

impl Batch {
    /// Create a new batch, enforcing invariants
    pub fn new(schema: Arc<[VarId]>, columns: Vec<Vec<Binding>>) -> Result<Self, BatchError> {
        if schema.len() != columns.len() {
            return Err(BatchError::SchemaColumnMismatch {
                schema_len: schema.len(),
                columns_len: columns.len(),
            });
        }

        // Schema length is typically tiny, so O(n^2) is fine
        for (i, &var) in schema.iter().enumerate() {
            if schema.iter().take(i).any(|&v| v == var) {
                return Err(BatchError::DuplicateVar(var));
            }
        }

        let len = columns.first().map(|c| c.len()).unwrap_or(0);
        for (i, col) in columns.iter().enumerate() {
            if col.len() != len {
                return Err(BatchError::ColumnLengthMismatch {
                    expected: len,
                    got: col.len(),
                    column: i,
                });
            }
        }

        Ok(Self {
            len,
            schema,
            columns,
        })
    }

    /// Create an empty batch with the given schema (zero rows)
    pub fn empty(schema: Arc<[VarId]>) -> Self {
        let columns = schema.iter().map(|_| Vec::new()).collect();
        Self {
            len: 0,
            schema,
            columns,
        }
    }

    /// Create a batch from row-major bindings
    ///
    /// Each row must have exactly one binding per schema variable,
    /// in schema order.
    pub fn from_rows(schema: Arc<[VarId]>, rows: &[Vec<Binding>]) -> Result<Self, BatchError> {
        let width = schema.len();
        let mut columns: Vec<Vec<Binding>> =
            (0..width).map(|_| Vec::with_capacity(rows.len())).collect();

        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BatchError::RowWidthMismatch {
                    expected: width,
                    got: row.len(),
                    row: row_idx,
                });
            }
            for (col, binding) in row.iter().enumerate() {
                columns[col].push(binding.clone());
            }
        }

        Self::new(schema, columns)
    }

    /// Create a batch representing a single empty solution (1 row, 0 columns)
    ///
    /// Used when a service call has no upstream pattern: the pipeline still
    /// carries exactly one solution, it just binds nothing. A plain
    /// `Batch::new` with an empty schema would report `len = 0` (no first
    /// column to infer the row count from), which breaks row-cardinality
    /// accounting downstream.
    pub fn single_empty() -> Self {
        Self {
            len: 1,
            schema: Arc::from(Vec::new().into_boxed_slice()),
            columns: Vec::new(),
        }
    }

    /// Create a batch with an empty schema (0 columns) and an explicit
    /// row count
    ///
    /// Needed when an operator produces solutions that bind no variables
    /// but must still represent the existence of one-or-more rows.
    pub fn empty_schema_with_len(len: usize) -> Self {
        Self {
            len,
            schema: Arc::from(Vec::new().into_boxed_slice()),
            columns: Vec::new(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the batch has no rows
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the schema (variables in column order)
    pub fn schema(&self) -> &[VarId] {
        &self.schema
    }

    /// Get a binding by VarId (linear scan over schema; schema is tiny)
    ///
    /// Returns None if the VarId is not in the schema or the row is out
    /// of bounds.
    pub fn get(&self, row: usize, var: VarId) -> Option<&Binding> {
        let col_idx = self.schema.iter().position(|&v| v == var)?;
        self.columns.get(col_idx)?.get(row)
    }

    /// Get a binding by column index directly
    ///
    /// # Panics
    ///
    /// Panics if column or row is out of bounds.
    pub fn get_by_col(&self, row: usize, col: usize) -> &Binding {
        &self.columns[col][row]
    }

    /// Clone one row out of the batch, in schema order
    ///
    /// Returns None if the row index is out of bounds. For a batch with an
    /// empty schema this returns an empty vector for every valid row.
    pub fn row(&self, row: usize) -> Option<Vec<Binding>> {
        if row >= self.len {
            return None;
        }
        Some(self.columns.iter().map(|col| col[row].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(vars: &[u16]) -> Arc<[VarId]> {
        Arc::from(
            vars.iter()
                .map(|&v| VarId(v))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        )
    }

    #[test]
    fn test_new_rejects_schema_column_mismatch() {
        let err = Batch::new(schema(&[0, 1]), vec![vec![]]).unwrap_err();
        assert!(matches!(err, BatchError::SchemaColumnMismatch { .. }));
    }

    #[test]
    fn test_new_rejects_duplicate_var() {
        let err = Batch::new(schema(&[0, 0]), vec![vec![], vec![]]).unwrap_err();
        assert_eq!(err, BatchError::DuplicateVar(VarId(0)));
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let err = Batch::new(
            schema(&[0, 1]),
            vec![vec![Binding::Unbound], vec![]],
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_from_rows_round_trip() {
        let batch = Batch::from_rows(
            schema(&[0, 1]),
            &[
                vec![Binding::iri("ex:a"), Binding::lit_lang("a", "en")],
                vec![Binding::iri("ex:b"), Binding::Unbound],
            ],
        )
        .unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.get(0, VarId(0)), Some(&Binding::iri("ex:a")));
        assert_eq!(batch.get(1, VarId(1)), Some(&Binding::Unbound));
        assert_eq!(
            batch.row(1).unwrap(),
            vec![Binding::iri("ex:b"), Binding::Unbound]
        );
        assert!(batch.row(2).is_none());
    }

    #[test]
    fn test_from_rows_rejects_short_row() {
        let err = Batch::from_rows(schema(&[0, 1]), &[vec![Binding::Unbound]]).unwrap_err();
        assert!(matches!(err, BatchError::RowWidthMismatch { row: 0, .. }));
    }

    #[test]
    fn test_single_empty_has_one_row() {
        let batch = Batch::single_empty();
        assert_eq!(batch.len(), 1);
        assert!(batch.schema().is_empty());
        assert_eq!(batch.row(0), Some(vec![]));
    }
}
