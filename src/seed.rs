//! Leaf operators that feed the pipeline
//!
//! `RowsOperator` bridges an upstream engine (or a test) into the operator
//! chain by replaying pre-built solutions. `EmptyOperator` produces the
//! single empty solution a service call starts from when it has no
//! upstream pattern at all.

use crate::binding::{Batch, Binding};
use crate::context::ExecutionContext;
use crate::error::{Result, ServiceError};
use crate::index::LabelIndex;
use crate::operator::{Operator, OperatorState};
use crate::var_registry::VarId;
use async_trait::async_trait;
use std::sync::Arc;

/// Leaf operator replaying pre-built solution rows
///
/// Rows are emitted in input order, split into batches of at most
/// `ctx.batch_size` rows.
pub struct RowsOperator {
    /// Output schema
    schema: Arc<[VarId]>,
    /// Rows to emit, in order (row-major, one binding per schema variable)
    rows: Vec<Vec<Binding>>,
    /// Next row to emit
    pos: usize,
    /// Operator state
    state: OperatorState,
}

impl RowsOperator {
    /// Create a new rows operator
    ///
    /// Fails if any row's width does not match the schema.
    pub fn new(schema: Arc<[VarId]>, rows: Vec<Vec<Binding>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(ServiceError::Internal(format!(
                    "row {} has {} bindings, schema has {} variables",
                    i,
                    row.len(),
                    schema.len()
                )));
            }
        }
        Ok(Self {
            schema,
            rows,
            pos: 0,
            state: OperatorState::Created,
        })
    }
}

#[async_trait]
impl<I: LabelIndex + 'static> Operator<I> for RowsOperator {
    fn schema(&self) -> &[VarId] {
        &self.schema
    }

    async fn open(&mut self, _ctx: &ExecutionContext<'_, I>) -> Result<()> {
        self.pos = 0;
        self.state = OperatorState::Open;
        Ok(())
    }

    async fn next_batch(&mut self, ctx: &ExecutionContext<'_, I>) -> Result<Option<Batch>> {
        if self.state != OperatorState::Open {
            return Ok(None);
        }
        if self.pos >= self.rows.len() {
            self.state = OperatorState::Exhausted;
            return Ok(None);
        }

        let end = (self.pos + ctx.batch_size).min(self.rows.len());
        let batch = Batch::from_rows(self.schema.clone(), &self.rows[self.pos..end])?;
        self.pos = end;
        Ok(Some(batch))
    }

    fn close(&mut self) {
        self.state = OperatorState::Closed;
    }

    fn estimated_rows(&self) -> Option<usize> {
        Some(self.rows.len())
    }
}

/// Leaf operator producing a single empty solution (one row, no columns)
///
/// A service block with no upstream pattern still evaluates over exactly
/// one solution; the resolved variables are the only bindings it gains.
pub struct EmptyOperator {
    state: OperatorState,
    emitted: bool,
}

impl EmptyOperator {
    /// Create a new empty-solution operator
    pub fn new() -> Self {
        Self {
            state: OperatorState::Created,
            emitted: false,
        }
    }
}

impl Default for EmptyOperator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<I: LabelIndex + 'static> Operator<I> for EmptyOperator {
    fn schema(&self) -> &[VarId] {
        &[]
    }

    async fn open(&mut self, _ctx: &ExecutionContext<'_, I>) -> Result<()> {
        self.emitted = false;
        self.state = OperatorState::Open;
        Ok(())
    }

    async fn next_batch(&mut self, _ctx: &ExecutionContext<'_, I>) -> Result<Option<Batch>> {
        if self.state != OperatorState::Open || self.emitted {
            self.state = OperatorState::Exhausted;
            return Ok(None);
        }
        self.emitted = true;
        Ok(Some(Batch::single_empty()))
    }

    fn close(&mut self) {
        self.state = OperatorState::Closed;
    }

    fn estimated_rows(&self) -> Option<usize> {
        Some(1)
    }
}
