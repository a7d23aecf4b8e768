//! Operator trait and base types for pipeline execution
//!
//! Operators form a chain that produces batches of solutions through the
//! `open/next_batch/close` lifecycle pattern. The label service plugs into
//! a host pipeline as one such operator: a `RowSource -> RowSource`
//! transformation behind this trait.

use crate::binding::Batch;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::index::LabelIndex;
use crate::var_registry::VarId;
use async_trait::async_trait;

/// Pipeline execution operator
///
/// Operators follow a lifecycle pattern for resource control:
/// 1. `open()` - initialize state
/// 2. `next_batch()` - pull batches until exhausted (returns None)
/// 3. `close()` - release resources
///
/// # Schema Contract
///
/// - `schema()` returns the output variables, fixed at construction
/// - All batches from `next_batch()` have columns in schema order
/// - Schema contains no duplicate VarIds
///
/// Upstream sequences are lazy, ordered and finite; an operator must not
/// assume it can rewind or peek ahead.
#[async_trait]
pub trait Operator<I: LabelIndex + 'static>: Send + Sync {
    /// Output schema - which variables this operator produces
    fn schema(&self) -> &[VarId];

    /// Initialize operator state
    ///
    /// Called once before `next_batch()`.
    async fn open(&mut self, ctx: &ExecutionContext<'_, I>) -> Result<()>;

    /// Pull the next batch of solutions
    ///
    /// Returns `Ok(Some(batch))` with results, or `Ok(None)` when
    /// exhausted. Batch columns are ordered according to `schema()`.
    async fn next_batch(&mut self, ctx: &ExecutionContext<'_, I>) -> Result<Option<Batch>>;

    /// Release resources
    fn close(&mut self);

    /// Estimated cardinality (planner hint)
    fn estimated_rows(&self) -> Option<usize> {
        None
    }
}

/// Boxed operator for dynamic dispatch
pub type BoxedOperator<I> = Box<dyn Operator<I> + Send + Sync>;

/// Operator state for lifecycle tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorState {
    /// Not yet opened
    Created,
    /// Opened and ready to produce batches
    Open,
    /// Exhausted (next_batch returned None)
    Exhausted,
    /// Closed
    Closed,
}

impl OperatorState {
    /// Check if the operator can be opened
    pub fn can_open(&self) -> bool {
        matches!(self, OperatorState::Created)
    }

    /// Check if the operator can produce batches
    pub fn can_next(&self) -> bool {
        matches!(self, OperatorState::Open)
    }

    /// Check if the operator is closed
    pub fn is_closed(&self) -> bool {
        matches!(self, OperatorState::Closed)
    }
}
