//! Execution context for pipeline operators
//!
//! The `ExecutionContext` carries the per-evaluation state operators need:
//! the injected label index snapshot, the variable registry, and batching
//! configuration. Everything in it is immutable for the duration of one
//! evaluation and safe for concurrent reads.

use crate::index::LabelIndex;
use crate::var_registry::VarRegistry;

/// Default maximum rows per batch
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Execution context providing access to the index and query state
///
/// Generic over the label index implementation so engines inject their
/// own adapter and tests inject [`MemoryLabelIndex`](crate::index::MemoryLabelIndex).
pub struct ExecutionContext<'a, I: LabelIndex + 'static> {
    /// Label index snapshot for this evaluation (read-only)
    pub index: &'a I,
    /// Variable registry for this evaluation
    pub vars: &'a VarRegistry,
    /// Maximum batch size for operators
    pub batch_size: usize,
}

impl<'a, I: LabelIndex + 'static> ExecutionContext<'a, I> {
    /// Create a new execution context with the default batch size
    pub fn new(index: &'a I, vars: &'a VarRegistry) -> Self {
        Self {
            index,
            vars,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}
