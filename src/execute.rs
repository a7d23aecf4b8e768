//! Pipeline drivers
//!
//! Small helpers that run an operator chain to completion: `collect_rows`
//! materializes every output row in order, `exists` answers boolean
//! (ASK-style) queries by stopping at the first row. Both own the full
//! open/next_batch/close lifecycle and close the chain on error.

use crate::binding::Binding;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::index::LabelIndex;
use crate::operator::Operator;

/// Run an operator chain to exhaustion, returning all rows in order
///
/// Each row is a vector of bindings in the operator's schema order.
pub async fn collect_rows<I: LabelIndex + 'static>(
    op: &mut dyn Operator<I>,
    ctx: &ExecutionContext<'_, I>,
) -> Result<Vec<Vec<Binding>>> {
    op.open(ctx).await?;

    let mut rows = Vec::new();
    loop {
        match op.next_batch(ctx).await {
            Ok(Some(batch)) => {
                for row_idx in 0..batch.len() {
                    if let Some(row) = batch.row(row_idx) {
                        rows.push(row);
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                op.close();
                return Err(e);
            }
        }
    }

    op.close();
    Ok(rows)
}

/// Answer whether the chain produces at least one row
///
/// Stops pulling as soon as the first non-empty batch arrives; per-row
/// semantics are unchanged, the chain is simply not drained.
pub async fn exists<I: LabelIndex + 'static>(
    op: &mut dyn Operator<I>,
    ctx: &ExecutionContext<'_, I>,
) -> Result<bool> {
    op.open(ctx).await?;

    loop {
        match op.next_batch(ctx).await {
            Ok(Some(batch)) if !batch.is_empty() => {
                op.close();
                return Ok(true);
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                op.close();
                return Ok(false);
            }
            Err(e) => {
                op.close();
                return Err(e);
            }
        }
    }
}
