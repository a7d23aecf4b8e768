//! Label resolution operator
//!
//! The LabelOperator augments each upstream solution with the
//! best-available-language literal for every compiled request:
//!
//! - languages are consulted strictly in preference order; the first tag
//!   with any values wins and later tags are never queried
//! - single-valued fields take the first value in index order
//! - multi-valued fields concatenate all same-language values with ", "
//! - an unbound or non-IRI subject, or a miss across every language,
//!   leaves the output variable unbound and keeps the row
//!
//! The operator emits exactly one output row per input row, in input
//! order. It never joins, multiplies, or drops rows, and never touches
//! pre-existing bindings.

use crate::binding::{Batch, Binding};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::field::LabelField;
use crate::index::LabelIndex;
use crate::lang::LanguagePreference;
use crate::operator::{BoxedOperator, Operator, OperatorState};
use crate::request::{LabelRequest, SubjectSpec};
use crate::var_registry::VarId;
use async_trait::async_trait;
use std::sync::Arc;

/// Label resolution operator
///
/// Wraps a child operator and binds one output variable per request.
/// At most `|languages| * |requests|` index lookups are issued per row.
pub struct LabelOperator<I: LabelIndex + 'static> {
    /// Child operator providing input solutions
    child: BoxedOperator<I>,
    /// Compiled resolution requests, in declaration order
    requests: Arc<[LabelRequest]>,
    /// Immutable language preference list
    languages: Arc<LanguagePreference>,
    /// Output schema (child schema + new output variables)
    schema: Arc<[VarId]>,
    /// Position of each request's output variable in the output schema
    out_positions: Vec<usize>,
    /// Operator state
    state: OperatorState,
}

impl<I: LabelIndex + 'static> LabelOperator<I> {
    /// Create a new label resolution operator
    ///
    /// The output schema is the child schema followed by each request's
    /// output variable (in request order) that the child does not already
    /// produce.
    pub fn new(
        child: BoxedOperator<I>,
        requests: Vec<LabelRequest>,
        languages: LanguagePreference,
    ) -> Self {
        let mut schema_vec: Vec<VarId> = child.schema().to_vec();
        for request in &requests {
            if !schema_vec.contains(&request.out_var) {
                schema_vec.push(request.out_var);
            }
        }
        let schema: Arc<[VarId]> = Arc::from(schema_vec.into_boxed_slice());

        let out_positions = requests
            .iter()
            .map(|r| {
                schema
                    .iter()
                    .position(|&v| v == r.out_var)
                    .unwrap_or_default()
            })
            .collect();

        Self {
            child,
            requests: requests.into(),
            languages: Arc::new(languages),
            schema,
            out_positions,
            state: OperatorState::Created,
        }
    }

    /// Resolve one (entity, field) pair across the language preference
    /// list
    ///
    /// Returns the bound literal for the first language with any values,
    /// or None when every listed language misses.
    async fn resolve(
        &self,
        ctx: &ExecutionContext<'_, I>,
        entity: &str,
        field: LabelField,
    ) -> Result<Option<Binding>> {
        for lang in self.languages.iter() {
            let values = ctx.index.lookup(entity, field, lang).await?;
            if values.is_empty() {
                continue;
            }

            let text: Arc<str> = if field.is_multi_valued() {
                values
                    .iter()
                    .map(|v| v.as_ref())
                    .collect::<Vec<_>>()
                    .join(", ")
                    .into()
            } else {
                // Duplicates under a single-valued field: first index
                // value wins.
                values[0].clone()
            };

            tracing::trace!(entity, field = field.local_name(), lang, "label resolved");
            return Ok(Some(Binding::Lit {
                text,
                lang: Some(Arc::from(lang)),
            }));
        }

        tracing::trace!(entity, field = field.local_name(), "no listed language matched");
        Ok(None)
    }
}

#[async_trait]
impl<I: LabelIndex + 'static> Operator<I> for LabelOperator<I> {
    fn schema(&self) -> &[VarId] {
        &self.schema
    }

    async fn open(&mut self, ctx: &ExecutionContext<'_, I>) -> Result<()> {
        self.child.open(ctx).await?;
        self.state = OperatorState::Open;
        tracing::debug!(
            requests = self.requests.len(),
            languages = self.languages.len(),
            "label operator opened"
        );
        Ok(())
    }

    async fn next_batch(&mut self, ctx: &ExecutionContext<'_, I>) -> Result<Option<Batch>> {
        if self.state != OperatorState::Open {
            return Ok(None);
        }

        loop {
            let input = match self.child.next_batch(ctx).await? {
                Some(b) => b,
                None => {
                    self.state = OperatorState::Exhausted;
                    return Ok(None);
                }
            };

            if input.is_empty() {
                continue;
            }

            // No columns at all (empty child schema, no requests): row
            // count still has to survive.
            if self.schema.is_empty() {
                return Ok(Some(Batch::empty_schema_with_len(input.len())));
            }

            let child_cols = self.child.schema().len();
            let mut columns: Vec<Vec<Binding>> = (0..self.schema.len())
                .map(|_| Vec::with_capacity(input.len()))
                .collect();

            for row_idx in 0..input.len() {
                let mut row: Vec<Binding> = Vec::with_capacity(self.schema.len());
                for col in 0..child_cols {
                    row.push(input.get_by_col(row_idx, col).clone());
                }
                row.resize(self.schema.len(), Binding::Unbound);

                for (req_idx, request) in self.requests.iter().enumerate() {
                    let pos = self.out_positions[req_idx];
                    // Pre-existing bound values are never clobbered.
                    if row[pos].is_bound() {
                        continue;
                    }

                    let entity = match &request.subject {
                        SubjectSpec::Iri(iri) => Some(iri.as_ref()),
                        SubjectSpec::Var(var) => {
                            input.get(row_idx, *var).and_then(Binding::as_iri)
                        }
                    };

                    // Unbound (or non-IRI) subject: no value, row kept.
                    let Some(entity) = entity else {
                        continue;
                    };

                    if let Some(binding) = self.resolve(ctx, entity, request.field).await? {
                        row[pos] = binding;
                    }
                }

                for (col, binding) in row.into_iter().enumerate() {
                    columns[col].push(binding);
                }
            }

            return Ok(Some(Batch::new(self.schema.clone(), columns)?));
        }
    }

    fn close(&mut self) {
        self.child.close();
        self.state = OperatorState::Closed;
    }

    fn estimated_rows(&self) -> Option<usize> {
        // Resolution never changes cardinality
        self.child.estimated_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MemoryLabelIndex;

    struct StubChild {
        schema: Arc<[VarId]>,
    }

    #[async_trait]
    impl<I: LabelIndex + 'static> Operator<I> for StubChild {
        fn schema(&self) -> &[VarId] {
            &self.schema
        }

        async fn open(&mut self, _ctx: &ExecutionContext<'_, I>) -> Result<()> {
            Ok(())
        }

        async fn next_batch(&mut self, _ctx: &ExecutionContext<'_, I>) -> Result<Option<Batch>> {
            Ok(None)
        }

        fn close(&mut self) {}
    }

    fn stub(vars: &[u16]) -> BoxedOperator<MemoryLabelIndex> {
        Box::new(StubChild {
            schema: Arc::from(
                vars.iter()
                    .map(|&v| VarId(v))
                    .collect::<Vec<_>>()
                    .into_boxed_slice(),
            ),
        })
    }

    fn request(subject_var: u16, field: LabelField, out_var: u16) -> LabelRequest {
        LabelRequest {
            subject: SubjectSpec::Var(VarId(subject_var)),
            field,
            out_var: VarId(out_var),
        }
    }

    fn langs(entries: &[&str]) -> LanguagePreference {
        LanguagePreference::parse(entries).unwrap()
    }

    #[test]
    fn test_schema_appends_new_output_vars_in_request_order() {
        let op = LabelOperator::new(
            stub(&[0]),
            vec![
                request(0, LabelField::Label, 1),
                request(0, LabelField::AltLabel, 2),
            ],
            langs(&["en"]),
        );

        assert_eq!(op.schema(), &[VarId(0), VarId(1), VarId(2)]);
        assert_eq!(op.out_positions, vec![1, 2]);
    }

    #[test]
    fn test_schema_does_not_duplicate_existing_var() {
        // Output var 1 already produced by the child
        let op = LabelOperator::new(
            stub(&[0, 1]),
            vec![request(0, LabelField::Label, 1)],
            langs(&["en"]),
        );

        assert_eq!(op.schema(), &[VarId(0), VarId(1)]);
        assert_eq!(op.out_positions, vec![1]);
    }

    #[test]
    fn test_schema_unchanged_with_no_requests() {
        let op = LabelOperator::new(stub(&[0, 1]), vec![], langs(&["en"]));
        assert_eq!(op.schema(), &[VarId(0), VarId(1)]);
    }
}
