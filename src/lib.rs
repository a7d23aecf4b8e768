//! Language-fallback label resolution for graph query pipelines
//!
//! This crate implements a pluggable pipeline operator that augments each
//! solution row flowing through a graph-query evaluation with the
//! best-available-language labels, alt-labels, and descriptions for the
//! entities the row binds. Language selection walks a caller-supplied
//! preference list in order and stops at the first language with data.
//!
//! # Architecture
//!
//! - [`config::ServiceConfig`] is the tokenized service-call surface the
//!   host query layer hands over; compiling it yields an immutable
//!   [`lang::LanguagePreference`] and ordered [`request::LabelRequest`]s
//! - [`label::LabelOperator`] is the row transformer: one output row per
//!   input row, same order, resolved variables bound or left unbound
//! - [`index::LabelIndex`] is the injected read-only lookup capability;
//!   [`index::MemoryLabelIndex`] backs tests and embedded use
//! - [`operator::Operator`] is the `open/next_batch/close` pull protocol
//!   the host pipeline drives; [`execute`] has small drivers for it
//!
//! # Example
//!
//! ```
//! use label_service::binding::Binding;
//! use label_service::config::{LabelPatternDecl, ServiceConfig, SubjectDecl};
//! use label_service::context::ExecutionContext;
//! use label_service::execute::collect_rows;
//! use label_service::field::LabelField;
//! use label_service::index::MemoryLabelIndex;
//! use label_service::label::LabelOperator;
//! use label_service::seed::RowsOperator;
//! use label_service::var_registry::VarRegistry;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = MemoryLabelIndex::new();
//! index.insert("http://example.org/Q1", LabelField::Label, "en", "one");
//!
//! let mut vars = VarRegistry::new();
//! let subject = vars.get_or_insert("s");
//!
//! let config = ServiceConfig {
//!     languages: vec!["en".to_string()],
//!     patterns: vec![LabelPatternDecl {
//!         subject: SubjectDecl::Var("s".to_string()),
//!         predicate: "label".to_string(),
//!         object_var: None,
//!     }],
//!     projection: vec![],
//! };
//! let (languages, requests) = config.compile(&mut vars)?.into_parts();
//!
//! let upstream = RowsOperator::new(
//!     Arc::from(vec![subject].into_boxed_slice()),
//!     vec![vec![Binding::iri("http://example.org/Q1")]],
//! )?;
//! let mut op = LabelOperator::<MemoryLabelIndex>::new(Box::new(upstream), requests, languages);
//!
//! let ctx = ExecutionContext::new(&index, &vars);
//! let rows = collect_rows(&mut op, &ctx).await?;
//! assert_eq!(rows[0][1], Binding::lit_lang("one", "en"));
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod config;
pub mod context;
pub mod error;
pub mod execute;
pub mod field;
pub mod index;
pub mod label;
pub mod lang;
pub mod operator;
pub mod request;
pub mod seed;
pub mod var_registry;
pub mod vocab;

pub use binding::{Batch, BatchError, Binding};
pub use config::{CompiledService, LabelPatternDecl, ServiceConfig, SubjectDecl};
pub use context::ExecutionContext;
pub use error::{Result, ServiceError};
pub use field::LabelField;
pub use index::{IndexError, LabelIndex, MemoryLabelIndex};
pub use label::LabelOperator;
pub use lang::LanguagePreference;
pub use operator::{BoxedOperator, Operator, OperatorState};
pub use request::{LabelRequest, SubjectSpec};
pub use var_registry::{VarId, VarRegistry};
