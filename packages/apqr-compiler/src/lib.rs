//! Multi-Source Response Compiler for Annual Product Quality Reviews
//!
//! Domain agents for LIMS, ERP and DMS each return a bundle of structured
//! results for a reviewer's query. The compiler turns those bundles into one
//! attributable answer: duplicates collapsed, results ranked by relevance,
//! cross-source contradictions exposed, and a bounded summary with citations.
//!
//! The compiler is deterministic and does no I/O. It never resolves a
//! contradiction - it reports it for human review.
//!
//! # Usage
//!
//! ```rust
//! use apqr_compiler::{CompileRequest, Compiler, CompilerConfig};
//!
//! let request = CompileRequest::from_json(r#"{
//!     "query": "assay results for LOT-12345",
//!     "responses": [
//!         {"source_name": "LIMS", "results": [{"lot_number": "LOT-12345", "test": "Assay", "status": "PASS"}]},
//!         {"source_name": "ERP", "results": [{"batch_number": "BATCH-12345", "status": "Released"}]}
//!     ]
//! }"#)?;
//!
//! let compiler = Compiler::new(CompilerConfig::new().with_max_summary_length(200));
//! let result = compiler.compile(&request.query, &request.responses);
//!
//! assert_eq!(result.citations.len(), 2);
//! assert_eq!(result.metadata.contradictions_found, 1);
//! # Ok::<(), apqr_compiler::CompilerError>(())
//! ```
//!
//! # Modules
//!
//! - [`types`] - Configuration, input bundles and compilation output
//! - [`pipeline`] - The compilation stages and the [`Compiler`] chaining them
//! - [`request`] - Validation of untyped JSON input
//! - [`testing`] - Sample LIMS/ERP/DMS responses

pub mod error;
pub mod pipeline;
pub mod request;
pub mod testing;
pub mod types;

pub use error::{CompilerError, Result};
pub use pipeline::{create_compiler, Compiler};
pub use request::CompileRequest;
pub use types::{
    compilation::{
        CompilationMetadata, CompilationResult, Contradiction, ContradictionReport, Detail,
        DetailContent, ObservedValue, Severity,
    },
    config::CompilerConfig,
    response::{ResponseBundle, ResultRecord},
};
