//! Ordered literal text substitution over a batch of documents, used to
//! rewrite simplified Chinese word forms into traditional ones in place.

pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod table;
pub mod text;

pub use batch::{BatchOptions, BatchReport, EXIT_UNMATCHED, run_batch};
pub use config::{Config, load_config};
pub use document::Document;
pub use error::{Error, TableError};
pub use table::{Conversion, Pair, Pass, RescanHazard, SubstitutionPlan, SubstitutionTable};
pub use text::{apply_replacements, apply_with_counts};
