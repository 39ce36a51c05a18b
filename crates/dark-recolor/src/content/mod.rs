//! Content-stream pipeline: operator extraction and rewriting

mod extractor;
mod operator;
mod rewriter;

pub use extractor::{scan, OperatorExtractor};
pub use operator::{ColorOperator, ColorSpaceKind};
pub use rewriter::{rewrite, scan_and_rewrite, Rewrite};
