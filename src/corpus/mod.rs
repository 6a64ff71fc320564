//! Corpus analysis module
//!
//! Joins per-drawing color features with filename metadata into one
//! result table per directory of drawings.

pub mod analyzer;
pub mod table;

pub use analyzer::CorpusAnalyzer;
pub use table::{FeatureRow, ResultTable};
