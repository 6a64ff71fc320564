//! Scalar drawing features
//!
//! Derives ink coverage and palette size from a normalized color table.

pub mod extractor;

pub use extractor::FeatureExtractor;
