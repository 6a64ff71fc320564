//! Filename metadata parsing
//!
//! Drawings encode their experimental conditions in the file name as
//! underscore-separated positional fields.

pub mod filename;

pub use filename::FilenameSchema;
