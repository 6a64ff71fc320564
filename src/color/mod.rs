//! Color profiling module
//!
//! This module handles color space conversions, perceptual quantization
//! of a drawing into a bounded palette, and normalization of that palette
//! into a per-image color table.

pub mod conversion;
pub mod quantizer;
pub mod table;

pub use conversion::ColorConverter;
pub use quantizer::{ColorQuantizer, QuantizedColor, Quantization};
pub use table::{ColorEntry, ColorTable, ColorTableBuilder};
