//! Normalized per-image color tables
//!
//! Turns quantizer buckets into `{color code, occurrences, proportion}`
//! rows. Row order is the quantizer's (most populated first) and is never
//! re-sorted downstream.

use serde::{Deserialize, Serialize};

use crate::color::conversion::ColorConverter;
use crate::color::quantizer::QuantizedColor;
use crate::{AnalysisError, Result};

/// One quantized color of an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorEntry {
    /// Canonical uppercase hex code, e.g. "#FF0000"
    pub c_code: String,
    /// Pixels mapped to this color
    pub occurrence: usize,
    /// `occurrence / total pixels`, in [0, 1]
    pub proportion: f64,
}

/// Ordered color profile of one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
}

impl ColorTable {
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry with the given color code (case-insensitive)
    pub fn find(&self, c_code: &str) -> Option<&ColorEntry> {
        self.entries
            .iter()
            .find(|e| e.c_code.eq_ignore_ascii_case(c_code))
    }

    /// Sum of all proportions.
    ///
    /// 1.0 unless the palette cap dropped buckets, in which case it is the
    /// share of the image the retained palette still describes.
    pub fn coverage(&self) -> f64 {
        self.entries.iter().map(|e| e.proportion).sum()
    }
}

impl<'a> IntoIterator for &'a ColorTable {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds [`ColorTable`]s from quantizer output
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorTableBuilder {
    converter: ColorConverter,
}

impl ColorTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a normalized table from quantized colors
    ///
    /// # Arguments
    ///
    /// * `colors` - Quantizer buckets, most populated first
    /// * `total_pixels` - Pixel count of the whole image
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `total_pixels` is zero
    pub fn build(&self, colors: &[QuantizedColor], total_pixels: usize) -> Result<ColorTable> {
        if total_pixels == 0 {
            return Err(AnalysisError::invalid_parameter(
                "total_pixels",
                total_pixels,
                "image has zero area",
            ));
        }

        let entries = colors
            .iter()
            .map(|c| ColorEntry {
                c_code: self.converter.rgb_to_hex(c.rgb),
                occurrence: c.pixel_count,
                proportion: c.pixel_count as f64 / total_pixels as f64,
            })
            .collect();

        Ok(ColorTable { entries })
    }
}
