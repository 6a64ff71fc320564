//! Coverage and palette-size features
//!
//! White (`#FFFFFF`) is treated as the drawing background. Images whose
//! background was not normalized to pure white beforehand have no white
//! entry, and their non-background proportion is reported as 0.

use crate::color::ColorTable;
use crate::constants::color::WHITE_HEX;

/// Pure feature functions over a [`ColorTable`]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Proportion of pixels that are not background white
    ///
    /// Returns `1 - p(#FFFFFF)`, or 0 when the table has no white entry.
    /// The 0 default does not distinguish "no background" from "background
    /// was never pure white"; use [`FeatureExtractor::white_proportion`]
    /// when that matters.
    pub fn non_background_proportion(table: &ColorTable) -> f64 {
        match Self::white_proportion(table) {
            Some(white) => 1.0 - white,
            None => 0.0,
        }
    }

    /// Proportion of background white pixels, if any white entry exists
    pub fn white_proportion(table: &ColorTable) -> Option<f64> {
        table.find(WHITE_HEX).map(|entry| entry.proportion)
    }

    /// Number of colors in the stored (possibly truncated) palette
    pub fn distinct_color_count(table: &ColorTable) -> usize {
        table.len()
    }
}
