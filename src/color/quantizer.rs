//! Perceptual color quantization
//!
//! Reduces a drawing to a bounded palette of (RGB, pixel count) buckets:
//! - Exact-color histogram over every pixel
//! - Greedy merge of colors closer than the tolerance (CIE76 ΔE in Lab)
//! - Truncation to the most populated `max_colors` buckets
//!
//! Buckets are returned in descending pixel-count order. Both sorts are
//! stable: before merging, ties keep the order in which the colors first
//! appear in the image (row-major scan); after merging, ties keep their
//! pre-merge order. Output is deterministic for a given image.

use std::collections::HashMap;

use image::RgbImage;
use palette::Lab;
use serde::{Deserialize, Serialize};

use crate::color::conversion::{ColorConverter, Rgb8};
use crate::config::QuantizerConfig;
use crate::Result;

/// One palette bucket produced by quantization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizedColor {
    /// Representative color of the bucket
    pub rgb: Rgb8,
    /// Number of pixels assigned to the bucket
    pub pixel_count: usize,
}

/// Full quantizer output for one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantization {
    /// Retained buckets, most populated first
    pub colors: Vec<QuantizedColor>,
    /// Pixel count of the whole image (width * height)
    pub total_pixels: usize,
    /// Pixels belonging to buckets cut off by the palette size cap
    pub dropped_pixels: usize,
}

/// Histogram bucket during merging
struct Bucket {
    rgb: Rgb8,
    lab: Lab,
    count: usize,
    absorbed: bool,
}

/// Tolerance-based palette extractor
#[derive(Debug, Clone)]
pub struct ColorQuantizer {
    converter: ColorConverter,
    config: QuantizerConfig,
}

impl Default for ColorQuantizer {
    fn default() -> Self {
        Self {
            converter: ColorConverter::new(),
            config: QuantizerConfig::default(),
        }
    }
}

impl ColorQuantizer {
    /// Create a quantizer from a validated configuration
    pub fn new(config: QuantizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            converter: ColorConverter::new(),
            config,
        })
    }

    /// Create a quantizer with custom parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `tolerance > 100` or `max_colors == 0`
    pub fn with_params(tolerance: u8, max_colors: usize) -> Result<Self> {
        Self::new(QuantizerConfig::new(tolerance, max_colors)?)
    }

    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    /// Quantize an image into at most `max_colors` buckets
    ///
    /// A zero-area image yields no buckets and `total_pixels == 0`; turning
    /// that into a table is rejected by the table builder.
    pub fn quantize(&self, image: &RgbImage) -> Quantization {
        let total_pixels = image.width() as usize * image.height() as usize;

        let mut buckets = self.histogram(image);
        sort_buckets(&mut buckets);

        if self.config.tolerance > 0 {
            self.merge(&mut buckets);
            buckets.retain(|b| !b.absorbed);
            sort_buckets(&mut buckets);
        }

        let natural_size = buckets.len();
        let dropped_pixels: usize = buckets
            .iter()
            .skip(self.config.max_colors)
            .map(|b| b.count)
            .sum();
        buckets.truncate(self.config.max_colors);

        if dropped_pixels > 0 {
            tracing::debug!(
                natural_size,
                max_colors = self.config.max_colors,
                dropped_pixels,
                "palette truncated"
            );
        }

        Quantization {
            colors: buckets
                .into_iter()
                .map(|b| QuantizedColor {
                    rgb: b.rgb,
                    pixel_count: b.count,
                })
                .collect(),
            total_pixels,
            dropped_pixels,
        }
    }

    /// Exact-color histogram, buckets in order of first occurrence
    fn histogram(&self, image: &RgbImage) -> Vec<Bucket> {
        let mut index: HashMap<Rgb8, usize> = HashMap::new();
        let mut buckets: Vec<Bucket> = Vec::new();

        for pixel in image.pixels() {
            let rgb = pixel.0;
            let next = buckets.len();
            let i = *index.entry(rgb).or_insert(next);
            if i == next {
                buckets.push(Bucket {
                    rgb,
                    lab: self.converter.rgb_to_lab(rgb[0], rgb[1], rgb[2]),
                    count: 0,
                    absorbed: false,
                });
            }
            buckets[i].count += 1;
        }

        buckets
    }

    /// Greedy merge: each surviving bucket, most populated first, absorbs
    /// every later surviving bucket within the tolerance.
    fn merge(&self, buckets: &mut [Bucket]) {
        let threshold = self.config.tolerance as f32;

        for i in 0..buckets.len() {
            if buckets[i].absorbed {
                continue;
            }
            let (head, tail) = buckets.split_at_mut(i + 1);
            let larger = &mut head[i];

            for smaller in tail.iter_mut().filter(|b| !b.absorbed) {
                if self.converter.delta_e(smaller.lab, larger.lab) < threshold {
                    larger.count += smaller.count;
                    smaller.absorbed = true;
                }
            }
        }
    }
}

/// Descending by count; stable, so ties keep their current order
fn sort_buckets(buckets: &mut [Bucket]) {
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
}
