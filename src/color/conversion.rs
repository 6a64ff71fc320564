//! Color space conversion utilities
//!
//! Provides the conversions quantization needs:
//! - 8-bit RGB to CIE Lab (D65)
//! - CIE76 color difference
//! - Canonical uppercase hex color codes

use palette::{FromColor, Lab, Srgb};

/// 8-bit RGB triple
pub type Rgb8 = [u8; 3];

/// Stateless converter from RGB to Lab and hex representations
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to Lab color space
    ///
    /// # Arguments
    ///
    /// * `r`, `g`, `b` - RGB values in range [0, 255]
    ///
    /// # Returns
    ///
    /// Lab color in D65 illuminant
    pub fn rgb_to_lab(&self, r: u8, g: u8, b: u8) -> Lab {
        let srgb = Srgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        );
        Lab::from_color(srgb)
    }

    /// Convert an RGB triple to its canonical hex code (e.g. "#FF0000")
    pub fn rgb_to_hex(&self, rgb: Rgb8) -> String {
        format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
    }

    /// Compute Delta E (color difference) between two Lab colors
    ///
    /// Uses simple Euclidean distance (ΔE76), which is what the merge
    /// tolerance is expressed in.
    pub fn delta_e(&self, lab1: Lab, lab2: Lab) -> f32 {
        let dl = lab1.l - lab2.l;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}
