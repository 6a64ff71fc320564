//! Default parameters and reference values for drawing analysis
//!
//! Defaults reproduce the settings used for the original drawing
//! experiment corpus (tolerance 12, at most 32 colors per drawing).

/// Quantization parameters
pub mod quantization {
    /// Default perceptual merge tolerance (CIE76 ΔE threshold)
    pub const DEFAULT_TOLERANCE: u8 = 12;

    /// Largest accepted tolerance
    pub const MAX_TOLERANCE: u8 = 100;

    /// Default cap on retained palette size
    pub const DEFAULT_MAX_COLORS: usize = 32;
}

/// Color naming
pub mod color {
    /// Canonical background color code for drawings
    pub const WHITE_HEX: &str = "#FFFFFF";

    /// Tolerance for "proportions sum to one" checks
    pub const PROPORTION_EPSILON: f64 = 1e-6;
}

/// Filename schema and corpus layout
pub mod schema {
    /// Separator between positional filename fields
    pub const FIELD_SEPARATOR: char = '_';

    /// Default drawing file extension
    pub const DEFAULT_IMAGE_EXTENSION: &str = ".png";
}

/// Fixed result table columns, in output order
pub mod columns {
    pub const DRAWING_NAME: &str = "drawingname";
    pub const PROP_NONWHITE_PX: &str = "prop_nonwhitepx";
    pub const NUM_COLORS: &str = "numcolors";
}
