//! # Drawing Features
//!
//! Color palette and ink coverage features for corpora of participant
//! drawings.
//!
//! For every drawing in a directory this library:
//! - Quantizes the image into a bounded palette of perceptually distinct colors
//! - Normalizes the palette into a table of hex codes, pixel counts and proportions
//! - Derives the proportion of non-white ("ink") pixels and the palette size
//! - Parses experimental conditions from the underscore-delimited file name
//!
//! ## Example
//!
//! ```rust,no_run
//! use drawing_features::{analyze_corpus, QuantizerConfig};
//! use std::path::Path;
//!
//! let table = analyze_corpus(
//!     Path::new("drawings"),
//!     ".png",
//!     "category_timecond_participant",
//!     QuantizerConfig::default(),
//! )?;
//! for row in &table {
//!     println!("{}: {:.3} ink, {} colors", row.drawing_name, row.prop_nonwhitepx, row.numcolors);
//! }
//! # Ok::<(), drawing_features::AnalysisError>(())
//! ```

use std::path::Path;

pub mod error;
pub mod constants;
pub mod config;
pub mod image_loader;
pub mod color;
pub mod features;
pub mod schema;
pub mod corpus;

pub use color::{ColorEntry, ColorQuantizer, ColorTable, ColorTableBuilder, QuantizedColor};
pub use config::{CorpusConfig, QuantizerConfig};
pub use corpus::{CorpusAnalyzer, FeatureRow, ResultTable};
pub use error::{AnalysisError, Result};
pub use features::FeatureExtractor;
pub use schema::{filename::parse_filename, FilenameSchema};

/// Extract the color profile of a single drawing
///
/// # Errors
///
/// Returns `AnalysisError` if:
/// - The quantizer settings are out of range
/// - The image cannot be decoded
/// - The image has zero area
pub fn extract_color_profile(image_path: &Path, quantizer: QuantizerConfig) -> Result<ColorTable> {
    let quantizer = ColorQuantizer::new(quantizer)?;
    let image = image_loader::load_rgb(image_path)?;
    let quantization = quantizer.quantize(&image);
    ColorTableBuilder::new().build(&quantization.colors, quantization.total_pixels)
}

/// Analyze every drawing in a directory
///
/// This is the main entry point. Files directly inside `dir` whose name
/// ends with `image_extension` are profiled and joined with the fields
/// `schema` names in their file stem.
///
/// # Errors
///
/// Returns the first `AnalysisError` encountered; the run is not resumed
/// past a failing drawing.
pub fn analyze_corpus(
    dir: &Path,
    image_extension: &str,
    schema: &str,
    quantizer: QuantizerConfig,
) -> Result<ResultTable> {
    let config = CorpusConfig {
        input_dir: dir.to_path_buf(),
        image_extension: image_extension.to_string(),
        schema: schema.to_string(),
        quantizer,
        parallel: false,
    };
    CorpusAnalyzer::new(&config)?.analyze(dir)
}
