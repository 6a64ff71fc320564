//! Drawing image loading
//!
//! Decodes raster files into an RGB pixel grid. Any alpha channel is
//! discarded; quantization only looks at red, green and blue.
//!
//! ## Supported Formats
//!
//! Everything the `image` crate decodes with its default features:
//! - JPEG, PNG, GIF (first frame), WebP, TIFF, BMP, ICO, TGA, PNM, QOI

use crate::error::{AnalysisError, Result};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Load a drawing from disk as 8-bit RGB
///
/// The file is opened, fully decoded and closed before returning. The
/// format is sniffed from the file contents, so a misnamed extension
/// still decodes.
///
/// # Errors
///
/// Returns `AnalysisError::ImageDecodeError` if the file cannot be opened,
/// its format is not recognized, or decoding fails.
///
/// # Example
///
/// ```rust,no_run
/// use drawing_features::image_loader::load_rgb;
/// use std::path::Path;
///
/// let img = load_rgb(Path::new("drawings/cat_t1_p007.png"))?;
/// println!("Loaded drawing: {}x{}", img.width(), img.height());
/// # Ok::<(), drawing_features::AnalysisError>(())
/// ```
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| AnalysisError::image_decode(path, "Failed to open image file", e))?
        .with_guessed_format()
        .map_err(|e| AnalysisError::image_decode(path, "Failed to read image header", e))?;

    let img = reader
        .decode()
        .map_err(|e| AnalysisError::image_decode(path, "Failed to decode image", e))?;

    Ok(img.to_rgb8())
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "pbm", "pgm",
        "ppm", "pnm", "qoi",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.trim_start_matches('.').to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
