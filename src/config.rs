//! Configuration structures for corpus analysis.
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use drawing_features::CorpusConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = CorpusConfig::from_json_file(Path::new("corpus.json"))?;
//!
//! // Or start from defaults
//! let config = CorpusConfig::new("drawings", "category_timecond_participant");
//! # Ok::<(), drawing_features::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`QuantizerConfig`]: perceptual merge tolerance and palette size cap
//! - [`CorpusConfig`]: input directory, extension filter, filename schema

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{quantization, schema};
use crate::error::{AnalysisError, Result};

/// Color quantization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizerConfig {
    /// Merge tolerance, 0 (exact histogram) to 100 (aggressive merging)
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,

    /// Maximum number of palette entries retained per image
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,
}

fn default_tolerance() -> u8 {
    quantization::DEFAULT_TOLERANCE
}

fn default_max_colors() -> usize {
    quantization::DEFAULT_MAX_COLORS
}

fn default_image_extension() -> String {
    schema::DEFAULT_IMAGE_EXTENSION.to_string()
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            tolerance: quantization::DEFAULT_TOLERANCE,
            max_colors: quantization::DEFAULT_MAX_COLORS,
        }
    }
}

impl QuantizerConfig {
    /// Create a quantizer configuration, validating both parameters
    pub fn new(tolerance: u8, max_colors: usize) -> Result<Self> {
        let config = Self {
            tolerance,
            max_colors,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check tolerance and palette size ranges
    pub fn validate(&self) -> Result<()> {
        if self.tolerance > quantization::MAX_TOLERANCE {
            return Err(AnalysisError::invalid_parameter(
                "tolerance",
                self.tolerance,
                format!("must be within 0..={}", quantization::MAX_TOLERANCE),
            ));
        }
        if self.max_colors == 0 {
            return Err(AnalysisError::invalid_parameter(
                "max_colors",
                self.max_colors,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Complete corpus analysis configuration.
///
/// Serializable to JSON so a corpus run can be reproduced later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory containing the drawings (not searched recursively)
    pub input_dir: PathBuf,

    /// File name suffix selecting drawings, e.g. ".png"
    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Underscore-delimited field names, e.g. "category_timecond_participant"
    pub schema: String,

    /// Quantization settings
    #[serde(default)]
    pub quantizer: QuantizerConfig,

    /// Process images on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

impl CorpusConfig {
    /// Create a configuration with default extension and quantizer settings
    pub fn new(input_dir: impl Into<PathBuf>, schema: impl Into<String>) -> Self {
        Self {
            input_dir: input_dir.into(),
            image_extension: default_image_extension(),
            schema: schema.into(),
            quantizer: QuantizerConfig::default(),
            parallel: false,
        }
    }

    /// Check the schema and quantizer settings
    pub fn validate(&self) -> Result<()> {
        if self.schema.trim().is_empty() {
            return Err(AnalysisError::invalid_parameter(
                "schema",
                "\"\"",
                "must name at least one field",
            ));
        }
        self.quantizer.validate()
    }

    /// Extension normalized to carry a leading dot
    pub fn extension_suffix(&self) -> String {
        if self.image_extension.is_empty() || self.image_extension.starts_with('.') {
            self.image_extension.clone()
        } else {
            format!(".{}", self.image_extension)
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("cannot read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("cannot parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("cannot serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("cannot write {}", path.display()), e)
        })?;
        Ok(())
    }
}
