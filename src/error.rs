//! Error types for the drawing_features library

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for drawing_features operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error taxonomy for color profiling and corpus analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image file could not be opened or decoded
    #[error("Failed to decode image {}: {message}", .path.display())]
    ImageDecodeError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Out-of-range tolerance or palette size, or a zero-area image
    #[error("Invalid parameter: {parameter} = {value} ({reason})")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Filename stem has fewer underscore tokens than the schema declares
    #[error("Filename '{filename}' has {found} field(s), schema '{schema}' expects {expected}")]
    SchemaMismatch {
        filename: String,
        schema: String,
        expected: usize,
        found: usize,
    },

    /// Corpus directory could not be listed
    #[error("Failed to read directory {}", .path.display())]
    DirectoryReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration or result file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create an image decode error with its underlying cause
    pub fn image_decode<E>(path: &Path, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageDecodeError {
            path: path.to_path_buf(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with its underlying cause
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error is scoped to a single file.
    ///
    /// The corpus analyzer never skips failing files; a caller that wants
    /// finer granularity can re-run the remaining files one by one.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::ImageDecodeError { .. } | AnalysisError::SchemaMismatch { .. }
        )
    }

    /// Get user-friendly error description for CLI display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageDecodeError { path, .. } => format!(
                "Could not read '{}' as an image. Check the file format and the extension filter.",
                path.display()
            ),
            AnalysisError::InvalidParameter { parameter, .. } => {
                format!("The value given for '{}' is out of range.", parameter)
            }
            AnalysisError::SchemaMismatch { filename, schema, .. } => format!(
                "Drawing '{}' does not follow the naming schema '{}'. Rename it or adjust the schema.",
                filename, schema
            ),
            AnalysisError::DirectoryReadError { path, .. } => {
                format!("Could not list drawings in '{}'.", path.display())
            }
            AnalysisError::ConfigError { .. } => {
                "Could not read or write a JSON file. Check the path and its contents.".to_string()
            }
        }
    }
}
