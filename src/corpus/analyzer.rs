//! Corpus-wide drawing analysis
//!
//! Runs the per-image pipeline over every matching file of one directory:
//!
//! ```text
//! file -> RGB pixels -> quantized palette -> color table -> features
//!      -> filename stem -> schema fields ---------------------^
//! ```
//!
//! Any failing image aborts the whole run. Rows are ordered by path, so
//! sequential and parallel runs produce identical tables.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::{ColorQuantizer, ColorTable, ColorTableBuilder};
use crate::config::CorpusConfig;
use crate::corpus::table::{FeatureRow, ResultTable};
use crate::features::FeatureExtractor;
use crate::image_loader::{is_supported_extension, load_rgb};
use crate::schema::FilenameSchema;
use crate::{AnalysisError, Result};

/// Orchestrates feature extraction across a drawing corpus
#[derive(Debug, Clone)]
pub struct CorpusAnalyzer {
    quantizer: ColorQuantizer,
    builder: ColorTableBuilder,
    schema: FilenameSchema,
    extension: String,
    parallel: bool,
}

impl CorpusAnalyzer {
    /// Create an analyzer from a corpus configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an invalid schema or quantizer setting
    pub fn new(config: &CorpusConfig) -> Result<Self> {
        config.validate()?;
        let extension = config.extension_suffix();
        if !is_supported_extension(&extension) {
            tracing::warn!(%extension, "extension is not a known raster format");
        }
        Ok(Self {
            quantizer: ColorQuantizer::new(config.quantizer)?,
            builder: ColorTableBuilder::new(),
            schema: FilenameSchema::parse(&config.schema)?,
            extension,
            parallel: config.parallel,
        })
    }

    pub fn schema(&self) -> &FilenameSchema {
        &self.schema
    }

    /// List drawings directly inside `dir` whose name ends with the extension
    ///
    /// Matching is case-sensitive and does not descend into subdirectories.
    /// The suffix is compared on raw bytes, so names that are not valid
    /// UTF-8 are still listed and fail later in `analyze_file`. Paths are
    /// returned sorted.
    pub fn list_drawings(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let read_err = |source: std::io::Error| AnalysisError::DirectoryReadError {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if !path.is_file() {
                continue;
            }
            let matches = path.file_name().is_some_and(|name| {
                name.as_encoded_bytes()
                    .ends_with(self.extension.as_bytes())
            });
            if matches {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Decode one drawing and build its normalized color table
    pub fn color_profile(&self, path: &Path) -> Result<ColorTable> {
        let image = load_rgb(path)?;
        let quantization = self.quantizer.quantize(&image);
        self.builder
            .build(&quantization.colors, quantization.total_pixels)
            .map_err(|e| match e {
                AnalysisError::InvalidParameter { parameter, value, .. } => {
                    AnalysisError::InvalidParameter {
                        parameter,
                        value,
                        reason: format!("{} has zero area", path.display()),
                    }
                }
                other => other,
            })
    }

    /// Run the full pipeline for one drawing
    pub fn analyze_file(&self, path: &Path) -> Result<FeatureRow> {
        let drawing_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                AnalysisError::invalid_parameter(
                    "path",
                    path.display(),
                    "file name is not valid UTF-8",
                )
            })?
            .to_string();

        let table = self.color_profile(path)?;
        let fields = self.schema.bind(&drawing_name)?;

        let row = FeatureRow {
            path: path.to_path_buf(),
            prop_nonwhitepx: FeatureExtractor::non_background_proportion(&table),
            numcolors: FeatureExtractor::distinct_color_count(&table),
            drawing_name,
            fields,
        };

        tracing::debug!(
            drawing = %row.drawing_name,
            prop_nonwhitepx = row.prop_nonwhitepx,
            numcolors = row.numcolors,
            "analyzed drawing"
        );

        Ok(row)
    }

    /// Analyze every matching drawing in `dir`
    ///
    /// # Errors
    ///
    /// The first failing drawing (in path order) aborts the run with its
    /// error; no partial table is returned.
    pub fn analyze(&self, dir: &Path) -> Result<ResultTable> {
        let files = self.list_drawings(dir)?;
        tracing::info!(
            dir = %dir.display(),
            drawings = files.len(),
            extension = %self.extension,
            parallel = self.parallel,
            "analyzing corpus"
        );

        let rows: Vec<FeatureRow> = if self.parallel {
            files
                .par_iter()
                .map(|path| self.analyze_file(path))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Result<_>>()?
        } else {
            files
                .iter()
                .map(|path| self.analyze_file(path))
                .collect::<Result<_>>()?
        };

        let mut table = ResultTable::new(&self.schema);
        for row in rows {
            table.push(row);
        }
        table.sort_by_path();

        tracing::info!(rows = table.len(), "corpus analysis complete");
        Ok(table)
    }
}
