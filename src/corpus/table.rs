//! Per-drawing feature rows and the corpus result table

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::columns;
use crate::schema::FilenameSchema;
use crate::{AnalysisError, Result};

/// Features and filename metadata of one drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Source image path
    pub path: PathBuf,
    /// File stem of the drawing
    #[serde(rename = "drawingname")]
    pub drawing_name: String,
    /// Share of pixels that are not background white
    pub prop_nonwhitepx: f64,
    /// Retained palette size
    pub numcolors: usize,
    /// Schema fields in schema order
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

impl FeatureRow {
    /// Look up a schema field value
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Row-oriented result of a corpus run, one row per drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl ResultTable {
    /// Empty table whose columns are fixed by the schema
    pub fn new(schema: &FilenameSchema) -> Self {
        let mut cols = vec![
            columns::DRAWING_NAME.to_string(),
            columns::PROP_NONWHITE_PX.to_string(),
            columns::NUM_COLORS.to_string(),
        ];
        cols.extend(schema.fields().iter().cloned());
        Self {
            columns: cols,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: FeatureRow) {
        self.rows.push(row);
    }

    /// Order rows by image path
    pub fn sort_by_path(&mut self) {
        self.rows.sort_by(|a, b| a.path.cmp(&b.path));
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for the given image path
    pub fn get(&self, path: &Path) -> Option<&FeatureRow> {
        self.rows.iter().find(|row| row.path == path)
    }

    /// Row for the given drawing name
    pub fn by_name(&self, drawing_name: &str) -> Option<&FeatureRow> {
        self.rows.iter().find(|row| row.drawing_name == drawing_name)
    }

    /// Serialize rows as a JSON array of records
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.rows)
            .map_err(|e| AnalysisError::config("cannot serialize result table", e))
    }

    /// Write rows as a JSON array of records
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| AnalysisError::config(format!("cannot write {}", path.display()), e))
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a FeatureRow;
    type IntoIter = std::slice::Iter<'a, FeatureRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
