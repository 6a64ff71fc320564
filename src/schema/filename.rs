//! Underscore-delimited filename schemas
//!
//! A schema such as `category_timecond_participant` names the positional
//! fields of every drawing stem in a corpus: `cat_t1_p007` binds
//! `category = cat`, `timecond = t1`, `participant = p007`.
//!
//! Stems with fewer tokens than the schema are rejected. Extra trailing
//! tokens are ignored.

use indexmap::IndexMap;

use crate::constants::{columns, schema::FIELD_SEPARATOR};
use crate::{AnalysisError, Result};

/// Parsed field-name template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameSchema {
    template: String,
    fields: Vec<String>,
}

impl FilenameSchema {
    /// Parse a schema template
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a field name is empty, repeated, or
    /// collides with one of the fixed feature columns.
    pub fn parse(template: &str) -> Result<Self> {
        let fields: Vec<String> = template
            .split(FIELD_SEPARATOR)
            .map(str::to_string)
            .collect();

        for (idx, field) in fields.iter().enumerate() {
            if field.is_empty() {
                return Err(AnalysisError::invalid_parameter(
                    "schema",
                    template,
                    format!("field {} has an empty name", idx + 1),
                ));
            }
            if fields[..idx].contains(field) {
                return Err(AnalysisError::invalid_parameter(
                    "schema",
                    template,
                    format!("field '{}' is declared twice", field),
                ));
            }
            if [columns::DRAWING_NAME, columns::PROP_NONWHITE_PX, columns::NUM_COLORS]
                .contains(&field.as_str())
            {
                return Err(AnalysisError::invalid_parameter(
                    "schema",
                    template,
                    format!("field '{}' is a reserved column name", field),
                ));
            }
        }

        Ok(Self {
            template: template.to_string(),
            fields,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Field names in positional order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Bind the tokens of a filename stem to the schema fields
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` if the stem has fewer tokens than fields
    pub fn bind(&self, stem: &str) -> Result<IndexMap<String, String>> {
        let tokens: Vec<&str> = stem.split(FIELD_SEPARATOR).collect();

        if tokens.len() < self.fields.len() {
            return Err(AnalysisError::SchemaMismatch {
                filename: stem.to_string(),
                schema: self.template.clone(),
                expected: self.fields.len(),
                found: tokens.len(),
            });
        }

        Ok(self
            .fields
            .iter()
            .zip(tokens)
            .map(|(field, token)| (field.clone(), token.to_string()))
            .collect())
    }
}

/// Parse `stem` against `template` in one step
pub fn parse_filename(stem: &str, template: &str) -> Result<IndexMap<String, String>> {
    FilenameSchema::parse(template)?.bind(stem)
}
