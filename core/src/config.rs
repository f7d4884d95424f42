//! Generator configuration.
//!
//! Controls the target table, the fallback category and the comment header
//! written at the top of the script. Every field has a default, so a config
//! file only needs the values it overrides.
//!
//! # Example YAML
//!
//! ```yaml
//! table: staging.resources
//! default_category: Uncategorized
//! header_comments:
//!   - Insert team resources from CSV
//!   - Generated from Team Resources-Grid view.csv
//! output: /tmp/insert-resources.sql
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Table the generated `INSERT` targets.
pub const DEFAULT_TABLE: &str = "public.resources";

/// Category used when a record's `Primary` column is blank.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Settings for one conversion run.
///
/// # Examples
///
/// ```
/// # use resources_sql_core::GeneratorConfig;
/// let config = GeneratorConfig::default();
/// assert_eq!(config.table, "public.resources");
/// assert_eq!(config.default_category, "Other");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Schema-qualified table name, e.g. `public.resources`.
    pub table: String,
    /// Value written to `primary_category` when the source is blank.
    pub default_category: String,
    /// Lines emitted as `-- ` comments before the statement.
    pub header_comments: Vec<String>,
    /// Overrides the default output location when set.
    pub output: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            header_comments: vec![
                "Insert team resources from CSV".to_string(),
                "Generated from Team Resources-Grid view.csv".to_string(),
            ],
            output: None,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a YAML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`] if the file cannot be read,
    /// [`ConvertError::Yaml`] if parsing fails, or
    /// [`ConvertError::InvalidConfig`] if a value is rejected by
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| ConvertError::io(path, err))?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML string and validates it.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that end up verbatim in the generated SQL.
    ///
    /// The table name is written as an identifier without quoting, so it may
    /// only contain ASCII alphanumerics, underscores and a schema dot.
    /// Comment lines must stay on one line each.
    pub fn validate(&self) -> Result<()> {
        let table_ok = !self.table.is_empty()
            && !self.table.starts_with('.')
            && !self.table.ends_with('.')
            && self
                .table
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.'));
        if !table_ok {
            return Err(ConvertError::InvalidConfig(format!(
                "table '{}' must contain only ASCII alphanumerics, '_' and '.'",
                self.table
            )));
        }
        if self.default_category.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "default_category must not be blank".to_string(),
            ));
        }
        if let Some(line) = self
            .header_comments
            .iter()
            .find(|line| line.contains(['\n', '\r']))
        {
            return Err(ConvertError::InvalidConfig(format!(
                "header comment {line:?} spans multiple lines"
            )));
        }
        Ok(())
    }
}
