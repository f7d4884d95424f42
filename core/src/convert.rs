//! Whole-pipeline conversion from CSV text to SQL text.

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::emit::{build_rows, render_sql};
use crate::record::parse_records;
use crate::rows::reconstruct_rows;

/// Result of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Records that survived field splitting.
    pub records_found: usize,
    /// Tuples written to the `INSERT` statement.
    pub rows_written: usize,
    /// Skipped rows and records, in the order they were met.
    pub warnings: Vec<String>,
    /// The complete script.
    pub sql: String,
}

/// Converts CSV `content` to an SQL script.
///
/// Never fails: malformed rows are skipped and listed in
/// [`Conversion::warnings`], and an input without records still yields a
/// script.
///
/// # Examples
///
/// ```
/// use resources_sql_core::{GeneratorConfig, convert};
///
/// let csv = "Name,Primary,Secondary\n\"Tool A\",\"Dev\",\"x, y\"\nTool B,,\n";
/// let out = convert(csv, &GeneratorConfig::default());
/// assert_eq!(out.rows_written, 2);
/// assert!(out.sql.contains("('Tool A', 'Dev', ARRAY['x', 'y'], NULL"));
/// assert!(out.sql.contains("('Tool B', 'Other', ARRAY[]::TEXT[], NULL"));
/// ```
pub fn convert(content: &str, config: &GeneratorConfig) -> Conversion {
    let rows = reconstruct_rows(content);
    let parsed = parse_records(&rows);
    let (resource_rows, skipped) = build_rows(&parsed.records, config);

    let mut warnings = parsed.warnings;
    warnings.extend(skipped);

    debug!(
        rows = rows.len(),
        records = parsed.records.len(),
        written = resource_rows.len(),
        "conversion finished"
    );

    Conversion {
        records_found: parsed.records.len(),
        rows_written: resource_rows.len(),
        warnings,
        sql: render_sql(&resource_rows, config),
    }
}
