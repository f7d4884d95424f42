//! SQL rendering for resource records.
//!
//! Every value is written as a literal: scalars become `'...'` strings with
//! embedded single quotes doubled, blanks become `NULL`, and tags become a
//! PostgreSQL `ARRAY[...]` of string literals. Nothing from the CSV reaches
//! the script without passing through [`escape_sql_string`].

use tracing::warn;

use crate::config::GeneratorConfig;
use crate::record::Record;

/// Literal written for a record with no tags.
pub const EMPTY_ARRAY: &str = "ARRAY[]::TEXT[]";

/// Destination columns, in `INSERT` order.
pub const COLUMNS: [&str; 10] = [
    "name",
    "primary_category",
    "secondary_tags",
    "link",
    "source",
    "description",
    "username",
    "password",
    "instructions",
    "documentation",
];

/// CSV header names feeding the destination columns.
///
/// Headers are matched case-sensitively against the CSV header row.
pub mod source {
    /// Feeds `name`. Required.
    pub const NAME: &str = "Name";
    /// Feeds `primary_category`.
    pub const PRIMARY: &str = "Primary";
    /// Comma-separated tags feeding `secondary_tags`.
    pub const SECONDARY: &str = "Secondary";
    /// Feeds `link`.
    pub const LINK: &str = "Link";
    /// Feeds `source`.
    pub const SOURCE: &str = "Source";
    /// Feeds `description`.
    pub const DESCRIPTION: &str = "Description";
    /// Feeds `username`.
    pub const USERNAME: &str = "Username";
    /// Feeds `password`.
    pub const PASSWORD: &str = "Password";
    /// Feeds `instructions`.
    pub const INSTRUCTIONS: &str = "Instructions";
    /// Feeds `documentation`.
    pub const DOCUMENTATION: &str = "Documentation";
}

/// Strips one pair of wrapping double quotes, if present.
fn strip_outer_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Normalizes a raw field into a single-line value.
///
/// Trims, drops one surviving pair of outer double quotes and turns `\n`
/// and `\r` into spaces. Whitespace inside the stripped quotes is kept.
/// Returns `None` when only whitespace is left.
///
/// # Examples
///
/// ```
/// use resources_sql_core::clean_scalar;
///
/// assert_eq!(clean_scalar("  \"Tool A\" "), Some("Tool A".to_string()));
/// assert_eq!(clean_scalar("two\nlines"), Some("two lines".to_string()));
/// assert_eq!(clean_scalar("\" padded \""), Some(" padded ".to_string()));
/// assert_eq!(clean_scalar(" \"\" "), None);
/// ```
pub fn clean_scalar(raw: &str) -> Option<String> {
    let unquoted = strip_outer_quotes(raw.trim());
    let single_line = unquoted.replace(['\n', '\r'], " ");
    if single_line.trim().is_empty() {
        None
    } else {
        Some(single_line)
    }
}

/// Renders a scalar as an SQL literal, or `NULL` when absent or blank.
///
/// # Examples
///
/// ```
/// use resources_sql_core::escape_sql_string;
///
/// assert_eq!(escape_sql_string(Some("O'Brien")), "'O''Brien'");
/// assert_eq!(escape_sql_string(None), "NULL");
/// ```
pub fn escape_sql_string(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => quote_literal(value),
        _ => "NULL".to_string(),
    }
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Splits a comma-separated tag field into trimmed, non-blank tags.
pub fn split_tags(raw: &str) -> Vec<String> {
    strip_outer_quotes(raw.trim())
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Renders tags as a `TEXT[]` literal.
///
/// # Examples
///
/// ```
/// use resources_sql_core::{format_array, split_tags};
///
/// assert_eq!(format_array(&split_tags("a, b, ,c")), "ARRAY['a', 'b', 'c']");
/// assert_eq!(format_array(&[]), "ARRAY[]::TEXT[]");
/// ```
pub fn format_array(tags: &[String]) -> String {
    if tags.is_empty() {
        return EMPTY_ARRAY.to_string();
    }
    let items: Vec<String> = tags.iter().map(|tag| quote_literal(tag)).collect();
    format!("ARRAY[{}]", items.join(", "))
}

/// One cleaned output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRow {
    pub name: String,
    pub primary_category: String,
    pub secondary_tags: Vec<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub instructions: Option<String>,
    pub documentation: Option<String>,
}

impl ResourceRow {
    /// Maps a record onto the output columns.
    ///
    /// Returns `None` when the `Name` column is missing or blank after
    /// cleaning. A blank `Primary` falls back to `default_category`.
    pub fn from_record(record: &Record, default_category: &str) -> Option<Self> {
        let scalar = |column: &str| record.get(column).and_then(clean_scalar);

        // Only the name is trimmed after quote stripping.
        let name = scalar(source::NAME)?.trim().to_string();
        Some(Self {
            name,
            primary_category: scalar(source::PRIMARY)
                .unwrap_or_else(|| default_category.to_string()),
            secondary_tags: record
                .get(source::SECONDARY)
                .map(split_tags)
                .unwrap_or_default(),
            link: scalar(source::LINK),
            source: scalar(source::SOURCE),
            description: scalar(source::DESCRIPTION),
            username: scalar(source::USERNAME),
            password: scalar(source::PASSWORD),
            instructions: scalar(source::INSTRUCTIONS),
            documentation: scalar(source::DOCUMENTATION),
        })
    }

    /// Renders the parenthesized `VALUES` tuple, indented by two spaces.
    pub fn to_values_tuple(&self) -> String {
        let values = [
            escape_sql_string(Some(&self.name)),
            escape_sql_string(Some(&self.primary_category)),
            format_array(&self.secondary_tags),
            escape_sql_string(self.link.as_deref()),
            escape_sql_string(self.source.as_deref()),
            escape_sql_string(self.description.as_deref()),
            escape_sql_string(self.username.as_deref()),
            escape_sql_string(self.password.as_deref()),
            escape_sql_string(self.instructions.as_deref()),
            escape_sql_string(self.documentation.as_deref()),
        ];
        format!("  ({})", values.join(", "))
    }
}

/// Maps records to rows, dropping those without a name.
///
/// Returns the accepted rows and one warning per dropped record.
pub fn build_rows(records: &[Record], config: &GeneratorConfig) -> (Vec<ResourceRow>, Vec<String>) {
    let mut rows = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        match ResourceRow::from_record(record, &config.default_category) {
            Some(row) => rows.push(row),
            None => {
                let message = format!("Skipping record {} with no name", idx + 1);
                warn!("{message}");
                warnings.push(message);
            }
        }
    }
    (rows, warnings)
}

/// Renders the complete script.
///
/// Layout: comment lines, a blank line, the `INSERT INTO ... VALUES` line,
/// a blank line, the tuples joined by `,\n`, then `;` and a trailing newline.
/// The layout is the same when there are no rows.
pub fn render_sql(rows: &[ResourceRow], config: &GeneratorConfig) -> String {
    let mut lines: Vec<String> = config
        .header_comments
        .iter()
        .map(|comment| format!("-- {comment}"))
        .collect();

    if rows.is_empty() {
        warn!("no resource rows to insert; VALUES list is empty");
    }

    lines.push(String::new());
    lines.push(format!(
        "INSERT INTO {} ({}) VALUES",
        config.table,
        COLUMNS.join(", ")
    ));
    lines.push(String::new());
    let tuples: Vec<String> = rows.iter().map(ResourceRow::to_values_tuple).collect();
    lines.push(tuples.join(",\n"));
    lines.push(";".to_string());
    lines.push(String::new());
    lines.join("\n")
}
