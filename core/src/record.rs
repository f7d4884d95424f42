//! Header and record parsing over reconstructed rows.
//!
//! Each logical row is split with the `csv` crate (comma separated, `"`
//! quoted, `""` for a literal quote). The first row names the columns and
//! every later row becomes a [`Record`] keyed by those names. A row that
//! cannot be mapped is skipped with a warning; it never stops the run.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// One data row, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Zips `headers` with `values`. Values past the last header are ignored.
    /// A repeated header keeps the value of its last occurrence.
    pub fn from_fields(headers: &[String], values: &[String]) -> Self {
        let fields = headers
            .iter()
            .zip(values)
            .map(|(header, value)| (header.clone(), value.clone()))
            .collect();
        Self { fields }
    }

    /// Raw value for `column`, matched case-sensitively.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Number of distinct columns held.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` when the record holds no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Output of [`parse_records`].
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    /// Column names from the first row, trimmed and without a BOM.
    pub headers: Vec<String>,
    /// Accepted records in input order.
    pub records: Vec<Record>,
    /// One message per skipped row.
    pub warnings: Vec<String>,
}

/// Splits one logical row into field values.
///
/// Quoted fields lose their delimiting quotes and `""` collapses to `"`.
/// Returns an empty list when the row holds no record at all.
pub fn split_fields(row: &str) -> csv::Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(row.as_bytes());
    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(Vec::new());
    }
    Ok(record.iter().map(str::to_string).collect())
}

/// Parses the header row into trimmed column names.
pub fn parse_header(row: &str) -> csv::Result<Vec<String>> {
    let row = row.strip_prefix(BYTE_ORDER_MARK).unwrap_or(row);
    let names = split_fields(row)?
        .iter()
        .map(|name| name.trim().trim_matches(BYTE_ORDER_MARK).to_string())
        .collect();
    Ok(names)
}

/// Parses reconstructed rows into a header and records.
///
/// Rows that fail to split, or that carry fewer values than there are
/// headers, are dropped and reported in [`ParsedRecords::warnings`].
pub fn parse_records(rows: &[String]) -> ParsedRecords {
    let mut parsed = ParsedRecords::default();
    let Some((header_row, data_rows)) = rows.split_first() else {
        debug!("no rows to parse");
        return parsed;
    };

    parsed.headers = match parse_header(header_row) {
        Ok(headers) => headers,
        Err(err) => {
            let message = format!("Error parsing header row: {err}");
            warn!("{message}");
            parsed.warnings.push(message);
            return parsed;
        }
    };
    debug!(headers = ?parsed.headers, "parsed header row");

    for (idx, row) in data_rows.iter().enumerate() {
        // Header is row 1.
        let row_number = idx + 2;
        let values = match split_fields(row) {
            Ok(values) => values,
            Err(err) => {
                let message = format!("Error parsing row {row_number}: {err}");
                warn!("{message}");
                parsed.warnings.push(message);
                continue;
            }
        };

        if values.len() < parsed.headers.len() {
            let message = format!(
                "Skipping row {row_number}: expected {} values, found {}",
                parsed.headers.len(),
                values.len()
            );
            warn!("{message}");
            parsed.warnings.push(message);
            continue;
        }

        parsed
            .records
            .push(Record::from_fields(&parsed.headers, &values));
    }

    debug!(
        records = parsed.records.len(),
        skipped = parsed.warnings.len(),
        "parsed records"
    );
    parsed
}
