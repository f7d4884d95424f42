//! Conversion of team resources CSV exports into PostgreSQL seed scripts.
//!
//! The pipeline has three pure stages plus file I/O at the edges:
//!
//! - [`reconstruct_rows`] — glues physical lines back into logical CSV rows
//!   when quoted fields contain newlines.
//! - [`parse_records`] — splits rows into fields and keys them by header.
//! - [`render_sql`] — cleans, escapes and serializes the records as one
//!   multi-row `INSERT INTO public.resources`.
//!
//! [`convert`] runs all three and returns a [`Conversion`] summary. Problems
//! with individual rows are collected as warnings and never abort a run.
//!
//! # Example
//!
//! ```
//! use resources_sql_core::{GeneratorConfig, convert};
//!
//! let csv = "Name,Primary,Secondary\nO'Brien Tool,,\"a, b\"\n";
//! let out = convert(csv, &GeneratorConfig::default());
//!
//! assert_eq!(out.rows_written, 1);
//! assert!(out.sql.contains("('O''Brien Tool', 'Other', ARRAY['a', 'b'], NULL"));
//! ```

mod config;
mod convert;
mod emit;
mod error;
mod files;
mod record;
mod rows;

pub use config::{DEFAULT_CATEGORY, DEFAULT_TABLE, GeneratorConfig};
pub use convert::{Conversion, convert};
pub use emit::{
    COLUMNS, EMPTY_ARRAY, ResourceRow, build_rows, clean_scalar, escape_sql_string, format_array,
    render_sql, source, split_tags,
};
pub use error::{ConvertError, Result};
pub use files::{
    DEFAULT_INPUT_FILE, default_input_path, default_output_path, output_path_for, read_input,
    write_output,
};
pub use record::{ParsedRecords, Record, parse_header, parse_records, split_fields};
pub use rows::reconstruct_rows;
