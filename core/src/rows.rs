//! Logical row reconstruction.
//!
//! CSV exports put literal newlines inside quoted fields, so a physical line
//! is not a record. Lines are glued back together until the buffer holds an
//! even number of `"` characters, which means every quoted section opened in
//! the record has been closed again.
//!
//! This is a counting heuristic rather than a CSV parser. A field holding an
//! odd number of literal quotes will swallow the following lines; whatever is
//! left in the buffer at end of input is still emitted so no data is lost.

use tracing::debug;

/// Splits `content` into logical CSV rows.
///
/// Blank lines are skipped while no row is in progress. Inside an open row
/// they are kept, since they belong to a multi-line quoted value.
///
/// # Examples
///
/// ```
/// use resources_sql_core::reconstruct_rows;
///
/// let rows = reconstruct_rows("Name,Notes\nTool,\"line one\nline two\"\n");
/// assert_eq!(rows, vec!["Name,Notes", "Tool,\"line one\nline two\""]);
/// ```
pub fn reconstruct_rows(content: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut buffer = String::new();
    let mut quote_count = 0usize;

    for line in content.split('\n') {
        if buffer.is_empty() && line.trim().is_empty() {
            continue;
        }

        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(line);
        quote_count += line.matches('"').count();

        if quote_count % 2 == 0 && !buffer.trim().is_empty() {
            rows.push(std::mem::take(&mut buffer));
            quote_count = 0;
        }
    }

    if !buffer.trim().is_empty() {
        debug!(quote_count, "emitting trailing row with unbalanced quotes");
        rows.push(buffer);
    }

    debug!(rows = rows.len(), "reconstructed logical rows");
    rows
}
