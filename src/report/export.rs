//! CSV serialization of the displayed table
//!
//! Matches the export format consumers already ingest: every non-numeric
//! cell is double-quoted (embedded quotes doubled), the Score column is
//! written bare. Five fixed columns, so the writer is a few lines rather
//! than a dependency.

use super::table::{TableRow, TABLE_COLUMNS};

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serialize table rows as CSV, header included.
pub fn to_csv(rows: &[TableRow]) -> String {
    let mut out = String::new();

    let header: Vec<String> = TABLE_COLUMNS.iter().map(|col| quote(col)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        out.push_str(&quote(&row.asin));
        out.push(',');
        out.push_str(&quote(&row.date.to_string()));
        out.push(',');
        out.push_str(&quote(&row.product_type));
        out.push(',');
        out.push_str(&quote(&row.product_name));
        out.push(',');
        out.push_str(&row.score.to_string());
        out.push('\n');
    }

    out
}
