//! Chart-ready series over table rows

use super::table::TableRow;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Review count per distinct product, one entry per product in first-seen
/// row order. Histogram-ready: the chart bins the counts themselves.
///
/// Sum of the counts equals the row count; no product appears with a
/// count of zero.
pub fn product_count_distribution(rows: &[TableRow]) -> Vec<u64> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<u64> = Vec::new();

    for row in rows {
        match index.get(row.product_name.as_str()) {
            Some(&i) => counts[i] += 1,
            None => {
                index.insert(row.product_name.as_str(), counts.len());
                counts.push(1);
            }
        }
    }

    counts
}

/// The raw score of every row, in row order. Histogram-ready.
pub fn score_distribution(rows: &[TableRow]) -> Vec<f64> {
    rows.iter().map(|row| row.score).collect()
}

/// (date, score) pairs in row order, for a scatter-style timeline.
///
/// Row order is whatever the table projection produced, so an active sort
/// carries through to the series.
pub fn score_time_series(rows: &[TableRow]) -> Vec<(NaiveDate, f64)> {
    rows.iter().map(|row| (row.date, row.score)).collect()
}
