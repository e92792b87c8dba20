//! Aggregation engine
//!
//! Turns a page of stored reviews into the sortable table projection and
//! the three chart-ready series the serving layer displays: per-product
//! review counts, the score distribution, and the score-over-time series.
//! Everything here is pure computation over an already-fetched page.

mod export;
mod stats;
mod table;

pub use export::to_csv;
pub use stats::{product_count_distribution, score_distribution, score_time_series};
pub use table::{build_table, SortDirection, SortSpec, TableRow, TABLE_COLUMNS};
