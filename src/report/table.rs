//! Table projection and sorting

use crate::record::Review;
use chrono::NaiveDate;

/// Display columns, in output order.
pub const TABLE_COLUMNS: [&str; 5] = ["Asin", "Date", "Typ", "Name & Author", "Score"];

/// One displayed table row: the {Asin, Date, Typ, Name & Author, Score}
/// projection of a stored review.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub asin: String,
    pub date: NaiveDate,
    pub product_type: String,
    pub product_name: String,
    pub score: f64,
}

impl TableRow {
    fn from_review(review: &Review) -> Self {
        Self {
            asin: review.asin.clone(),
            date: review.date,
            product_type: review.product_type.clone(),
            product_name: review.product_name.clone(),
            score: review.sentiment_score,
        }
    }
}

/// Sort direction for a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A requested (column, direction) sort.
///
/// The column is matched against [`TABLE_COLUMNS`] by name; an unknown
/// name leaves rows in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

fn compare_by_column(a: &TableRow, b: &TableRow, column: &str) -> Option<std::cmp::Ordering> {
    let ordering = match column {
        "Asin" => a.asin.cmp(&b.asin),
        "Date" => a.date.cmp(&b.date),
        "Typ" => a.product_type.cmp(&b.product_type),
        "Name & Author" => a.product_name.cmp(&b.product_name),
        "Score" => a.score.total_cmp(&b.score),
        _ => return None,
    };
    Some(ordering)
}

/// Project reviews into table rows, applying the sort spec if it names a
/// known column.
///
/// Sorting is stable: rows with equal sort keys keep their relative store
/// order, in both directions. With no (or an unknown) sort column, rows
/// stay in the order the store returned them.
pub fn build_table(reviews: &[Review], sort: Option<&SortSpec>) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = reviews.iter().map(TableRow::from_review).collect();

    if let Some(spec) = sort {
        // Probe with the first row pair shape; an unknown column is a no-op
        let known = !rows.is_empty()
            && compare_by_column(&rows[0], &rows[0], &spec.column).is_some();
        if known {
            match spec.direction {
                SortDirection::Ascending => rows.sort_by(|a, b| {
                    compare_by_column(a, b, &spec.column).unwrap_or(std::cmp::Ordering::Equal)
                }),
                // Reversed comparator rather than sort-then-reverse, so
                // equal keys keep their original relative order
                SortDirection::Descending => rows.sort_by(|a, b| {
                    compare_by_column(b, a, &spec.column).unwrap_or(std::cmp::Ordering::Equal)
                }),
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(asin: &str, name: &str, score: f64, date: (i32, u32, u32)) -> Review {
        Review {
            product_type: "books".to_string(),
            product_name: name.to_string(),
            title: "T".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            asin: asin.to_string(),
            review_text: "text".to_string(),
            sentiment_score: score,
        }
    }

    #[test]
    fn no_sort_preserves_store_order() {
        let reviews = vec![
            review("B", "x", 0.2, (2004, 6, 8)),
            review("A", "y", 0.1, (2004, 6, 9)),
        ];
        let rows = build_table(&reviews, None);
        assert_eq!(rows[0].asin, "B");
        assert_eq!(rows[1].asin, "A");
    }

    #[test]
    fn unknown_column_preserves_store_order() {
        let reviews = vec![
            review("B", "x", 0.2, (2004, 6, 8)),
            review("A", "y", 0.1, (2004, 6, 9)),
        ];
        let rows = build_table(&reviews, Some(&SortSpec::ascending("Title")));
        assert_eq!(rows[0].asin, "B");
    }

    #[test]
    fn sorts_ascending_by_asin() {
        let reviews = vec![
            review("B", "x", 0.2, (2004, 6, 8)),
            review("A", "y", 0.1, (2004, 6, 9)),
            review("C", "z", 0.3, (2004, 6, 10)),
        ];
        let rows = build_table(&reviews, Some(&SortSpec::ascending("Asin")));
        let asins: Vec<&str> = rows.iter().map(|r| r.asin.as_str()).collect();
        assert_eq!(asins, vec!["A", "B", "C"]);
    }

    #[test]
    fn sorts_by_date() {
        let reviews = vec![
            review("A", "x", 0.2, (2005, 1, 1)),
            review("B", "y", 0.1, (2004, 6, 9)),
        ];
        let rows = build_table(&reviews, Some(&SortSpec::ascending("Date")));
        assert_eq!(rows[0].asin, "B");
    }

    #[test]
    fn descending_score_sort_is_stable() {
        // Scores [0.2, -0.1, 0.2]: both 0.2 rows keep their relative
        // order, ahead of the -0.1 row
        let reviews = vec![
            review("first", "x", 0.2, (2004, 6, 8)),
            review("neg", "y", -0.1, (2004, 6, 9)),
            review("second", "z", 0.2, (2004, 6, 10)),
        ];
        let rows = build_table(&reviews, Some(&SortSpec::descending("Score")));
        let asins: Vec<&str> = rows.iter().map(|r| r.asin.as_str()).collect();
        assert_eq!(asins, vec!["first", "second", "neg"]);
    }

    #[test]
    fn ascending_sort_is_stable_on_equal_keys() {
        let reviews = vec![
            review("a1", "same", 0.5, (2004, 6, 8)),
            review("a2", "same", 0.5, (2004, 6, 9)),
            review("a3", "same", 0.5, (2004, 6, 10)),
        ];
        let rows = build_table(&reviews, Some(&SortSpec::ascending("Name & Author")));
        let asins: Vec<&str> = rows.iter().map(|r| r.asin.as_str()).collect();
        assert_eq!(asins, vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn empty_input_builds_empty_table() {
        assert!(build_table(&[], Some(&SortSpec::ascending("Score"))).is_empty());
    }
}
