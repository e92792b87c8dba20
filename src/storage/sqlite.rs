//! SQLite storage backend for reviews

use super::traits::{OpenReviewStore, ReviewStore, StoreError, StoreResult};
use crate::record::{CategoryFilter, Review, ReviewId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed review store
///
/// A single `reviews` table, one row per review, keyed by a fresh UUID per
/// insert. Reads come back in rowid order, which is insertion order for an
/// append-only table. Thread-safe via internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StoreResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                product_type TEXT NOT NULL,
                product_name TEXT NOT NULL,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                asin TEXT NOT NULL,
                review_text TEXT NOT NULL,
                sentiment_score REAL NOT NULL
            );

            -- Equality filtering on category is the only indexed access path
            CREATE INDEX IF NOT EXISTS idx_reviews_product_type
                ON reviews(product_type);

            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn row_to_review(row: &Row<'_>) -> rusqlite::Result<(String, Review)> {
        let date_str: String = row.get(4)?;
        Ok((
            date_str,
            Review {
                product_type: row.get(1)?,
                product_name: row.get(2)?,
                title: row.get(3)?,
                // Placeholder; replaced once the date string is parsed
                date: NaiveDate::MIN,
                asin: row.get(5)?,
                review_text: row.get(6)?,
                sentiment_score: row.get(7)?,
            },
        ))
    }

    fn parse_stored_date(date_str: &str) -> StoreResult<NaiveDate> {
        date_str
            .parse::<NaiveDate>()
            .map_err(|_| StoreError::DateParse(date_str.to_string()))
    }
}

impl ReviewStore for SqliteStore {
    fn put(&self, review: &Review) -> StoreResult<ReviewId> {
        let id = ReviewId::new();
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO reviews
                (id, product_type, product_name, title, date, asin, review_text, sentiment_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id.to_string(),
                review.product_type,
                review.product_name,
                review.title,
                review.date.to_string(),
                review.asin,
                review.review_text,
                review.sentiment_score,
            ],
        )?;
        Ok(id)
    }

    fn fetch(&self, filter: &CategoryFilter, limit: usize) -> StoreResult<Vec<Review>> {
        let conn = self.conn.lock().unwrap();
        let (sql, category) = match filter {
            CategoryFilter::All => (
                "SELECT id, product_type, product_name, title, date, asin, review_text,
                        sentiment_score
                 FROM reviews ORDER BY rowid LIMIT ?1",
                None,
            ),
            CategoryFilter::ProductType(t) => (
                "SELECT id, product_type, product_name, title, date, asin, review_text,
                        sentiment_score
                 FROM reviews WHERE product_type = ?2 ORDER BY rowid LIMIT ?1",
                Some(t.as_str()),
            ),
        };

        let mut stmt = conn.prepare(sql)?;
        let mapped: Vec<(String, Review)> = match category {
            None => stmt
                .query_map(params![limit as i64], Self::row_to_review)?
                .collect::<rusqlite::Result<_>>()?,
            Some(t) => stmt
                .query_map(params![limit as i64, t], Self::row_to_review)?
                .collect::<rusqlite::Result<_>>()?,
        };

        let mut reviews = Vec::with_capacity(mapped.len());
        for (date_str, mut review) in mapped {
            review.date = Self::parse_stored_date(&date_str)?;
            reviews.push(review);
        }
        Ok(reviews)
    }

    fn count(&self, filter: &CategoryFilter) -> StoreResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = match filter {
            CategoryFilter::All => {
                conn.query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?
            }
            CategoryFilter::ProductType(t) => conn.query_row(
                "SELECT COUNT(*) FROM reviews WHERE product_type = ?1",
                params![t],
                |row| row.get(0),
            )?,
        };
        Ok(count as usize)
    }
}

impl OpenReviewStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(product_type: &str, asin: &str, score: f64) -> Review {
        Review {
            product_type: product_type.to_string(),
            product_name: format!("{} product", product_type),
            title: "T".to_string(),
            date: NaiveDate::from_ymd_opt(2004, 6, 8).unwrap(),
            asin: asin.to_string(),
            review_text: "Great!".to_string(),
            sentiment_score: score,
        }
    }

    #[test]
    fn put_then_fetch_round_trips() {
        let store = SqliteStore::open_in_memory().unwrap();
        let original = review("books", "A1", 0.5);
        store.put(&original).unwrap();

        let fetched = store.fetch(&CategoryFilter::All, 10).unwrap();
        assert_eq!(fetched, vec![original]);
    }

    #[test]
    fn put_assigns_fresh_keys_so_duplicates_accumulate() {
        let store = SqliteStore::open_in_memory().unwrap();
        let r = review("books", "A1", 0.5);
        let id1 = store.put(&r).unwrap();
        let id2 = store.put(&r).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(store.count(&CategoryFilter::All).unwrap(), 2);
    }

    #[test]
    fn fetch_preserves_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for i in 0..5 {
            store.put(&review("books", &format!("A{}", i), 0.1)).unwrap();
        }
        let asins: Vec<String> = store
            .fetch(&CategoryFilter::All, 10)
            .unwrap()
            .into_iter()
            .map(|r| r.asin)
            .collect();
        assert_eq!(asins, vec!["A0", "A1", "A2", "A3", "A4"]);
    }

    #[test]
    fn query_limits_page_but_counts_everything() {
        let store = SqliteStore::open_in_memory().unwrap();
        for i in 0..3 {
            store.put(&review("books", &format!("B{}", i), 0.2)).unwrap();
        }
        store.put(&review("dvd", "D0", -0.3)).unwrap();

        let result = store
            .query(&CategoryFilter::ProductType("books".to_string()), 2)
            .unwrap();
        assert_eq!(result.reviews.len(), 2);
        assert_eq!(result.total_count, 3);
        assert!(result.total_count >= result.reviews.len());
    }

    #[test]
    fn category_filter_is_exact() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.put(&review("books", "A1", 0.5)).unwrap();
        store.put(&review("\nbooks\n", "A2", 0.5)).unwrap();

        let filter = CategoryFilter::ProductType("books".to_string());
        let fetched = store.fetch(&filter, 10).unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].asin, "A1");
    }

    #[test]
    fn sql_predicate_agrees_with_the_in_memory_reference() {
        // CategoryFilter::matches is the reference predicate; the SQL
        // WHERE clause must select exactly the reviews it accepts
        let store = SqliteStore::open_in_memory().unwrap();
        let all = vec![
            review("books", "A1", 0.5),
            review("\nbooks\n", "A2", 0.5),
            review("dvd", "D1", -0.3),
            review("books", "A3", 0.1),
        ];
        for r in &all {
            store.put(r).unwrap();
        }

        for value in ["all", "books", "\nbooks\n", "dvd", "missing"] {
            let filter = CategoryFilter::parse(value);
            let fetched = store.fetch(&filter, 10).unwrap();
            let expected: Vec<&Review> = all.iter().filter(|r| filter.matches(r)).collect();
            assert_eq!(fetched.iter().collect::<Vec<_>>(), expected);
            assert_eq!(store.count(&filter).unwrap(), expected.len());
        }
    }

    #[test]
    fn empty_store_queries_cleanly() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store.query(&CategoryFilter::All, 10).unwrap();
        assert!(result.reviews.is_empty());
        assert_eq!(result.total_count, 0);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.put(&review("books", "A1", 0.5)).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count(&CategoryFilter::All).unwrap(), 1);
    }
}
