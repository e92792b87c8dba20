//! Reviewlens CLI — review sentiment ingestion and reporting.
//!
//! Usage:
//!   reviewlens import <files...> [--abort-on-error] [--db path]
//!   reviewlens view [--filter all|<category>] [--limit n] [--sort-by col] [--descending]
//!   reviewlens export --output table.csv [same query flags]

use clap::{Parser, Subcommand};
use reviewlens::{
    CategoryFilter, CommandSentimentClient, FailurePolicy, OpenReviewStore, ReviewlensApi,
    SortDirection, SortSpec, SqliteStore, UploadedDocument,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Category tags the standard corpus uses; any other exact value works too.
/// The filter matches the stored `product_type` verbatim, padding included —
/// corpora that pad field content with newlines store values like
/// "\nbooks\n" and must be filtered with exactly that.
const KNOWN_CATEGORIES: &str = "all, books, dvd, electronics, kitchen & housewares";

#[derive(Parser)]
#[command(
    name = "reviewlens",
    version,
    about = "Product review sentiment ingestion and aggregation"
)]
struct Cli {
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import review documents: parse, score, persist
    Import {
        /// Review document files (tag-delimited text)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Abort the whole batch on the first bad record instead of
        /// skipping it
        #[arg(long)]
        abort_on_error: bool,
        /// Sentiment adapter command fronting the analysis service
        #[arg(long, default_value = "sentiment-analyze")]
        sentiment_cmd: String,
    },
    /// Show the filtered/sorted review table and its summaries
    View {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Write the filtered/sorted review table as CSV
    Export {
        #[command(flatten)]
        query: QueryArgs,
        /// Output file path
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(clap::Args)]
struct QueryArgs {
    /// Category filter, matched verbatim against the stored product_type
    /// (padding included; corpus values may carry surrounding newlines).
    /// Known categories: all, books, dvd, electronics, kitchen & housewares
    #[arg(long, default_value = "all")]
    filter: String,

    /// Maximum number of reviews to display
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Column to sort by (Asin, Date, Typ, Name & Author, Score)
    #[arg(long)]
    sort_by: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    descending: bool,
}

impl QueryArgs {
    fn filter(&self) -> CategoryFilter {
        CategoryFilter::parse(&self.filter)
    }

    fn sort(&self) -> Option<SortSpec> {
        self.sort_by.as_ref().map(|column| {
            let direction = if self.descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            SortSpec::new(column, direction)
        })
    }
}

/// Get the default database path (~/.local/share/reviewlens/reviews.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    let app_dir = data_dir.join("reviewlens");
    std::fs::create_dir_all(&app_dir).ok();
    app_dir.join("reviews.db")
}

fn open_store(db: Option<PathBuf>) -> Result<Arc<SqliteStore>, String> {
    let db_path = db.unwrap_or_else(default_db_path);
    let store =
        SqliteStore::open(&db_path).map_err(|e| format!("failed to open database: {}", e))?;
    Ok(Arc::new(store))
}

async fn cmd_import(
    store: Arc<SqliteStore>,
    files: &[PathBuf],
    abort_on_error: bool,
    sentiment_cmd: &str,
) -> i32 {
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                documents.push(UploadedDocument::new(path.display().to_string(), contents))
            }
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path.display(), e);
                return 1;
            }
        }
    }

    let policy = if abort_on_error {
        FailurePolicy::AbortBatch
    } else {
        FailurePolicy::SkipRecord
    };
    let client = Arc::new(CommandSentimentClient::new(sentiment_cmd));
    let api = ReviewlensApi::with_policy(store, client, policy);

    match api.import(&documents).await {
        Ok(summary) => {
            println!("{}", summary);
            0
        }
        Err(e) => {
            eprintln!("Error: import failed: {}", e);
            1
        }
    }
}

fn cmd_view(store: Arc<SqliteStore>, query: &QueryArgs) -> i32 {
    let api = view_api(store);
    let filter = query.filter();
    let view = match api.view(&filter, query.limit as usize, query.sort().as_ref()) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("Error: query failed: {}", e);
            eprintln!("Filter: {}  (no rows)", filter);
            return 1;
        }
    };

    println!("Filter: {}", filter);
    println!("Total Reviews: {}", view.total_count);
    if view.table.is_empty() {
        println!("No reviews to display. (Known categories: {})", KNOWN_CATEGORIES);
        return 0;
    }

    println!(
        "{:<12}  {:<10}  {:<12}  {:<32}  {:>7}",
        "ASIN", "DATE", "TYP", "NAME & AUTHOR", "SCORE"
    );
    println!("{}", "-".repeat(82));
    for row in &view.table {
        println!(
            "{:<12}  {:<10}  {:<12}  {:<32}  {:>7.3}",
            row.asin,
            row.date,
            row.product_type.trim(),
            truncate(row.product_name.trim(), 32),
            row.score
        );
    }

    println!();
    println!("Reviews per product: {:?}", view.product_counts);
    println!("Score distribution:  {:?}", view.score_histogram);
    0
}

fn cmd_export(store: Arc<SqliteStore>, query: &QueryArgs, output: &PathBuf) -> i32 {
    let api = view_api(store);
    let csv = match api.export_csv(&query.filter(), query.limit as usize, query.sort().as_ref()) {
        Ok(csv) => csv,
        Err(e) => {
            eprintln!("Error: query failed: {}", e);
            return 1;
        }
    };
    match std::fs::write(output, csv) {
        Ok(()) => {
            println!("Wrote {}", output.display());
            0
        }
        Err(e) => {
            eprintln!("Error: cannot write '{}': {}", output.display(), e);
            1
        }
    }
}

/// Read-only API handle; view and export never call the scoring service.
fn view_api(store: Arc<SqliteStore>) -> ReviewlensApi {
    let client = Arc::new(CommandSentimentClient::new("sentiment-analyze"));
    ReviewlensApi::new(store, client)
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reviewlens=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let store = match open_store(cli.db) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Import {
            files,
            abort_on_error,
            sentiment_cmd,
        } => cmd_import(store, &files, abort_on_error, &sentiment_cmd).await,
        Commands::View { query } => cmd_view(store, &query),
        Commands::Export { query, output } => cmd_export(store, &query, &output),
    };
    std::process::exit(code);
}
