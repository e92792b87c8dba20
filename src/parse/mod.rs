//! Record parser for the tag-delimited review ingestion format
//!
//! Input documents contain zero or more review blocks, each introduced by a
//! literal `<review>` marker and carrying six field blocks delimited by
//! literal open/close tag pairs (no fixed field order). Extraction is purely
//! lexical: the substring between the first occurrence of `<tag>` and the
//! first following `</tag>`, verbatim. Overlapping or mis-ordered tags
//! therefore produce garbage field content rather than a detected error —
//! an inherited fragility of the format, not a feature.

use crate::record::REVIEW_DATE_FORMAT;
use chrono::NaiveDate;
use thiserror::Error;

/// Marker that begins each review block.
pub const RECORD_MARKER: &str = "<review>";

/// Errors from parsing a single review block.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A field's open or close tag is absent from the block.
    #[error("malformed record: missing <{field}> field")]
    MissingField { field: &'static str },

    /// The date field does not match the "Month day, year" pattern.
    #[error("invalid review date: {value:?}")]
    InvalidDate { value: String },
}

/// The six raw fields of one review block, with the date already parsed.
///
/// Everything but `date` is the verbatim substring between its tag pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReview {
    pub product_type: String,
    pub product_name: String,
    pub title: String,
    pub date: NaiveDate,
    pub asin: String,
    pub review_text: String,
}

/// Split raw document text into per-record chunks.
///
/// Splits on the literal `<review>` marker and discards any preamble before
/// the first marker. Text with no marker yields an empty iterator.
pub fn split_records(text: &str) -> impl Iterator<Item = &str> {
    text.split(RECORD_MARKER).skip(1)
}

/// Extract the substring between the first `<field>` and the first
/// following `</field>`.
fn extract_field<'a>(chunk: &'a str, field: &'static str) -> Result<&'a str, ParseError> {
    let open = format!("<{}>", field);
    let close = format!("</{}>", field);

    let start = chunk
        .find(&open)
        .map(|pos| pos + open.len())
        .ok_or(ParseError::MissingField { field })?;
    let end = chunk[start..]
        .find(&close)
        .map(|pos| start + pos)
        .ok_or(ParseError::MissingField { field })?;

    Ok(&chunk[start..end])
}

/// Parse the date field, trimming surrounding whitespace first.
///
/// The source format pads field content with newlines; the date is the one
/// field where that whitespace is stripped before interpretation.
pub fn parse_review_date(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), REVIEW_DATE_FORMAT).map_err(|_| {
        ParseError::InvalidDate {
            value: value.trim().to_string(),
        }
    })
}

/// Parse one record chunk into its six typed fields.
pub fn parse_record(chunk: &str) -> Result<ParsedReview, ParseError> {
    let product_type = extract_field(chunk, "product_type")?;
    let product_name = extract_field(chunk, "product_name")?;
    let title = extract_field(chunk, "title")?;
    let date = parse_review_date(extract_field(chunk, "date")?)?;
    let asin = extract_field(chunk, "asin")?;
    let review_text = extract_field(chunk, "review_text")?;

    Ok(ParsedReview {
        product_type: product_type.to_string(),
        product_name: product_name.to_string(),
        title: title.to_string(),
        date,
        asin: asin.to_string(),
        review_text: review_text.to_string(),
    })
}
