// ============================================
// Candidate Loader
// ============================================
//
// Loads the user-supplied article table (CSV) into Candidate records.
// Validation is wholesale: a table missing any required column fails
// with every missing name listed, and an empty required cell fails the
// whole table rather than dropping the row.

use crate::error::{RankerError, Result};
use crate::models::Candidate;
use std::io::Read;
use tracing::info;

/// Required columns, exactly these header names. The `text` column maps
/// to `Candidate::full_text`.
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "description", "text", "url"];

const DEFAULT_FIELD: &str = "N/A";

pub fn load_candidates_csv<R: Read>(reader: R) -> Result<Vec<Candidate>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| position(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RankerError::MissingColumns(missing));
    }

    // Unwraps are safe: presence was just validated.
    let title_idx = position("title").unwrap();
    let description_idx = position("description").unwrap();
    let text_idx = position("text").unwrap();
    let url_idx = position("url").unwrap();

    // One export variant writes the author column as `author/0`.
    let author_idx = position("author").or_else(|| position("author/0"));
    let publisher_idx = position("publisher");
    let image_idx = position("image");

    let mut candidates = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = (row + 2) as u64;

        let required = |idx: usize, field: &'static str| -> Result<String> {
            let value = record.get(idx).unwrap_or("").trim();
            if value.is_empty() {
                Err(RankerError::InvalidRow { line, field })
            } else {
                Ok(value.to_string())
            }
        };
        let optional = |idx: Option<usize>, default: &str| -> String {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        candidates.push(Candidate {
            title: required(title_idx, "title")?,
            description: required(description_idx, "description")?,
            full_text: required(text_idx, "text")?,
            url: required(url_idx, "url")?,
            author: optional(author_idx, DEFAULT_FIELD),
            publisher: optional(publisher_idx, DEFAULT_FIELD),
            image: optional(image_idx, ""),
        });
    }

    info!(candidates = candidates.len(), "loaded candidate table");
    Ok(candidates)
}
