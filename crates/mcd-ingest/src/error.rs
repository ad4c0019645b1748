//! Error types for CMS table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and resolving input tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Required CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// None of the attempted encodings decoded the file.
    #[error("could not decode {path} with encodings {tried:?}")]
    Undecodable {
        path: PathBuf,
        tried: Vec<&'static str>,
    },

    /// Encoding name passed on the command line is not recognised.
    #[error("unknown encoding '{name}' (expected utf-8, utf-8-sig, cp1252 or latin1)")]
    UnknownEncoding { name: String },

    // === Column Resolution Errors ===
    /// Table has no columns at all; the file is missing or unreadable.
    #[error("{table}: no columns found; file likely missing or unreadable")]
    NoColumns { table: String },

    /// None of the candidate names exist in the table.
    #[error("{table} missing columns. Tried {candidates:?}; found: {found:?} ...")]
    MissingColumns {
        table: String,
        candidates: Vec<String>,
        found: Vec<String>,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/cms/article.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /cms/article.csv");
    }

    #[test]
    fn test_missing_columns_names_table_and_candidates() {
        let err = IngestError::MissingColumns {
            table: "contractor".to_string(),
            candidates: vec!["contractor_id".to_string(), "carrier_id".to_string()],
            found: vec!["name".to_string()],
        };
        let message = err.to_string();
        assert!(message.starts_with("contractor missing columns."));
        assert!(message.contains("\"carrier_id\""));
        assert!(message.contains("found: [\"name\"]"));
    }
}
