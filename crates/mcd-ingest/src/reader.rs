//! CSV file reading with encoding fallback and bad-line skipping.

use std::io::ErrorKind;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::encoding::{TextEncoding, decode_with_fallback, encodings_to_try};
use crate::error::{IngestError, Result};
use crate::table::TextTable;

/// Read a CSV file into a [`TextTable`] named `table_name`.
///
/// The file is decoded with `encoding` when given, otherwise with the first
/// of [`TextEncoding::FALLBACK_ORDER`] that succeeds. Column names are kept
/// as written; callers normalize them.
pub fn read_csv_table(
    path: &Path,
    table_name: &str,
    encoding: Option<TextEncoding>,
) -> Result<TextTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let Some((text, used)) = decode_with_fallback(&bytes, encoding) else {
        return Err(IngestError::Undecodable {
            path: path.to_path_buf(),
            tried: encodings_to_try(encoding)
                .into_iter()
                .map(TextEncoding::label)
                .collect(),
        });
    };

    let table = parse_csv_text(table_name, &text);
    debug!(
        table = table_name,
        path = %path.display(),
        encoding = %used,
        rows = table.height(),
        columns = table.width(),
        "read csv"
    );
    Ok(table)
}

/// Parse decoded CSV text with a header row.
///
/// Every value stays text and empty cells stay empty strings. Lines that the
/// CSV parser rejects, or that carry more fields than the header, are
/// skipped. Short lines are padded with empty cells.
pub fn parse_csv_text(table_name: &str, text: &str) -> TextTable {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(_) => return TextTable::empty(table_name),
    };
    let width = columns.len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };
        if record.len() > width {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    TextTable::new(table_name, columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_values_stay_text() {
        let table = parse_csv_text("t", "code,amount\n0001,1.50\n00123,\n");
        assert_eq!(table.rows()[0], vec!["0001", "1.50"]);
        assert_eq!(table.rows()[1], vec!["00123", ""]);
    }

    #[test]
    fn test_overlong_lines_are_skipped() {
        let table = parse_csv_text("t", "a,b\n1,2\n1,2,3\n4,5\n");
        assert_eq!(table.height(), 2);
        assert_eq!(table.rows()[1], vec!["4", "5"]);
    }

    #[test]
    fn test_short_lines_are_padded() {
        let table = parse_csv_text("t", "a,b,c\n1\n");
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
    }

    #[test]
    fn test_quoted_commas_are_one_field() {
        let table = parse_csv_text("t", "id,title\n1,\"Billing and Coding: Knee, Left\"\n");
        assert_eq!(table.cell(0, 1), "Billing and Coding: Knee, Left");
    }

    #[test]
    fn test_empty_text_gives_columnless_table() {
        let table = parse_csv_text("t", "");
        assert_eq!(table.width(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_cp1252_file() {
        let file = create_temp_csv(b"article_id,title\n1,Caf\xE9 \x96 Notes\n");
        let table = read_csv_table(file.path(), "article", None).unwrap();
        assert_eq!(table.cell(0, 1), "Café \u{2013} Notes");
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv_table(&dir.path().join("nope.csv"), "nope", None).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn test_explicit_encoding_failure_is_undecodable() {
        let file = create_temp_csv(b"a\n\xFF\n");
        let err = read_csv_table(file.path(), "t", Some(TextEncoding::Utf8)).unwrap_err();
        match err {
            IngestError::Undecodable { tried, .. } => assert_eq!(tried, vec!["utf-8"]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
