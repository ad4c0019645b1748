//! All-text table with alias-based column resolution.

use crate::columns::normalize_column_name;
use crate::error::{IngestError, Result};

/// Number of found columns quoted in a [`IngestError::MissingColumns`] error.
const FOUND_SAMPLE: usize = 12;

/// A named table whose every cell is text.
///
/// Rows always have exactly `columns.len()` cells. Missing values are empty
/// strings; nothing is ever parsed as a number or a date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Build a table, padding short rows with empty cells and truncating
    /// long ones to the header width.
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// A table with no columns and no rows (an absent optional file).
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `(row, column)`; empty for out-of-range positions.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Values of a named column in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Normalize every column name in place. Idempotent.
    pub fn normalize_columns(&mut self) {
        for column in &mut self.columns {
            *column = normalize_column_name(column);
        }
    }

    /// Builder form of [`TextTable::normalize_columns`].
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize_columns();
        self
    }

    /// First candidate present in the table's columns.
    pub fn pick<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates
            .iter()
            .copied()
            .find(|candidate| self.contains_column(candidate))
    }

    /// Like [`TextTable::pick`] but fails with a descriptive error naming the
    /// table, the candidates tried and a sample of the columns found.
    pub fn pick_required<'a>(&self, candidates: &[&'a str]) -> Result<&'a str> {
        if self.columns.is_empty() {
            return Err(IngestError::NoColumns {
                table: self.name.clone(),
            });
        }
        self.pick(candidates)
            .ok_or_else(|| IngestError::MissingColumns {
                table: self.name.clone(),
                candidates: candidates.iter().map(|c| (*c).to_string()).collect(),
                found: self.columns.iter().take(FOUND_SAMPLE).cloned().collect(),
            })
    }

    /// Append a column; `values` must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Append a column holding `value` in every row.
    pub fn push_constant_column(&mut self, name: impl Into<String>, value: &str) {
        let values = vec![value.to_string(); self.rows.len()];
        self.push_column(name, values);
    }

    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    /// Project onto `(source, output)` column pairs. Sources that do not
    /// exist yield empty columns.
    pub fn select(&self, name: impl Into<String>, columns: &[(&str, &str)]) -> TextTable {
        let indices: Vec<Option<usize>> = columns
            .iter()
            .map(|(source, _)| self.column_index(source))
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|idx| idx.map(|i| row[i].clone()).unwrap_or_default())
                    .collect()
            })
            .collect();
        TextTable::new(
            name,
            columns.iter().map(|(_, out)| (*out).to_string()).collect(),
            rows,
        )
    }

    /// Keep rows for which `keep` returns true.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[String]) -> bool) {
        self.rows.retain(|row| keep(row));
    }
}
