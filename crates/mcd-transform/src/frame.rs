//! Table-level operations used by the join pipeline.
//!
//! These mirror the handful of dataframe operations the pipeline needs:
//! a left-outer join with pandas-style `_x`/`_y` collision suffixes, keyed
//! deduplication, and suffix coalescing.

use std::collections::{HashMap, HashSet};

use mcd_ingest::TextTable;

use crate::coalesce::coalesce_prefer;

pub const LEFT_SUFFIX: &str = "_x";
pub const RIGHT_SUFFIX: &str = "_y";

/// Left-outer join `right` onto `left`.
///
/// Every left row is kept. A left row matching several right rows is
/// repeated once per match; an unmatched row gets empty attached cells.
/// `attach` lists `(right column, output name)` pairs; the right key itself
/// is never carried. When an output name already exists on the left, the
/// left column is renamed with [`LEFT_SUFFIX`] and the attached one gets
/// [`RIGHT_SUFFIX`]. Empty keys never match.
pub fn left_join(
    left: &TextTable,
    right: &TextTable,
    left_key: &str,
    right_key: &str,
    attach: &[(&str, &str)],
) -> TextTable {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    if let Some(key_idx) = right.column_index(right_key) {
        for (row_idx, row) in right.rows().iter().enumerate() {
            let key = row[key_idx].as_str();
            if !key.is_empty() {
                index.entry(key).or_default().push(row_idx);
            }
        }
    }
    let attach_idx: Vec<Option<usize>> = attach
        .iter()
        .map(|(column, _)| right.column_index(column))
        .collect();

    let mut columns: Vec<String> = left.columns().to_vec();
    let mut attached_names = Vec::with_capacity(attach.len());
    for (_, name) in attach {
        if let Some(pos) = columns.iter().position(|c| c == name) {
            columns[pos] = format!("{name}{LEFT_SUFFIX}");
            attached_names.push(format!("{name}{RIGHT_SUFFIX}"));
        } else {
            attached_names.push((*name).to_string());
        }
    }
    columns.extend(attached_names);

    let left_key_idx = left.column_index(left_key);
    let mut rows = Vec::with_capacity(left.height());
    for row in left.rows() {
        let key = left_key_idx.map(|idx| row[idx].as_str()).unwrap_or("");
        match index.get(key) {
            Some(matches) => {
                for &right_idx in matches {
                    let mut out = row.clone();
                    for idx in &attach_idx {
                        out.push(
                            idx.map(|i| right.cell(right_idx, i).to_string())
                                .unwrap_or_default(),
                        );
                    }
                    rows.push(out);
                }
            }
            None => {
                let mut out = row.clone();
                out.resize(row.len() + attach.len(), String::new());
                rows.push(out);
            }
        }
    }
    TextTable::new(left.name(), columns, rows)
}

/// Drop rows whose `keys` tuple was already seen, keeping the first.
/// Absent key columns count as empty.
pub fn dedupe_by(table: &mut TextTable, keys: &[&str]) {
    let key_idx: Vec<Option<usize>> = keys.iter().map(|k| table.column_index(k)).collect();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    table.retain_rows(|row| {
        let composite: Vec<String> = key_idx
            .iter()
            .map(|idx| idx.map(|i| row[i].clone()).unwrap_or_default())
            .collect();
        seen.insert(composite)
    });
}

/// Collapse `name_x` / `name_y` into `name`, preferring the `_y` value.
///
/// When neither suffixed column exists the plain column is left alone, or
/// added as all-empty if absent.
pub fn coalesce_suffixed(table: &mut TextTable, name: &str) {
    let left_name = format!("{name}{LEFT_SUFFIX}");
    let right_name = format!("{name}{RIGHT_SUFFIX}");
    let left = table.column_values(&left_name);
    let right = table.column_values(&right_name);
    if left.is_none() && right.is_none() {
        if !table.contains_column(name) {
            table.push_constant_column(name, "");
        }
        return;
    }
    let height = table.height();
    let merged: Vec<String> = (0..height)
        .map(|row| {
            let preferred = right.as_ref().map(|v| v[row]).unwrap_or("");
            let fallback = left.as_ref().map(|v| v[row]).unwrap_or("");
            coalesce_prefer(preferred, fallback).to_string()
        })
        .collect();
    table.drop_column(&left_name);
    table.drop_column(&right_name);
    table.push_column(name, merged);
}
