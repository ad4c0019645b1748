//! Shaping of joined rules into the app's item document.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;

use mcd_ingest::TextTable;
use mcd_model::columns::{ARTICLE_TITLE, CPT_HCPCS, REQUIRES_PA};
use mcd_model::{AppItem, ChecklistItem, ItemsDocument, RequiresPa};

use crate::error::Result;

const TITLE_PREFIX: &str = "Billing and Coding: ";

/// Run configuration for [`shape_items`].
#[derive(Debug, Clone)]
pub struct ItemOptions {
    pub program: String,
    pub states: Vec<String>,
    pub effective_date: NaiveDate,
    /// Stamped into every item's `lastUpdated`.
    pub today: NaiveDate,
}

/// Item description from an article title.
pub fn describe(article_title: &str, code: &str) -> String {
    let description = article_title.replace(TITLE_PREFIX, "");
    let description = description.trim();
    if description.is_empty() {
        format!("CPT/HCPCS {code}")
    } else {
        description.to_string()
    }
}

/// Only an exact (case-insensitive) "CONDITIONAL" stays conditional.
pub fn requires_pa_level(flag: &str) -> RequiresPa {
    if flag.eq_ignore_ascii_case("CONDITIONAL") {
        RequiresPa::Conditional
    } else {
        RequiresPa::Yes
    }
}

fn is_selected(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("TRUE") || flag.eq_ignore_ascii_case("CONDITIONAL")
}

/// The fixed documentation checklist carried by every item.
pub fn documentation_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::required("dx-notes", "Physician notes supporting medical necessity"),
        ChecklistItem::required(
            "conservative",
            "Conservative therapy documented (if applicable)",
        ),
        ChecklistItem::required("imaging", "Relevant imaging / diagnostics attached"),
    ]
}

/// One item per selected code, using the first selected row (file order)
/// for descriptive fields.
pub fn shape_items(rules: &TextTable, options: &ItemOptions) -> Result<ItemsDocument> {
    let code_idx = rules
        .column_index(rules.pick_required(&[CPT_HCPCS])?)
        .unwrap_or_default();
    let flag_idx = rules
        .column_index(rules.pick_required(&[REQUIRES_PA])?)
        .unwrap_or_default();
    let title_idx = rules.column_index(ARTICLE_TITLE);

    let effective_date = options.effective_date.format("%Y-%m-%d").to_string();
    let last_updated = options.today.format("%Y-%m-%d").to_string();

    let mut seen = HashSet::new();
    let items: Vec<AppItem> = rules
        .rows()
        .iter()
        .filter(|row| is_selected(&row[flag_idx]))
        .filter(|row| seen.insert(row[code_idx].as_str()))
        .map(|row| {
            let code = row[code_idx].as_str();
            let title = title_idx.map(|idx| row[idx].as_str()).unwrap_or("");
            AppItem {
                id: format!("{code}-{}", options.program),
                cpt: code.to_string(),
                description: describe(title, code),
                requires_pa: requires_pa_level(&row[flag_idx]),
                program: options.program.clone(),
                states: options.states.clone(),
                effective_date: effective_date.clone(),
                documentation: documentation_checklist(),
                references: Vec::new(),
                last_updated: last_updated.clone(),
            }
        })
        .collect();

    info!(
        source_rows = rules.height(),
        items = items.len(),
        "shaped app items"
    );
    Ok(ItemsDocument { items })
}
