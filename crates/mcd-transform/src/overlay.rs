//! Curated flag overlay ("WISeR codes") merged onto joined rules.

use std::collections::HashMap;
use std::path::Path;

use mcd_ingest::{TextEncoding, TextTable, load_table};
use mcd_model::columns::OVERLAY_CODE;
use mcd_model::{FlagField, Rule};

use crate::coalesce::coalesce_prefer;
use crate::error::{Result, TransformError};

/// Flag values per code. Only the first overlay row for a code is kept, so
/// merging never multiplies rules.
#[derive(Debug, Clone, Default)]
pub struct FlagOverlay {
    entries: HashMap<String, [String; 4]>,
}

impl FlagOverlay {
    /// Load an overlay CSV. The file is required once named.
    pub fn load(path: &Path, encoding: Option<TextEncoding>) -> Result<Self> {
        let table = load_table(path, "wiser_codes", encoding, true)?;
        Self::from_table(&table, path)
    }

    /// Build from a normalized table; `source` names it in errors.
    pub fn from_table(table: &TextTable, source: &Path) -> Result<Self> {
        let Some(code_idx) = table.column_index(OVERLAY_CODE) else {
            return Err(TransformError::OverlayMissingCode {
                path: source.to_path_buf(),
            });
        };
        let field_idx = FlagField::ALL.map(|field| table.column_index(field.column()));

        let mut entries = HashMap::new();
        for row in table.rows() {
            let values = field_idx.map(|idx| idx.map(|i| row[i].clone()).unwrap_or_default());
            entries.entry(row[code_idx].clone()).or_insert(values);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge onto `rules`: for each flag field a non-empty overlay value
    /// replaces the rule's value; an empty or absent one leaves it alone.
    /// Returns how many rules had a matching overlay code.
    pub fn apply(&self, rules: &mut [Rule]) -> usize {
        let mut matched = 0;
        for rule in rules.iter_mut() {
            let Some(values) = self.entries.get(&rule.cpt_hcpcs) else {
                continue;
            };
            matched += 1;
            for (field, overlay_value) in FlagField::ALL.into_iter().zip(values) {
                let merged = coalesce_prefer(overlay_value, rule.flag(field)).to_string();
                *rule.flag_mut(field) = merged;
            }
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(columns: &[&str], rows: &[&[&str]]) -> FlagOverlay {
        let table = TextTable::new(
            "wiser_codes",
            columns.iter().map(|c| (*c).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
        );
        FlagOverlay::from_table(&table, Path::new("wiser_codes.csv")).unwrap()
    }

    fn rule(code: &str, requires_pa: &str) -> Rule {
        Rule {
            cpt_hcpcs: code.to_string(),
            requires_pa: requires_pa.to_string(),
            ..Rule::default()
        }
    }

    #[test]
    fn overlay_fills_empty_base() {
        let o = overlay(&["cpt", "requires_pa"], &[&["29826", "TRUE"]]);
        let mut rules = vec![rule("29826", "")];
        assert_eq!(o.apply(&mut rules), 1);
        assert_eq!(rules[0].requires_pa, "TRUE");
    }

    #[test]
    fn overlay_wins_over_non_empty_base() {
        let o = overlay(&["cpt", "requires_pa"], &[&["29826", "TRUE"]]);
        let mut rules = vec![rule("29826", "FALSE")];
        o.apply(&mut rules);
        assert_eq!(rules[0].requires_pa, "TRUE");
    }

    #[test]
    fn unmatched_rule_is_unchanged() {
        let o = overlay(&["cpt", "requires_pa"], &[&["11111", "FALSE"]]);
        let mut rules = vec![rule("29826", "TRUE")];
        assert_eq!(o.apply(&mut rules), 0);
        assert_eq!(rules[0].requires_pa, "TRUE");
    }

    #[test]
    fn empty_overlay_value_keeps_base() {
        let o = overlay(
            &["cpt", "requires_pa", "program"],
            &[&["29826", "", "WISeR"]],
        );
        let mut rules = vec![rule("29826", "TRUE")];
        o.apply(&mut rules);
        assert_eq!(rules[0].requires_pa, "TRUE");
        assert_eq!(rules[0].program, "WISeR");
    }

    #[test]
    fn first_row_per_code_wins() {
        let o = overlay(
            &["cpt", "program"],
            &[&["29826", "WISeR"], &["29826", "Other"]],
        );
        assert_eq!(o.len(), 1);
        let mut rules = vec![rule("29826", "")];
        o.apply(&mut rules);
        assert_eq!(rules[0].program, "WISeR");
    }

    #[test]
    fn missing_code_column_is_fatal() {
        let table = TextTable::new("wiser_codes", vec!["code".to_string()], Vec::new());
        let err = FlagOverlay::from_table(&table, Path::new("w.csv")).unwrap_err();
        assert!(matches!(err, TransformError::OverlayMissingCode { .. }));
    }
}
