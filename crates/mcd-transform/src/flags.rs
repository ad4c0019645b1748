//! Flag derivation: target NCD/LCD documents → related articles → codes.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use mcd_ingest::{CmsFile, CmsSource, TextTable};
use mcd_model::{DEFAULT_PROGRAM, FlagRecord};

use crate::aliases;
use crate::error::Result;
use crate::targets::Targets;

/// Provenance note written on every derived flag row.
pub const DERIVED_NOTE: &str = "Derived via NCD/LCD link";
/// Value written to `requires_pa` on every derived flag row.
pub const DERIVED_REQUIRES_PA: &str = "TRUE";

/// Tables the flag deriver reads. Relation tables are empty when absent.
#[derive(Debug, Clone)]
pub struct RelationTables {
    pub article_codes: TextTable,
    pub ncd_relations: TextTable,
    pub document_relations: TextTable,
}

impl RelationTables {
    pub fn load(source: &CmsSource) -> Result<Self> {
        Ok(Self {
            article_codes: source.load(CmsFile::ArticleHcpcCode)?,
            ncd_relations: source.load(CmsFile::RelatedNcdDocuments)?,
            document_relations: source.load(CmsFile::RelatedDocuments)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FlagOptions {
    pub effective_date: NaiveDate,
}

/// Outcome of [`derive_flags`]; the article sets are kept for reporting.
#[derive(Debug, Clone, Default)]
pub struct FlagDerivation {
    pub ncd_article_ids: BTreeSet<String>,
    pub lcd_article_ids: BTreeSet<String>,
    pub records: Vec<FlagRecord>,
}

impl FlagDerivation {
    pub fn matched_articles(&self) -> usize {
        self.ncd_article_ids.union(&self.lcd_article_ids).count()
    }
}

/// Strip every "NCD" marker (any case) from a relation-table NCD id.
fn normalize_ncd_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.to_ascii_uppercase().find("NCD") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Article ids whose relation row's document column, after `normalize`,
/// is in `wanted`. Yields nothing when either column cannot be resolved.
fn related_articles(
    relations: &TextTable,
    document_candidates: &[&str],
    wanted: &BTreeSet<String>,
    normalize: impl Fn(&str) -> String,
) -> BTreeSet<String> {
    if relations.is_empty() || wanted.is_empty() {
        return BTreeSet::new();
    }
    let (Some(article_col), Some(document_col)) = (
        relations.pick(aliases::RELATION_ARTICLE_ID),
        relations.pick(document_candidates),
    ) else {
        warn!(
            table = relations.name(),
            "relation table lacks article or document column; skipped"
        );
        return BTreeSet::new();
    };
    debug!(
        table = relations.name(),
        article_col, document_col, "resolved relation columns"
    );
    let (Some(article_idx), Some(document_idx)) = (
        relations.column_index(article_col),
        relations.column_index(document_col),
    ) else {
        return BTreeSet::new();
    };
    relations
        .rows()
        .iter()
        .filter(|row| wanted.contains(&normalize(&row[document_idx])))
        .map(|row| row[article_idx].clone())
        .collect()
}

/// Map target documents to a flags table.
///
/// An empty article match is not an error: it yields no records, and the
/// writer emits a header-only file.
pub fn derive_flags(
    tables: &RelationTables,
    targets: &Targets,
    options: &FlagOptions,
) -> Result<FlagDerivation> {
    let ncd_article_ids = related_articles(
        &tables.ncd_relations,
        aliases::NCD_ID,
        &targets.ncd_numbers,
        normalize_ncd_id,
    );
    let lcd_article_ids = related_articles(
        &tables.document_relations,
        aliases::RELATED_DOCUMENT_ID,
        &targets.lcd_ids,
        |raw| raw.trim().to_uppercase(),
    );
    info!(
        ncd_articles = ncd_article_ids.len(),
        lcd_articles = lcd_article_ids.len(),
        "resolved related articles"
    );

    let article_ids: HashSet<&str> = ncd_article_ids
        .iter()
        .chain(&lcd_article_ids)
        .map(String::as_str)
        .collect();
    if article_ids.is_empty() {
        warn!("no matching article ids found for targets; check the relation files present");
        return Ok(FlagDerivation {
            ncd_article_ids,
            lcd_article_ids,
            records: Vec::new(),
        });
    }

    let codes = &tables.article_codes;
    let article_idx = codes
        .column_index(codes.pick_required(aliases::ARTICLE_ID)?)
        .unwrap_or_default();
    let code_idx = codes
        .column_index(codes.pick_required(aliases::HCPC_CODE)?)
        .unwrap_or_default();

    let effective_date = options.effective_date.format("%Y-%m-%d").to_string();
    let mut seen = HashSet::new();
    let records: Vec<FlagRecord> = codes
        .rows()
        .iter()
        .filter(|row| article_ids.contains(row[article_idx].as_str()))
        .map(|row| row[code_idx].as_str())
        .filter(|code| seen.insert(*code))
        .map(|code| FlagRecord {
            cpt: code.to_string(),
            requires_pa: DERIVED_REQUIRES_PA.to_string(),
            program: DEFAULT_PROGRAM.to_string(),
            effective_date: effective_date.clone(),
            notes: DERIVED_NOTE.to_string(),
        })
        .collect();
    info!(codes = records.len(), "derived flag rows");

    Ok(FlagDerivation {
        ncd_article_ids,
        lcd_article_ids,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ncd_marker_is_stripped_in_any_case() {
        assert_eq!(normalize_ncd_id("NCD 160.7"), "160.7");
        assert_eq!(normalize_ncd_id("ncd160.7"), "160.7");
        assert_eq!(normalize_ncd_id(" 230.18 "), "230.18");
    }

    #[test]
    fn derivation_reports_union_size() {
        let derivation = FlagDerivation {
            ncd_article_ids: ["A1", "A2"].map(String::from).into(),
            lcd_article_ids: ["A2", "A3"].map(String::from).into(),
            records: Vec::new(),
        };
        assert_eq!(derivation.matched_articles(), 3);
    }
}
