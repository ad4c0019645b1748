//! The article → code → contractor → state join pipeline.
//!
//! Stages, in order:
//! 1. Project the article/code link rows onto canonical names
//! 2. Attach article title, contractor, contractor name, state, abbreviation
//! 3. Attach reference URL and latest revision date when those tables exist
//! 4. Coalesce `last_updated`, deduplicate, and slice to [`Rule`] rows
//!
//! Overlay merging and sorting are applied by [`join_rules`].

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use mcd_ingest::{CmsFile, CmsSource, TextTable};
use mcd_model::Rule;
use mcd_model::columns::{
    ARTICLE_ID, ARTICLE_TITLE, CMS_ARTICLE_URL, CPT_HCPCS, LAST_UPDATED, MAC_CARRIER, STATE,
};

use crate::aliases;
use crate::error::Result;
use crate::frame::{coalesce_suffixed, dedupe_by, left_join};
use crate::overlay::FlagOverlay;

/// Working column holding the contractor id between joins.
const CONTRACTOR_ID: &str = "contractor_id";
/// Working column holding the state id between joins.
const STATE_ID: &str = "state_id";

/// The CMS tables the joiner reads, already column-normalized.
#[derive(Debug, Clone)]
pub struct CmsTables {
    pub article: TextTable,
    pub article_codes: TextTable,
    pub article_contractors: TextTable,
    pub contractors: TextTable,
    pub jurisdictions: TextTable,
    pub states: TextTable,
    /// Optional; empty when absent.
    pub urls: TextTable,
    /// Optional; empty when absent.
    pub revisions: TextTable,
}

impl CmsTables {
    /// Load all tables from `source`. Any missing required file is fatal.
    pub fn load(source: &CmsSource) -> Result<Self> {
        Ok(Self {
            article: source.load(CmsFile::Article)?,
            article_codes: source.load(CmsFile::ArticleHcpcCode)?,
            article_contractors: source.load(CmsFile::ArticleContractor)?,
            contractors: source.load(CmsFile::Contractor)?,
            jurisdictions: source.load(CmsFile::ContractorJurisdiction)?,
            states: source.load(CmsFile::StateLookup)?,
            urls: source.load(CmsFile::ArticleUrls)?,
            revisions: source.load(CmsFile::ArticleRevisionHistory)?,
        })
    }
}

/// Resolved column names for every table.
#[derive(Debug)]
struct ResolvedColumns {
    article_id: &'static str,
    article_title: &'static str,
    code_article_id: &'static str,
    code: &'static str,
    link_article_id: &'static str,
    link_contractor_id: &'static str,
    contractor_id: &'static str,
    contractor_name: &'static str,
    jurisdiction_contractor_id: &'static str,
    jurisdiction_state_id: &'static str,
    state_id: &'static str,
    state_abbr: &'static str,
    url_article_id: Option<&'static str>,
    url: Option<&'static str>,
    revision_article_id: Option<&'static str>,
    revision_date: Option<&'static str>,
}

impl ResolvedColumns {
    fn resolve(tables: &CmsTables) -> Result<Self> {
        Ok(Self {
            article_id: tables.article.pick_required(aliases::ARTICLE_ID)?,
            article_title: tables.article.pick_required(aliases::ARTICLE_TITLE)?,
            code_article_id: tables.article_codes.pick_required(aliases::ARTICLE_ID)?,
            code: tables.article_codes.pick_required(aliases::HCPC_CODE)?,
            link_article_id: tables.article_contractors.pick_required(aliases::ARTICLE_ID)?,
            link_contractor_id: tables
                .article_contractors
                .pick_required(aliases::CONTRACTOR_LINK_ID)?,
            contractor_id: tables.contractors.pick_required(aliases::CONTRACTOR_ID)?,
            contractor_name: tables.contractors.pick_required(aliases::CONTRACTOR_NAME)?,
            jurisdiction_contractor_id: tables
                .jurisdictions
                .pick_required(aliases::CONTRACTOR_LINK_ID)?,
            jurisdiction_state_id: tables.jurisdictions.pick_required(aliases::STATE_LINK_ID)?,
            state_id: tables.states.pick_required(aliases::STATE_ID)?,
            state_abbr: tables.states.pick_required(aliases::STATE_ABBR)?,
            url_article_id: tables.urls.pick(aliases::ARTICLE_ID),
            url: tables.urls.pick(aliases::URL),
            revision_article_id: tables.revisions.pick(aliases::ARTICLE_ID),
            revision_date: tables.revisions.pick(aliases::REVISION_DATE),
        })
    }
}

/// Run the join chain and return deduplicated rules with empty flags, in
/// join order.
pub fn build_rules(tables: &CmsTables) -> Result<Vec<Rule>> {
    let cols = ResolvedColumns::resolve(tables)?;
    debug!(?cols, "resolved columns");

    let mut projection = vec![(cols.code, CPT_HCPCS), (cols.code_article_id, ARTICLE_ID)];
    if tables.article_codes.contains_column(LAST_UPDATED) {
        projection.push((LAST_UPDATED, LAST_UPDATED));
    }
    let joined = tables.article_codes.select("rules", &projection);

    let joined = left_join(
        &joined,
        &tables.article,
        ARTICLE_ID,
        cols.article_id,
        &[(cols.article_title, ARTICLE_TITLE)],
    );
    let joined = left_join(
        &joined,
        &tables.article_contractors,
        ARTICLE_ID,
        cols.link_article_id,
        &[(cols.link_contractor_id, CONTRACTOR_ID)],
    );
    let joined = left_join(
        &joined,
        &tables.contractors,
        CONTRACTOR_ID,
        cols.contractor_id,
        &[(cols.contractor_name, MAC_CARRIER)],
    );
    let joined = left_join(
        &joined,
        &tables.jurisdictions,
        CONTRACTOR_ID,
        cols.jurisdiction_contractor_id,
        &[(cols.jurisdiction_state_id, STATE_ID)],
    );
    let mut joined = left_join(
        &joined,
        &tables.states,
        STATE_ID,
        cols.state_id,
        &[(cols.state_abbr, STATE)],
    );

    joined = match (tables.urls.is_empty(), cols.url_article_id, cols.url) {
        (false, Some(article_id), Some(url)) => left_join(
            &joined,
            &tables.urls,
            ARTICLE_ID,
            article_id,
            &[(url, CMS_ARTICLE_URL)],
        ),
        _ => {
            warn!("article URL table unusable; {CMS_ARTICLE_URL} left empty");
            joined.push_constant_column(CMS_ARTICLE_URL, "");
            joined
        }
    };

    joined = match (
        tables.revisions.is_empty(),
        cols.revision_article_id,
        cols.revision_date,
    ) {
        (false, Some(article_id), Some(date)) => {
            let latest = latest_revisions(&tables.revisions, article_id, date);
            left_join(
                &joined,
                &latest,
                ARTICLE_ID,
                ARTICLE_ID,
                &[(LAST_UPDATED, LAST_UPDATED)],
            )
        }
        _ if tables.article.contains_column(LAST_UPDATED) => {
            warn!("revision history unusable; using article {LAST_UPDATED}");
            left_join(
                &joined,
                &tables.article,
                ARTICLE_ID,
                cols.article_id,
                &[(LAST_UPDATED, LAST_UPDATED)],
            )
        }
        _ => {
            warn!("no revision dates available; {LAST_UPDATED} left empty");
            joined
        }
    };
    coalesce_suffixed(&mut joined, LAST_UPDATED);

    debug!(columns = ?joined.columns(), "columns before dedupe");
    let before = joined.height();
    dedupe_by(&mut joined, &[CPT_HCPCS, ARTICLE_ID, CONTRACTOR_ID, STATE]);
    info!(
        joined_rows = before,
        unique_rows = joined.height(),
        "join complete"
    );

    let sliced = joined.select(
        "rules",
        &[
            (CPT_HCPCS, CPT_HCPCS),
            (ARTICLE_ID, ARTICLE_ID),
            (ARTICLE_TITLE, ARTICLE_TITLE),
            (MAC_CARRIER, MAC_CARRIER),
            (STATE, STATE),
            (CMS_ARTICLE_URL, CMS_ARTICLE_URL),
            (LAST_UPDATED, LAST_UPDATED),
        ],
    );
    Ok(sliced.into_rows().into_iter().map(rule_from_row).collect())
}

/// Latest (lexicographically greatest) revision date per article.
pub fn latest_revisions(revisions: &TextTable, article_col: &str, date_col: &str) -> TextTable {
    let mut latest: BTreeMap<&str, &str> = BTreeMap::new();
    if let (Some(article_idx), Some(date_idx)) = (
        revisions.column_index(article_col),
        revisions.column_index(date_col),
    ) {
        for row in revisions.rows() {
            let date = row[date_idx].as_str();
            latest
                .entry(row[article_idx].as_str())
                .and_modify(|current| {
                    if date > *current {
                        *current = date;
                    }
                })
                .or_insert(date);
        }
    }
    TextTable::new(
        "article_revision_latest",
        vec![ARTICLE_ID.to_string(), LAST_UPDATED.to_string()],
        latest
            .into_iter()
            .map(|(article, date)| vec![article.to_string(), date.to_string()])
            .collect(),
    )
}

fn rule_from_row(row: Vec<String>) -> Rule {
    let mut cells = row.into_iter();
    let mut next = || cells.next().unwrap_or_default();
    Rule {
        cpt_hcpcs: next(),
        article_id: next(),
        article_title: next(),
        mac_carrier: next(),
        state: next(),
        cms_article_url: next(),
        last_updated: next(),
        ..Rule::default()
    }
}

/// Orders an empty cell after every non-empty one.
fn empty_last(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    }
}

/// Stable ascending sort by (code, state, contractor name).
///
/// Rows with no state or contractor sort to the end of their code group.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        a.cpt_hcpcs
            .cmp(&b.cpt_hcpcs)
            .then_with(|| empty_last(&a.state, &b.state))
            .then_with(|| empty_last(&a.mac_carrier, &b.mac_carrier))
    });
}

/// Full joiner: join, optional overlay merge, sort.
pub fn join_rules(tables: &CmsTables, overlay: Option<&FlagOverlay>) -> Result<Vec<Rule>> {
    let mut rules = build_rules(tables)?;
    if let Some(overlay) = overlay {
        let matched = overlay.apply(&mut rules);
        info!(
            overlay_codes = overlay.len(),
            matched_rules = matched,
            "applied flag overlay"
        );
    }
    sort_rules(&mut rules);
    Ok(rules)
}
