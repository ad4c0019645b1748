//! Shared fixtures for transform integration tests.

#![allow(dead_code)]

use mcd_ingest::TextTable;
use mcd_transform::CmsTables;

pub fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> TextTable {
    TextTable::new(
        name,
        columns.iter().map(|c| (*c).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| (*v).to_string()).collect())
            .collect(),
    )
}

/// Two articles, three codes, two contractors over three states.
pub fn cms_tables() -> CmsTables {
    CmsTables {
        article: table(
            "article",
            &["article_id", "article_title", "last_updated"],
            &[
                &["A1", "Billing and Coding: Knee Arthroscopy", "2020-01-01"],
                &["A2", "Billing and Coding: Hip Replacement", "2021-06-30"],
            ],
        ),
        article_codes: table(
            "article_x_hcpc_code",
            &["article_id", "hcpc_code"],
            &[
                &["A1", "29826"],
                &["A1", "27447"],
                &["A2", "27130"],
                &["A1", "29826"],
            ],
        ),
        article_contractors: table(
            "article_x_contractor",
            &["article_id", "contractor_id"],
            &[&["A1", "C1"], &["A2", "C2"]],
        ),
        contractors: table(
            "contractor",
            &["contractor_id", "contractor_bus_name"],
            &[&["C1", "Novitas"], &["C2", "Noridian"]],
        ),
        jurisdictions: table(
            "contractor_jurisdiction",
            &["contractor_id", "state_id"],
            &[&["C1", "48"], &["C1", "04"], &["C2", "53"]],
        ),
        states: table(
            "state_lookup",
            &["state_id", "state_abbr"],
            &[&["48", "TX"], &["04", "AZ"], &["53", "WA"]],
        ),
        urls: table(
            "article_x_urls",
            &["article_id", "url"],
            &[&["A1", "https://www.cms.gov/A1"]],
        ),
        revisions: table(
            "article_x_revision_history",
            &["article_id", "revision_date"],
            &[&["A1", "2023-01-01"], &["A1", "2024-02-01"]],
        ),
    }
}
