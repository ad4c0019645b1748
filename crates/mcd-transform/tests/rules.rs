//! End-to-end tests for the join pipeline over in-memory tables.

mod common;

use std::collections::HashSet;
use std::path::Path;

use common::{cms_tables, table};
use mcd_ingest::{IngestError, TextTable};
use mcd_transform::{FlagOverlay, TransformError, build_rules, join_rules};

fn keys(rules: &[mcd_model::Rule]) -> Vec<(&str, &str, &str)> {
    rules
        .iter()
        .map(|r| (r.cpt_hcpcs.as_str(), r.state.as_str(), r.mac_carrier.as_str()))
        .collect()
}

#[test]
fn joins_and_sorts_by_code_state_contractor() {
    let rules = join_rules(&cms_tables(), None).expect("join");
    assert_eq!(
        keys(&rules),
        vec![
            ("27130", "WA", "Noridian"),
            ("27447", "AZ", "Novitas"),
            ("27447", "TX", "Novitas"),
            ("29826", "AZ", "Novitas"),
            ("29826", "TX", "Novitas"),
        ]
    );
}

#[test]
fn duplicate_link_rows_are_deduplicated() {
    let rules = build_rules(&cms_tables()).expect("join");
    let unique: HashSet<_> = rules
        .iter()
        .map(|r| (&r.cpt_hcpcs, &r.article_id, &r.mac_carrier, &r.state))
        .collect();
    assert_eq!(unique.len(), rules.len());
    assert_eq!(rules.len(), 5);
}

#[test]
fn revision_date_is_latest_and_url_attached() {
    let rules = join_rules(&cms_tables(), None).expect("join");
    let knee = rules.iter().find(|r| r.cpt_hcpcs == "29826").expect("row");
    assert_eq!(knee.last_updated, "2024-02-01");
    assert_eq!(knee.cms_article_url, "https://www.cms.gov/A1");
    assert_eq!(knee.article_title, "Billing and Coding: Knee Arthroscopy");

    let hip = rules.iter().find(|r| r.cpt_hcpcs == "27130").expect("row");
    assert_eq!(hip.last_updated, "");
    assert_eq!(hip.cms_article_url, "");
}

#[test]
fn article_date_used_without_revision_history() {
    let mut tables = cms_tables();
    tables.revisions = TextTable::empty("article_x_revision_history");
    let rules = join_rules(&tables, None).expect("join");
    let hip = rules.iter().find(|r| r.cpt_hcpcs == "27130").expect("row");
    assert_eq!(hip.last_updated, "2021-06-30");
}

#[test]
fn link_table_date_is_fallback_for_revision_date() {
    let mut tables = cms_tables();
    tables.article_codes = table(
        "article_x_hcpc_code",
        &["article_id", "hcpc_code", "last_updated"],
        &[&["A1", "29826", "2019-09-09"], &["A2", "27130", "2018-08-08"]],
    );
    let rules = join_rules(&tables, None).expect("join");
    let knee = rules.iter().find(|r| r.cpt_hcpcs == "29826").expect("row");
    let hip = rules.iter().find(|r| r.cpt_hcpcs == "27130").expect("row");
    assert_eq!(knee.last_updated, "2024-02-01");
    assert_eq!(hip.last_updated, "2018-08-08");
}

#[test]
fn unmatched_left_rows_survive_with_empty_fields() {
    let mut tables = cms_tables();
    tables.article_contractors = table(
        "article_x_contractor",
        &["article_id", "contractor_id"],
        &[&["A1", "C1"]],
    );
    let rules = join_rules(&tables, None).expect("join");
    let hip = rules.iter().find(|r| r.cpt_hcpcs == "27130").expect("row");
    assert_eq!(hip.mac_carrier, "");
    assert_eq!(hip.state, "");
    assert_eq!(rules.len(), 5);
}

#[test]
fn article_without_contractor_trails_its_code_group() {
    let mut tables = cms_tables();
    tables.article = table(
        "article",
        &["article_id", "article_title", "last_updated"],
        &[
            &["A1", "Billing and Coding: Knee Arthroscopy", "2020-01-01"],
            &["A3", "Billing and Coding: Shoulder Arthroscopy", "2022-03-01"],
        ],
    );
    tables.article_codes = table(
        "article_x_hcpc_code",
        &["article_id", "hcpc_code"],
        &[&["A1", "29826"], &["A3", "29826"]],
    );
    let rules = join_rules(&tables, None).expect("join");
    let order: Vec<(&str, &str)> = rules
        .iter()
        .map(|r| (r.article_id.as_str(), r.state.as_str()))
        .collect();
    assert_eq!(order, vec![("A1", "AZ"), ("A1", "TX"), ("A3", "")]);
}

#[test]
fn aliased_columns_are_resolved() {
    let mut tables = cms_tables();
    tables.article_contractors = table(
        "article_x_contractor",
        &["article_id", "carrier_id"],
        &[&["A1", "C1"], &["A2", "C2"]],
    );
    tables.contractors = table(
        "contractor",
        &["carrier_id", "name"],
        &[&["C1", "Novitas"], &["C2", "Noridian"]],
    );
    let rules = join_rules(&tables, None).expect("join");
    assert!(rules.iter().all(|r| !r.mac_carrier.is_empty()));
}

#[test]
fn missing_required_column_names_table_and_candidates() {
    let mut tables = cms_tables();
    tables.states = table("state_lookup", &["state_id", "label"], &[&["48", "Texas"]]);
    let err = build_rules(&tables).unwrap_err();
    match err {
        TransformError::Ingest(IngestError::MissingColumns {
            table, candidates, ..
        }) => {
            assert_eq!(table, "state_lookup");
            assert!(candidates.contains(&"state_abbr".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn overlay_flags_every_row_of_matching_code() {
    let overlay_table = table(
        "wiser_codes",
        &["cpt", "requires_pa", "program", "effective_date", "notes"],
        &[&["29826", "TRUE", "WISeR", "2026-01-01", "manual"]],
    );
    let overlay =
        FlagOverlay::from_table(&overlay_table, Path::new("wiser_codes.csv")).expect("overlay");
    let rules = join_rules(&cms_tables(), Some(&overlay)).expect("join");

    assert_eq!(rules.len(), 5);
    for rule in &rules {
        if rule.cpt_hcpcs == "29826" {
            assert_eq!(rule.requires_pa, "TRUE");
            assert_eq!(rule.program, "WISeR");
            assert_eq!(rule.notes, "manual");
        } else {
            assert_eq!(rule.requires_pa, "");
            assert_eq!(rule.program, "");
        }
    }
}
