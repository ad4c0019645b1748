//! Command implementations. Each command reads and transforms everything
//! before writing any output file.

use std::fs;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, info_span};

use mcd_ingest::{CmsSource, load_table};
use mcd_report::{write_flags_csv, write_items_json, write_rule_outputs};
use mcd_transform::{
    CmsTables, FlagOptions, FlagOverlay, ItemOptions, RelationTables, Targets, derive_flags,
    group_by_code, join_rules, shape_items,
};

use crate::cli::{FlagsArgs, ItemsArgs, JoinArgs};
use crate::types::{FlagsResult, ItemsResult, JoinResult};

pub fn run_join(args: &JoinArgs) -> Result<JoinResult> {
    let span = info_span!("join", cms_dir = %args.cms_dir.display());
    let _guard = span.enter();

    let source = CmsSource::new(&args.cms_dir, args.encoding);
    let tables = CmsTables::load(&source).context("load CMS tables")?;
    let overlay = args
        .wiser_codes
        .as_deref()
        .map(|path| FlagOverlay::load(path, args.encoding))
        .transpose()
        .context("load flag overlay")?;

    let rules = join_rules(&tables, overlay.as_ref()).context("join CMS tables")?;
    let grouped = group_by_code(&rules);
    let outputs = write_rule_outputs(&args.out, &rules, &grouped)?;

    Ok(JoinResult {
        outputs,
        rules: rules.len(),
        codes: grouped.len(),
        flagged_codes: grouped.iter().filter(|group| group.requires_pa).count(),
        overlay_codes: overlay.as_ref().map(FlagOverlay::len),
    })
}

pub fn run_flags(args: &FlagsArgs) -> Result<FlagsResult> {
    let span = info_span!("flags", cms_dir = %args.cms_dir.display());
    let _guard = span.enter();

    let text = fs::read_to_string(&args.targets)
        .with_context(|| format!("read targets {}", args.targets.display()))?;
    let targets = Targets::parse(&text);
    info!(
        ncd = targets.ncd_numbers.len(),
        lcd = targets.lcd_ids.len(),
        "parsed targets"
    );

    let tables = RelationTables::load(&CmsSource::new(&args.cms_dir, None))
        .context("load relation tables")?;
    let options = FlagOptions {
        effective_date: args.effective,
    };
    let derivation = derive_flags(&tables, &targets, &options).context("derive flags")?;
    write_flags_csv(&args.out, &derivation.records)?;
    info!(path = %args.out.display(), codes = derivation.records.len(), "wrote flags");

    Ok(FlagsResult {
        out: args.out.clone(),
        ncd_targets: targets.ncd_numbers.len(),
        lcd_targets: targets.lcd_ids.len(),
        matched_articles: derivation.matched_articles(),
        codes: derivation.records.len(),
    })
}

/// `today` is stamped into every item's `lastUpdated`.
pub fn run_items(args: &ItemsArgs, today: NaiveDate) -> Result<ItemsResult> {
    let span = info_span!("items", rules = %args.rules.display());
    let _guard = span.enter();

    let rules = load_table(&args.rules, "rules_joined", None, true)
        .with_context(|| format!("load rules {}", args.rules.display()))?;
    let options = ItemOptions {
        program: args.program.clone(),
        states: args.states.clone(),
        effective_date: args.effective,
        today,
    };
    let document = shape_items(&rules, &options).context("shape items")?;
    write_items_json(&args.out, &document)?;
    info!(path = %args.out.display(), items = document.items.len(), "wrote items");

    Ok(ItemsResult {
        out: args.out.clone(),
        source_rows: rules.height(),
        items: document.items.len(),
    })
}
