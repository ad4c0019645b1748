//! Output writers for the rules toolchain.
//!
//! - **rules_joined.csv / rules_joined.json**: flat joined rules
//! - **rules_grouped_by_cpt.json**: rules grouped per code
//! - **flags CSV**: overlay consumable by the joiner
//! - **items JSON**: app-facing `{"items": [...]}` document

mod csv_out;
mod json_out;

pub use csv_out::{write_flags, write_flags_csv, write_rules, write_rules_csv};
pub use json_out::{write_items_json, write_json_pretty};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use mcd_model::{GroupedRule, Rule};

pub const RULES_CSV: &str = "rules_joined.csv";
pub const RULES_JSON: &str = "rules_joined.json";
pub const GROUPED_JSON: &str = "rules_grouped_by_cpt.json";

/// Paths written by [`write_rule_outputs`].
#[derive(Debug, Clone)]
pub struct RuleOutputs {
    pub rules_csv: PathBuf,
    pub rules_json: PathBuf,
    pub grouped_json: PathBuf,
}

/// Write the three joiner outputs into `output_dir`, creating it if needed.
pub fn write_rule_outputs(
    output_dir: &Path,
    rules: &[Rule],
    grouped: &[GroupedRule],
) -> Result<RuleOutputs> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    let outputs = RuleOutputs {
        rules_csv: output_dir.join(RULES_CSV),
        rules_json: output_dir.join(RULES_JSON),
        grouped_json: output_dir.join(GROUPED_JSON),
    };
    write_rules_csv(&outputs.rules_csv, rules)?;
    write_json_pretty(&outputs.rules_json, &rules)?;
    write_json_pretty(&outputs.grouped_json, &grouped)?;
    info!(
        dir = %output_dir.display(),
        rules = rules.len(),
        codes = grouped.len(),
        "wrote rule outputs"
    );
    Ok(outputs)
}
