use std::path::PathBuf;

use mcd_report::RuleOutputs;

#[derive(Debug)]
pub struct JoinResult {
    pub outputs: RuleOutputs,
    pub rules: usize,
    pub codes: usize,
    /// Codes whose grouped `requires_pa` is true.
    pub flagged_codes: usize,
    /// Distinct codes in the overlay, when one was supplied.
    pub overlay_codes: Option<usize>,
}

#[derive(Debug)]
pub struct FlagsResult {
    pub out: PathBuf,
    pub ncd_targets: usize,
    pub lcd_targets: usize,
    pub matched_articles: usize,
    pub codes: usize,
}

#[derive(Debug)]
pub struct ItemsResult {
    pub out: PathBuf,
    pub source_rows: usize,
    pub items: usize,
}
