//! Classification of target coverage-document identifiers.

use std::collections::BTreeSet;

const NCD_PHRASE: &str = "NATIONAL COVERAGE DETERMINATION";
const NCD_PREFIX: &str = "NCD";

/// A policy document the flag deriver targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetId {
    /// NCD number in display form, e.g. "160.7".
    Ncd(String),
    /// Upper-cased LCD id, e.g. "L38276".
    Lcd(String),
}

/// Classify one line of the targets file.
///
/// Lines naming the NCD phrase or starting with "NCD" are NCD numbers (what
/// remains once every marker is removed). Other lines starting with "L" are
/// LCD ids.
/// Anything else non-empty is taken as a bare NCD number.
pub fn classify_target(line: &str) -> Option<TargetId> {
    let upper = line.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }
    let had_phrase = upper.contains(NCD_PHRASE);
    let stripped = upper.replace(NCD_PHRASE, "");
    let stripped = stripped.trim();

    if had_phrase || stripped.starts_with(NCD_PREFIX) {
        let number = stripped.replace(NCD_PREFIX, "");
        let number = number.trim_matches(|ch: char| "():#".contains(ch) || ch.is_whitespace());
        return (!number.is_empty()).then(|| TargetId::Ncd(number.to_string()));
    }
    if stripped.starts_with('L') {
        return Some(TargetId::Lcd(stripped.to_string()));
    }
    Some(TargetId::Ncd(stripped.to_string()))
}

/// Target identifiers split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub ncd_numbers: BTreeSet<String>,
    pub lcd_ids: BTreeSet<String>,
}

impl Targets {
    /// Parse a newline-delimited targets file; blank lines are ignored.
    pub fn parse(text: &str) -> Self {
        let mut targets = Targets::default();
        for target in text.lines().filter_map(classify_target) {
            match target {
                TargetId::Ncd(number) => {
                    targets.ncd_numbers.insert(number);
                }
                TargetId::Lcd(id) => {
                    targets.lcd_ids.insert(id);
                }
            }
        }
        targets
    }

    pub fn len(&self) -> usize {
        self.ncd_numbers.len() + self.lcd_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
