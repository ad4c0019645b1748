//! Flat rule rows.

use serde::{Deserialize, Serialize};

use crate::columns;

/// One row of `rules_joined.csv`: a unique (code, article, contractor, state)
/// combination with its display metadata and prior-authorization flags.
///
/// Every field is text. Missing values are empty strings; there is no null
/// representation in any output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub cpt_hcpcs: String,
    pub article_id: String,
    pub article_title: String,
    pub mac_carrier: String,
    pub state: String,
    pub cms_article_url: String,
    pub last_updated: String,
    pub requires_pa: String,
    pub program: String,
    pub effective_date: String,
    pub notes: String,
}

/// The four overlay-controlled fields of a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    RequiresPa,
    Program,
    EffectiveDate,
    Notes,
}

impl FlagField {
    pub const ALL: [FlagField; 4] = [
        FlagField::RequiresPa,
        FlagField::Program,
        FlagField::EffectiveDate,
        FlagField::Notes,
    ];

    pub fn column(self) -> &'static str {
        match self {
            FlagField::RequiresPa => columns::REQUIRES_PA,
            FlagField::Program => columns::PROGRAM,
            FlagField::EffectiveDate => columns::EFFECTIVE_DATE,
            FlagField::Notes => columns::NOTES,
        }
    }
}

impl Rule {
    pub fn flag(&self, field: FlagField) -> &str {
        match field {
            FlagField::RequiresPa => &self.requires_pa,
            FlagField::Program => &self.program,
            FlagField::EffectiveDate => &self.effective_date,
            FlagField::Notes => &self.notes,
        }
    }

    pub fn flag_mut(&mut self, field: FlagField) -> &mut String {
        match field {
            FlagField::RequiresPa => &mut self.requires_pa,
            FlagField::Program => &mut self.program,
            FlagField::EffectiveDate => &mut self.effective_date,
            FlagField::Notes => &mut self.notes,
        }
    }

    /// Values in [`columns::RULE_COLUMNS`] order.
    pub fn to_record(&self) -> [&str; 11] {
        [
            &self.cpt_hcpcs,
            &self.article_id,
            &self.article_title,
            &self.mac_carrier,
            &self.state,
            &self.cms_article_url,
            &self.last_updated,
            &self.requires_pa,
            &self.program,
            &self.effective_date,
            &self.notes,
        ]
    }

    /// True when `requires_pa` is "TRUE" in any letter case.
    pub fn requires_pa_true(&self) -> bool {
        self.requires_pa.eq_ignore_ascii_case("TRUE")
    }
}
