use serde::{Deserialize, Serialize};

/// One row of the flags CSV consumed by the joiner as its overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub cpt: String,
    pub requires_pa: String,
    pub program: String,
    pub effective_date: String,
    pub notes: String,
}

impl FlagRecord {
    /// Values in [`crate::FLAGS_HEADER`] order.
    pub fn to_record(&self) -> [&str; 5] {
        [
            &self.cpt,
            &self.requires_pa,
            &self.program,
            &self.effective_date,
            &self.notes,
        ]
    }
}
