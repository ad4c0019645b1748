pub mod columns;
pub mod flags;
pub mod grouped;
pub mod item;
pub mod rule;

pub use columns::{
    DEFAULT_EFFECTIVE_DATE, DEFAULT_PROGRAM, FLAG_COLUMNS, FLAGS_HEADER, RULE_COLUMNS,
};
pub use flags::FlagRecord;
pub use grouped::{ArticleRef, GroupedRule};
pub use item::{AppItem, ChecklistItem, ItemReference, ItemsDocument, RequiresPa};
pub use rule::{FlagField, Rule};
