//! Transform stages over normalized CMS tables.
//!
//! - [`rules`]: article → code → contractor → state join, with optional
//!   [`overlay`] merge
//! - [`flags`]: target NCD/LCD documents to a flags overlay
//! - [`items`]: joined rules to the app item document
//!
//! All stages are pure functions of their input tables and options.

pub mod aliases;
pub mod coalesce;
pub mod error;
pub mod flags;
pub mod frame;
pub mod grouped;
pub mod items;
pub mod overlay;
pub mod rules;
pub mod targets;

pub use coalesce::coalesce_prefer;
pub use error::{Result, TransformError};
pub use flags::{FlagDerivation, FlagOptions, RelationTables, derive_flags};
pub use grouped::group_by_code;
pub use items::{ItemOptions, shape_items};
pub use overlay::FlagOverlay;
pub use rules::{CmsTables, build_rules, join_rules, sort_rules};
pub use targets::{TargetId, Targets, classify_target};
