//! Accepted column names per logical field, in priority order.
//!
//! MCD exports rename columns between releases, so every join column is
//! resolved against one of these lists rather than a fixed name.

pub const ARTICLE_ID: &[&str] = &["article_id", "document_id", "id"];
pub const ARTICLE_TITLE: &[&str] = &["article_title", "title", "display_title", "name"];
pub const HCPC_CODE: &[&str] = &[
    "hcpc_code",
    "hcpc_code_id",
    "hcpcs_code",
    "hcpcs",
    "hcpc",
    "cpt_hcpcs",
    "cpt_code",
    "cpt",
    "code",
];

/// Contractor id on link tables (`article_x_contractor`,
/// `contractor_jurisdiction`).
pub const CONTRACTOR_LINK_ID: &[&str] = &["contractor_id", "carrier_id"];
/// Contractor id on the `contractor` table itself.
pub const CONTRACTOR_ID: &[&str] = &["contractor_id", "carrier_id", "id"];
pub const CONTRACTOR_NAME: &[&str] = &[
    "contractor_name",
    "carrier_name",
    "contractor_bus_name",
    "bus_name",
    "name",
];

/// State id on `contractor_jurisdiction`.
pub const STATE_LINK_ID: &[&str] = &["state_id", "state_key", "statecode_id"];
/// State id on `state_lookup`.
pub const STATE_ID: &[&str] = &["state_id", "state_key", "statecode_id", "id"];
pub const STATE_ABBR: &[&str] = &["state_abbr", "state_code", "state_abbrev", "abbr"];

pub const URL: &[&str] = &["url", "link", "document_url"];
pub const REVISION_DATE: &[&str] = &["revision_date", "updated", "last_updated", "rev_date"];

pub const NCD_ID: &[&str] = &["ncd_id", "ncd_document_id"];
pub const RELATED_DOCUMENT_ID: &[&str] = &["related_document_id", "document_id", "lcd_id"];
/// Article id on relation tables, where `document_id` names the related
/// document rather than the article.
pub const RELATION_ARTICLE_ID: &[&str] = &["article_id"];
