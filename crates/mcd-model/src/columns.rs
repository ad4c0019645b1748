//! Canonical output column names.
//!
//! Input tables are resolved through alias lists, but every output artifact
//! uses exactly these names in exactly this order.

pub const CPT_HCPCS: &str = "cpt_hcpcs";
pub const ARTICLE_ID: &str = "article_id";
pub const ARTICLE_TITLE: &str = "article_title";
pub const MAC_CARRIER: &str = "mac_carrier";
pub const STATE: &str = "state";
pub const CMS_ARTICLE_URL: &str = "cms_article_url";
pub const LAST_UPDATED: &str = "last_updated";
pub const REQUIRES_PA: &str = "requires_pa";
pub const PROGRAM: &str = "program";
pub const EFFECTIVE_DATE: &str = "effective_date";
pub const NOTES: &str = "notes";

/// Code column of the flags CSV, matched against [`CPT_HCPCS`].
pub const OVERLAY_CODE: &str = "cpt";

/// Flag columns defaulted to empty and filled from the overlay.
pub const FLAG_COLUMNS: [&str; 4] = [REQUIRES_PA, PROGRAM, EFFECTIVE_DATE, NOTES];

/// Column order of `rules_joined.csv`.
pub const RULE_COLUMNS: [&str; 11] = [
    CPT_HCPCS,
    ARTICLE_ID,
    ARTICLE_TITLE,
    MAC_CARRIER,
    STATE,
    CMS_ARTICLE_URL,
    LAST_UPDATED,
    REQUIRES_PA,
    PROGRAM,
    EFFECTIVE_DATE,
    NOTES,
];

/// Header of the derived flags CSV.
pub const FLAGS_HEADER: [&str; 5] = [OVERLAY_CODE, REQUIRES_PA, PROGRAM, EFFECTIVE_DATE, NOTES];

pub const DEFAULT_PROGRAM: &str = "WISeR";
pub const DEFAULT_EFFECTIVE_DATE: &str = "2026-01-01";
