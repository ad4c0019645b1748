//! Column name normalization.

/// Normalize a raw header to `[a-z0-9_]`.
///
/// Trims, lower-cases, collapses each whitespace run to a single `_`, then
/// drops every remaining character outside `[a-z0-9_]`. The output is a fixed
/// point: normalizing it again returns it unchanged.
pub fn normalize_column_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut in_space = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                normalized.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            normalized.push(ch);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_underscores_whitespace() {
        assert_eq!(normalize_column_name(" Article ID "), "article_id");
        assert_eq!(normalize_column_name("HCPC\tCode  Id"), "hcpc_code_id");
    }

    #[test]
    fn strips_punctuation_and_bom() {
        assert_eq!(normalize_column_name("\u{feff}article_id"), "article_id");
        assert_eq!(normalize_column_name("State (Abbr.)"), "state_abbr");
        assert_eq!(normalize_column_name("Contractor-Name"), "contractorname");
    }

    #[test]
    fn whitespace_collapses_before_punctuation_is_dropped() {
        // The underscore survives even when its neighbours are removed.
        assert_eq!(normalize_column_name("last - updated"), "last__updated");
    }

    #[test]
    fn normalized_name_is_a_fixed_point() {
        let once = normalize_column_name("Revision  Date (UTC)");
        assert_eq!(normalize_column_name(&once), once);
    }
}
