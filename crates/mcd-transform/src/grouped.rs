use std::collections::{BTreeMap, BTreeSet};

use mcd_model::{ArticleRef, GroupedRule, Rule};

/// Group rules by code, in ascending code order.
///
/// `requires_pa` is true when any row's flag is "TRUE" in any case;
/// `programs` is the sorted distinct set of non-empty program values.
pub fn group_by_code(rules: &[Rule]) -> Vec<GroupedRule> {
    let mut groups: BTreeMap<&str, Vec<&Rule>> = BTreeMap::new();
    for rule in rules {
        groups.entry(rule.cpt_hcpcs.as_str()).or_default().push(rule);
    }
    groups
        .into_iter()
        .map(|(cpt, rows)| {
            let programs: BTreeSet<&str> = rows
                .iter()
                .map(|rule| rule.program.as_str())
                .filter(|program| !program.is_empty())
                .collect();
            GroupedRule {
                cpt: cpt.to_string(),
                articles: rows.iter().map(|rule| ArticleRef::from(*rule)).collect(),
                requires_pa: rows.iter().any(|rule| rule.requires_pa_true()),
                programs: programs.into_iter().map(str::to_string).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(code: &str, requires_pa: &str, program: &str) -> Rule {
        Rule {
            cpt_hcpcs: code.to_string(),
            requires_pa: requires_pa.to_string(),
            program: program.to_string(),
            ..Rule::default()
        }
    }

    #[test]
    fn any_true_row_marks_group() {
        let grouped = group_by_code(&[rule("1", "", ""), rule("1", "true", "WISeR")]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].requires_pa);
        assert_eq!(grouped[0].articles.len(), 2);
    }

    #[test]
    fn all_empty_or_false_is_false() {
        let grouped = group_by_code(&[rule("1", "", ""), rule("1", "FALSE", "")]);
        assert!(!grouped[0].requires_pa);
        assert!(grouped[0].programs.is_empty());
    }

    #[test]
    fn programs_are_sorted_and_distinct() {
        let grouped = group_by_code(&[
            rule("1", "", "WISeR"),
            rule("1", "", "Alpha"),
            rule("1", "", "WISeR"),
        ]);
        assert_eq!(grouped[0].programs, vec!["Alpha", "WISeR"]);
    }

    #[test]
    fn groups_come_out_in_code_order() {
        let grouped = group_by_code(&[rule("B", "", ""), rule("A", "", "")]);
        let codes: Vec<&str> = grouped.iter().map(|g| g.cpt.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
    }
}
