use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// Per-article entry inside a [`GroupedRule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub article_id: String,
    pub article_title: String,
    pub mac_carrier: String,
    pub state: String,
    pub cms_article_url: String,
    pub last_updated: String,
}

impl From<&Rule> for ArticleRef {
    fn from(rule: &Rule) -> Self {
        Self {
            article_id: rule.article_id.clone(),
            article_title: rule.article_title.clone(),
            mac_carrier: rule.mac_carrier.clone(),
            state: rule.state.clone(),
            cms_article_url: rule.cms_article_url.clone(),
            last_updated: rule.last_updated.clone(),
        }
    }
}

/// One record of `rules_grouped_by_cpt.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedRule {
    pub cpt: String,
    pub articles: Vec<ArticleRef>,
    pub requires_pa: bool,
    /// Sorted, distinct, non-empty.
    pub programs: Vec<String>,
}
