//! App-facing item document (`{"items": [...]}`).

use serde::{Deserialize, Serialize};

/// Prior-authorization requirement as shown to app users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequiresPa {
    Yes,
    Conditional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub required: bool,
}

impl ChecklistItem {
    pub fn required(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            required: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReference {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppItem {
    pub id: String,
    pub cpt: String,
    pub description: String,
    #[serde(rename = "requiresPA")]
    pub requires_pa: RequiresPa,
    pub program: String,
    pub states: Vec<String>,
    pub effective_date: String,
    pub documentation: Vec<ChecklistItem>,
    pub references: Vec<ItemReference>,
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsDocument {
    pub items: Vec<AppItem>,
}
