use serde::{Deserialize, Serialize};

/// Payload for `POST /api/v1/templates/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub fields: Vec<TemplateFieldCreate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFieldCreate {
    pub name: String,
    pub data_type: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// Payload for `POST /api/v1/content/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItemCreate {
    pub title: String,
    pub template_id: i64,
    pub values: Vec<ContentValueCreate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentValueCreate {
    pub field_id: i64,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// `?skip=&limit=` query accepted by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}
