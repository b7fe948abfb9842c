use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An instance of a template with concrete values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub template_id: i64,
    /// Server-assigned creation time, UTC.
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub values: Vec<ContentValue>,
}

/// The payload bound to one template field for one content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentValue {
    pub id: i64,
    pub field_id: i64,
    /// Arbitrary JSON; the field's `data_type` is not enforced against it.
    pub value: serde_json::Value,
}
