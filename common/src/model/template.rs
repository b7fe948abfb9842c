use serde::{Deserialize, Serialize};

/// Data-type tag whose value becomes the Markdown body instead of a front-matter key.
pub const RICH_TEXT: &str = "Rich Text";

/// Data-type tags offered by the client when building a template.
///
/// The server treats `data_type` as a free-form string; only [`RICH_TEXT`]
/// has special meaning.
pub const DATA_TYPES: [&str; 7] = [
    "Text",
    "Rich Text",
    "Date/DateTime",
    "Number",
    "Boolean",
    "Image",
    "URL",
];

/// A reusable page schema: a unique name plus an ordered list of typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Fields in the order they were declared when the template was created.
    #[serde(default)]
    pub fields: Vec<TemplateField>,
}

/// One typed slot of a [`Template`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    pub id: i64,
    pub name: String,
    pub data_type: String,
    pub required: bool,
}

impl TemplateField {
    pub fn is_rich_text(&self) -> bool {
        self.data_type == RICH_TEXT
    }
}
