use serde::{Deserialize, Serialize};

/// Structured candidate data assembled from one resume.
/// Every field is always present; unresolved fields hold their empty default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// The value produced by a single field extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Coerces into a text slot. Lists are joined with `", "`.
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// Coerces into a list slot. Text becomes a single-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::Text(text) => vec![text],
            FieldValue::List(items) => items,
        }
    }
}
