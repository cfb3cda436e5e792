use serde::{Deserialize, Serialize};

/// Server-issued label identifier
pub type LabelId = i64;

/// A named tag that can be attached to any number of tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    /// Hex color such as `#FF5733`; the board never sets one
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Label {
    pub fn new(id: LabelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: None,
            matrix_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// CSS-ish slug of the name, used to style label pills
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Body of `POST /matrices/{id}/labels`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelCreate {
    pub name: String,
    /// Always serialized, `null` when unset
    pub color: Option<String>,
}

impl LabelCreate {
    /// Build a create request with the name trimmed and no color
    pub fn named(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            color: None,
        }
    }
}

/// Body of `PUT /matrices/{id}/labels/{label_id}`; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Key used for case-insensitive label name comparison
pub fn normalize_label_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Check whether `name` collides with an existing label
///
/// Comparison ignores case and surrounding whitespace. `except` excludes one
/// label from the check, so renaming a label to a new casing of its own
/// name is allowed.
pub fn label_name_taken(labels: &[Label], name: &str, except: Option<LabelId>) -> bool {
    let wanted = normalize_label_name(name);
    labels
        .iter()
        .filter(|label| Some(label.id) != except)
        .any(|label| normalize_label_name(&label.name) == wanted)
}
