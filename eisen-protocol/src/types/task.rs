use serde::{Deserialize, Serialize};

use super::label::{Label, LabelId};
use super::quadrant::Quadrant;

/// Server-issued task identifier
pub type TaskId = i64;

/// A task as returned by the server, with its labels expanded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quadrant: Quadrant,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, quadrant: Quadrant) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            quadrant,
            labels: Vec::new(),
            matrix_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Ids of the attached labels, in server order
    pub fn label_ids(&self) -> Vec<LabelId> {
        self.labels.iter().map(|l| l.id).collect()
    }

    pub fn has_label(&self, label_id: LabelId) -> bool {
        self.labels.iter().any(|l| l.id == label_id)
    }
}

/// Body of `POST /matrices/{id}/tasks`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskCreate {
    pub title: String,
    pub description: String,
    pub quadrant: Quadrant,
    pub label_ids: Vec<LabelId>,
}

impl TaskCreate {
    pub fn new(title: impl Into<String>, quadrant: Quadrant, label_ids: Vec<LabelId>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            quadrant,
            label_ids,
        }
    }
}

/// Body of `PUT /matrices/{id}/tasks/{task_id}`
///
/// Only the fields that are set are serialized, so the server treats the
/// request as a partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Quadrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<LabelId>>,
}

impl TaskUpdate {
    /// Reassign a task to another quadrant
    pub fn move_to(quadrant: Quadrant) -> Self {
        Self {
            quadrant: Some(quadrant),
            ..Self::default()
        }
    }

    /// Replace a task's label set
    pub fn relabel(label_ids: Vec<LabelId>) -> Self {
        Self {
            label_ids: Some(label_ids),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.quadrant.is_none()
            && self.label_ids.is_none()
    }
}
