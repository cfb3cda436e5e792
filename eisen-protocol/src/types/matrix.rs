use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::label::Label;
use super::quadrant::Quadrant;
use super::task::{Task, TaskId};

/// Opaque server-issued matrix identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MatrixId(String);

impl MatrixId {
    /// Wrap a raw id; returns `None` for empty or whitespace-only input
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatrixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response of `POST /matrices`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatrixCreated {
    pub id: MatrixId,
    /// Link minted by the server; the client prefers its own web origin
    #[serde(default)]
    pub sharable_link: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response of `GET /matrices/{id}`: the complete board
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatrixDetail {
    #[serde(default)]
    pub id: Option<MatrixId>,
    /// Rows that do not decode as a [`Task`] (e.g. a quadrant written by
    /// another client that is none of the four known keys) are dropped
    #[serde(default, deserialize_with = "known_tasks")]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One element of the `tasks` array as the server sent it
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskRow {
    Known(Task),
    Unknown {
        #[serde(default)]
        id: Option<TaskId>,
        #[serde(default)]
        quadrant: Option<String>,
    },
    Malformed(#[allow(dead_code)] IgnoredAny),
}

fn known_tasks<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<TaskRow>::deserialize(deserializer)?;
    let mut tasks = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            TaskRow::Known(task) => tasks.push(task),
            TaskRow::Unknown { id, quadrant } => {
                tracing::warn!(
                    "Skipping task {:?} with unreadable row (quadrant {:?})",
                    id,
                    quadrant
                );
            }
            TaskRow::Malformed(_) => tracing::warn!("Skipping unreadable task row"),
        }
    }
    Ok(tasks)
}

impl MatrixDetail {
    /// Tasks in a quadrant, in server order
    pub fn tasks_in(&self, quadrant: Quadrant) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.quadrant == quadrant)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.labels.is_empty()
    }
}
