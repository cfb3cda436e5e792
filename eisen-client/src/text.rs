//! User-facing strings
//!
//! Every failure is reduced to one of these messages before it reaches the
//! screen or stderr.

use eisen_protocol::MatrixId;
use eisen_utils::EisenError;

pub const APP_TITLE: &str = "Eisenhower Matrix";
pub const WELCOME_MESSAGE: &str = "Welcome! To start, create a new shared Eisenhower Matrix.";
pub const CREATE_NEW_MATRIX_BUTTON: &str = "Create New Shared Matrix";
pub const MANAGE_LABELS_TITLE: &str = "Manage Labels";
pub const NEW_LABEL_NAME_PLACEHOLDER: &str = "New label name";
pub const EXISTING_LABELS_TITLE: &str = "Existing Labels:";
pub const NO_LABELS_CREATED_MODAL_MESSAGE: &str = "No labels created yet.";
pub const NEW_TASK_TITLE: &str = "New Task";
pub const NEW_TASK_PLACEHOLDER: &str = "New task...";
pub const ASSIGN_LABELS_TITLE: &str = "Assign Labels:";
pub const NO_LABELS_FOR_TASK_MESSAGE: &str =
    "No labels created. Create labels in \"Manage Labels\".";
pub const EMPTY_QUADRANT_MESSAGE: &str = "No tasks here.";
pub const LABEL_ALREADY_EXISTS: &str = "This label already exists.";
pub const LOADING_MATRIX_MESSAGE: &str = "Loading Matrix...";
pub const CREATING_MATRIX_MESSAGE: &str = "Creating matrix...";
pub const MATRIX_ID_DISPLAY_LABEL: &str = "Current Matrix ID (Share this part of the URL):";
pub const OPEN_MATRIX_TITLE: &str = "Open Matrix";
pub const OPEN_MATRIX_PLACEHOLDER: &str = "Paste a share link or matrix id";
pub const INVALID_MATRIX_REFERENCE: &str = "That does not look like a matrix link or id.";
pub const CREATE_MATRIX_FAILED: &str = "Failed to create new matrix";
pub const SHARE_LINK_COPIED: &str = "Share link copied to clipboard.";
pub const NO_TASK_SELECTED: &str = "Select a task first.";

/// Message shown when the matrix does not exist
pub fn matrix_not_found(id: &MatrixId) -> String {
    format!("Matrix with ID {} not found. You can create a new one.", id)
}

/// Short reason for an error, without the variant prefix where possible
pub fn reason(err: &EisenError) -> String {
    match err {
        EisenError::Status { reason, .. } => reason.clone(),
        EisenError::Conflict(detail) => detail.clone(),
        other => other.to_string(),
    }
}

/// Message for a failed full-matrix fetch
///
/// Not-found is kept distinct so the user is pointed at creating a new
/// matrix; everything else is a generic failure.
pub fn sync_failure(id: &MatrixId, err: &EisenError) -> String {
    if err.is_not_found() {
        matrix_not_found(id)
    } else {
        format!("Failed to fetch matrix data: {}", reason(err))
    }
}

/// Kinds of write the board performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddTask,
    UpdateTask,
    DeleteTask,
    AddLabel,
    UpdateLabel,
    DeleteLabel,
}

impl Mutation {
    fn failure_prefix(self) -> &'static str {
        match self {
            Mutation::AddTask => "Failed to add task.",
            Mutation::UpdateTask => "Failed to update task.",
            Mutation::DeleteTask => "Failed to delete task.",
            Mutation::AddLabel => "Failed to add label.",
            Mutation::UpdateLabel => "Failed to update label.",
            Mutation::DeleteLabel => "Failed to delete label.",
        }
    }
}

/// Message for a rejected write
///
/// A 409 on a label write becomes the same duplicate message the local
/// check produces.
pub fn mutation_failure(mutation: Mutation, err: &EisenError) -> String {
    match mutation {
        Mutation::AddLabel | Mutation::UpdateLabel if err.is_conflict() => {
            LABEL_ALREADY_EXISTS.to_string()
        }
        _ => format!("{} {}", mutation.failure_prefix(), reason(err)),
    }
}
