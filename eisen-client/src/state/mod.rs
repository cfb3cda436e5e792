//! Board state and its transitions
//!
//! [`AppState`] is a plain value. [`update`] consumes it together with a
//! [`Msg`] and hands back the next state plus the [`Effect`]s the runtime
//! must perform. Nothing in here touches the network or the terminal.

mod msg;
mod update;

pub use msg::{Effect, Msg, Request, TextEdit};
pub use update::update;

use eisen_protocol::{Label, LabelId, MatrixId, Quadrant, Task, TaskId};

/// Which screen has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Board,
    TaskForm,
    LabelManager,
    TaskLabels,
    OpenPrompt,
}

/// Focusable parts of the new-task form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Quadrant,
    Labels,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Quadrant,
            FormField::Quadrant => FormField::Labels,
            FormField::Labels => FormField::Title,
        }
    }
}

/// Unsubmitted new task
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub quadrant: Quadrant,
    pub label_ids: Vec<LabelId>,
    pub field: FormField,
    pub label_cursor: usize,
}

impl TaskDraft {
    pub fn is_selected(&self, label_id: LabelId) -> bool {
        self.label_ids.contains(&label_id)
    }
}

/// Label manager input and cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelEditor {
    pub input: String,
    pub cursor: usize,
    /// Label being renamed; `None` means the input creates a new label
    pub renaming: Option<LabelId>,
}

/// Label checklist for an existing task
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPicker {
    pub task_id: TaskId,
    pub selected: Vec<LabelId>,
    pub cursor: usize,
}

impl LabelPicker {
    pub fn is_selected(&self, label_id: LabelId) -> bool {
        self.selected.contains(&label_id)
    }
}

/// Everything the board knows
///
/// Tasks and labels are the most recent snapshot from the server and are
/// replaced wholesale on every successful fetch.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub matrix_id: Option<MatrixId>,
    pub share_link: Option<String>,
    /// Web origin used to mint share links
    pub web_origin: String,

    pub tasks: Vec<Task>,
    pub labels: Vec<Label>,

    pub mode: Mode,
    pub draft: TaskDraft,
    pub label_editor: LabelEditor,
    pub picker: Option<LabelPicker>,
    pub open_input: String,

    /// Quadrant holding the board cursor
    pub focus: Quadrant,
    /// Index of the selected task within the focused quadrant
    pub selected: usize,

    /// Fetches sent and not yet answered
    pub in_flight: usize,
    /// Matrix creation in progress
    pub creating: bool,

    /// Last fetch failure; cleared by the next successful fetch
    pub sync_error: Option<String>,
    /// Last rejected user action; cleared by the next user action
    pub action_error: Option<String>,
    /// Transient confirmation, e.g. after copying the share link
    pub notice: Option<String>,

    pub should_quit: bool,
}

impl AppState {
    pub fn new(web_origin: impl Into<String>) -> Self {
        Self {
            web_origin: web_origin.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0 || self.creating
    }

    /// Error to show, the user's own action first
    pub fn error(&self) -> Option<&str> {
        self.action_error
            .as_deref()
            .or(self.sync_error.as_deref())
    }

    /// Tasks in one quadrant, in server order
    pub fn tasks_in(&self, quadrant: Quadrant) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.quadrant == quadrant)
    }

    pub fn count_in(&self, quadrant: Quadrant) -> usize {
        self.tasks_in(quadrant).count()
    }

    /// Task under the board cursor
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks_in(self.focus).nth(self.selected)
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }
}
