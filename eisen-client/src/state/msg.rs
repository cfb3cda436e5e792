use eisen_protocol::{
    LabelCreate, LabelId, LabelUpdate, MatrixCreated, MatrixDetail, MatrixId, Quadrant,
    TaskCreate, TaskId, TaskUpdate,
};
use eisen_utils::EisenError;

use crate::text::Mutation;

/// Change to whichever text field has focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Paste(String),
    Backspace,
    Clear,
}

/// A write against the active matrix
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    CreateTask(TaskCreate),
    UpdateTask(TaskId, TaskUpdate),
    DeleteTask(TaskId),
    CreateLabel(LabelCreate),
    UpdateLabel(LabelId, LabelUpdate),
    DeleteLabel(LabelId),
}

impl Request {
    pub fn kind(&self) -> Mutation {
        match self {
            Request::CreateTask(_) => Mutation::AddTask,
            Request::UpdateTask(..) => Mutation::UpdateTask,
            Request::DeleteTask(_) => Mutation::DeleteTask,
            Request::CreateLabel(_) => Mutation::AddLabel,
            Request::UpdateLabel(..) => Mutation::UpdateLabel,
            Request::DeleteLabel(_) => Mutation::DeleteLabel,
        }
    }
}

/// Input to [`super::update`]
///
/// User intents come from key handling; the rest are completions reported
/// by the runtime.
#[derive(Debug)]
pub enum Msg {
    // Session
    CreateMatrix,
    MatrixCreated(Result<MatrixCreated, EisenError>),
    /// Switch to a known matrix
    Open(MatrixId),

    // Sync
    PollTick(MatrixId),
    Refresh,
    Synced {
        matrix_id: MatrixId,
        result: Result<MatrixDetail, EisenError>,
    },
    MutationDone {
        matrix_id: MatrixId,
        request: Request,
        result: Result<(), EisenError>,
    },

    // Board
    FocusQuadrant(Quadrant),
    CycleFocus { forward: bool },
    MoveCursor(isize),
    MoveSelected(Quadrant),
    DeleteSelected,
    CopyShareLink,
    DismissError,

    // Dialogs
    OpenTaskForm,
    OpenLabelManager,
    OpenTaskLabels,
    OpenPrompt,
    Close,
    Edit(TextEdit),
    NextField,
    CycleQuadrant { forward: bool },
    Toggle,
    Submit,
    StartRename,
    DeleteLabelAtCursor,

    Quit,
}

impl Msg {
    /// Whether the message comes from the user rather than the runtime
    pub fn is_user_action(&self) -> bool {
        !matches!(
            self,
            Msg::MatrixCreated(_) | Msg::PollTick(_) | Msg::Synced { .. } | Msg::MutationDone { .. }
        )
    }
}

/// Side effect requested by [`super::update`]
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CreateMatrix,
    Fetch(MatrixId),
    /// Replace any running poller with one for this matrix
    StartPolling(MatrixId),
    StopPolling,
    Mutate {
        matrix_id: MatrixId,
        request: Request,
    },
    CopyToClipboard(String),
}
