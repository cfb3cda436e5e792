use eisen_protocol::{label_name_taken, LabelCreate, LabelId, LabelUpdate, MatrixId, TaskCreate, TaskUpdate};

use super::msg::{Effect, Msg, Request, TextEdit};
use super::{AppState, FormField, LabelEditor, LabelPicker, Mode};
use crate::session;
use crate::text;

/// Apply one message to the board
///
/// Any user action clears the previous action error and notice before it
/// runs. Sync errors are left for the next fetch to clear.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if msg.is_user_action() {
        state.action_error = None;
        state.notice = None;
    }

    let effects = match msg {
        Msg::CreateMatrix => create_matrix(&mut state),
        Msg::MatrixCreated(result) => {
            state.creating = false;
            match result {
                Ok(created) => enter_matrix(&mut state, created.id),
                Err(e) => {
                    tracing::warn!("Matrix creation failed: {}", e);
                    state.action_error = Some(text::CREATE_MATRIX_FAILED.to_string());
                    Vec::new()
                }
            }
        }
        Msg::Open(id) => enter_matrix(&mut state, id),

        Msg::PollTick(id) => {
            if is_active(&state, &id) {
                vec![fetch(&mut state, id)]
            } else {
                Vec::new()
            }
        }
        Msg::Refresh => match state.matrix_id.clone() {
            Some(id) => vec![fetch(&mut state, id)],
            None => Vec::new(),
        },
        Msg::Synced { matrix_id, result } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            if !is_active(&state, &matrix_id) {
                tracing::debug!("Discarding snapshot for inactive matrix {}", matrix_id);
                return (state, Vec::new());
            }
            match result {
                Ok(detail) => {
                    tracing::trace!(
                        "Matrix {}: {} tasks, {} labels",
                        matrix_id,
                        detail.tasks.len(),
                        detail.labels.len()
                    );
                    state.tasks = detail.tasks;
                    state.labels = detail.labels;
                    state.sync_error = None;
                    prune_missing_labels(&mut state);
                }
                Err(e) => {
                    tracing::warn!("Fetching matrix {} failed: {}", matrix_id, e);
                    state.sync_error = Some(text::sync_failure(&matrix_id, &e));
                    state.tasks.clear();
                    state.labels.clear();
                }
            }
            clamp_cursors(&mut state);
            Vec::new()
        }
        Msg::MutationDone {
            matrix_id,
            request,
            result,
        } => {
            if !is_active(&state, &matrix_id) {
                tracing::debug!("Ignoring write result for inactive matrix {}", matrix_id);
                return (state, Vec::new());
            }
            match result {
                Ok(()) => applied(&mut state, &request),
                Err(e) => {
                    tracing::warn!("{:?} failed: {}", request.kind(), e);
                    state.action_error = Some(text::mutation_failure(request.kind(), &e));
                }
            }
            vec![fetch(&mut state, matrix_id)]
        }

        Msg::FocusQuadrant(quadrant) => {
            if state.mode == Mode::Board {
                state.focus = quadrant;
                state.selected = 0;
            }
            Vec::new()
        }
        Msg::CycleFocus { forward } => {
            if state.mode == Mode::Board {
                state.focus = if forward {
                    state.focus.next()
                } else {
                    state.focus.prev()
                };
                state.selected = 0;
            }
            Vec::new()
        }
        Msg::MoveCursor(delta) => {
            move_cursor(&mut state, delta);
            Vec::new()
        }
        Msg::MoveSelected(target) => match state.selected_task() {
            Some(task) if task.quadrant == target => Vec::new(),
            Some(task) => {
                let request = Request::UpdateTask(task.id, TaskUpdate::move_to(target));
                mutate(&state, request)
            }
            None => no_selection(&mut state),
        },
        Msg::DeleteSelected => match state.selected_task() {
            Some(task) => {
                let request = Request::DeleteTask(task.id);
                mutate(&state, request)
            }
            None => no_selection(&mut state),
        },
        Msg::CopyShareLink => match state.share_link.clone() {
            Some(link) => {
                state.notice = Some(text::SHARE_LINK_COPIED.to_string());
                vec![Effect::CopyToClipboard(link)]
            }
            None => Vec::new(),
        },
        Msg::DismissError => {
            state.sync_error = None;
            Vec::new()
        }

        Msg::OpenTaskForm => {
            if state.matrix_id.is_some() {
                state.mode = Mode::TaskForm;
                state.draft.quadrant = state.focus;
                state.draft.field = FormField::Title;
            }
            Vec::new()
        }
        Msg::OpenLabelManager => {
            if state.matrix_id.is_some() {
                state.mode = Mode::LabelManager;
            }
            Vec::new()
        }
        Msg::OpenTaskLabels => match state.selected_task() {
            Some(task) => {
                state.picker = Some(LabelPicker {
                    task_id: task.id,
                    selected: task.label_ids(),
                    cursor: 0,
                });
                state.mode = Mode::TaskLabels;
                Vec::new()
            }
            None => no_selection(&mut state),
        },
        Msg::OpenPrompt => {
            state.open_input.clear();
            state.mode = Mode::OpenPrompt;
            Vec::new()
        }
        Msg::Close => {
            close(&mut state);
            Vec::new()
        }
        Msg::Edit(edit) => {
            if let Some(field) = focused_text(&mut state) {
                apply_edit(field, edit);
            }
            Vec::new()
        }
        Msg::NextField => {
            if state.mode == Mode::TaskForm {
                state.draft.field = state.draft.field.next();
            }
            Vec::new()
        }
        Msg::CycleQuadrant { forward } => {
            if state.mode == Mode::TaskForm {
                state.draft.quadrant = if forward {
                    state.draft.quadrant.next()
                } else {
                    state.draft.quadrant.prev()
                };
            }
            Vec::new()
        }
        Msg::Toggle => {
            toggle(&mut state);
            Vec::new()
        }
        Msg::Submit => submit(&mut state),
        Msg::StartRename => {
            if state.mode == Mode::LabelManager {
                if let Some(label) = state.labels.get(state.label_editor.cursor) {
                    state.label_editor.renaming = Some(label.id);
                    state.label_editor.input = label.name.clone();
                }
            }
            Vec::new()
        }
        Msg::DeleteLabelAtCursor => {
            if state.mode != Mode::LabelManager {
                return (state, Vec::new());
            }
            match state.labels.get(state.label_editor.cursor) {
                Some(label) => {
                    let request = Request::DeleteLabel(label.id);
                    mutate(&state, request)
                }
                None => Vec::new(),
            }
        }

        Msg::Quit => {
            state.should_quit = true;
            vec![Effect::StopPolling]
        }
    };

    (state, effects)
}

fn is_active(state: &AppState, id: &MatrixId) -> bool {
    state.matrix_id.as_ref() == Some(id)
}

/// Request a fetch, counting it as in flight until its `Synced` arrives
fn fetch(state: &mut AppState, id: MatrixId) -> Effect {
    state.in_flight += 1;
    Effect::Fetch(id)
}

fn mutate(state: &AppState, request: Request) -> Vec<Effect> {
    match &state.matrix_id {
        Some(id) => vec![Effect::Mutate {
            matrix_id: id.clone(),
            request,
        }],
        None => Vec::new(),
    }
}

fn no_selection(state: &mut AppState) -> Vec<Effect> {
    state.notice = Some(text::NO_TASK_SELECTED.to_string());
    Vec::new()
}

fn create_matrix(state: &mut AppState) -> Vec<Effect> {
    if state.creating {
        return Vec::new();
    }
    state.creating = true;
    state.sync_error = None;
    vec![Effect::CreateMatrix]
}

/// Make `id` the active matrix: drop the old snapshot, fetch now, poll from here on
fn enter_matrix(state: &mut AppState, id: MatrixId) -> Vec<Effect> {
    tracing::info!("Opening matrix {}", id);
    state.share_link = Some(session::share_link(&state.web_origin, &id));
    state.matrix_id = Some(id.clone());
    state.tasks.clear();
    state.labels.clear();
    state.sync_error = None;
    state.action_error = None;
    state.mode = Mode::Board;
    state.picker = None;
    state.draft.label_ids.clear();
    state.label_editor = LabelEditor::default();
    state.selected = 0;
    vec![fetch(state, id.clone()), Effect::StartPolling(id)]
}

/// Local follow-up to a write the server accepted
fn applied(state: &mut AppState, request: &Request) {
    match request {
        Request::CreateTask(_) => {
            state.draft.title.clear();
            state.draft.label_ids.clear();
            state.draft.field = FormField::Title;
            if state.mode == Mode::TaskForm {
                state.mode = Mode::Board;
            }
        }
        Request::CreateLabel(_) | Request::UpdateLabel(..) => {
            state.label_editor.input.clear();
            state.label_editor.renaming = None;
        }
        Request::DeleteLabel(id) => {
            forget_label(state, *id);
        }
        Request::UpdateTask(..) | Request::DeleteTask(_) => {}
    }
}

fn forget_label(state: &mut AppState, id: LabelId) {
    state.draft.label_ids.retain(|l| *l != id);
    if let Some(picker) = state.picker.as_mut() {
        picker.selected.retain(|l| *l != id);
    }
    if state.label_editor.renaming == Some(id) {
        state.label_editor.renaming = None;
        state.label_editor.input.clear();
    }
}

/// Drop selections that point at labels the latest snapshot no longer has
fn prune_missing_labels(state: &mut AppState) {
    let known: Vec<LabelId> = state.labels.iter().map(|l| l.id).collect();
    let missing: Vec<LabelId> = state
        .draft
        .label_ids
        .iter()
        .chain(state.picker.iter().flat_map(|p| p.selected.iter()))
        .chain(state.label_editor.renaming.iter())
        .filter(|id| !known.contains(id))
        .copied()
        .collect();
    for id in missing {
        forget_label(state, id);
    }

    if let Some(picker) = &state.picker {
        if !state.tasks.iter().any(|t| t.id == picker.task_id) {
            state.picker = None;
            if state.mode == Mode::TaskLabels {
                state.mode = Mode::Board;
            }
        }
    }
}

fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

fn clamp_cursors(state: &mut AppState) {
    let labels = state.labels.len();
    state.selected = clamp(state.selected, state.count_in(state.focus));
    state.draft.label_cursor = clamp(state.draft.label_cursor, labels);
    state.label_editor.cursor = clamp(state.label_editor.cursor, labels);
    if let Some(picker) = state.picker.as_mut() {
        picker.cursor = clamp(picker.cursor, labels);
    }
}

fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).clamp(0, len as isize - 1) as usize
}

fn move_cursor(state: &mut AppState, delta: isize) {
    let labels = state.labels.len();
    match state.mode {
        Mode::Board => {
            state.selected = step(state.selected, delta, state.count_in(state.focus));
        }
        Mode::TaskForm if state.draft.field == FormField::Labels => {
            state.draft.label_cursor = step(state.draft.label_cursor, delta, labels);
        }
        Mode::LabelManager => {
            state.label_editor.cursor = step(state.label_editor.cursor, delta, labels);
        }
        Mode::TaskLabels => {
            if let Some(picker) = state.picker.as_mut() {
                picker.cursor = step(picker.cursor, delta, labels);
            }
        }
        Mode::TaskForm | Mode::OpenPrompt => {}
    }
}

fn toggle_id(ids: &mut Vec<LabelId>, id: LabelId) {
    if let Some(pos) = ids.iter().position(|l| *l == id) {
        ids.remove(pos);
    } else {
        ids.push(id);
    }
}

fn toggle(state: &mut AppState) {
    match state.mode {
        Mode::TaskForm if state.draft.field == FormField::Labels => {
            if let Some(label) = state.labels.get(state.draft.label_cursor) {
                toggle_id(&mut state.draft.label_ids, label.id);
            }
        }
        Mode::TaskLabels => {
            if let Some(picker) = state.picker.as_mut() {
                if let Some(label) = state.labels.get(picker.cursor) {
                    toggle_id(&mut picker.selected, label.id);
                }
            }
        }
        _ => {}
    }
}

fn close(state: &mut AppState) {
    if state.label_editor.renaming.take().is_some() {
        state.label_editor.input.clear();
    }
    state.picker = None;
    state.mode = Mode::Board;
}

fn focused_text(state: &mut AppState) -> Option<&mut String> {
    match state.mode {
        Mode::TaskForm if state.draft.field == FormField::Title => Some(&mut state.draft.title),
        Mode::LabelManager => Some(&mut state.label_editor.input),
        Mode::OpenPrompt => Some(&mut state.open_input),
        _ => None,
    }
}

fn apply_edit(field: &mut String, edit: TextEdit) {
    match edit {
        TextEdit::Insert(c) if !c.is_control() => field.push(c),
        TextEdit::Insert(_) => {}
        TextEdit::Paste(text) => field.extend(text.chars().filter(|c| !c.is_control())),
        TextEdit::Backspace => {
            field.pop();
        }
        TextEdit::Clear => field.clear(),
    }
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    match state.mode {
        Mode::TaskForm => {
            let title = state.draft.title.trim();
            if title.is_empty() {
                return Vec::new();
            }
            let request = Request::CreateTask(TaskCreate::new(
                title,
                state.draft.quadrant,
                state.draft.label_ids.clone(),
            ));
            mutate(state, request)
        }
        Mode::LabelManager => {
            let name = state.label_editor.input.trim().to_string();
            if name.is_empty() {
                return Vec::new();
            }
            let renaming = state.label_editor.renaming;
            if label_name_taken(&state.labels, &name, renaming) {
                state.action_error = Some(text::LABEL_ALREADY_EXISTS.to_string());
                return Vec::new();
            }
            let request = match renaming {
                Some(id) => Request::UpdateLabel(
                    id,
                    LabelUpdate {
                        name: Some(name),
                        color: None,
                    },
                ),
                None => Request::CreateLabel(LabelCreate::named(&name)),
            };
            mutate(state, request)
        }
        Mode::TaskLabels => match state.picker.take() {
            Some(picker) => {
                state.mode = Mode::Board;
                let request =
                    Request::UpdateTask(picker.task_id, TaskUpdate::relabel(picker.selected));
                mutate(state, request)
            }
            None => Vec::new(),
        },
        Mode::OpenPrompt => match session::resolve(&state.open_input) {
            Some(id) => {
                state.open_input.clear();
                enter_matrix(state, id)
            }
            None => {
                state.action_error = Some(text::INVALID_MATRIX_REFERENCE.to_string());
                Vec::new()
            }
        },
        Mode::Board => Vec::new(),
    }
}
