//! Key bindings
//!
//! Maps a key press to a [`Msg`] given the current mode. Keys that mean
//! nothing in the current mode map to `None`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use eisen_protocol::Quadrant;

use crate::state::{AppState, FormField, Mode, Msg, TextEdit};

pub fn key_to_msg(state: &AppState, key: KeyEvent) -> Option<Msg> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }

    match state.mode {
        Mode::Board if state.matrix_id.is_none() => welcome_key(key),
        Mode::Board => board_key(state, key),
        Mode::TaskForm => task_form_key(state, key, ctrl),
        Mode::LabelManager => label_manager_key(key, ctrl),
        Mode::TaskLabels => task_labels_key(key),
        Mode::OpenPrompt => match key.code {
            KeyCode::Esc => Some(Msg::Close),
            KeyCode::Enter => Some(Msg::Submit),
            _ => text_key(key, ctrl),
        },
    }
}

/// Text editing keys shared by every input field
fn text_key(key: KeyEvent, ctrl: bool) -> Option<Msg> {
    match key.code {
        KeyCode::Char('u') if ctrl => Some(Msg::Edit(TextEdit::Clear)),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Msg::Edit(TextEdit::Insert(c))),
        KeyCode::Backspace => Some(Msg::Edit(TextEdit::Backspace)),
        _ => None,
    }
}

fn welcome_key(key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('n') => Some(Msg::CreateMatrix),
        KeyCode::Char('o') => Some(Msg::OpenPrompt),
        KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Quit),
        _ => None,
    }
}

fn board_key(state: &AppState, key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Char('q') => Some(Msg::Quit),
        KeyCode::Esc => Some(Msg::DismissError),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            Quadrant::from_index(index).map(Msg::FocusQuadrant)
        }
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Msg::CycleFocus { forward: true }),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            Some(Msg::CycleFocus { forward: false })
        }
        KeyCode::Down | KeyCode::Char('j') => Some(Msg::MoveCursor(1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Msg::MoveCursor(-1)),
        KeyCode::Char(']') => Some(Msg::MoveSelected(state.focus.next())),
        KeyCode::Char('[') => Some(Msg::MoveSelected(state.focus.prev())),
        KeyCode::Char('d') | KeyCode::Delete => Some(Msg::DeleteSelected),
        KeyCode::Char('a') => Some(Msg::OpenTaskForm),
        KeyCode::Char('t') | KeyCode::Enter => Some(Msg::OpenTaskLabels),
        KeyCode::Char('L') => Some(Msg::OpenLabelManager),
        KeyCode::Char('r') => Some(Msg::Refresh),
        KeyCode::Char('y') => Some(Msg::CopyShareLink),
        KeyCode::Char('o') => Some(Msg::OpenPrompt),
        KeyCode::Char('N') => Some(Msg::CreateMatrix),
        _ => None,
    }
}

fn task_form_key(state: &AppState, key: KeyEvent, ctrl: bool) -> Option<Msg> {
    match key.code {
        KeyCode::Esc => return Some(Msg::Close),
        KeyCode::Enter => return Some(Msg::Submit),
        KeyCode::Tab => return Some(Msg::NextField),
        _ => {}
    }

    match state.draft.field {
        FormField::Title => text_key(key, ctrl),
        FormField::Quadrant => match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                Some(Msg::CycleQuadrant { forward: true })
            }
            KeyCode::Left | KeyCode::Char('h') => Some(Msg::CycleQuadrant { forward: false }),
            _ => None,
        },
        FormField::Labels => match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Msg::MoveCursor(1)),
            KeyCode::Up | KeyCode::Char('k') => Some(Msg::MoveCursor(-1)),
            KeyCode::Char(' ') => Some(Msg::Toggle),
            _ => None,
        },
    }
}

fn label_manager_key(key: KeyEvent, ctrl: bool) -> Option<Msg> {
    match key.code {
        KeyCode::Esc => Some(Msg::Close),
        KeyCode::Enter => Some(Msg::Submit),
        KeyCode::Down => Some(Msg::MoveCursor(1)),
        KeyCode::Up => Some(Msg::MoveCursor(-1)),
        KeyCode::Delete => Some(Msg::DeleteLabelAtCursor),
        KeyCode::Char('d') if ctrl => Some(Msg::DeleteLabelAtCursor),
        KeyCode::Char('r') if ctrl => Some(Msg::StartRename),
        _ => text_key(key, ctrl),
    }
}

fn task_labels_key(key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Esc => Some(Msg::Close),
        KeyCode::Enter => Some(Msg::Submit),
        KeyCode::Down | KeyCode::Char('j') => Some(Msg::MoveCursor(1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Msg::MoveCursor(-1)),
        KeyCode::Char(' ') => Some(Msg::Toggle),
        _ => None,
    }
}
