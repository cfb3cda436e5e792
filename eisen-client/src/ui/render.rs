//! Drawing
//!
//! Rendering is a pure function of [`AppState`]. Quadrant contents are
//! filtered out of the flat task list on every frame.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use eisen_protocol::{Label, Quadrant};

use crate::state::{AppState, FormField, Mode};
use crate::text;

const PILL_PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::LightRed,
];

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if state.matrix_id.is_none() {
        draw_welcome(frame, state, area);
    } else {
        draw_board(frame, state, area);
    }

    match state.mode {
        Mode::Board => {}
        Mode::TaskForm => draw_task_form(frame, state, area),
        Mode::LabelManager => draw_label_manager(frame, state, area),
        Mode::TaskLabels => draw_task_labels(frame, state, area),
        Mode::OpenPrompt => draw_open_prompt(frame, state, area),
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

fn parse_hex(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Pill color: the label's own hex color if it has one, else a stable pick
fn label_color(label: &Label) -> Color {
    label
        .color
        .as_deref()
        .and_then(parse_hex)
        .unwrap_or(PILL_PALETTE[label.id.unsigned_abs() as usize % PILL_PALETTE.len()])
}

fn pill(label: &Label) -> Span<'static> {
    Span::styled(
        format!(" {} ", label.name),
        Style::default().fg(Color::Black).bg(label_color(label)),
    )
}

/// Input line with a placeholder when empty and a cursor when focused
fn input_line<'a>(prompt: &'a str, value: &'a str, placeholder: &'a str, focused: bool) -> Line<'a> {
    let prompt_style = if focused {
        bold().fg(Color::Cyan)
    } else {
        bold()
    };
    let mut spans = vec![Span::styled(prompt, prompt_style)];
    if value.is_empty() {
        spans.push(Span::styled(placeholder, dim()));
    } else {
        spans.push(Span::raw(value));
    }
    if focused {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    Line::from(spans)
}

fn checkbox_line(label: &Label, checked: bool, under_cursor: bool) -> Line<'static> {
    let mark = if checked { "[x] " } else { "[ ] " };
    let style = if under_cursor {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    Line::from(vec![Span::styled(mark, style), pill(label)])
}

/// Fixed-height rectangle centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn popup<'a>(frame: &mut Frame, area: Rect, title: &'a str, lines: Vec<Line<'a>>, height: u16) {
    let rect = centered_rect(60, height, area);
    frame.render_widget(Clear, rect);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, rect);
}

fn draw_welcome(frame: &mut Frame, state: &AppState, area: Rect) {
    let mut lines = vec![
        Line::styled(text::APP_TITLE, bold()),
        Line::raw(""),
        Line::raw(text::WELCOME_MESSAGE),
        Line::raw(""),
    ];

    if let Some(err) = state.error() {
        lines.push(Line::styled(err, error_style()));
        lines.push(Line::raw(""));
    }

    if state.creating {
        lines.push(Line::styled(text::CREATING_MATRIX_MESSAGE, Style::default().fg(Color::Yellow)));
    } else {
        lines.push(Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Cyan)),
            Span::raw(text::CREATE_NEW_MATRIX_BUTTON),
        ]));
        lines.push(Line::from(vec![
            Span::styled("[o] ", Style::default().fg(Color::Cyan)),
            Span::raw(text::OPEN_MATRIX_TITLE),
        ]));
        lines.push(Line::from(vec![
            Span::styled("[q] ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" eisen "));
    frame.render_widget(paragraph, area);
}

fn draw_board(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, state, chunks[0]);
    draw_status_line(frame, state, chunks[1]);
    draw_grid(frame, state, chunks[2]);
    draw_help(frame, state, chunks[3]);
}

fn draw_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let id = state
        .matrix_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let lines = vec![
        Line::styled(text::APP_TITLE, bold()),
        Line::from(vec![
            Span::styled(text::MATRIX_ID_DISPLAY_LABEL, dim()),
            Span::raw(" "),
            Span::styled(id, bold()),
        ]),
        Line::from(vec![
            Span::styled("Share: ", dim()),
            Span::raw(state.share_link.clone().unwrap_or_default()),
        ]),
    ];
    let header = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_status_line(frame: &mut Frame, state: &AppState, area: Rect) {
    let line = if let Some(err) = state.error() {
        Line::styled(err, error_style())
    } else if state.is_loading() {
        Line::styled(text::LOADING_MATRIX_MESSAGE, Style::default().fg(Color::Yellow))
    } else if let Some(notice) = &state.notice {
        Line::styled(notice.as_str(), Style::default().fg(Color::Green))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_grid(frame: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for quadrant in Quadrant::ALL {
        let row = quadrant.index() / 2;
        let col = quadrant.index() % 2;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[row]);
        draw_quadrant(frame, state, quadrant, cells[col]);
    }
}

fn draw_quadrant(frame: &mut Frame, state: &AppState, quadrant: Quadrant, area: Rect) {
    let focused = state.focus == quadrant;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(
            " {} {} ({}) ",
            quadrant.index() + 1,
            quadrant.display_name(),
            state.count_in(quadrant)
        ));

    let items: Vec<ListItem> = state
        .tasks_in(quadrant)
        .map(|task| {
            let mut spans = vec![Span::raw(task.title.clone())];
            for label in &task.labels {
                spans.push(Span::raw(" "));
                spans.push(pill(label));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    if items.is_empty() {
        let empty = Paragraph::new(Line::styled(text::EMPTY_QUADRANT_MESSAGE, dim())).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_help(frame: &mut Frame, state: &AppState, area: Rect) {
    let help = match state.mode {
        Mode::Board => {
            "1-4/Tab focus  j/k select  a add  [ ] move  t labels  d delete  L manage labels  y copy link  o open  r refresh  q quit"
        }
        Mode::TaskForm => "Tab next field  Space/arrows choose  Enter add  Esc close",
        Mode::LabelManager => "Enter save  Up/Down select  Ctrl+R rename  Ctrl+D delete  Esc close",
        Mode::TaskLabels => "Space toggle  Enter save  Esc close",
        Mode::OpenPrompt => "Enter open  Esc close",
    };
    frame.render_widget(Paragraph::new(Line::styled(help, dim())), area);
}

fn push_error<'a>(lines: &mut Vec<Line<'a>>, state: &'a AppState) {
    if let Some(err) = &state.action_error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(err.as_str(), error_style()));
    }
}

fn draw_task_form(frame: &mut Frame, state: &AppState, area: Rect) {
    let draft = &state.draft;
    let mut lines = vec![
        input_line(
            "Title: ",
            &draft.title,
            text::NEW_TASK_PLACEHOLDER,
            draft.field == FormField::Title,
        ),
        Line::raw(""),
    ];

    let quadrant_style = if draft.field == FormField::Quadrant {
        bold().fg(Color::Cyan)
    } else {
        bold()
    };
    lines.push(Line::from(vec![
        Span::styled("Quadrant: ", quadrant_style),
        Span::raw(format!("< {} >", draft.quadrant.display_name())),
    ]));
    lines.push(Line::raw(""));

    let labels_style = if draft.field == FormField::Labels {
        bold().fg(Color::Cyan)
    } else {
        bold()
    };
    lines.push(Line::styled(text::ASSIGN_LABELS_TITLE, labels_style));
    if state.labels.is_empty() {
        lines.push(Line::styled(text::NO_LABELS_FOR_TASK_MESSAGE, dim()));
    } else {
        for (i, label) in state.labels.iter().enumerate() {
            let under_cursor = draft.field == FormField::Labels && i == draft.label_cursor;
            lines.push(checkbox_line(label, draft.is_selected(label.id), under_cursor));
        }
    }
    push_error(&mut lines, state);

    let height = lines.len() as u16 + 2;
    popup(frame, area, text::NEW_TASK_TITLE, lines, height);
}

fn draw_label_manager(frame: &mut Frame, state: &AppState, area: Rect) {
    let editor = &state.label_editor;
    let prompt = if editor.renaming.is_some() {
        "Rename: "
    } else {
        "Name: "
    };
    let mut lines = vec![
        input_line(prompt, &editor.input, text::NEW_LABEL_NAME_PLACEHOLDER, true),
        Line::raw(""),
        Line::styled(text::EXISTING_LABELS_TITLE, bold()),
    ];

    if state.labels.is_empty() {
        lines.push(Line::styled(text::NO_LABELS_CREATED_MODAL_MESSAGE, dim()));
    } else {
        for (i, label) in state.labels.iter().enumerate() {
            let marker = if i == editor.cursor { "> " } else { "  " };
            lines.push(Line::from(vec![Span::raw(marker), pill(label)]));
        }
    }
    push_error(&mut lines, state);

    let height = lines.len() as u16 + 2;
    popup(frame, area, text::MANAGE_LABELS_TITLE, lines, height);
}

fn draw_task_labels(frame: &mut Frame, state: &AppState, area: Rect) {
    let Some(picker) = &state.picker else {
        return;
    };
    let title = state
        .tasks
        .iter()
        .find(|t| t.id == picker.task_id)
        .map(|t| t.title.as_str())
        .unwrap_or_default();

    let mut lines = vec![Line::styled(title, bold()), Line::raw("")];
    if state.labels.is_empty() {
        lines.push(Line::styled(text::NO_LABELS_FOR_TASK_MESSAGE, dim()));
    } else {
        for (i, label) in state.labels.iter().enumerate() {
            lines.push(checkbox_line(label, picker.is_selected(label.id), i == picker.cursor));
        }
    }
    push_error(&mut lines, state);

    let height = lines.len() as u16 + 2;
    popup(frame, area, text::ASSIGN_LABELS_TITLE, lines, height);
}

fn draw_open_prompt(frame: &mut Frame, state: &AppState, area: Rect) {
    let mut lines = vec![input_line(
        "> ",
        &state.open_input,
        text::OPEN_MATRIX_PLACEHOLDER,
        true,
    )];
    push_error(&mut lines, state);

    let height = lines.len() as u16 + 2;
    popup(frame, area, text::OPEN_MATRIX_TITLE, lines, height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eisen_protocol::{MatrixId, Task};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn render(state: &AppState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut result = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                result.push(buffer[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            result.push('\n');
        }
        result
    }

    fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
        buffer_to_string(buffer).contains(text)
    }

    fn board() -> AppState {
        let mut state = AppState::new("http://web.test");
        state.matrix_id = MatrixId::new("m1");
        state.share_link = Some("http://web.test/matrix/m1".into());
        let work = Label::new(1, "work");
        let mut report = Task::new(10, "Write report", Quadrant::UrgentImportant);
        report.labels = vec![work.clone()];
        state.tasks = vec![report, Task::new(11, "Plan trip", Quadrant::NotUrgentImportant)];
        state.labels = vec![work];
        state
    }

    #[test]
    fn test_welcome_screen() {
        let buffer = render(&AppState::new("http://web.test"), 100, 20);
        assert!(buffer_contains(&buffer, text::WELCOME_MESSAGE));
        assert!(buffer_contains(&buffer, text::CREATE_NEW_MATRIX_BUTTON));
    }

    #[test]
    fn test_welcome_shows_error_and_progress() {
        let mut state = AppState::new("http://web.test");
        state.action_error = Some(text::CREATE_MATRIX_FAILED.into());
        state.creating = true;
        let buffer = render(&state, 100, 20);
        assert!(buffer_contains(&buffer, text::CREATE_MATRIX_FAILED));
        assert!(buffer_contains(&buffer, text::CREATING_MATRIX_MESSAGE));
    }

    #[test]
    fn test_board_groups_tasks_by_quadrant() {
        let buffer = render(&board(), 120, 30);
        for quadrant in Quadrant::ALL {
            assert!(buffer_contains(&buffer, quadrant.display_name()));
        }
        assert!(buffer_contains(&buffer, "Write report"));
        assert!(buffer_contains(&buffer, " work "));
        assert!(buffer_contains(&buffer, "Plan trip"));
        assert!(buffer_contains(&buffer, text::EMPTY_QUADRANT_MESSAGE));
        assert!(buffer_contains(&buffer, "http://web.test/matrix/m1"));
    }

    #[test]
    fn test_board_status_line() {
        let mut state = board();
        state.in_flight = 1;
        assert!(buffer_contains(&render(&state, 120, 30), text::LOADING_MATRIX_MESSAGE));

        state.sync_error = Some("Failed to fetch matrix data: Bad Gateway".into());
        let buffer = render(&state, 120, 30);
        assert!(buffer_contains(&buffer, "Failed to fetch matrix data: Bad Gateway"));
        assert!(!buffer_contains(&buffer, text::LOADING_MATRIX_MESSAGE));
    }

    #[test]
    fn test_task_form_without_labels() {
        let mut state = board();
        state.labels.clear();
        state.mode = Mode::TaskForm;
        let buffer = render(&state, 120, 30);
        assert!(buffer_contains(&buffer, text::NEW_TASK_PLACEHOLDER));
        assert!(buffer_contains(&buffer, text::NO_LABELS_FOR_TASK_MESSAGE));
    }

    #[test]
    fn test_label_manager_states() {
        let mut state = board();
        state.mode = Mode::LabelManager;
        state.action_error = Some(text::LABEL_ALREADY_EXISTS.into());
        let buffer = render(&state, 120, 30);
        assert!(buffer_contains(&buffer, text::EXISTING_LABELS_TITLE));
        assert!(buffer_contains(&buffer, text::LABEL_ALREADY_EXISTS));

        state.labels.clear();
        let buffer = render(&state, 120, 30);
        assert!(buffer_contains(&buffer, text::NO_LABELS_CREATED_MODAL_MESSAGE));
    }

    #[test]
    fn test_open_prompt_over_welcome() {
        let mut state = AppState::new("http://web.test");
        state.mode = Mode::OpenPrompt;
        let buffer = render(&state, 100, 20);
        assert!(buffer_contains(&buffer, text::OPEN_MATRIX_PLACEHOLDER));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#FF5733"), Some(Color::Rgb(0xFF, 0x57, 0x33)));
        assert_eq!(parse_hex("FF5733"), None);
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut state = board();
        state.mode = Mode::TaskForm;
        render(&state, 10, 5);
    }
}
