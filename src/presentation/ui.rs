use super::widget::OtpCellWidget;
use crate::application::{App, AppMode, CellView};
use crate::domain::ContentHint;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let views = app.entry.views();
    let cell_height = views.first().map(|view| view.container.height).unwrap_or(3);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(cell_height.saturating_add(2)),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(f.area());

    render_header(f, app, &views, chunks[0]);
    render_cells(f, &views, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, views: &[CellView], area: Rect) {
    let focused = match app.entry.focused_index() {
        Some(index) => format!("{}/{}", index + 1, views.len()),
        None => "-".to_string(),
    };
    let autofill = match views.first().map(|view| view.content_hint) {
        Some(ContentHint::OneTimeCode) => "one-time-code",
        _ => "off",
    };

    let header = Paragraph::new(format!(
        "otpfield - One-Time Code | Cell: {} | Autofill: {}",
        focused, autofill
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

/// Lays the cells out in one centered row.
pub fn cell_rects(views: &[CellView], area: Rect) -> Vec<Rect> {
    let widths = views.iter().map(|view| view.container.width);
    let gaps = views.iter().skip(1).map(|view| view.container.gap);
    let total_width = widths.chain(gaps).fold(0u16, u16::saturating_add);

    let mut x = area.x + area.width.saturating_sub(total_width) / 2;
    let y = area.y.saturating_add(1);
    let mut rects = Vec::with_capacity(views.len());
    for (position, view) in views.iter().enumerate() {
        if position > 0 {
            x = x.saturating_add(view.container.gap);
        }
        let rect = Rect {
            x,
            y,
            width: view.container.width,
            height: view.container.height,
        };
        rects.push(rect.intersection(area));
        x = x.saturating_add(view.container.width);
    }
    rects
}

fn render_cells(f: &mut Frame, views: &[CellView], area: Rect) {
    for (view, rect) in views.iter().zip(cell_rects(views, area)) {
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        f.render_widget(OtpCellWidget::new(view), rect);

        if view.focused && !view.selected {
            let text_width = if view.is_placeholder { 0 } else { view.text.chars().count() as u16 };
            let inner_width = rect.width.saturating_sub(2);
            let cursor_x = rect
                .x
                .saturating_add(1)
                .saturating_add(inner_width.saturating_sub(text_width) / 2)
                .saturating_add(text_width);
            f.set_cursor_position((
                cursor_x.min(rect.right().saturating_sub(2)),
                rect.y.saturating_add(1),
            ));
        }
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Entry => match app.status_message {
            Some(ref status) => status.clone(),
            None => "Tab/→: next | Shift+Tab/←: previous | Enter: submit | Ctrl+V: paste | Ctrl+E: error | Ctrl+U: clear | F1: help | Ctrl+Q: quit".to_string(),
        },
        AppMode::Help => "↑↓/jk: scroll | Esc/F1/q: close help".to_string(),
    };

    let style = match app.mode {
        AppMode::Entry if app.entry.is_error() => Style::default().fg(Color::Red),
        AppMode::Entry if app.submitted.is_some() => Style::default().fg(Color::Green),
        AppMode::Entry => Style::default(),
        AppMode::Help => Style::default().fg(Color::Cyan),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("otpfield Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

pub const HELP_TEXT: &str = r#"OTPFIELD KEYS

=== ENTRY ===
0-9, a-z        Type into the focused cell, focus moves on
Backspace       Clear the cell; on an empty cell go back and clear
Tab / →         Next cell
Shift+Tab / ←   Previous cell
Esc             Leave the entry (group blur)
Enter           Submit a complete code
Ctrl+V          Paste a code from the clipboard
Ctrl+U          Clear every cell
Ctrl+E          Toggle the error state

=== BORDERS ===
Error color     The entry is in the error state
Filled color    The cell has focus or holds a character
Normal color    The cell is empty and unfocused

=== CONFIG ===
--config FILE   JSON file with cells, options, style, platform, log_file
--write-config  Write the effective config and exit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text
Esc/F1/q        Close this help window

Ctrl+C or Ctrl+Q quits."#;
