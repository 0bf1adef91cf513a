use crate::application::{App, AppMode};
use crate::domain::KeyPress;
use crate::infrastructure::ClipboardReader;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Entry => Self::handle_entry_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    /// Maps a crossterm key onto what the native control would report.
    pub fn key_press(key: KeyCode) -> KeyPress {
        match key {
            KeyCode::Char(c) => KeyPress::Char(c),
            KeyCode::Backspace | KeyCode::Delete => KeyPress::Backspace,
            KeyCode::Enter => KeyPress::Enter,
            _ => KeyPress::Unidentified,
        }
    }

    fn handle_entry_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('v') => app.set_paste_result(ClipboardReader::read_text()),
                KeyCode::Char('e') => app.toggle_error(),
                KeyCode::Char('u') => app.clear_entry(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::F(1) => app.show_help(),
            KeyCode::Tab | KeyCode::Right => app.entry.focus_next(),
            KeyCode::BackTab | KeyCode::Left => app.entry.focus_prev(),
            KeyCode::Esc => app.entry.blur_all(),
            KeyCode::Enter => {
                app.entry.dispatch_key(KeyPress::Enter);
                app.submit();
            }
            _ => {
                app.status_message = None;
                app.entry.dispatch_key(Self::key_press(key));
            }
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => app.close_help(),
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
