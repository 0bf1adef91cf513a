use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Border color reserved for the error state.
///
/// When a cell's normal border color equals this value the cell renders it
/// regardless of focus or content.
pub const ERROR_BORDER_COLOR: Color = Color::Rgb(0xE3, 0x44, 0x44);

/// Border color used for focused or filled cells when the style does not
/// provide one.
pub const DEFAULT_FILLED_BORDER_COLOR: Color = Color::Rgb(0x41, 0x41, 0x41);

/// Character shown in place of each entered character for secure entry.
pub const SECURE_MASK: char = '•';

/// Foreground and weight applied to the text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub fg: Option<Color>,
    pub bold: bool,
}

impl TextStyle {
    /// Layers `other` on top of `self`; fields set in `other` win.
    pub fn patch(self, other: TextStyle) -> TextStyle {
        TextStyle {
            fg: other.fg.or(self.fg),
            bold: self.bold || other.bold,
        }
    }

    pub fn to_style(self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

/// Style of the text box itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellStyle {
    /// Border color of an empty, unfocused cell.
    pub border_color: Color,
    /// Border color of a focused or filled cell.
    pub border_color_filled: Option<Color>,
    pub text: TextStyle,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            border_color: Color::Gray,
            border_color_filled: None,
            text: TextStyle::default(),
        }
    }
}

/// Geometry of the container wrapping each cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerStyle {
    pub width: u16,
    pub height: u16,
    /// Horizontal space between neighbouring cells.
    pub gap: u16,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            width: 5,
            height: 3,
            gap: 1,
        }
    }
}

/// Every style a cell is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSet {
    pub container: ContainerStyle,
    pub input: CellStyle,
    /// Applied on top of `input.text` while the cell is focused.
    pub focus: Option<TextStyle>,
}

impl StyleSet {
    /// Returns a copy whose normal border color is the reserved error color.
    pub fn with_error(mut self) -> StyleSet {
        self.input.border_color = ERROR_BORDER_COLOR;
        self
    }
}

/// Autofill hint attached to the native text control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentHint {
    #[default]
    None,
    OneTimeCode,
}

/// A key-down event as reported by the native control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Backspace,
    Enter,
    Unidentified,
}

impl KeyPress {
    /// Key name in the form native controls report it.
    pub fn name(&self) -> String {
        match self {
            KeyPress::Char(c) => c.to_string(),
            KeyPress::Backspace => "Backspace".to_string(),
            KeyPress::Enter => "Enter".to_string(),
            KeyPress::Unidentified => "Unidentified".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_set_deserializes_hex_colors() {
        let json = r##"{"input": {"border_color": "#E34444", "border_color_filled": "#00FF00"}}"##;
        let style: StyleSet = serde_json::from_str(json).unwrap();

        assert_eq!(style.input.border_color, ERROR_BORDER_COLOR);
        assert_eq!(style.input.border_color_filled, Some(Color::Rgb(0, 0xFF, 0)));
        assert_eq!(style.container, ContainerStyle::default());
        assert!(style.focus.is_none());
    }

    #[test]
    fn test_text_style_patch() {
        let base = TextStyle { fg: Some(Color::White), bold: false };
        let focus = TextStyle { fg: None, bold: true };

        let patched = base.patch(focus);
        assert_eq!(patched.fg, Some(Color::White));
        assert!(patched.bold);
    }

    #[test]
    fn test_with_error_overrides_border_color() {
        let style = StyleSet::default().with_error();
        assert_eq!(style.input.border_color, ERROR_BORDER_COLOR);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(KeyPress::Char('5').name(), "5");
        assert_eq!(KeyPress::Backspace.name(), "Backspace");
    }
}
