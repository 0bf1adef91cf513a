//! Pure rules the cell is rendered with.

use super::models::{CellStyle, DEFAULT_FILLED_BORDER_COLOR, ERROR_BORDER_COLOR};
use ratatui::style::Color;

/// Picks the border color of a cell.
///
/// The error color wins unconditionally. Otherwise a focused or filled cell
/// uses the filled color (falling back to [`DEFAULT_FILLED_BORDER_COLOR`]),
/// and an empty unfocused cell uses the normal border color.
///
/// # Examples
///
/// ```
/// use otpfield::domain::{resolve_border_color, CellStyle, DEFAULT_FILLED_BORDER_COLOR};
/// use ratatui::style::Color;
///
/// let style = CellStyle { border_color: Color::Gray, ..CellStyle::default() };
/// assert_eq!(resolve_border_color(&style, false, ""), Color::Gray);
/// assert_eq!(resolve_border_color(&style, false, "5"), DEFAULT_FILLED_BORDER_COLOR);
/// ```
pub fn resolve_border_color(style: &CellStyle, focused: bool, value: &str) -> Color {
    if style.border_color == ERROR_BORDER_COLOR {
        style.border_color
    } else if focused || !value.is_empty() {
        style.border_color_filled.unwrap_or(DEFAULT_FILLED_BORDER_COLOR)
    } else {
        style.border_color
    }
}

/// Parses the leading decimal digits of an OS version string.
///
/// Leading whitespace and an optional sign are accepted; anything after the
/// first non-digit is ignored. Digit runs too long for `i64` saturate.
/// Returns `None` when no digits lead the string.
pub fn major_version(version: &str) -> Option<i64> {
    let trimmed = version.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }

    let major = digits.bytes().fold(0i64, |acc, digit| {
        let digit = i64::from(digit - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    Some(major)
}
