//! The OTP input cell component.
//!
//! A cell renders one character of a multi-cell code. It owns nothing but
//! its focus flag: the value comes from the coordinator on every render and
//! the native control is reached through a [`HandleSlot`].

use super::handles::{FocusHandle, HandleSlot};
use crate::domain::{
    resolve_border_color, ContainerStyle, ContentHint, KeyPress, PlatformTraits, StyleSet, SECURE_MASK,
};
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Native text-field configuration passed through to the control as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellOptions {
    pub placeholder: String,
    pub secure_text_entry: bool,
    pub select_text_on_focus: bool,
    pub max_length: Option<usize>,
    pub editable: bool,
}

impl Default for CellOptions {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            secure_text_entry: false,
            select_text_on_focus: false,
            max_length: None,
            editable: true,
        }
    }
}

/// Everything a cell receives from its parent for one render.
#[derive(Debug, Clone, Copy)]
pub struct CellProps<'a> {
    pub value: &'a str,
    pub slot: HandleSlot<'a>,
    pub options: &'a CellOptions,
    pub style: &'a StyleSet,
    pub platform: &'a PlatformTraits,
}

/// Callbacks a cell reports to its parent.
///
/// `index` is the reporting cell's position in its group.
pub trait CellEventHandler {
    fn on_change_text(&mut self, index: usize, text: &str);

    fn on_key_press(&mut self, index: usize, key: KeyPress);

    fn on_focus(&mut self, _index: usize) {}

    /// Focus left every cell of the group.
    fn on_blur(&mut self) {}
}

/// A recorded callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellEvent {
    ChangeText { index: usize, text: String },
    KeyPress { index: usize, key: KeyPress },
    Focus { index: usize },
    Blur,
}

impl CellEventHandler for Vec<CellEvent> {
    fn on_change_text(&mut self, index: usize, text: &str) {
        self.push(CellEvent::ChangeText {
            index,
            text: text.to_string(),
        });
    }

    fn on_key_press(&mut self, index: usize, key: KeyPress) {
        self.push(CellEvent::KeyPress { index, key });
    }

    fn on_focus(&mut self, index: usize) {
        self.push(CellEvent::Focus { index });
    }

    fn on_blur(&mut self) {
        self.push(CellEvent::Blur);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Blurred,
    Focused,
}

/// What a cell looks like for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub index: usize,
    /// Text to draw: the native text (masked when secure) or the placeholder.
    pub text: String,
    pub is_placeholder: bool,
    pub border_color: Color,
    pub text_style: Style,
    pub focused: bool,
    /// The native control has its whole text selected.
    pub selected: bool,
    pub content_hint: ContentHint,
    pub container: ContainerStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SyncKey {
    value: String,
    index: usize,
    handle: Option<usize>,
}

/// One character cell of an OTP entry widget.
#[derive(Debug, Default)]
pub struct OtpInputCell {
    state: FocusState,
    synced: Option<SyncKey>,
}

impl OtpInputCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_focused(&self) -> bool {
        self.state == FocusState::Focused
    }

    /// Builds the frame description. Pure; never fails.
    pub fn render(&self, props: &CellProps) -> CellView {
        let focused = self.is_focused();
        let (native_text, selected) = match props.slot.handle() {
            Some(handle) => {
                let native = handle.borrow();
                (native.text().to_string(), native.is_all_selected())
            }
            None => (props.value.to_string(), false),
        };

        let is_placeholder = native_text.is_empty();
        let text = if is_placeholder {
            props.options.placeholder.clone()
        } else if props.options.secure_text_entry {
            SECURE_MASK.to_string().repeat(native_text.chars().count())
        } else {
            native_text
        };

        let mut text_style = props.style.input.text;
        if focused {
            if let Some(focus) = props.style.focus {
                text_style = text_style.patch(focus);
            }
        }

        CellView {
            index: props.slot.index(),
            text,
            is_placeholder,
            border_color: resolve_border_color(&props.style.input, focused, props.value),
            text_style: text_style.to_style(),
            focused,
            selected,
            content_hint: props.platform.content_hint,
            container: props.style.container,
        }
    }

    /// Post-render effect: pushes `value` into the native control.
    ///
    /// Runs when the value, index or handle changed since the last commit,
    /// or when the native text no longer matches the value. Never reports a
    /// change event. Returns whether the native text changed.
    pub fn commit(&mut self, props: &CellProps) -> bool {
        let Some(handle) = props.slot.handle() else {
            return false;
        };

        let key = SyncKey {
            value: props.value.to_string(),
            index: props.slot.index(),
            handle: props.slot.identity(),
        };

        let mut native = handle.borrow_mut();
        native.configure(
            props.platform.content_hint,
            props.options.secure_text_entry,
            props.options.max_length,
            props.options.editable,
        );

        let drifted = native.text() != props.value;
        if !drifted && self.synced.as_ref() == Some(&key) {
            return false;
        }

        if drifted {
            debug!(index = key.index, native = native.text(), value = props.value, "forcing native text");
        }
        native.set_native_text(props.value);
        self.synced = Some(key);
        drifted
    }

    /// Gives the native control focus, selecting its text when the platform
    /// or the caller asks for it.
    pub fn focus(&self, props: &CellProps) {
        if let Some(handle) = props.slot.handle() {
            let select = props.platform.select_text_on_focus(props.options.select_text_on_focus);
            handle.borrow_mut().focus(select);
        }
    }

    /// Takes focus away from the native control.
    pub fn blur(&self, props: &CellProps) {
        if let Some(handle) = props.slot.handle() {
            handle.borrow_mut().blur();
        }
    }

    /// The native control gained focus.
    pub fn handle_focus(&mut self, props: &CellProps, handler: &mut dyn CellEventHandler) {
        self.state = FocusState::Focused;
        handler.on_focus(props.slot.index());
    }

    /// The native control lost focus.
    ///
    /// Only reports a blur when no handle in the slot still has focus, so
    /// focus moving to a sibling cell is not a group blur.
    pub fn handle_blur(&mut self, props: &CellProps, handler: &mut dyn CellEventHandler) {
        self.state = FocusState::Blurred;

        if props.slot.any_focused() {
            debug!(index = props.slot.index(), "focus moved to a sibling cell");
        } else {
            handler.on_blur();
        }
    }

    /// A key went down in the native control.
    ///
    /// Every key is reported; a change event follows when the key edited
    /// the native text.
    pub fn handle_key(&mut self, props: &CellProps, key: KeyPress, handler: &mut dyn CellEventHandler) {
        let index = props.slot.index();
        handler.on_key_press(index, key);

        let changed = props
            .slot
            .handle()
            .and_then(|handle| handle.borrow_mut().apply_key(key));
        if let Some(text) = changed {
            handler.on_change_text(index, &text);
        }
    }

    /// Drops local state, as when the cell is unmounted.
    pub fn reset(&mut self) {
        self.state = FocusState::Blurred;
        self.synced = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handles::HandleGroup;
    use crate::domain::{
        CellStyle, OsFamily, Platform, DEFAULT_FILLED_BORDER_COLOR, ERROR_BORDER_COLOR,
    };

    const DESKTOP: PlatformTraits = PlatformTraits {
        content_hint: ContentHint::None,
        force_select_on_focus: false,
    };

    fn style() -> StyleSet {
        StyleSet {
            input: CellStyle {
                border_color: Color::Gray,
                border_color_filled: Some(Color::Cyan),
                ..CellStyle::default()
            },
            ..StyleSet::default()
        }
    }

    fn props<'a>(
        value: &'a str,
        group: &'a HandleGroup,
        index: usize,
        options: &'a CellOptions,
        style: &'a StyleSet,
    ) -> CellProps<'a> {
        CellProps {
            value,
            slot: HandleSlot { group, index },
            options,
            style,
            platform: &DESKTOP,
        }
    }

    #[test]
    fn test_initial_state_is_blurred() {
        let cell = OtpInputCell::new();
        assert_eq!(cell.state(), FocusState::Blurred);
    }

    #[test]
    fn test_typing_into_empty_cell() {
        let group = HandleGroup::with_len(6);
        let options = CellOptions::default();
        let style = style();
        let props = props("", &group, 2, &options, &style);
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        cell.commit(&props);
        cell.focus(&props);
        cell.handle_focus(&props, &mut events);
        cell.handle_key(&props, KeyPress::Char('5'), &mut events);

        let changes: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, CellEvent::ChangeText { .. }))
            .collect();
        assert_eq!(changes, vec![&CellEvent::ChangeText { index: 2, text: "5".to_string() }]);

        let filled = CellProps { value: "5", ..props };
        assert_eq!(cell.render(&filled).border_color, Color::Cyan);
    }

    #[test]
    fn test_delete_on_empty_cell_only_reports_key() {
        let group = HandleGroup::with_len(4);
        let options = CellOptions::default();
        let style = style();
        let props = props("", &group, 1, &options, &style);
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        cell.handle_key(&props, KeyPress::Backspace, &mut events);

        assert_eq!(events, vec![CellEvent::KeyPress { index: 1, key: KeyPress::Backspace }]);
    }

    #[test]
    fn test_focus_fires_once_and_sets_state() {
        let group = HandleGroup::with_len(2);
        let options = CellOptions::default();
        let style = style();
        let props = props("", &group, 0, &options, &style);
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        cell.handle_focus(&props, &mut events);

        assert_eq!(events, vec![CellEvent::Focus { index: 0 }]);
        assert!(cell.is_focused());
        assert!(cell.render(&props).focused);
    }

    #[test]
    fn test_blur_to_sibling_is_not_a_group_blur() {
        let group = HandleGroup::with_len(3);
        let options = CellOptions::default();
        let style = style();
        let first = props("", &group, 0, &options, &style);
        let second = props("", &group, 1, &options, &style);
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        cell.focus(&first);
        cell.handle_focus(&first, &mut events);
        events.clear();

        OtpInputCell::new().focus(&second);
        cell.blur(&first);
        cell.handle_blur(&first, &mut events);

        assert!(events.is_empty());
        assert_eq!(cell.state(), FocusState::Blurred);
    }

    #[test]
    fn test_blur_from_group_fires_once() {
        let group = HandleGroup::with_len(3);
        let options = CellOptions::default();
        let style = style();
        let props = props("", &group, 2, &options, &style);
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        cell.focus(&props);
        cell.handle_focus(&props, &mut events);
        events.clear();

        cell.blur(&props);
        cell.handle_blur(&props, &mut events);

        assert_eq!(events, vec![CellEvent::Blur]);
    }

    #[test]
    fn test_lone_cell_blur_reports() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = style();
        let props = props("", &group, 0, &options, &style);
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        cell.focus(&props);
        cell.handle_focus(&props, &mut events);
        cell.blur(&props);
        cell.handle_blur(&props, &mut events);

        assert_eq!(events, vec![CellEvent::Focus { index: 0 }, CellEvent::Blur]);
    }

    #[test]
    fn test_sibling_focus_suppresses_blur_in_either_direction() {
        let group = HandleGroup::with_len(2);
        let options = CellOptions::default();
        let style = style();
        let a = props("", &group, 0, &options, &style);
        let b = props("", &group, 1, &options, &style);
        let mut cell_a = OtpInputCell::new();
        let mut cell_b = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        cell_a.focus(&a);
        cell_a.handle_focus(&a, &mut events);
        events.clear();

        cell_b.focus(&b);
        cell_a.blur(&a);
        cell_a.handle_blur(&a, &mut events);
        cell_b.handle_focus(&b, &mut events);
        assert_eq!(events, vec![CellEvent::Focus { index: 1 }]);
        events.clear();

        cell_a.focus(&a);
        cell_b.blur(&b);
        cell_b.handle_blur(&b, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_commit_forces_value_over_native_edit() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = style();
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        let props = props("4", &group, 0, &options, &style);
        assert!(cell.commit(&props));
        assert_eq!(group.get(0).unwrap().borrow().text(), "4");

        // Native side edits, parent keeps the old value.
        cell.handle_key(&props, KeyPress::Char('9'), &mut events);
        assert_eq!(group.get(0).unwrap().borrow().text(), "49");

        assert!(cell.commit(&props));
        assert_eq!(group.get(0).unwrap().borrow().text(), "4");
        assert_eq!(cell.render(&props).text, "4");
    }

    #[test]
    fn test_commit_is_idempotent_and_silent() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = style();
        let mut cell = OtpInputCell::new();
        let props = props("7", &group, 0, &options, &style);

        assert!(cell.commit(&props));
        assert!(!cell.commit(&props));

        let cleared = CellProps { value: "", ..props };
        assert!(cell.commit(&cleared));
        assert_eq!(group.get(0).unwrap().borrow().text(), "");
    }

    #[test]
    fn test_render_without_handle_uses_value() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = style();
        let mut cell = OtpInputCell::new();
        let props = props("3", &group, 8, &options, &style);

        assert!(!cell.commit(&props));
        let view = cell.render(&props);
        assert_eq!(view.text, "3");
        assert_eq!(view.index, 8);
    }

    #[test]
    fn test_render_masks_secure_text_and_shows_placeholder() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions {
            placeholder: "-".to_string(),
            secure_text_entry: true,
            ..CellOptions::default()
        };
        let style = style();
        let mut cell = OtpInputCell::new();

        let empty = props("", &group, 0, &options, &style);
        cell.commit(&empty);
        let view = cell.render(&empty);
        assert_eq!(view.text, "-");
        assert!(view.is_placeholder);

        let filled = props("8", &group, 0, &options, &style);
        cell.commit(&filled);
        let view = cell.render(&filled);
        assert_eq!(view.text, SECURE_MASK.to_string());
        assert!(!view.is_placeholder);
        assert!(group.get(0).unwrap().borrow().is_secure());
    }

    #[test]
    fn test_border_color_states() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let plain = StyleSet::default();
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();

        let empty = props("", &group, 0, &options, &plain);
        assert_eq!(cell.render(&empty).border_color, Color::Gray);

        cell.handle_focus(&empty, &mut events);
        assert_eq!(cell.render(&empty).border_color, DEFAULT_FILLED_BORDER_COLOR);

        let error = plain.with_error();
        let errored = props("1", &group, 0, &options, &error);
        assert_eq!(cell.render(&errored).border_color, ERROR_BORDER_COLOR);
    }

    #[test]
    fn test_focus_style_applies_only_while_focused() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = StyleSet {
            focus: Some(crate::domain::TextStyle { fg: Some(Color::Yellow), bold: true }),
            ..StyleSet::default()
        };
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();
        let props = props("", &group, 0, &options, &style);

        assert_eq!(cell.render(&props).text_style, Style::default());
        cell.handle_focus(&props, &mut events);
        assert_eq!(cell.render(&props).text_style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_android_forces_select_on_focus() {
        let android = PlatformTraits::resolve(&Platform::new(OsFamily::Android, "14"));
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = style();
        let mut cell = OtpInputCell::new();
        let props = CellProps {
            platform: &android,
            ..props("6", &group, 0, &options, &style)
        };

        cell.commit(&props);
        cell.focus(&props);

        assert!(android.force_select_on_focus);
        assert!(!options.select_text_on_focus);
        assert!(cell.render(&props).selected);
    }

    #[test]
    fn test_commit_applies_content_hint() {
        let ios = PlatformTraits::resolve(&Platform::new(OsFamily::Ios, "12.1"));
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = style();
        let mut cell = OtpInputCell::new();
        let props = CellProps {
            platform: &ios,
            ..props("", &group, 0, &options, &style)
        };

        cell.commit(&props);

        assert_eq!(group.get(0).unwrap().borrow().content_hint(), ContentHint::OneTimeCode);
        assert_eq!(cell.render(&props).content_hint, ContentHint::OneTimeCode);
    }

    #[test]
    fn test_reset_clears_focus_and_sync() {
        let group = HandleGroup::with_len(1);
        let options = CellOptions::default();
        let style = style();
        let mut cell = OtpInputCell::new();
        let mut events: Vec<CellEvent> = Vec::new();
        let props = props("2", &group, 0, &options, &style);

        cell.commit(&props);
        cell.handle_focus(&props, &mut events);
        cell.reset();

        assert_eq!(cell.state(), FocusState::Blurred);
        assert!(!cell.commit(&props));
    }
}
