//! Handles onto the native text controls backing each cell.
//!
//! The coordinator owns the [`HandleGroup`]; cells only ever see a
//! [`HandleSlot`] borrowed from it and never keep a handle themselves.

use crate::domain::{ContentHint, KeyPress};
use std::cell::RefCell;
use std::rc::Rc;

/// Imperative access to a native text control.
pub trait FocusHandle {
    fn is_focused(&self) -> bool;

    /// Replaces the displayed text without emitting a change event.
    fn set_native_text(&mut self, text: &str);
}

/// In-process model of a native single-line text control.
#[derive(Debug, Clone)]
pub struct NativeTextInput {
    text: String,
    focused: bool,
    all_selected: bool,
    content_hint: ContentHint,
    secure: bool,
    max_length: Option<usize>,
    editable: bool,
}

impl Default for NativeTextInput {
    fn default() -> Self {
        Self {
            text: String::new(),
            focused: false,
            all_selected: false,
            content_hint: ContentHint::None,
            secure: false,
            max_length: None,
            editable: true,
        }
    }
}

impl NativeTextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn content_hint(&self) -> ContentHint {
        self.content_hint
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn configure(&mut self, content_hint: ContentHint, secure: bool, max_length: Option<usize>, editable: bool) {
        self.content_hint = content_hint;
        self.secure = secure;
        self.max_length = max_length;
        self.editable = editable;
    }

    /// Gives the control focus, selecting its text when asked to.
    pub fn focus(&mut self, select_on_focus: bool) {
        self.focused = true;
        self.all_selected = select_on_focus && !self.text.is_empty();
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.all_selected = false;
    }

    /// Feeds a key into the control.
    ///
    /// Returns the new text when the key edited it, `None` when the text is
    /// unchanged (non-printing keys, delete on an empty control, a full
    /// control, a read-only control).
    pub fn apply_key(&mut self, key: KeyPress) -> Option<String> {
        if !self.editable {
            return None;
        }

        let next = match key {
            KeyPress::Char(c) if !c.is_control() => {
                if self.all_selected {
                    c.to_string()
                } else {
                    if self.max_length.is_some_and(|max| self.text.chars().count() >= max) {
                        return None;
                    }
                    let mut text = self.text.clone();
                    text.push(c);
                    text
                }
            }
            KeyPress::Backspace => {
                if self.all_selected {
                    String::new()
                } else {
                    let mut text = self.text.clone();
                    text.pop()?;
                    text
                }
            }
            _ => return None,
        };

        self.all_selected = false;
        if next == self.text {
            return None;
        }
        self.text.clone_from(&next);
        Some(next)
    }
}

impl FocusHandle for NativeTextInput {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_native_text(&mut self, text: &str) {
        self.all_selected = false;
        if self.text != text {
            self.text = text.to_string();
        }
    }
}

/// Shared reference to one native control.
pub type HandleRef = Rc<RefCell<NativeTextInput>>;

/// Ordered handles of every cell in an OTP widget, indexed by cell position.
#[derive(Debug, Clone, Default)]
pub struct HandleGroup {
    handles: Vec<HandleRef>,
}

impl HandleGroup {
    pub fn with_len(len: usize) -> Self {
        Self {
            handles: (0..len).map(|_| HandleRef::default()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HandleRef> {
        self.handles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandleRef> {
        self.handles.iter()
    }

    pub fn any_focused(&self) -> bool {
        self.handles.iter().any(|handle| handle.borrow().is_focused())
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.handles.iter().position(|handle| handle.borrow().is_focused())
    }
}

/// The part of the handle state a single cell may see: its own slot in the
/// shared group, plus read access to the siblings for the blur check.
#[derive(Debug, Clone, Copy)]
pub struct HandleSlot<'a> {
    pub group: &'a HandleGroup,
    pub index: usize,
}

impl<'a> HandleSlot<'a> {
    /// The cell's own handle, if the slot resolves to one.
    pub fn handle(&self) -> Option<&'a HandleRef> {
        self.group.get(self.index)
    }

    /// Whether any handle in the group currently has focus.
    pub fn any_focused(&self) -> bool {
        self.group.any_focused()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Identity of the resolved handle, stable for the handle's lifetime.
    pub fn identity(&self) -> Option<usize> {
        self.handle().map(|handle| Rc::as_ptr(handle) as usize)
    }
}
