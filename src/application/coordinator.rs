//! Parent coordinator of a row of OTP cells.
//!
//! `OtpEntry` owns the per-cell values and the shared handle group, lays
//! focus out across the cells and assembles the final code from the events
//! the cells report.

use super::cell::{CellEvent, CellOptions, CellProps, CellView, OtpInputCell};
use super::handles::{HandleGroup, HandleSlot};
use crate::domain::{platform, KeyPress, PlatformTraits, StyleSet};
use tracing::{debug, info};

/// State shared by every cell; borrowed immutably while a cell is mutated.
#[derive(Debug)]
struct EntryShared {
    values: Vec<String>,
    handles: HandleGroup,
    options: CellOptions,
    style: StyleSet,
    platform: PlatformTraits,
}

impl EntryShared {
    fn props(&self, index: usize) -> CellProps<'_> {
        CellProps {
            value: &self.values[index],
            slot: HandleSlot {
                group: &self.handles,
                index,
            },
            options: &self.options,
            style: &self.style,
            platform: &self.platform,
        }
    }
}

/// A multi-cell OTP entry.
///
/// # Examples
///
/// ```
/// use otpfield::application::{CellOptions, OtpEntry};
/// use otpfield::domain::{KeyPress, StyleSet};
///
/// let mut entry = OtpEntry::new(4, CellOptions::default(), StyleSet::default());
/// entry.focus(0);
/// for c in ['1', '2', '3', '4'] {
///     entry.dispatch_key(KeyPress::Char(c));
/// }
/// assert_eq!(entry.code(), "1234");
/// assert!(entry.is_complete());
/// ```
#[derive(Debug)]
pub struct OtpEntry {
    shared: EntryShared,
    cells: Vec<OtpInputCell>,
    base_style: StyleSet,
    error: bool,
    completed: bool,
    group_blurs: usize,
}

impl OtpEntry {
    /// Creates an entry with `len` cells (at least one).
    pub fn new(len: usize, options: CellOptions, style: StyleSet) -> Self {
        let len = len.max(1);
        Self {
            shared: EntryShared {
                values: vec![String::new(); len],
                handles: HandleGroup::with_len(len),
                options,
                style,
                platform: *platform::current(),
            },
            cells: (0..len).map(|_| OtpInputCell::new()).collect(),
            base_style: style,
            error: false,
            completed: false,
            group_blurs: 0,
        }
    }

    pub fn with_platform(mut self, traits: PlatformTraits) -> Self {
        self.shared.platform = traits;
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.shared.values
    }

    pub fn handles(&self) -> &HandleGroup {
        &self.shared.handles
    }

    /// The entered characters, in cell order.
    pub fn code(&self) -> String {
        self.shared.values.concat()
    }

    pub fn is_complete(&self) -> bool {
        self.shared.values.iter().all(|value| !value.is_empty())
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.shared.handles.focused_index()
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Number of times focus left the whole entry.
    pub fn group_blurs(&self) -> usize {
        self.group_blurs
    }

    /// Renders every cell in the error style, or back to normal.
    pub fn set_error(&mut self, error: bool) {
        self.error = error;
        self.shared.style = if error {
            self.base_style.with_error()
        } else {
            self.base_style
        };
    }

    /// Moves focus to the cell at `index`.
    ///
    /// The new cell's control takes focus before the old one blurs, so the
    /// old cell sees a sibling focus and does not report a group blur.
    pub fn focus(&mut self, index: usize) {
        if index >= self.cells.len() {
            return;
        }
        let previous = self.focused_index();
        if previous == Some(index) {
            return;
        }

        let mut events: Vec<CellEvent> = Vec::new();
        self.cells[index].focus(&self.shared.props(index));
        if let Some(previous) = previous {
            let props = self.shared.props(previous);
            self.cells[previous].blur(&props);
            self.cells[previous].handle_blur(&props, &mut events);
        }
        self.cells[index].handle_focus(&self.shared.props(index), &mut events);

        self.apply_events(events);
    }

    pub fn focus_next(&mut self) {
        match self.focused_index() {
            Some(index) => self.focus(index + 1),
            None => self.focus(0),
        }
    }

    pub fn focus_prev(&mut self) {
        match self.focused_index() {
            Some(index) if index > 0 => self.focus(index - 1),
            Some(_) => {}
            None => self.focus(self.cells.len() - 1),
        }
    }

    /// Takes focus away from every cell.
    pub fn blur_all(&mut self) {
        let Some(index) = self.focused_index() else {
            return;
        };

        let mut events: Vec<CellEvent> = Vec::new();
        let props = self.shared.props(index);
        self.cells[index].blur(&props);
        self.cells[index].handle_blur(&props, &mut events);
        self.apply_events(events);
    }

    /// Sends a key to the focused cell. Ignored when nothing has focus.
    pub fn dispatch_key(&mut self, key: KeyPress) {
        let Some(index) = self.focused_index() else {
            debug!(key = %key.name(), "key dropped, no focused cell");
            return;
        };

        let mut events: Vec<CellEvent> = Vec::new();
        self.cells[index].handle_key(&self.shared.props(index), key, &mut events);
        self.apply_events(events);
    }

    /// Distributes `text` over the cells from the focused one onward.
    /// Whitespace is skipped. Returns the number of cells filled.
    pub fn paste(&mut self, text: &str) -> usize {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() {
            return 0;
        }
        let start = self.focused_index().unwrap_or(0);
        self.fill_from(start, &chars)
    }

    /// Empties every cell and focuses the first one.
    pub fn clear(&mut self) {
        for value in &mut self.shared.values {
            value.clear();
        }
        self.completed = false;
        self.focus(0);
    }

    pub fn views(&self) -> Vec<CellView> {
        (0..self.cells.len())
            .map(|index| self.cells[index].render(&self.shared.props(index)))
            .collect()
    }

    /// Runs every cell's post-render effect. Returns whether any native
    /// control changed and the frame should be drawn again.
    pub fn commit(&mut self) -> bool {
        let mut changed = false;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            changed |= cell.commit(&self.shared.props(index));
        }
        changed
    }

    fn apply_events(&mut self, events: Vec<CellEvent>) {
        for event in events {
            match event {
                CellEvent::KeyPress {
                    index,
                    key: KeyPress::Backspace,
                } if self.shared.values[index].is_empty() && index > 0 => {
                    self.shared.values[index - 1].clear();
                    self.completed = false;
                    self.focus(index - 1);
                }
                CellEvent::KeyPress { .. } => {}
                CellEvent::ChangeText { index, text } => self.apply_text(index, &text),
                CellEvent::Focus { index } => debug!(index, "cell focused"),
                CellEvent::Blur => {
                    self.group_blurs += 1;
                    debug!(count = self.group_blurs, "entry lost focus");
                }
            }
        }
    }

    fn apply_text(&mut self, index: usize, text: &str) {
        let current = self.shared.values[index].as_str();
        let typed = text
            .strip_prefix(current)
            .filter(|rest| !rest.is_empty())
            .unwrap_or(text);
        let chars: Vec<char> = typed.chars().filter(|c| !c.is_whitespace()).collect();

        match chars.as_slice() {
            [] => {
                self.shared.values[index].clear();
                self.completed = false;
            }
            [c] => {
                self.shared.values[index] = c.to_string();
                self.check_complete();
                self.focus(index + 1);
            }
            _ => {
                self.fill_from(index, &chars);
            }
        }
    }

    fn fill_from(&mut self, start: usize, chars: &[char]) -> usize {
        let len = self.cells.len();
        let mut filled = 0;
        for (index, c) in (start..len).zip(chars) {
            self.shared.values[index] = c.to_string();
            filled += 1;
        }

        self.check_complete();
        if filled > 0 {
            self.focus((start + filled).min(len - 1));
        }
        filled
    }

    fn check_complete(&mut self) {
        if self.is_complete() && !self.completed {
            self.completed = true;
            info!(cells = self.cells.len(), "code complete");
        }
    }
}
