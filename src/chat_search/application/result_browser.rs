use crate::chat_search::domain::models::MessageRef;

/// Scrollable list of every loaded result, newest first.
///
/// Rows only grow between resets. Selection and scroll position are kept here
/// so that the orchestrator can reason about "need more" without a terminal.
#[derive(Debug, Default)]
pub struct ResultBrowser {
    rows: Vec<MessageRef>,
    selected: usize,
    scroll_offset: usize,
    visible: bool,
    load_more_threshold: usize,
}

impl ResultBrowser {
    pub fn new(load_more_threshold: usize) -> Self {
        Self {
            load_more_threshold,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[MessageRef] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<MessageRef> {
        self.rows.get(self.selected).copied()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Replace (`clear`) or extend the rows with the merged result sequence.
    /// Appending only takes entries past the rows already present.
    pub fn add_items(&mut self, ids: &[MessageRef], clear: bool) {
        if clear {
            self.rows.clear();
            self.selected = 0;
            self.scroll_offset = 0;
        }
        if ids.len() > self.rows.len() {
            let start = self.rows.len();
            self.rows.extend_from_slice(&ids[start..]);
        }
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let last = self.rows.len() - 1;
        let target = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta as usize).min(last)
        };
        if target == self.selected {
            return false;
        }
        self.selected = target;
        true
    }

    pub fn select_first(&mut self) -> bool {
        self.move_selection(-(self.selected as isize))
    }

    pub fn select_last(&mut self) -> bool {
        let remaining = self.rows.len().saturating_sub(self.selected + 1);
        self.move_selection(remaining as isize)
    }

    /// Sync the highlighted row with the navigator position (0-based)
    pub fn select_index(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selected = index;
        }
    }

    /// The selection is close enough to the end to warrant another page
    pub fn needs_more(&self) -> bool {
        self.visible
            && !self.rows.is_empty()
            && self.selected + self.load_more_threshold >= self.rows.len() - 1
    }

    /// Keep the selected row inside a viewport of `height` rows
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }
}
