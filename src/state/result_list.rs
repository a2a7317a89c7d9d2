//! Selection and viewport over the product list (pure state transitions).

/// Selected row and first visible row of the result list.
///
/// Both are clamped against the current item count on every transition, so a
/// list that shrinks (new query) never leaves the selection dangling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultList {
    selected: usize,
    offset: usize,
}

impl ResultList {
    /// Selected row index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// First visible row index.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Selected index, or `None` when the list is empty.
    pub fn selected_in(&self, len: usize) -> Option<usize> {
        (self.selected < len).then_some(self.selected)
    }

    /// Rows between the bottom of the viewport and the end of the list.
    pub fn proximity_to_end(&self, len: usize, viewport: usize) -> usize {
        len.saturating_sub(self.offset + viewport)
    }

    fn clamped(mut self, len: usize, viewport: usize) -> Self {
        if len == 0 {
            return Self::default();
        }
        self.selected = self.selected.min(len - 1);
        let viewport = viewport.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + viewport {
            self.offset = self.selected + 1 - viewport;
        }
        self.offset = self.offset.min(len.saturating_sub(viewport));
        self
    }
}

/// Move the selection up one row.
pub fn select_up(list: ResultList, len: usize, viewport: usize) -> ResultList {
    ResultList {
        selected: list.selected.saturating_sub(1),
        ..list
    }
    .clamped(len, viewport)
}

/// Move the selection down one row.
pub fn select_down(list: ResultList, len: usize, viewport: usize) -> ResultList {
    ResultList {
        selected: list.selected.saturating_add(1),
        ..list
    }
    .clamped(len, viewport)
}

/// Move the selection up one viewport.
pub fn page_up(list: ResultList, len: usize, viewport: usize) -> ResultList {
    ResultList {
        selected: list.selected.saturating_sub(viewport.max(1)),
        ..list
    }
    .clamped(len, viewport)
}

/// Move the selection down one viewport.
pub fn page_down(list: ResultList, len: usize, viewport: usize) -> ResultList {
    ResultList {
        selected: list.selected.saturating_add(viewport.max(1)),
        ..list
    }
    .clamped(len, viewport)
}

/// Select the first row.
pub fn select_first(_list: ResultList, len: usize, viewport: usize) -> ResultList {
    ResultList::default().clamped(len, viewport)
}

/// Select the last loaded row.
pub fn select_last(list: ResultList, len: usize, viewport: usize) -> ResultList {
    ResultList {
        selected: len.saturating_sub(1),
        ..list
    }
    .clamped(len, viewport)
}

/// Re-clamp after the list or the viewport changed size.
pub fn fit(list: ResultList, len: usize, viewport: usize) -> ResultList {
    list.clamped(len, viewport)
}
