// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::ops::Range;

/// Tracks which fixed-size page of a list is on screen.
///
/// Pages wrap around: advancing from the last page returns to page 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    item_count: usize,
    per_page: usize,
    current: usize,
}

impl PageCursor {
    /// # Panics
    /// Panics if `per_page` is zero. Configuration validation rules that out.
    #[must_use]
    pub fn new(item_count: usize, per_page: usize) -> Self {
        assert!(per_page > 0, "per_page must be at least 1");
        Self {
            item_count,
            per_page,
            current: 0,
        }
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.item_count.div_ceil(self.per_page)
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Whether there is more than one page to cycle through
    #[must_use]
    pub const fn needs_rotation(&self) -> bool {
        self.item_count > self.per_page
    }

    pub fn advance(&mut self) -> usize {
        let total = self.total_pages();
        self.current = if total == 0 {
            0
        } else {
            (self.current + 1) % total
        };
        self.current
    }

    /// Item indices shown on `page`, clamped to the list length
    #[must_use]
    pub fn range(&self, page: usize) -> Range<usize> {
        let start = page.saturating_mul(self.per_page).min(self.item_count);
        let end = start.saturating_add(self.per_page).min(self.item_count);
        start..end
    }
}
