use serde::Serialize;

/// Offset/limit/total triple behind every paged listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub page_index: u64,
    pub limit: u64,
    pub total: u64,
}

impl PageCursor {
    pub fn new(limit: u64) -> Self {
        Self {
            page_index: 0,
            limit,
            total: 0,
        }
    }

    pub fn at(page_index: u64, limit: u64, total: u64) -> Self {
        Self {
            page_index,
            limit,
            total,
        }
    }

    /// Offset sent to the backend as `start`.
    pub fn start(&self) -> u64 {
        self.page_index.saturating_mul(self.limit)
    }

    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1).saturating_mul(self.limit) < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Cursor for the following page; unchanged on the last page.
    pub fn next(self) -> Self {
        if self.has_next() {
            Self {
                page_index: self.page_index.saturating_add(1),
                ..self
            }
        } else {
            self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            page_index: self.page_index.saturating_sub(1),
            ..self
        }
    }

    /// Number of items the current page should hold given `total`.
    pub fn visible_count(&self) -> u64 {
        self.total.saturating_sub(self.start()).min(self.limit)
    }

    /// One-based page number for display.
    pub fn page_number(&self) -> u64 {
        self.page_index.saturating_add(1)
    }
}
