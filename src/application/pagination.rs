//! Carousel pagination over a folder's entries.

/// Entries per carousel page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Page index over an externally owned entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    page_size: usize,
    current_page: usize,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Carousel {
    /// A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    pub fn reset(&mut self) {
        self.current_page = 0;
    }

    /// Entries on the current page.
    pub fn page<'e, T>(&self, entries: &'e [T]) -> &'e [T] {
        let start = (self.current_page * self.page_size).min(entries.len());
        let end = (start + self.page_size).min(entries.len());
        &entries[start..end]
    }

    /// The current page padded with `None` to a full page, but only when the
    /// entries span more than one page, so the grid keeps its shape.
    pub fn slots<'e, T>(&self, entries: &'e [T]) -> Vec<Option<&'e T>> {
        let mut slots: Vec<Option<&T>> = self.page(entries).iter().map(Some).collect();
        if entries.len() > self.page_size {
            slots.resize(self.page_size, None);
        }
        slots
    }

    pub fn can_page_left(&self, len: usize) -> bool {
        len > self.page_size && self.current_page > 0
    }

    /// True while entries remain beyond the current page.
    pub fn can_page_right(&self, len: usize) -> bool {
        len > self.page_size && (self.current_page + 1) * self.page_size < len
    }

    pub fn page_left(&mut self, len: usize) -> bool {
        if !self.can_page_left(len) {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn page_right(&mut self, len: usize) -> bool {
        if !self.can_page_right(len) {
            return false;
        }
        self.current_page += 1;
        true
    }
}
