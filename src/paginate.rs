//! Fixed-size paging over the filtered view.

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size plus the active page, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
    total_pages: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_pages: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of pages needed for `len` items. Zero means no results.
    pub fn pages_for(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Recompute the page count for `len` items and clamp the active page.
    pub fn recompute(&mut self, len: usize) {
        self.total_pages = self.pages_for(len);
        self.current_page = self.current_page.clamp(1, self.total_pages.max(1));
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn next(&mut self) -> bool {
        if self.current_page >= self.total_pages {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Jump to page `page`. Out-of-range requests leave the page unchanged.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages)
    }

    /// Item range covered by the active page, clipped to `len`.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(len);
        let end = start.saturating_add(self.page_size).min(len);
        (start, end)
    }

    /// The active page's slice of `items`.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.bounds(items.len());
        &items[start..end]
    }
}

/// Slice `items` for `page` (1-based) of size `page_size`, clipped to the available length.
pub fn page_slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
