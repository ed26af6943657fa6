/// Page sizes a session may use.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// A page of a view: `start..end` are positions in the view, `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
    pub count: usize,
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl Page {
    /// 1-based range of visible rows for the footer, `(first, last)`.
    /// An empty view shows `(0, 0)`.
    pub fn visible_range(&self) -> (usize, usize) {
        let first = std::cmp::min(self.total, (self.number - 1) * self.size + 1);
        let last = std::cmp::min(self.total, self.number * self.size);
        (first, last)
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.count
    }
}

pub fn page_count(total: usize, size: usize) -> usize {
    std::cmp::max(1, total.div_ceil(size.max(1)))
}

/// Slice a view of `total` rows into the requested page, clamping the page
/// number into `1..=page_count`.
pub fn paginate(total: usize, number: usize, size: usize) -> Page {
    let size = size.max(1);
    let count = page_count(total, size);
    let number = number.clamp(1, count);
    let start = std::cmp::min(total, (number - 1) * size);
    let end = std::cmp::min(total, number * size);
    Page {
        number,
        size,
        count,
        start,
        end,
        total,
    }
}

/// The next allowed page size after `current`, wrapping around.
pub fn next_page_size(current: usize) -> usize {
    let pos = PAGE_SIZES.iter().position(|&s| s == current).unwrap_or(0);
    PAGE_SIZES[(pos + 1) % PAGE_SIZES.len()]
}

/// The previous allowed page size before `current`, wrapping around.
pub fn previous_page_size(current: usize) -> usize {
    let pos = PAGE_SIZES.iter().position(|&s| s == current).unwrap_or(0);
    PAGE_SIZES[(pos + PAGE_SIZES.len() - 1) % PAGE_SIZES.len()]
}
