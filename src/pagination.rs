//! Page arithmetic for the employee list.

use serde::{Deserialize, Serialize};

/// Maximum number of numbered page buttons shown at once
pub const MAX_PAGE_BUTTONS: usize = 5;

/// How the list is laid out; each layout has its own page size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    /// List layout on a narrow screen
    Mobile,
    Grid,
}

/// Page sizes per layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSizes {
    pub default: usize,
    pub mobile: usize,
    pub grid: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            default: 10,
            mobile: 6,
            grid: 4,
        }
    }
}

impl PageSizes {
    pub fn for_view(&self, view: ViewMode) -> usize {
        match view {
            ViewMode::List => self.default,
            ViewMode::Mobile => self.mobile,
            ViewMode::Grid => self.grid,
        }
    }
}

/// Current position within a paged collection.
///
/// `page` is 1-based. `page_size` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total: usize,
}

/// The numbered buttons to render plus the shortcut/ellipsis markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub pages: Vec<usize>,
    pub show_first: bool,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
    pub show_last: bool,
}

impl Pagination {
    pub fn new(page_size: usize, total: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pages, never less than one
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    /// Move to `page`, clamped into range. Returns whether the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let next = page.clamp(1, self.total_pages());
        if next != self.page {
            self.page = next;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Change page size and go back to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Switch layout: first page, with the layout's page size
    pub fn set_view(&mut self, view: ViewMode, sizes: &PageSizes) {
        self.set_page_size(sizes.for_view(view));
    }

    /// Record a new collection size. If the current page no longer has any
    /// rows it moves back to the last page that does.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        let pages_with_rows = total.div_ceil(self.page_size);
        if self.page > pages_with_rows && self.page > 1 {
            self.page = pages_with_rows.max(1);
        }
    }

    /// Index range of the current page's rows
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    /// The current page's rows out of `items`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// Page buttons around the current page
    pub fn window(&self) -> PageWindow {
        let total_pages = self.total_pages();
        let start = self.page.saturating_sub(2).max(1);
        let end = (start + MAX_PAGE_BUTTONS - 1).min(total_pages);
        let start = (end + 1).saturating_sub(MAX_PAGE_BUTTONS).max(1);

        PageWindow {
            pages: (start..=end).collect(),
            show_first: start > 1,
            leading_ellipsis: start > 2,
            trailing_ellipsis: end + 1 < total_pages,
            show_last: end < total_pages,
        }
    }
}
