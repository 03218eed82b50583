use serde::{Deserialize, Serialize};

/// At or below this many pages every page number is shown.
pub const FULL_WINDOW_PAGES: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
}

impl PaginationMeta {
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    pub fn current_page(&self) -> u32 {
        clamp_page(self.page, self.total_pages())
    }

    pub fn has_prev(&self) -> bool {
        self.current_page() > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    /// Pagination controls are hidden for zero or one page.
    pub fn shows_controls(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn window(&self) -> Vec<PageItem> {
        compute_page_window(self.current_page(), self.total_pages())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Clamp into `[1, total_pages]`; with no pages the first page is returned.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    if total_pages == 0 {
        return 1;
    }
    page.clamp(1, total_pages)
}

/// Page numbers to display around `current`: the first and last page, the
/// neighbours of the current page, and an ellipsis over each gap.
pub fn compute_page_window(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    if total <= FULL_WINDOW_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let current = clamp_page(current, total);
    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total - 1);

    let mut items = Vec::with_capacity(7);
    items.push(PageItem::Page(1));
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

/// Client-side page of `items` (1-based), used where the API returns the
/// whole list at once.
pub fn slice_page<T>(items: &[T], page: u32, per_page: usize) -> &[T] {
    if per_page == 0 || items.is_empty() {
        return &[];
    }
    let total_pages = items.len().div_ceil(per_page) as u32;
    let page = clamp_page(page, total_pages) as usize;
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

pub fn local_total_pages(len: usize, per_page: usize) -> u32 {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page) as u32
}
