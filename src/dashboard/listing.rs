//! Search filtering, pagination and page-link windows.
//!
//! [`paginate`] never clamps: a page outside `1..=total_pages` yields no
//! items. Callers clamp with [`clamp_page`] first, as [`super::ViewState`]
//! does.

use crate::board::domain::{Project, Task};
use serde::Serialize;
use std::num::NonZeroUsize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// Default page count up to which every page link is shown.
pub const DEFAULT_WINDOW_THRESHOLD: usize = 3;

/// Page size and link window used to present a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
    /// Rows per page.
    pub page_size: NonZeroUsize,
    /// Show every page link while the page count is at most this value.
    pub window_threshold: usize,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window_threshold: DEFAULT_WINDOW_THRESHOLD,
        }
    }
}

/// Items that can be matched by a search term.
pub trait Searchable {
    /// Text the search term is matched against.
    fn search_text(&self) -> &str;
}

impl Searchable for Task {
    fn search_text(&self) -> &str {
        self.name().as_str()
    }
}

impl Searchable for Project {
    fn search_text(&self) -> &str {
        self.name().as_str()
    }
}

/// Keeps the items whose text contains `term`, ignoring case.
///
/// An empty term keeps everything, in the original order.
#[must_use]
pub fn filter_by_name<T>(items: &[T], term: &str) -> Vec<T>
where
    T: Searchable + Clone,
{
    if term.is_empty() {
        return items.to_vec();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.search_text().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// One page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on the requested page.
    pub items: &'a [T],
    /// Requested page number, one-based.
    pub page: usize,
    /// Number of pages for the whole list; zero for an empty list.
    pub total_pages: usize,
}

/// Slices out one-based `page` of `items`.
///
/// ```
/// use atelier::dashboard::paginate;
/// use std::num::NonZeroUsize;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let size = NonZeroUsize::new(10).expect("non-zero");
/// let page = paginate(&items, 3, size);
/// assert_eq!(page.total_pages, 3);
/// assert_eq!(page.items, &[21, 22, 23, 24, 25]);
/// ```
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let total_pages = items.len().div_ceil(page_size.get());
    let slice = page
        .checked_sub(1)
        .and_then(|index| items.chunks(page_size.get()).nth(index))
        .unwrap_or_default();
    Page {
        items: slice,
        page,
        total_pages,
    }
}

/// Clamps a requested page into `[1, total_pages]`. An empty list has one
/// (empty) page.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Entry in a page navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    /// Link to a page.
    Page {
        /// One-based page number.
        number: usize,
        /// Whether this is the current page.
        active: bool,
    },
    /// Gap between non-adjacent page links.
    Ellipsis,
}

/// Builds the bounded set of page links for the current page.
///
/// Up to `threshold` pages every page is listed. Beyond that the first and
/// last page are always shown, with the pages adjacent to `current` in
/// between and an ellipsis wherever pages are skipped.
#[must_use]
pub fn page_window(current: usize, total_pages: usize, threshold: usize) -> Vec<PageLink> {
    let link = |number: usize| PageLink::Page {
        number,
        active: number == current,
    };

    if total_pages <= threshold {
        return (1..=total_pages).map(link).collect();
    }

    let last = total_pages;
    let range_start = current.saturating_sub(1).max(2);
    let range_end = current.saturating_add(1).min(last.saturating_sub(1));

    let mut links = vec![link(1)];
    if range_start > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((range_start..=range_end).map(link));
    if range_end < last.saturating_sub(1) {
        links.push(PageLink::Ellipsis);
    }
    if last > 1 {
        links.push(link(last));
    }
    links
}

/// Page links plus first, previous, next and last targets.
///
/// A target is `None` when it would not move away from the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageNavigation {
    /// Jump to the first page.
    pub first: Option<usize>,
    /// Step back one page.
    pub previous: Option<usize>,
    /// Step forward one page.
    pub next: Option<usize>,
    /// Jump to the last page.
    pub last: Option<usize>,
    /// Windowed page links.
    pub links: Vec<PageLink>,
}

/// Builds the navigation control for the current page.
#[must_use]
pub fn page_navigation(current: usize, total_pages: usize, threshold: usize) -> PageNavigation {
    let has_previous = current > 1;
    let has_next = current < total_pages;
    PageNavigation {
        first: has_previous.then_some(1),
        previous: has_previous.then(|| current.saturating_sub(1)),
        next: has_next.then(|| current.saturating_add(1)),
        last: has_next.then_some(total_pages),
        links: page_window(current, total_pages, threshold),
    }
}
