//! Page selector computation for paginated movie lists.
//!
//! Lists can span hundreds of pages, so selectors show the first and last
//! page, a window around the current page, and ellipsis markers for the
//! skipped stretches.

use serde::{Serialize, Serializer};

/// Number of pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

/// One entry of a page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// Link to a page (1-indexed)
    Page(u32),
    /// Collapsed run of pages, not selectable
    Ellipsis,
}

impl PageMarker {
    /// The page number, or `None` for an ellipsis.
    pub fn page(self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(page),
            Self::Ellipsis => None,
        }
    }

    /// Whether this marker is an ellipsis.
    pub fn is_ellipsis(self) -> bool {
        matches!(self, Self::Ellipsis)
    }
}

impl std::fmt::Display for PageMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Ellipsis => write!(f, "..."),
        }
    }
}

// Pages as numbers, ellipses as "...", matching the selector labels
impl Serialize for PageMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(page) => serializer.serialize_u32(*page),
            Self::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Computes the page selector for `current_page` of `total_pages`.
///
/// Returns nothing when there is at most one page. Otherwise the first and
/// last page are always present, pages within [`WINDOW_RADIUS`] of the
/// current one fill the middle, and an ellipsis stands in for each skipped
/// stretch. A `current_page` outside `1..=total_pages` is clamped.
///
/// ```
/// use cinespark_core::pagination::{PageMarker::*, pagination_window};
///
/// assert_eq!(
///     pagination_window(5, 10),
///     vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(10)]
/// );
/// ```
pub fn pagination_window(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);
    let window_start = current.saturating_sub(WINDOW_RADIUS).max(2);
    let window_end = current
        .saturating_add(WINDOW_RADIUS)
        .min(total_pages - 1);

    let mut markers = Vec::with_capacity(2 * WINDOW_RADIUS as usize + 5);
    markers.push(PageMarker::Page(1));

    if current.saturating_sub(WINDOW_RADIUS) > 2 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.extend((window_start..=window_end).map(PageMarker::Page));

    if current.saturating_add(WINDOW_RADIUS) < total_pages - 1 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total_pages));
    markers
}

/// Previous/next links around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigation {
    /// Page reached by "previous", absent on the first page
    pub previous: Option<u32>,
    /// Page reached by "next", absent on the last page
    pub next: Option<u32>,
}

impl PageNavigation {
    /// Computes the navigation links for `current_page` of `total_pages`.
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        let total = total_pages.max(1);
        let current = current_page.clamp(1, total);

        Self {
            previous: (current > 1).then(|| current - 1),
            next: (current < total).then(|| current + 1),
        }
    }
}

/// Renders a page selector as a single line, marking the current page.
///
/// Produces an empty string when there is nothing to select.
pub fn render_page_selector(current_page: u32, total_pages: u32) -> String {
    let markers = pagination_window(current_page, total_pages);
    if markers.is_empty() {
        return String::new();
    }

    let current = current_page.clamp(1, total_pages);
    let navigation = PageNavigation::new(current, total_pages);

    let mut parts = Vec::with_capacity(markers.len() + 2);
    if navigation.previous.is_some() {
        parts.push("<".to_string());
    }
    for marker in markers {
        match marker {
            PageMarker::Page(page) if page == current => parts.push(format!("[{page}]")),
            other => parts.push(other.to_string()),
        }
    }
    if navigation.next.is_some() {
        parts.push(">".to_string());
    }

    parts.join(" ")
}
