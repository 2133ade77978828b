//! Pagination window invariants over arbitrary page positions.

use cinespark_core::pagination::{WINDOW_RADIUS, render_page_selector};
use cinespark_core::{PageMarker, PageNavigation, pagination_window};
use proptest::prelude::*;

fn pages(markers: &[PageMarker]) -> Vec<u32> {
    markers.iter().filter_map(|marker| marker.page()).collect()
}

/// Totals up to the API cap, with a current page inside them.
fn position() -> impl Strategy<Value = (u32, u32)> {
    (2u32..=500).prop_flat_map(|total| (1..=total, Just(total)))
}

proptest! {
    #[test]
    fn prop_first_and_last_pages_always_shown((current, total) in position()) {
        let shown = pages(&pagination_window(current, total));
        prop_assert_eq!(shown.first().copied(), Some(1));
        prop_assert_eq!(shown.last().copied(), Some(total));
        prop_assert!(shown.contains(&current));
    }

    #[test]
    fn prop_pages_strictly_increase((current, total) in position()) {
        let shown = pages(&pagination_window(current, total));
        prop_assert!(shown.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_window_covers_neighbours((current, total) in position()) {
        let shown = pages(&pagination_window(current, total));
        let low = current.saturating_sub(WINDOW_RADIUS).max(1);
        let high = current.saturating_add(WINDOW_RADIUS).min(total);
        for page in low..=high {
            prop_assert!(shown.contains(&page), "page {} missing around {}", page, current);
        }
        prop_assert!(shown.len() <= 2 * WINDOW_RADIUS as usize + 3);
    }

    #[test]
    fn prop_ellipsis_marks_every_gap((current, total) in position()) {
        let markers = pagination_window(current, total);

        for pair in markers.windows(2) {
            match (pair[0], pair[1]) {
                (PageMarker::Page(a), PageMarker::Page(b)) => prop_assert_eq!(b, a + 1),
                (PageMarker::Page(a), PageMarker::Ellipsis) => {
                    let next = markers
                        .iter()
                        .skip_while(|marker| **marker != PageMarker::Page(a))
                        .filter_map(|marker| marker.page())
                        .nth(1);
                    prop_assert!(next.is_some_and(|b| b > a + 1));
                }
                (PageMarker::Ellipsis, PageMarker::Ellipsis) => {
                    prop_assert!(false, "adjacent ellipses");
                }
                _ => {}
            }
        }
        prop_assert!(markers.iter().filter(|marker| marker.is_ellipsis()).count() <= 2);
    }

    #[test]
    fn prop_navigation_stays_in_range((current, total) in position()) {
        let navigation = PageNavigation::new(current, total);
        prop_assert_eq!(navigation.previous, (current > 1).then(|| current - 1));
        prop_assert_eq!(navigation.next, (current < total).then(|| current + 1));
    }

    #[test]
    fn prop_selector_marks_exactly_current((current, total) in position()) {
        let rendered = render_page_selector(current, total);
        let current_marker = format!("[{current}]");
        prop_assert_eq!(rendered.matches('[').count(), 1);
        prop_assert!(rendered.contains(&current_marker));
    }
}

#[test]
fn test_out_of_range_current_is_clamped() {
    assert_eq!(pagination_window(0, 10), pagination_window(1, 10));
    assert_eq!(pagination_window(99, 10), pagination_window(10, 10));
}

#[test]
fn test_selector_at_api_cap() {
    assert_eq!(render_page_selector(500, 500), "< 1 ... 498 499 [500]");
    assert_eq!(render_page_selector(1, 500), "[1] 2 3 ... 500 >");
}
