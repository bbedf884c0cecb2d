//! Search, pagination and page-window tests.

use super::support::numbered_tasks;
use crate::board::domain::ProjectId;
use crate::dashboard::{
    PageLink, clamp_page, filter_by_name, page_navigation, page_window, paginate,
};
use rstest::rstest;
use std::num::NonZeroUsize;

fn size(value: usize) -> NonZeroUsize {
    NonZeroUsize::new(value).expect("non-zero page size")
}

fn page(number: usize, current: usize) -> PageLink {
    PageLink::Page {
        number,
        active: number == current,
    }
}

#[rstest]
#[case(1, 10)]
#[case(2, 10)]
#[case(3, 5)]
#[case(4, 0)]
#[case(0, 0)]
fn paginate_twenty_five_items(#[case] requested: usize, #[case] expected_len: usize) {
    let items: Vec<u32> = (1..=25).collect();

    let result = paginate(&items, requested, size(10));

    assert_eq!(result.total_pages, 3);
    assert_eq!(result.items.len(), expected_len);
    assert_eq!(result.page, requested);
}

#[rstest]
fn paginate_empty_list_has_no_pages() {
    let items: Vec<u32> = Vec::new();
    let result = paginate(&items, 1, size(10));

    assert_eq!(result.total_pages, 0);
    assert!(result.items.is_empty());
}

#[rstest]
#[case(0, 3, 1)]
#[case(5, 3, 3)]
#[case(2, 3, 2)]
#[case(4, 0, 1)]
fn clamp_page_keeps_pages_in_range(
    #[case] requested: usize,
    #[case] total: usize,
    #[case] expected: usize,
) {
    assert_eq!(clamp_page(requested, total), expected);
}

#[rstest]
fn empty_search_term_returns_everything_in_order() {
    let tasks = numbered_tasks(ProjectId::new(), 4);

    let filtered = filter_by_name(&tasks, "");

    assert_eq!(filtered, tasks);
}

#[rstest]
fn search_is_case_insensitive_substring() {
    let tasks = numbered_tasks(ProjectId::new(), 12);

    let filtered = filter_by_name(&tasks, "TASK 1");

    let names: Vec<_> = filtered
        .iter()
        .map(|task| task.name().as_str().to_owned())
        .collect();
    assert_eq!(names, vec!["Task 1", "Task 10", "Task 11", "Task 12"]);
}

#[rstest]
fn unmatched_search_term_returns_nothing() {
    let tasks = numbered_tasks(ProjectId::new(), 5);
    assert!(filter_by_name(&tasks, "XYZ").is_empty());
}

#[rstest]
fn small_page_counts_list_every_page() {
    assert_eq!(page_window(2, 3, 3), vec![page(1, 2), page(2, 2), page(3, 2)]);
    assert!(page_window(1, 0, 3).is_empty());
}

#[rstest]
fn window_from_first_page_shows_trailing_gap() {
    assert_eq!(
        page_window(1, 10, 3),
        vec![page(1, 1), page(2, 1), PageLink::Ellipsis, page(10, 1)]
    );
}

#[rstest]
fn window_in_the_middle_shows_both_gaps() {
    assert_eq!(
        page_window(5, 10, 3),
        vec![
            page(1, 5),
            PageLink::Ellipsis,
            page(4, 5),
            page(5, 5),
            page(6, 5),
            PageLink::Ellipsis,
            page(10, 5),
        ]
    );
}

#[rstest]
fn window_at_the_end_shows_leading_gap() {
    assert_eq!(
        page_window(10, 10, 3),
        vec![page(1, 10), PageLink::Ellipsis, page(9, 10), page(10, 10)]
    );
}

#[rstest]
fn window_without_gaps_when_neighbours_touch_the_ends() {
    assert_eq!(
        page_window(2, 4, 3),
        vec![page(1, 2), page(2, 2), page(3, 2), page(4, 2)]
    );
}

#[rstest]
fn navigation_disables_moves_past_the_ends() {
    let at_start = page_navigation(1, 5, 3);
    assert_eq!(at_start.first, None);
    assert_eq!(at_start.previous, None);
    assert_eq!(at_start.next, Some(2));
    assert_eq!(at_start.last, Some(5));

    let at_end = page_navigation(5, 5, 3);
    assert_eq!(at_end.first, Some(1));
    assert_eq!(at_end.previous, Some(4));
    assert_eq!(at_end.next, None);
    assert_eq!(at_end.last, None);
}
