//! Dashboard view logic over board data.
//!
//! Everything here is a pure function of its inputs: statistics are
//! recomputed on every request and list views are derived from an explicit
//! [`ViewState`] instead of ambient UI state.
//!
//! - Aggregation in [`statistics`]
//! - Search and pagination in [`listing`]
//! - View state and the mutation-merging board model in [`view`]

pub mod listing;
pub mod statistics;
pub mod view;

pub use listing::{
    DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_THRESHOLD, ListingSettings, Page, PageLink, PageNavigation,
    Searchable, clamp_page, filter_by_name, page_navigation, page_window, paginate,
};
pub use statistics::{
    NameCount, StatusBreakdown, StatusCount, TaskStatistics, VocabularyBreakdown, percentage_of,
};
pub use view::{ListView, TaskBoard, TaskMutation, ViewState};

#[cfg(test)]
mod tests;
