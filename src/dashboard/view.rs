//! Explicit list view state and the per-project task board model.

use super::listing::{
    ListingSettings, PageNavigation, Searchable, clamp_page, filter_by_name, page_navigation,
    paginate,
};
use super::statistics::TaskStatistics;
use crate::board::domain::{ProjectId, Task, TaskId, Vocabulary};

/// Client view state for a searchable, paginated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search_term: String,
    current_page: usize,
    editing: Option<TaskId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
            editing: None,
        }
    }
}

impl ViewState {
    /// Creates a state on page one with no search term.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns the current one-based page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the task being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    /// Replaces the search term and returns to page one.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Moves to a page. Out-of-range pages are clamped on the next
    /// [`Self::present`].
    pub const fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Marks a task as the edit target.
    pub const fn begin_edit(&mut self, task_id: TaskId) {
        self.editing = Some(task_id);
    }

    /// Clears the edit target.
    pub const fn finish_edit(&mut self) {
        self.editing = None;
    }

    /// Filters and paginates `items`, clamping the stored page to the
    /// available range first.
    pub fn present<T>(&mut self, items: &[T], settings: ListingSettings) -> ListView<T>
    where
        T: Searchable + Clone,
    {
        let matches = filter_by_name(items, &self.search_term);
        let total_pages = matches.len().div_ceil(settings.page_size.get());
        self.current_page = clamp_page(self.current_page, total_pages);

        let page = paginate(&matches, self.current_page, settings.page_size);
        ListView {
            items: page.items.to_vec(),
            page: self.current_page,
            total_pages,
            total_matches: matches.len(),
            navigation: page_navigation(
                self.current_page,
                total_pages,
                settings.window_threshold,
            ),
        }
    }
}

/// A rendered page of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    /// Rows on the current page.
    pub items: Vec<T>,
    /// Current one-based page, after clamping.
    pub page: usize,
    /// Number of pages for the filtered list.
    pub total_pages: usize,
    /// Number of items matching the search term.
    pub total_matches: usize,
    /// Navigation control for the page.
    pub navigation: PageNavigation,
}

/// Result of a task write, merged into a [`TaskBoard`] instead of reloading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMutation {
    /// A task was created or updated.
    Upserted(Task),
    /// A task was deleted.
    Removed(TaskId),
}

/// Tasks of one project, kept newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    project_id: ProjectId,
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Builds a board from fetched tasks, ignoring tasks of other projects.
    #[must_use]
    pub fn new(project_id: ProjectId, tasks: Vec<Task>) -> Self {
        let mut owned: Vec<Task> = tasks
            .into_iter()
            .filter(|task| task.project_id() == project_id)
            .collect();
        owned.sort_by(Task::cmp_newest_first);
        Self {
            project_id,
            tasks: owned,
        }
    }

    /// Returns the project shown on the board.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the tasks, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the board has no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Merges a write result. Returns `true` when the board changed.
    pub fn apply(&mut self, mutation: TaskMutation) -> bool {
        match mutation {
            TaskMutation::Upserted(task) => {
                if task.project_id() != self.project_id {
                    return false;
                }
                self.tasks.retain(|existing| existing.id() != task.id());
                let end = self.tasks.len();
                let position = self
                    .tasks
                    .iter()
                    .position(|existing| task.cmp_newest_first(existing).is_lt())
                    .unwrap_or(end);
                self.tasks.insert(position, task);
                true
            }
            TaskMutation::Removed(task_id) => {
                let before = self.tasks.len();
                self.tasks.retain(|existing| existing.id() != task_id);
                self.tasks.len() != before
            }
        }
    }

    /// Aggregates the board's tasks.
    #[must_use]
    pub fn statistics(&self, vocabulary: &Vocabulary) -> TaskStatistics {
        TaskStatistics::compute(&self.tasks, vocabulary)
    }

    /// Presents the board as a filtered, paginated list.
    pub fn present(&self, state: &mut ViewState, settings: ListingSettings) -> ListView<Task> {
        state.present(&self.tasks, settings)
    }
}
