//! Shared world state for project workflow BDD scenarios.

use std::sync::Arc;

use atelier::board::{
    adapters::memory::{InMemoryAttachmentStore, InMemoryBoardRepository},
    domain::{Project, Task},
    services::{BoardService, BoardServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService =
    BoardService<InMemoryBoardRepository, InMemoryAttachmentStore<DefaultClock>, DefaultClock>;

/// Scenario world for project workflow behaviour tests.
pub struct ProjectWorkflowWorld {
    pub service: TestBoardService,
    pub attachments: Arc<InMemoryAttachmentStore<DefaultClock>>,
    pub project: Option<Project>,
    pub task: Option<Task>,
    pub last_update: Option<Result<Task, BoardServiceError>>,
}

impl ProjectWorkflowWorld {
    /// Creates a world backed by fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let attachments = Arc::new(InMemoryAttachmentStore::new(
            "/uploads",
            Arc::clone(&clock),
        ));
        let service = BoardService::new(
            Arc::new(InMemoryBoardRepository::new()),
            Arc::clone(&attachments),
            clock,
        );

        Self {
            service,
            attachments,
            project: None,
            task: None,
            last_update: None,
        }
    }

    /// Returns the project created by a Given step.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the most recent task created by a Given step.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for ProjectWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectWorkflowWorld {
    ProjectWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
