//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use atelier::board::{
    adapters::memory::{InMemoryAttachmentStore, InMemoryBoardRepository},
    domain::{Project, ProjectName},
    services::BoardService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type wired to in-memory adapters.
pub type MemoryBoardService =
    BoardService<InMemoryBoardRepository, InMemoryAttachmentStore<DefaultClock>, DefaultClock>;

/// Provides an empty in-memory repository.
#[fixture]
pub fn repo() -> InMemoryBoardRepository {
    InMemoryBoardRepository::new()
}

/// Provides the system clock.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Provides a service over fresh in-memory adapters.
#[fixture]
pub fn service() -> MemoryBoardService {
    let clock = Arc::new(DefaultClock);
    BoardService::new(
        Arc::new(InMemoryBoardRepository::new()),
        Arc::new(InMemoryAttachmentStore::new("/uploads", Arc::clone(&clock))),
        clock,
    )
}

/// Builds an unsaved project.
pub fn project(name: &str, clock: &DefaultClock) -> Project {
    Project::new(ProjectName::new(name).expect("valid project name"), clock)
}
