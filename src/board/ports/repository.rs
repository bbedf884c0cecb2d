//! Repository port for project and task persistence.

use crate::board::domain::{Project, ProjectId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Project and task persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Returns every project, oldest first.
    async fn list_projects(&self) -> BoardRepositoryResult<Vec<Project>>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_project(&self, id: ProjectId) -> BoardRepositoryResult<Option<Project>>;

    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::DuplicateProject`] when the identifier
    /// already exists.
    async fn store_project(&self, project: &Project) -> BoardRepositoryResult<()>;

    /// Persists a renamed project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ProjectNotFound`] when the project does
    /// not exist.
    async fn update_project(&self, project: &Project) -> BoardRepositoryResult<()>;

    /// Removes a project row together with any task rows still referencing it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ProjectNotFound`] when the project does
    /// not exist.
    async fn delete_project(&self, id: ProjectId) -> BoardRepositoryResult<()>;

    /// Returns the tasks of a project, newest first.
    ///
    /// An unknown project yields an empty list.
    async fn list_tasks(&self, project_id: ProjectId) -> BoardRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::ProjectNotFound`] when the owning
    /// project does not exist or [`BoardRepositoryError::DuplicateTask`] when
    /// the identifier already exists.
    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Persists field changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update_task(&self, task: &Task) -> BoardRepositoryResult<()>;

    /// Removes a task row.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for the not-found variants.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_) | Self::TaskNotFound(_))
    }
}
