//! Workflow orchestration over projects, tasks, and attachments.
//!
//! [`BoardService`] composes the repository and attachment ports. Status,
//! reporter and assignee are flat selections: any allowed value may replace
//! any other, and each field changes independently of the rest. Concurrent
//! writers are not coordinated; the last write wins.

use super::{CreateTaskRequest, DeleteTaskRequest, UpdateTaskRequest};
use crate::board::{
    domain::{
        AttachmentRef, AttachmentUpload, BoardDomainError, Project, ProjectId, ProjectName, Task,
        TaskChanges, TaskContent, TaskId, TaskStatus, Vocabulary,
    },
    ports::{
        AttachmentDeletion, AttachmentStore, AttachmentStoreError, BoardRepository,
        BoardRepositoryError,
    },
};
use crate::dashboard::TaskStatistics;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default upper bound for a single attachment, in bytes.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Deployment settings consulted by [`BoardService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    /// Reporter and assignee vocabularies.
    pub vocabulary: Vocabulary,
    /// Largest accepted attachment, in bytes.
    pub max_attachment_bytes: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}

/// Broad failure classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input, or a value outside its vocabulary.
    Validation,
    /// A referenced project or task does not exist.
    NotFound,
    /// Persistence or file-system failure.
    Storage,
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    /// Attachment store operation failed.
    #[error(transparent)]
    Attachment(#[from] AttachmentStoreError),
}

impl BoardServiceError {
    /// Classifies the error for the external contract.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(err) if err.is_not_found() => ErrorKind::NotFound,
            Self::Repository(_) | Self::Attachment(_) => ErrorKind::Storage,
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Summary of a cascading project deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectDeletion {
    /// Task rows removed.
    pub tasks_removed: usize,
    /// Attachment files removed.
    pub attachments_removed: usize,
}

/// Project and task workflow service.
pub struct BoardService<R, A, C>
where
    R: BoardRepository,
    A: AttachmentStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    attachments: Arc<A>,
    clock: Arc<C>,
    settings: Arc<BoardSettings>,
}

impl<R, A, C> Clone for BoardService<R, A, C>
where
    R: BoardRepository,
    A: AttachmentStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            attachments: Arc::clone(&self.attachments),
            clock: Arc::clone(&self.clock),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<R, A, C> BoardService<R, A, C>
where
    R: BoardRepository,
    A: AttachmentStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with default settings.
    #[must_use]
    pub fn new(repository: Arc<R>, attachments: Arc<A>, clock: Arc<C>) -> Self {
        Self::with_settings(repository, attachments, clock, BoardSettings::default())
    }

    /// Creates a service with explicit deployment settings.
    #[must_use]
    pub fn with_settings(
        repository: Arc<R>,
        attachments: Arc<A>,
        clock: Arc<C>,
        settings: BoardSettings,
    ) -> Self {
        Self {
            repository,
            attachments,
            clock,
            settings: Arc::new(settings),
        }
    }

    /// Returns the deployment settings.
    #[must_use]
    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Returns every project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when persistence lookup fails.
    pub async fn list_projects(&self) -> BoardServiceResult<Vec<Project>> {
        Ok(self.repository.list_projects().await?)
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the name is empty, or
    /// [`BoardServiceError::Repository`] when persistence fails.
    pub async fn create_project(&self, name: impl Into<String>) -> BoardServiceResult<Project> {
        let project = Project::new(ProjectName::new(name)?, &*self.clock);
        self.repository.store_project(&project).await?;
        tracing::info!(project_id = %project.id(), "created project");
        Ok(project)
    }

    /// Renames a project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the name is empty, or
    /// [`BoardServiceError::Repository`] when the project does not exist or
    /// persistence fails.
    pub async fn rename_project(
        &self,
        id: ProjectId,
        name: impl Into<String>,
    ) -> BoardServiceResult<Project> {
        let name = ProjectName::new(name)?;
        let mut project = self
            .repository
            .find_project(id)
            .await?
            .ok_or(BoardRepositoryError::ProjectNotFound(id))?;
        project.rename(name);
        self.repository.update_project(&project).await?;
        tracing::debug!(project_id = %id, "renamed project");
        Ok(project)
    }

    /// Deletes a project, first removing each of its tasks and their
    /// attachments.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the project does not
    /// exist or persistence fails.
    pub async fn delete_project(&self, id: ProjectId) -> BoardServiceResult<ProjectDeletion> {
        if self.repository.find_project(id).await?.is_none() {
            return Err(BoardRepositoryError::ProjectNotFound(id).into());
        }

        let mut summary = ProjectDeletion::default();
        for task in self.repository.list_tasks(id).await? {
            if let Some(image) = task.image()
                && self.discard_attachment(image).await
            {
                summary.attachments_removed += 1;
            }
            match self.repository.delete_task(task.id()).await {
                Ok(()) => summary.tasks_removed += 1,
                Err(BoardRepositoryError::TaskNotFound(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }

        self.repository.delete_project(id).await?;
        tracing::info!(
            project_id = %id,
            tasks_removed = summary.tasks_removed,
            attachments_removed = summary.attachments_removed,
            "deleted project"
        );
        Ok(summary)
    }

    /// Returns the tasks of a project, newest first. An unknown project has
    /// no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when persistence lookup fails.
    pub async fn list_tasks(&self, project_id: ProjectId) -> BoardServiceResult<Vec<Task>> {
        Ok(self.repository.list_tasks(project_id).await?)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the task does not exist
    /// or persistence lookup fails.
    pub async fn find_task(&self, id: TaskId) -> BoardServiceResult<Task> {
        Ok(self
            .repository
            .find_task(id)
            .await?
            .ok_or(BoardRepositoryError::TaskNotFound(id))?)
    }

    /// Creates a pending task, storing its image first when one is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the content is empty, the
    /// upload is too large, or the project does not exist;
    /// [`BoardServiceError::Attachment`] when the image cannot be stored; or
    /// [`BoardServiceError::Repository`] when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardServiceResult<Task> {
        let CreateTaskRequest {
            project_id,
            name,
            image,
        } = request;

        let content = TaskContent::new(name)?;
        if let Some(upload) = image.as_ref() {
            upload.ensure_within(self.settings.max_attachment_bytes)?;
        }
        if self.repository.find_project(project_id).await?.is_none() {
            return Err(BoardDomainError::UnknownProject(project_id).into());
        }

        let stored_image = match image {
            Some(upload) => Some(self.attachments.save(&upload).await?),
            None => None,
        };

        let task = Task::new(project_id, content, stored_image, &*self.clock);
        if let Err(err) = self.repository.store_task(&task).await {
            if let Some(orphan) = task.image() {
                self.discard_attachment(orphan).await;
            }
            return Err(match err {
                BoardRepositoryError::ProjectNotFound(missing) => {
                    BoardDomainError::UnknownProject(missing).into()
                }
                other => other.into(),
            });
        }

        tracing::info!(
            task_id = %task.id(),
            project_id = %project_id,
            has_image = task.image().is_some(),
            "created task"
        );
        Ok(task)
    }

    /// Validates every supplied field, then applies them in one write.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when any value is invalid or no
    /// field was supplied, leaving the task unchanged; or
    /// [`BoardServiceError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> BoardServiceResult<Task> {
        let task_id = request.task_id;
        let changes = self.validate_changes(request)?;

        let mut task = self.find_task(task_id).await?;
        task.apply(changes, &*self.clock);
        self.repository.update_task(&task).await?;
        tracing::debug!(task_id = %task_id, status = %task.status(), "updated task");
        Ok(task)
    }

    /// Overwrites the workflow status.
    ///
    /// # Errors
    ///
    /// See [`Self::update_task`].
    pub async fn set_status(&self, id: TaskId, status: &str) -> BoardServiceResult<Task> {
        self.update_task(UpdateTaskRequest::new(id).with_status(status))
            .await
    }

    /// Overwrites the reporter; an empty value clears it.
    ///
    /// # Errors
    ///
    /// See [`Self::update_task`].
    pub async fn set_reporter(&self, id: TaskId, reporter: &str) -> BoardServiceResult<Task> {
        self.update_task(UpdateTaskRequest::new(id).with_reporter(reporter))
            .await
    }

    /// Overwrites the assignee; an empty value clears it.
    ///
    /// # Errors
    ///
    /// See [`Self::update_task`].
    pub async fn set_assignee(&self, id: TaskId, assignee: &str) -> BoardServiceResult<Task> {
        self.update_task(UpdateTaskRequest::new(id).with_assignee(assignee))
            .await
    }

    /// Replaces the task content.
    ///
    /// # Errors
    ///
    /// See [`Self::update_task`].
    pub async fn rename_task(
        &self,
        id: TaskId,
        name: impl Into<String>,
    ) -> BoardServiceResult<Task> {
        self.update_task(UpdateTaskRequest::new(id).with_name(name))
            .await
    }

    /// Replaces or removes the task image. The previous file is removed on a
    /// best-effort basis once the new reference is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the upload is too large,
    /// [`BoardServiceError::Attachment`] when it cannot be stored, or
    /// [`BoardServiceError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn replace_task_image(
        &self,
        id: TaskId,
        image: Option<AttachmentUpload>,
    ) -> BoardServiceResult<Task> {
        if let Some(upload) = image.as_ref() {
            upload.ensure_within(self.settings.max_attachment_bytes)?;
        }
        let mut task = self.find_task(id).await?;

        let stored = match image {
            Some(upload) => Some(self.attachments.save(&upload).await?),
            None => None,
        };
        let previous = task.replace_image(stored.clone(), &*self.clock);

        if let Err(err) = self.repository.update_task(&task).await {
            if let Some(orphan) = stored.as_ref() {
                self.discard_attachment(orphan).await;
            }
            return Err(err.into());
        }
        if let Some(old) = previous.as_ref() {
            self.discard_attachment(old).await;
        }

        tracing::debug!(task_id = %id, has_image = task.image().is_some(), "replaced task image");
        Ok(task)
    }

    /// Deletes a task, removing its attachment before the row. A missing or
    /// undeletable file never blocks the row deletion.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the task does not exist,
    /// belongs to a different project than requested, or persistence fails.
    pub async fn delete_task(&self, request: DeleteTaskRequest) -> BoardServiceResult<()> {
        let DeleteTaskRequest {
            task_id,
            project_id,
        } = request;

        let task = self.find_task(task_id).await?;
        if project_id.is_some_and(|expected| expected != task.project_id()) {
            return Err(BoardRepositoryError::TaskNotFound(task_id).into());
        }

        if let Some(image) = task.image() {
            self.discard_attachment(image).await;
        }
        self.repository.delete_task(task_id).await?;
        tracing::info!(task_id = %task_id, project_id = %task.project_id(), "deleted task");
        Ok(())
    }

    /// Computes dashboard statistics over a project's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when persistence lookup fails.
    pub async fn project_statistics(
        &self,
        project_id: ProjectId,
    ) -> BoardServiceResult<TaskStatistics> {
        let tasks = self.repository.list_tasks(project_id).await?;
        Ok(TaskStatistics::compute(&tasks, &self.settings.vocabulary))
    }

    /// Returns the client path for a task's attachment, if it has one.
    #[must_use]
    pub fn attachment_url(&self, task: &Task) -> Option<String> {
        task.image()
            .map(|reference| self.attachments.resolve(reference))
    }

    fn validate_changes(&self, request: UpdateTaskRequest) -> BoardServiceResult<TaskChanges> {
        let UpdateTaskRequest {
            status,
            reporter,
            assignee,
            name,
            ..
        } = request;
        let vocabulary = &self.settings.vocabulary;

        let changes = TaskChanges {
            status: status
                .as_deref()
                .map(TaskStatus::try_from)
                .transpose()
                .map_err(BoardDomainError::from)?,
            reporter: reporter
                .as_deref()
                .map(|value| vocabulary.reporter(value))
                .transpose()?,
            assignee: assignee
                .as_deref()
                .map(|value| vocabulary.assignee(value))
                .transpose()?,
            name: name.map(TaskContent::new).transpose()?,
        };

        if changes.is_empty() {
            return Err(BoardDomainError::NoFieldsToUpdate.into());
        }
        Ok(changes)
    }

    /// Removes a stored attachment, logging instead of failing.
    ///
    /// Returns `true` when a file was actually deleted.
    async fn discard_attachment(&self, reference: &AttachmentRef) -> bool {
        match self.attachments.delete(reference).await {
            Ok(AttachmentDeletion::Deleted) => true,
            Ok(AttachmentDeletion::NotFound) => {
                tracing::debug!(attachment = %reference, "attachment already absent");
                false
            }
            Err(err) => {
                tracing::warn!(attachment = %reference, error = %err, "failed to remove attachment");
                false
            }
        }
    }
}
