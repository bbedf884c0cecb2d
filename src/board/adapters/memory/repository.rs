//! In-memory repository for board tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{Project, ProjectId, Task, TaskId},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory project and task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BoardRepositoryResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> BoardRepositoryResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn list_projects(&self) -> BoardRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        let mut projects: Vec<Project> = state.projects.values().cloned().collect();
        projects.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(projects)
    }

    async fn find_project(&self, id: ProjectId) -> BoardRepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn store_project(&self, project: &Project) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.contains_key(&project.id()) {
            return Err(BoardRepositoryError::DuplicateProject(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .projects
            .get_mut(&project.id())
            .ok_or(BoardRepositoryError::ProjectNotFound(project.id()))?;
        *stored = project.clone();
        Ok(())
    }

    async fn delete_project(&self, id: ProjectId) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.remove(&id).is_none() {
            return Err(BoardRepositoryError::ProjectNotFound(id));
        }
        state.tasks.retain(|_, task| task.project_id() != id);
        Ok(())
    }

    async fn list_tasks(&self, project_id: ProjectId) -> BoardRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect();
        tasks.sort_by(Task::cmp_newest_first);
        Ok(tasks)
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(BoardRepositoryError::ProjectNotFound(task.project_id()));
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(BoardRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(BoardRepositoryError::TaskNotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(BoardRepositoryError::TaskNotFound(id))
    }
}
