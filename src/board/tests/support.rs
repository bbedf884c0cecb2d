//! Shared fixtures for board tests.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use mockall::mock;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::board::{
    domain::{AttachmentRef, AttachmentUpload, Project, ProjectId, Task, TaskId},
    ports::{
        AttachmentDeletion, AttachmentStore, AttachmentStoreResult, BoardRepository,
        BoardRepositoryResult,
    },
};

mock! {
    pub Attachments {}

    #[async_trait]
    impl AttachmentStore for Attachments {
        async fn save(&self, upload: &AttachmentUpload) -> AttachmentStoreResult<AttachmentRef>;
        async fn delete(
            &self,
            reference: &AttachmentRef,
        ) -> AttachmentStoreResult<AttachmentDeletion>;
        fn resolve(&self, reference: &AttachmentRef) -> String;
    }
}

mock! {
    pub Repository {}

    #[async_trait]
    impl BoardRepository for Repository {
        async fn list_projects(&self) -> BoardRepositoryResult<Vec<Project>>;
        async fn find_project(&self, id: ProjectId) -> BoardRepositoryResult<Option<Project>>;
        async fn store_project(&self, project: &Project) -> BoardRepositoryResult<()>;
        async fn update_project(&self, project: &Project) -> BoardRepositoryResult<()>;
        async fn delete_project(&self, id: ProjectId) -> BoardRepositoryResult<()>;
        async fn list_tasks(&self, project_id: ProjectId) -> BoardRepositoryResult<Vec<Task>>;
        async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;
        async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()>;
        async fn update_task(&self, task: &Task) -> BoardRepositoryResult<()>;
        async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()>;
    }
}

/// Clock that advances one second on every reading, so creation order is
/// observable in timestamps.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
                .single()
                .expect("valid start instant"),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(tick)
    }
}
