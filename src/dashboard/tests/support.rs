//! Task builders for dashboard tests.

use crate::board::domain::{
    Assignee, PersistedTaskData, ProjectId, Reporter, Task, TaskContent, TaskId, TaskStatus,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

fn instant(offset_seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
        .single()
        .expect("valid instant")
        + TimeDelta::seconds(offset_seconds)
}

/// Builder for persisted-looking tasks with controlled fields.
pub struct TaskFixture {
    data: PersistedTaskData,
}

impl TaskFixture {
    pub fn new(project_id: ProjectId, name: &str, created_offset: i64) -> Self {
        Self {
            data: PersistedTaskData {
                id: TaskId::new(),
                project_id,
                name: TaskContent::new(name).expect("valid task content"),
                image: None,
                status: TaskStatus::Pending,
                reporter: None,
                assignee: None,
                created_at: instant(created_offset),
                updated_at: instant(created_offset),
            },
        }
    }

    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.data.status = status;
        self
    }

    pub fn reporter(mut self, name: &str) -> Self {
        self.data.reporter = Some(Reporter::from_persisted(name));
        self
    }

    pub fn assignee(mut self, name: &str) -> Self {
        self.data.assignee = Some(Assignee::from_persisted(name));
        self
    }

    pub const fn id(mut self, id: TaskId) -> Self {
        self.data.id = id;
        self
    }

    pub fn build(self) -> Task {
        Task::from_persisted(self.data)
    }
}

/// Tasks named `Task 1` .. `Task n`, newest last.
pub fn numbered_tasks(project_id: ProjectId, count: i64) -> Vec<Task> {
    (1..=count)
        .map(|n| TaskFixture::new(project_id, &format!("Task {n}"), n).build())
        .collect()
}
