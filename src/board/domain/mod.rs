//! Domain model for design-review projects and their tasks.
//!
//! Projects exclusively own tasks; tasks carry rich-text content, an optional
//! image attachment, a workflow status, and reporter/assignee fields drawn
//! from deployment vocabularies. Infrastructure concerns stay outside this
//! boundary.

mod attachment;
mod error;
mod ids;
mod project;
mod task;
mod vocabulary;

pub use attachment::{
    AttachmentRef, AttachmentUpload, MAX_SANITIZED_FILE_NAME_LEN, sanitize_file_name,
};
pub use error::{BoardDomainError, ParseTaskStatusError};
pub use ids::{ProjectId, TaskId};
pub use project::{Project, ProjectName};
pub use task::{
    EMPTY_MARKUP_SENTINEL, PersistedTaskData, Task, TaskChanges, TaskContent, TaskStatus,
};
pub use vocabulary::{Assignee, Reporter, Vocabulary};
