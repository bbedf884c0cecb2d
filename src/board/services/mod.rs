//! Application services for project and task workflows.

mod requests;
mod workflow;

pub use requests::{CreateTaskRequest, DeleteTaskRequest, UpdateTaskRequest};
pub use workflow::{
    BoardService, BoardServiceError, BoardServiceResult, BoardSettings,
    DEFAULT_MAX_ATTACHMENT_BYTES, ErrorKind, ProjectDeletion,
};
