//! Dispatch of [`ApiRequest`]s onto [`BoardService`].

use super::request::{ApiRequest, ImageDecodeError, ImagePayload};
use super::response::ApiResponse;
use crate::board::{
    domain::{AttachmentUpload, ProjectId, Task, TaskId},
    ports::{AttachmentStore, BoardRepository},
    services::{
        BoardService, BoardServiceError, CreateTaskRequest, DeleteTaskRequest, ErrorKind,
        UpdateTaskRequest,
    },
};
use crate::dashboard::{ListingSettings, PageNavigation, TaskBoard, ViewState};
use mockable::Clock;
use serde::Serialize;

/// Task as returned to clients, with the resolved image path.
#[derive(Serialize)]
struct TaskView<'a> {
    #[serde(flatten)]
    task: &'a Task,
    image_url: Option<String>,
}

/// One page of the task table.
#[derive(Serialize)]
struct TaskPageView<'a> {
    items: Vec<TaskView<'a>>,
    page: usize,
    total_pages: usize,
    total_matches: usize,
    navigation: &'a PageNavigation,
}

/// Translates requests into service calls and results into responses.
pub struct ApiHandler<R, A, C>
where
    R: BoardRepository,
    A: AttachmentStore,
    C: Clock + Send + Sync,
{
    service: BoardService<R, A, C>,
    listing: ListingSettings,
}

impl<R, A, C> ApiHandler<R, A, C>
where
    R: BoardRepository,
    A: AttachmentStore,
    C: Clock + Send + Sync,
{
    /// Wraps a board service, paging task tables with the default settings.
    #[must_use]
    pub fn new(service: BoardService<R, A, C>) -> Self {
        Self::with_listing(service, ListingSettings::default())
    }

    /// Wraps a board service with explicit page size and link window.
    #[must_use]
    pub const fn with_listing(service: BoardService<R, A, C>, listing: ListingSettings) -> Self {
        Self { service, listing }
    }

    /// Returns the wrapped service.
    #[must_use]
    pub const fn service(&self) -> &BoardService<R, A, C> {
        &self.service
    }

    /// Parses one JSON request and handles it. Malformed input yields `400`.
    pub async fn handle_json(&self, raw: &str) -> ApiResponse {
        match serde_json::from_str::<ApiRequest>(raw) {
            Ok(request) => self.handle(request).await,
            Err(err) => {
                tracing::debug!(error = %err, "rejected malformed request");
                ApiResponse::bad_request(format!("malformed request: {err}"))
            }
        }
    }

    /// Handles one request.
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::ListProjects => match self.service.list_projects().await {
                Ok(projects) => json_response(&projects),
                Err(err) => error_response(&err),
            },
            ApiRequest::ListTasks { project_id } => {
                match self.service.list_tasks(project_id).await {
                    Ok(tasks) => json_response(&self.task_views(&tasks)),
                    Err(err) => error_response(&err),
                }
            }
            ApiRequest::TaskView {
                project_id,
                search,
                page,
            } => self.task_page(project_id, search, page).await,
            ApiRequest::CreateProject { name } => {
                match self.service.create_project(name).await {
                    Ok(project) => ApiResponse::created(project.id()),
                    Err(err) => error_response(&err),
                }
            }
            ApiRequest::CreateTask {
                project_id,
                name,
                image,
            } => self.create_task(project_id, name, image.as_ref()).await,
            ApiRequest::RenameProject { id, name } => {
                unit_response(self.service.rename_project(id, name).await.map(drop))
            }
            ApiRequest::UpdateTask {
                id,
                status,
                pelapor,
                eksekutor,
                name,
            } => {
                let update = UpdateTaskFields {
                    status,
                    pelapor,
                    eksekutor,
                    name,
                }
                .into_request(id);
                unit_response(self.service.update_task(update).await.map(drop))
            }
            ApiRequest::ReplaceTaskImage { id, image } => {
                match decode_image(image.as_ref()) {
                    Ok(upload) => {
                        unit_response(self.service.replace_task_image(id, upload).await.map(drop))
                    }
                    Err(response) => response,
                }
            }
            ApiRequest::DeleteProject { id } => {
                unit_response(self.service.delete_project(id).await.map(drop))
            }
            ApiRequest::DeleteTask { id, project_id } => {
                let delete = project_id.map_or_else(
                    || DeleteTaskRequest::new(id),
                    |expected| DeleteTaskRequest::new(id).in_project(expected),
                );
                unit_response(self.service.delete_task(delete).await)
            }
            ApiRequest::ProjectStatistics { project_id } => {
                match self.service.project_statistics(project_id).await {
                    Ok(stats) => json_response(&stats),
                    Err(err) => error_response(&err),
                }
            }
        }
    }

    async fn create_task(
        &self,
        project_id: ProjectId,
        name: String,
        image: Option<&ImagePayload>,
    ) -> ApiResponse {
        let upload = match decode_image(image) {
            Ok(upload) => upload,
            Err(response) => return response,
        };
        let mut request = CreateTaskRequest::new(project_id, name);
        if let Some(file) = upload {
            request = request.with_image(file);
        }
        match self.service.create_task(request).await {
            Ok(task) => ApiResponse::created(task.id()),
            Err(err) => error_response(&err),
        }
    }

    async fn task_page(
        &self,
        project_id: ProjectId,
        search: Option<String>,
        page: Option<usize>,
    ) -> ApiResponse {
        let tasks = match self.service.list_tasks(project_id).await {
            Ok(tasks) => tasks,
            Err(err) => return error_response(&err),
        };
        let board = TaskBoard::new(project_id, tasks);
        let mut state = ViewState::new();
        if let Some(term) = search {
            state.set_search_term(term);
        }
        if let Some(number) = page {
            state.go_to_page(number);
        }
        let view = board.present(&mut state, self.listing);
        json_response(&TaskPageView {
            items: self.task_views(&view.items),
            page: view.page,
            total_pages: view.total_pages,
            total_matches: view.total_matches,
            navigation: &view.navigation,
        })
    }

    fn task_views<'a>(&self, tasks: &'a [Task]) -> Vec<TaskView<'a>> {
        tasks
            .iter()
            .map(|task| TaskView {
                task,
                image_url: self.service.attachment_url(task),
            })
            .collect()
    }
}

/// Optional task fields as received from the client.
struct UpdateTaskFields {
    status: Option<String>,
    pelapor: Option<String>,
    eksekutor: Option<String>,
    name: Option<String>,
}

impl UpdateTaskFields {
    fn into_request(self, id: TaskId) -> UpdateTaskRequest {
        let mut request = UpdateTaskRequest::new(id);
        if let Some(value) = self.status {
            request = request.with_status(value);
        }
        if let Some(value) = self.pelapor {
            request = request.with_reporter(value);
        }
        if let Some(value) = self.eksekutor {
            request = request.with_assignee(value);
        }
        if let Some(value) = self.name {
            request = request.with_name(value);
        }
        request
    }
}

fn decode_image(image: Option<&ImagePayload>) -> Result<Option<AttachmentUpload>, ApiResponse> {
    image
        .map(ImagePayload::decode)
        .transpose()
        .map_err(|err: ImageDecodeError| ApiResponse::bad_request(err.to_string()))
}

fn unit_response(result: Result<(), BoardServiceError>) -> ApiResponse {
    match result {
        Ok(()) => ApiResponse::success(),
        Err(err) => error_response(&err),
    }
}

fn json_response(value: &impl Serialize) -> ApiResponse {
    match serde_json::to_value(value) {
        Ok(body) => ApiResponse::ok(body),
        Err(err) => {
            tracing::error!(error = %err, "failed to encode response body");
            ApiResponse::storage_failure()
        }
    }
}

fn error_response(err: &BoardServiceError) -> ApiResponse {
    match err.kind() {
        ErrorKind::Validation => ApiResponse::bad_request(err.to_string()),
        ErrorKind::NotFound => ApiResponse::not_found(err.to_string()),
        ErrorKind::Storage => {
            tracing::error!(error = %err, "storage failure");
            ApiResponse::storage_failure()
        }
    }
}
