//! `PostgreSQL` repository implementation for projects and tasks.

use super::{
    models::{NewProjectRow, NewTaskRow, ProjectRow, TaskRow},
    schema::{projects, tasks},
};
use crate::board::{
    domain::{
        Assignee, AttachmentRef, PersistedTaskData, Project, ProjectId, ProjectName, Reporter,
        Task, TaskContent, TaskId, TaskStatus,
    },
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Schema applied by [`PostgresBoardRepository::apply_schema`].
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-15-000000_create_projects_and_tasks/up.sql");

/// Directory prefix some legacy rows store in the `image` column.
const LEGACY_UPLOAD_DIR: &str = "uploads/";

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed project and task repository.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `projects` and `tasks` tables when they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the statements fail.
    pub async fn apply_schema(&self) -> BoardRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(BoardRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn list_projects(&self) -> BoardRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order_by((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> BoardRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn store_project(&self, project: &Project) -> BoardRepositoryResult<()> {
        let project_id = project.id();
        let new_row = NewProjectRow {
            id: project_id.into_inner(),
            name: project.name().as_str().to_owned(),
            created_at: project.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateProject(project_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> BoardRepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().as_str().to_owned();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(projects::table.filter(projects::id.eq(project_id.into_inner())))
                    .set(projects::name.eq(&name))
                    .execute(connection)
                    .map_err(BoardRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(BoardRepositoryError::ProjectNotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> BoardRepositoryResult<()> {
        let project_uuid = id.into_inner();
        self.run_blocking(move |connection| {
            let deleted_count = connection
                .transaction::<usize, DieselError, _>(|conn| {
                    diesel::delete(tasks::table.filter(tasks::project_id.eq(project_uuid)))
                        .execute(conn)?;
                    diesel::delete(projects::table.filter(projects::id.eq(project_uuid)))
                        .execute(conn)
                })
                .map_err(BoardRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(BoardRepositoryError::ProjectNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_tasks(&self, project_id: ProjectId) -> BoardRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order_by((tasks::created_at.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn store_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        BoardRepositoryError::ProjectNotFound(project_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateTask(task_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> BoardRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                    .set((
                        tasks::name.eq(&row.name),
                        tasks::image.eq(&row.image),
                        tasks::status.eq(&row.status),
                        tasks::pelapor.eq(&row.pelapor),
                        tasks::eksekutor.eq(&row.eksekutor),
                        tasks::updated_at.eq(row.updated_at),
                    ))
                    .execute(connection)
                    .map_err(BoardRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(BoardRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> BoardRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(BoardRepositoryError::persistence)?;

            if deleted_count == 0 {
                return Err(BoardRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_project(row: ProjectRow) -> BoardRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        created_at,
    } = row;
    let parsed_name = ProjectName::new(name).map_err(BoardRepositoryError::persistence)?;
    Ok(Project::from_persisted(
        ProjectId::from_uuid(id),
        parsed_name,
        created_at,
    ))
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        name: task.name().as_str().to_owned(),
        image: task.image().map(|image| image.as_str().to_owned()),
        status: Some(task.status().as_str().to_owned()),
        pelapor: task.reporter().map(|reporter| reporter.as_str().to_owned()),
        eksekutor: task.assignee().map(|assignee| assignee.as_str().to_owned()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> BoardRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        name,
        image,
        status,
        pelapor,
        eksekutor,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        name: TaskContent::new(name).map_err(BoardRepositoryError::persistence)?,
        image: non_blank(image).map(|stored| stored_attachment(&stored)),
        status: parse_persisted_status(status.as_deref())?,
        reporter: non_blank(pelapor).map(Reporter::from_persisted),
        assignee: non_blank(eksekutor).map(Assignee::from_persisted),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

/// Legacy rows may hold NULL or an empty string; both read as `pending`.
fn parse_persisted_status(value: Option<&str>) -> BoardRepositoryResult<TaskStatus> {
    match value.map(str::trim) {
        None | Some("") => Ok(TaskStatus::Pending),
        Some(raw) => TaskStatus::try_from(raw).map_err(BoardRepositoryError::persistence),
    }
}

/// Legacy rows may carry the upload directory in front of the file name.
fn stored_attachment(value: &str) -> AttachmentRef {
    let trimmed = value.trim().trim_start_matches('/');
    AttachmentRef::new(trimmed.strip_prefix(LEGACY_UPLOAD_DIR).unwrap_or(trimmed))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}
