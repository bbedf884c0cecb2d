//! Contract tests for [`InMemoryBoardRepository`].

use crate::in_memory::helpers::{clock, project, repo};
use atelier::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{ProjectId, ProjectName, Task, TaskContent, TaskStatus, TaskChanges},
    ports::{BoardRepository, BoardRepositoryError},
};
use mockable::DefaultClock;
use rstest::rstest;

fn task(project_id: ProjectId, name: &str, clock: &DefaultClock) -> Task {
    Task::new(
        project_id,
        TaskContent::new(name).expect("valid task content"),
        None,
        clock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_project_is_rejected(repo: InMemoryBoardRepository, clock: DefaultClock) {
    let stored = project("Alpha", &clock);
    repo.store_project(&stored)
        .await
        .expect("first store should succeed");

    let result = repo.store_project(&stored).await;

    assert!(matches!(
        result,
        Err(BoardRepositoryError::DuplicateProject(id)) if id == stored.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_for_missing_project_is_rejected(
    repo: InMemoryBoardRepository,
    clock: DefaultClock,
) {
    let orphan = task(ProjectId::new(), "Orphan", &clock);

    let result = repo.store_task(&orphan).await;

    assert!(matches!(
        result,
        Err(BoardRepositoryError::ProjectNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_of_missing_rows_are_not_found(
    repo: InMemoryBoardRepository,
    clock: DefaultClock,
) {
    let ghost_project = project("Ghost", &clock);
    let ghost_task = task(ghost_project.id(), "Ghost", &clock);

    let project_result = repo.update_project(&ghost_project).await;
    let task_result = repo.update_task(&ghost_task).await;
    let delete_result = repo.delete_task(ghost_task.id()).await;

    assert!(project_result.is_err_and(|err| err.is_not_found()));
    assert!(task_result.is_err_and(|err| err.is_not_found()));
    assert!(matches!(
        delete_result,
        Err(BoardRepositoryError::TaskNotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_are_last_writer_wins(repo: InMemoryBoardRepository, clock: DefaultClock) {
    let owner = project("Alpha", &clock);
    repo.store_project(&owner).await.expect("store project");
    let original = task(owner.id(), "Fix header", &clock);
    repo.store_task(&original).await.expect("store task");

    let mut first = original.clone();
    first.apply(
        TaskChanges {
            status: Some(TaskStatus::Ongoing),
            ..TaskChanges::default()
        },
        &clock,
    );
    let mut second = original.clone();
    second.apply(
        TaskChanges {
            status: Some(TaskStatus::Completed),
            ..TaskChanges::default()
        },
        &clock,
    );
    repo.update_task(&first).await.expect("first write");
    repo.update_task(&second).await.expect("second write");

    let stored = repo
        .find_task(original.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn renamed_project_is_persisted(repo: InMemoryBoardRepository, clock: DefaultClock) {
    let mut stored = project("Alpha", &clock);
    repo.store_project(&stored).await.expect("store project");

    stored.rename(ProjectName::new("Beta").expect("valid name"));
    repo.update_project(&stored).await.expect("update project");

    let found = repo
        .find_project(stored.id())
        .await
        .expect("lookup should succeed")
        .expect("project should exist");
    assert_eq!(found.name().as_str(), "Beta");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_project_removes_its_tasks_only(
    repo: InMemoryBoardRepository,
    clock: DefaultClock,
) {
    let doomed = project("Doomed", &clock);
    let kept = project("Kept", &clock);
    repo.store_project(&doomed).await.expect("store project");
    repo.store_project(&kept).await.expect("store project");
    let doomed_task = task(doomed.id(), "Gone", &clock);
    let kept_task = task(kept.id(), "Stays", &clock);
    repo.store_task(&doomed_task).await.expect("store task");
    repo.store_task(&kept_task).await.expect("store task");

    repo.delete_project(doomed.id())
        .await
        .expect("delete should succeed");

    assert_eq!(
        repo.find_task(doomed_task.id()).await.expect("lookup"),
        None
    );
    assert_eq!(
        repo.find_task(kept_task.id()).await.expect("lookup"),
        Some(kept_task)
    );
    assert!(matches!(
        repo.delete_project(doomed.id()).await,
        Err(BoardRepositoryError::ProjectNotFound(_))
    ));
}
