//! Service writes merged into dashboard views without reloading.

use crate::in_memory::helpers::{MemoryBoardService, service};
use atelier::board::services::{CreateTaskRequest, DeleteTaskRequest};
use atelier::dashboard::{ListingSettings, PageLink, TaskBoard, TaskMutation, ViewState};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn twenty_five_tasks_span_three_pages(service: MemoryBoardService) {
    let project = service
        .create_project("Website Redesign")
        .await
        .expect("project creation should succeed");
    for n in 1..=25 {
        service
            .create_task(CreateTaskRequest::new(project.id(), format!("Task {n}")))
            .await
            .expect("task creation should succeed");
    }
    let board = TaskBoard::new(
        project.id(),
        service
            .list_tasks(project.id())
            .await
            .expect("listing should succeed"),
    );
    let mut state = ViewState::new();

    let first = board.present(&mut state, ListingSettings::default());
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_pages, 3);
    assert_eq!(
        first.navigation.links,
        vec![
            PageLink::Page {
                number: 1,
                active: true
            },
            PageLink::Page {
                number: 2,
                active: false
            },
            PageLink::Page {
                number: 3,
                active: false
            },
        ]
    );

    state.go_to_page(3);
    let last = board.present(&mut state, ListingSettings::default());
    assert_eq!(last.items.len(), 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutations_keep_board_in_step_with_store(service: MemoryBoardService) {
    let project = service
        .create_project("Website Redesign")
        .await
        .expect("project creation should succeed");
    let mut board = TaskBoard::new(project.id(), Vec::new());

    let created = service
        .create_task(CreateTaskRequest::new(project.id(), "Fix header"))
        .await
        .expect("task creation should succeed");
    board.apply(TaskMutation::Upserted(created.clone()));
    let updated = service
        .set_status(created.id(), "ongoing")
        .await
        .expect("status update should succeed");
    board.apply(TaskMutation::Upserted(updated));

    let fetched = service
        .list_tasks(project.id())
        .await
        .expect("listing should succeed");
    assert_eq!(board.tasks(), fetched.as_slice());

    service
        .delete_task(DeleteTaskRequest::new(created.id()))
        .await
        .expect("deletion should succeed");
    board.apply(TaskMutation::Removed(created.id()));
    assert!(board.is_empty());

    let stats = board.statistics(&service.settings().vocabulary);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.status.total(), 0);
}
