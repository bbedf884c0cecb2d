//! Service behaviour when the attachment store misbehaves.

use std::sync::Arc;

use rstest::rstest;

use super::support::{MockAttachments, SteppingClock};
use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{AttachmentRef, AttachmentUpload},
    ports::{AttachmentDeletion, AttachmentStoreError},
    services::{BoardService, BoardServiceError, CreateTaskRequest, DeleteTaskRequest, ErrorKind},
};

fn service_with(
    attachments: MockAttachments,
) -> BoardService<InMemoryBoardRepository, MockAttachments, SteppingClock> {
    BoardService::new(
        Arc::new(InMemoryBoardRepository::new()),
        Arc::new(attachments),
        Arc::new(SteppingClock::new()),
    )
}

fn upload() -> AttachmentUpload {
    AttachmentUpload::new("a.png", vec![1, 2, 3]).expect("non-empty upload")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_save_stores_no_task() {
    let mut attachments = MockAttachments::new();
    attachments.expect_save().times(1).returning(|_| {
        Err(AttachmentStoreError::io(std::io::Error::other(
            "disk full",
        )))
    });
    attachments.expect_delete().never();
    let service = service_with(attachments);
    let project = service
        .create_project("Website Redesign")
        .await
        .expect("project creation should succeed");

    let err = service
        .create_task(CreateTaskRequest::new(project.id(), "Fix header").with_image(upload()))
        .await
        .expect_err("save failure should surface");

    assert!(matches!(err, BoardServiceError::Attachment(_)));
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(
        service
            .list_tasks(project.id())
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_file_removal_does_not_block_task_deletion() {
    let mut attachments = MockAttachments::new();
    attachments
        .expect_save()
        .times(1)
        .returning(|_| Ok(AttachmentRef::new("1_a.png")));
    attachments
        .expect_delete()
        .withf(|reference| reference.as_str() == "1_a.png")
        .times(1)
        .returning(|_| {
            Err(AttachmentStoreError::io(std::io::Error::other(
                "permission denied",
            )))
        });
    let service = service_with(attachments);
    let project = service
        .create_project("Website Redesign")
        .await
        .expect("project creation should succeed");
    let task = service
        .create_task(CreateTaskRequest::new(project.id(), "Fix header").with_image(upload()))
        .await
        .expect("task creation should succeed");

    service
        .delete_task(DeleteTaskRequest::new(task.id()))
        .await
        .expect("row deletion should proceed");

    assert!(
        service
            .list_tasks(project.id())
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_file_counts_as_not_removed() {
    let mut attachments = MockAttachments::new();
    attachments
        .expect_save()
        .returning(|_| Ok(AttachmentRef::new("1_a.png")));
    attachments
        .expect_delete()
        .times(1)
        .returning(|_| Ok(AttachmentDeletion::NotFound));
    let service = service_with(attachments);
    let project = service
        .create_project("Website Redesign")
        .await
        .expect("project creation should succeed");
    service
        .create_task(CreateTaskRequest::new(project.id(), "Fix header").with_image(upload()))
        .await
        .expect("task creation should succeed");

    let summary = service
        .delete_project(project.id())
        .await
        .expect("deletion should succeed");

    assert_eq!(summary.tasks_removed, 1);
    assert_eq!(summary.attachments_removed, 0);
}
