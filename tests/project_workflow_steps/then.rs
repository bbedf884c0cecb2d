//! Then steps for project workflow BDD scenarios.

use super::world::{ProjectWorkflowWorld, run_async};
use atelier::board::{domain::TaskStatus, services::ErrorKind};
use rstest_bdd_macros::then;

#[then("the last update succeeded")]
fn last_update_succeeded(world: &ProjectWorkflowWorld) -> Result<(), eyre::Report> {
    match world.last_update.as_ref() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a successful update, got {other:?}")),
    }
}

#[then("the last update failed with a validation error")]
fn last_update_failed_validation(world: &ProjectWorkflowWorld) -> Result<(), eyre::Report> {
    match world.last_update.as_ref() {
        Some(Err(err)) if err.kind() == ErrorKind::Validation => Ok(()),
        other => Err(eyre::eyre!("expected a validation error, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ProjectWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.service.find_task(world.task()?.id()))
        .map_err(|err| eyre::eyre!("reload scenario task: {err}"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("listing tasks for the project returns nothing")]
fn listing_returns_nothing(world: &ProjectWorkflowWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let tasks = run_async(world.service.list_tasks(project_id))
        .map_err(|err| eyre::eyre!("list scenario tasks: {err}"))?;
    if !tasks.is_empty() {
        return Err(eyre::eyre!("expected no tasks, found {}", tasks.len()));
    }
    let projects = run_async(world.service.list_projects())
        .map_err(|err| eyre::eyre!("list scenario projects: {err}"))?;
    if projects.iter().any(|project| project.id() == project_id) {
        return Err(eyre::eyre!("deleted project is still listed"));
    }
    Ok(())
}

#[then("no attachment files remain")]
fn no_attachment_files_remain(world: &ProjectWorkflowWorld) -> Result<(), eyre::Report> {
    if !world.attachments.is_empty() {
        return Err(eyre::eyre!(
            "expected no stored attachments, found {}",
            world.attachments.len()
        ));
    }
    Ok(())
}
