//! When steps for project workflow BDD scenarios.

use super::world::{ProjectWorkflowWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"the task status is set to "{status}""#)]
fn set_task_status(world: &mut ProjectWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.set_status(task_id, &status));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_update = Some(result);
    Ok(())
}

#[when("the project is deleted")]
fn delete_project(world: &mut ProjectWorkflowWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    run_async(world.service.delete_project(project_id)).wrap_err("delete scenario project")?;
    Ok(())
}
