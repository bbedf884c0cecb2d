//! Given steps for project workflow BDD scenarios.

use super::world::{ProjectWorkflowWorld, run_async};
use atelier::board::{domain::AttachmentUpload, services::CreateTaskRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut ProjectWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let project =
        run_async(world.service.create_project(name)).wrap_err("create project for scenario")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"a task "{name}" without an image"#)]
fn task_without_image(world: &mut ProjectWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let task = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(project_id, name)),
    )
    .wrap_err("create task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"a task "{name}" with an image "{file_name}""#)]
fn task_with_image(
    world: &mut ProjectWorkflowWorld,
    name: String,
    file_name: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let upload = AttachmentUpload::new(file_name, vec![0x89, b'P', b'N', b'G'])
        .wrap_err("build scenario upload")?;
    let task = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(project_id, name).with_image(upload)),
    )
    .wrap_err("create task with image for scenario")?;
    world.task = Some(task);
    Ok(())
}
