//! Exercise library, templates and session logs.

use anyhow::Result;
use planner_client::{ExerciseId, ItemId, TemplateId, WorkoutEntryRequest, WorkoutTemplateRequest};

use crate::app::{App, today};
use crate::cli::{ExerciseAction, TemplateAction};
use crate::view::workout::{render_exercises, render_session, render_templates};

pub async fn exercises(app: &App, action: Option<ExerciseAction>) -> Result<()> {
    let mut planner = app.planner(today())?;
    match action.unwrap_or(ExerciseAction::List) {
        ExerciseAction::List => {
            planner.refresh_workout_library().await?;
            println!("{}", render_exercises(planner.exercises()));
        }
        ExerciseAction::Add { name } => {
            let exercise = planner.create_exercise(&name).await?;
            println!("Added exercise #{} {}", exercise.id, exercise.name);
        }
        ExerciseAction::Delete { id } => {
            planner.delete_exercise(ExerciseId(id)).await?;
            println!("Deleted exercise #{id}");
        }
    }
    Ok(())
}

pub async fn templates(app: &App, action: Option<TemplateAction>) -> Result<()> {
    let mut planner = app.planner(today())?;
    match action.unwrap_or(TemplateAction::List) {
        TemplateAction::List => {
            planner.refresh_workout_library().await?;
            println!("{}", render_templates(planner.templates()));
        }
        TemplateAction::Add { title, entries } => {
            let request = WorkoutTemplateRequest { title, entries };
            let template = planner.save_template(None, &request).await?;
            println!("{}", render_templates(std::slice::from_ref(&template)));
        }
        TemplateAction::Edit { id, title, entries } => {
            let request = WorkoutTemplateRequest { title, entries };
            let template = planner.save_template(Some(TemplateId(id)), &request).await?;
            println!("{}", render_templates(std::slice::from_ref(&template)));
        }
        TemplateAction::Delete { id } => {
            planner.delete_template(TemplateId(id)).await?;
            println!("Deleted template #{id}");
        }
    }
    Ok(())
}

pub async fn session(
    app: &App,
    item: i64,
    entries: Vec<WorkoutEntryRequest>,
    clear: bool,
    template: Option<i64>,
) -> Result<()> {
    let mut planner = app.planner(today())?;
    let session = if let Some(template) = template {
        planner
            .apply_template(ItemId(item), TemplateId(template))
            .await?
    } else if clear || !entries.is_empty() {
        planner.save_workout_session(ItemId(item), entries).await?
    } else {
        planner.workout_session(ItemId(item)).await?
    };
    println!("{}", render_session(&session));
    Ok(())
}
