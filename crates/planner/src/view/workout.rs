//! Exercise library, templates and session logs.

use planner_client::{Exercise, WorkoutEntry, WorkoutSession, WorkoutTemplate};

/// Renders the exercise library.
pub fn render_exercises(exercises: &[Exercise]) -> String {
    if exercises.is_empty() {
        return "No exercises".to_string();
    }
    exercises
        .iter()
        .map(|e| format!("#{:<4} {}", e.id.0, e.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders templates with their entries.
pub fn render_templates(templates: &[WorkoutTemplate]) -> String {
    if templates.is_empty() {
        return "No templates".to_string();
    }
    let mut lines = Vec::new();
    for template in templates {
        lines.push(format!("#{:<4} {}", template.id.0, template.title));
        lines.extend(template.entries.iter().map(entry_line));
    }
    lines.join("\n")
}

/// Renders the exercise log of one workout item.
pub fn render_session(session: &WorkoutSession) -> String {
    let mut lines = vec![format!("Workout log for item #{}", session.calendar_item_id)];
    if session.entries.is_empty() {
        lines.push("  empty".to_string());
    }
    lines.extend(session.entries.iter().map(entry_line));
    lines.join("\n")
}

fn entry_line(entry: &WorkoutEntry) -> String {
    let name = if entry.exercise_name.is_empty() {
        format!("exercise #{}", entry.exercise_id)
    } else {
        entry.exercise_name.clone()
    };
    let mut line = format!("  {name:<24} {}x{}", entry.sets, entry.reps);
    if let Some(weight) = entry.weight {
        line.push_str(&format!(" @ {weight}"));
    }
    line
}
