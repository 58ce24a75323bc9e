//! Workout library wire types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::ItemId;

/// Identifier of an exercise in the user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(pub i64);

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a workout template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub i64);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Identifier.
    pub id: ExerciseId,
    /// Name.
    pub name: String,
}

/// One row of a template or session as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    /// Exercise performed.
    pub exercise_id: ExerciseId,
    /// Exercise name, resolved by the server.
    #[serde(default)]
    pub exercise_name: String,
    /// Number of sets.
    pub sets: u32,
    /// Repetitions per set.
    pub reps: u32,
    /// Optional load.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl WorkoutEntry {
    /// Converts back into a request row.
    #[must_use]
    pub const fn to_request(&self) -> WorkoutEntryRequest {
        WorkoutEntryRequest {
            exercise_id: self.exercise_id,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
        }
    }
}

/// One row of a template or session as sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntryRequest {
    /// Exercise performed.
    pub exercise_id: ExerciseId,
    /// Number of sets (at least 1).
    pub sets: u32,
    /// Repetitions per set (at least 1).
    pub reps: u32,
    /// Optional load (non-negative).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// A reusable, ordered list of exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    /// Identifier.
    pub id: TemplateId,
    /// Name of the template.
    pub title: String,
    /// Rows in order.
    #[serde(default)]
    pub entries: Vec<WorkoutEntry>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Body of template create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplateRequest {
    /// Name of the template.
    pub title: String,
    /// Rows in order.
    pub entries: Vec<WorkoutEntryRequest>,
}

/// The exercise log attached to one workout calendar item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Calendar item this log belongs to.
    pub calendar_item_id: ItemId,
    /// Rows in order.
    #[serde(default)]
    pub entries: Vec<WorkoutEntry>,
    /// Creation timestamp (absent for a session created on read).
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of the session update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSessionRequest {
    /// Rows in order; replaces the stored list.
    pub entries: Vec<WorkoutEntryRequest>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExerciseCreateRequest<'a> {
    pub name: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_template_deserialization() {
        let json = r#"{
            "id": 4,
            "title": "Push day",
            "entries": [
                {"exerciseId": 1, "exerciseName": "Bench", "sets": 3, "reps": 8, "weight": 60.0},
                {"exerciseId": 2, "exerciseName": "Dips", "sets": 3, "reps": 12, "weight": null}
            ],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }"#;
        let template: WorkoutTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.id, TemplateId(4));
        assert_eq!(template.entries.len(), 2);
        assert_eq!(template.entries[0].weight, Some(60.0));
        assert!(template.entries[1].weight.is_none());

        let request = template.entries[1].to_request();
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["exerciseId"], 2);
        assert!(value.get("weight").is_none());
    }

    #[test]
    fn test_session_without_timestamps() {
        let json = r#"{"calendarItemId": 9, "entries": [], "createdAt": null, "updatedAt": null}"#;
        let session: WorkoutSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.calendar_item_id, ItemId(9));
        assert!(session.entries.is_empty());
        assert!(session.created_at.is_none());
    }
}
