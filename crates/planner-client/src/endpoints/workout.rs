//! Workout library endpoints.

use reqwest::Method;

use crate::client::{ApiClient, Auth};
use crate::error::Result;
use crate::model::{
    Exercise, ExerciseCreateRequest, ExerciseId, ItemId, TemplateId, WorkoutSession,
    WorkoutSessionRequest, WorkoutTemplate, WorkoutTemplateRequest,
};

impl ApiClient {
    /// Exercises in the user's library.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn exercises(&self) -> Result<Vec<Exercise>> {
        self.fetch::<_, ()>(Method::GET, "/api/workout/exercises", &[], None, Auth::Bearer)
            .await
    }

    /// Adds an exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_exercise(&self, name: &str) -> Result<Exercise> {
        let body = ExerciseCreateRequest { name };
        self.fetch(
            Method::POST,
            "/api/workout/exercises",
            &[],
            Some(&body),
            Auth::Bearer,
        )
        .await
    }

    /// Removes an exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_exercise(&self, id: ExerciseId) -> Result<()> {
        self.execute(Method::DELETE, &format!("/api/workout/exercises/{id}"))
            .await
    }

    /// Workout templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn templates(&self) -> Result<Vec<WorkoutTemplate>> {
        self.fetch::<_, ()>(Method::GET, "/api/workout/templates", &[], None, Auth::Bearer)
            .await
    }

    /// Creates a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_template(&self, request: &WorkoutTemplateRequest) -> Result<WorkoutTemplate> {
        self.fetch(
            Method::POST,
            "/api/workout/templates",
            &[],
            Some(request),
            Auth::Bearer,
        )
        .await
    }

    /// Replaces a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_template(
        &self,
        id: TemplateId,
        request: &WorkoutTemplateRequest,
    ) -> Result<WorkoutTemplate> {
        let path = format!("/api/workout/templates/{id}");
        self.fetch(Method::PUT, &path, &[], Some(request), Auth::Bearer)
            .await
    }

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_template(&self, id: TemplateId) -> Result<()> {
        self.execute(Method::DELETE, &format!("/api/workout/templates/{id}"))
            .await
    }

    /// Exercise log of a workout item. The server creates an empty one on first read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn workout_session(&self, calendar_item_id: ItemId) -> Result<WorkoutSession> {
        let path = format!("/api/workout/sessions/{calendar_item_id}");
        self.fetch::<_, ()>(Method::GET, &path, &[], None, Auth::Bearer)
            .await
    }

    /// Replaces the exercise log of a workout item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_workout_session(
        &self,
        calendar_item_id: ItemId,
        request: &WorkoutSessionRequest,
    ) -> Result<WorkoutSession> {
        let path = format!("/api/workout/sessions/{calendar_item_id}");
        self.fetch(Method::PUT, &path, &[], Some(request), Auth::Bearer)
            .await
    }
}
