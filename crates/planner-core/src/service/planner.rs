//! Planner service.
//!
//! Owns the API client and every local cache. Each method is one user action:
//! it validates input, calls the server, merges the confirmed result into the
//! caches and, for mutations, re-fetches the affected views right after so the
//! server stays the source of truth.
//!
//! A 401 or 403 from any call clears the stored token and every cache.

use chrono::NaiveDate;
use futures_util::future::join_all;
use planner_client::{
    ApiClient, CalendarItem, CalendarItemRequest, Exercise, ExerciseId, ItemId, ItemType,
    Notification, NotificationId, TemplateId, WorkoutEntry, WorkoutEntryRequest, WorkoutSession,
    WorkoutSessionRequest, WorkoutTemplate, WorkoutTemplateRequest,
};
use tracing::{debug, info, warn};

use crate::calendar::{CalendarCache, MonthKey, week_strip};
use crate::error::{Error, Result};
use crate::inbox::Inbox;
use crate::push::RefreshPlan;
use crate::validation::{
    validate_entries, validate_exercise_name, validate_item, validate_login, validate_register,
    validate_template,
};

/// Client-side state of one user session.
#[derive(Debug)]
pub struct Planner {
    client: ApiClient,
    calendar: CalendarCache,
    inbox: Inbox,
    exercises: Vec<Exercise>,
    templates: Vec<WorkoutTemplate>,
}

impl Planner {
    /// Creates a planner looking at `today`.
    #[must_use]
    pub fn new(client: ApiClient, today: NaiveDate) -> Self {
        Self {
            client,
            calendar: CalendarCache::new(today),
            inbox: Inbox::new(),
            exercises: Vec::new(),
            templates: Vec::new(),
        }
    }

    /// Starts with a type filter active. Nothing is fetched.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<ItemType>) -> Self {
        self.calendar.set_filter(filter);
        self
    }

    /// Underlying API client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Calendar cache.
    #[must_use]
    pub const fn calendar(&self) -> &CalendarCache {
        &self.calendar
    }

    /// Notification cache.
    #[must_use]
    pub const fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    /// Exercise library, sorted by name.
    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Workout templates.
    #[must_use]
    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    /// Whether a token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    fn guard<T>(&mut self, result: planner_client::Result<T>) -> Result<T> {
        match result {
            Err(e) if e.is_session_invalid() => {
                self.invalidate_session();
                Err(e.into())
            }
            other => other.map_err(Into::into),
        }
    }

    /// Like `guard`, but failures other than an invalid session are logged
    /// and swallowed.
    fn soften<T>(&mut self, result: planner_client::Result<T>, what: &str) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_session_invalid() => {
                self.invalidate_session();
                Err(e.into())
            }
            Err(e) => {
                warn!("Failed to refresh {what}: {}", e.message());
                Ok(None)
            }
        }
    }

    fn invalidate_session(&mut self) {
        warn!("Session rejected by server, clearing stored token");
        if let Err(e) = self.client.session().clear() {
            warn!("Failed to clear stored token: {e}");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.calendar.clear();
        self.inbox.clear();
        self.exercises.clear();
        self.templates.clear();
    }

    // Account

    /// Creates an account and signs in.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the server error.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<()> {
        validate_register(username, password)?;
        self.client.register(username.trim(), password).await?;
        self.reset();
        Ok(())
    }

    /// Signs in.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the server error.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        validate_login(username, password)?;
        self.client.login(username.trim(), password).await?;
        self.reset();
        Ok(())
    }

    /// Forgets the stored token and every cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be cleared.
    pub fn logout(&mut self) -> Result<()> {
        self.client.session().clear()?;
        self.reset();
        info!("Logged out");
        Ok(())
    }

    // Calendar views

    /// Changes the type filter and reloads the calendar views. Activating the
    /// workout filter also loads the workout library.
    ///
    /// # Errors
    ///
    /// Returns an error if a reload fails.
    pub async fn set_filter(&mut self, filter: Option<ItemType>) -> Result<()> {
        if !self.calendar.set_filter(filter) {
            return Ok(());
        }
        debug!("Type filter set to {filter:?}");
        self.refresh_month().await?;
        self.refresh_day().await?;
        if filter == Some(ItemType::Workout) {
            self.refresh_workout_library().await?;
        }
        Ok(())
    }

    /// Moves the grid to `key` and loads it.
    ///
    /// # Errors
    ///
    /// Returns an error if the month cannot be loaded.
    pub async fn show_month(&mut self, key: MonthKey) -> Result<()> {
        self.calendar.set_cursor(key);
        self.refresh_month().await
    }

    /// Selects `date` and loads its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the day cannot be loaded.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        self.calendar.select_date(date);
        self.refresh_day().await
    }

    /// Re-fetches the month under the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refresh_month(&mut self) -> Result<()> {
        let key = self.calendar.cursor();
        let result = self
            .client
            .month(key.year, key.month, self.calendar.filter())
            .await;
        let month = self.guard(result)?;
        self.calendar.set_month(month);
        Ok(())
    }

    /// Re-fetches the selected day.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refresh_day(&mut self) -> Result<()> {
        let date = self.calendar.selected_date();
        let result = self.client.day(date, self.calendar.filter()).await;
        let items = self.guard(result)?;
        self.calendar.set_day(date, items);
        Ok(())
    }

    /// Loads every month bucket the week of the selected date spans that is
    /// not cached yet, and returns the week's dates.
    ///
    /// A failing adjacent month is logged and left out.
    ///
    /// # Errors
    ///
    /// Returns an error only when the session is rejected.
    pub async fn load_week(&mut self) -> Result<[NaiveDate; 7]> {
        let week = week_strip(self.calendar.selected_date());
        let missing = self.calendar.missing_week_months(&week);
        self.fetch_week_months(&missing).await?;
        Ok(week)
    }

    async fn fetch_week_months(&mut self, keys: &[MonthKey]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let filter = self.calendar.filter();
        let client = &self.client;
        let results = join_all(keys.iter().map(|k| client.month(k.year, k.month, filter))).await;

        for (key, result) in keys.iter().zip(results) {
            if let Some(month) = self.soften(result, &format!("week month {key}"))? {
                self.calendar.insert_week_month(month);
            }
        }
        Ok(())
    }

    /// Runs one refresh cycle for a push-derived plan. Views are fetched
    /// concurrently; failures other than an invalid session are logged.
    ///
    /// Returns the unread notifications not seen before.
    ///
    /// # Errors
    ///
    /// Returns an error only when the session is rejected.
    pub async fn apply_refresh(&mut self, plan: RefreshPlan) -> Result<Vec<Notification>> {
        debug!("Refreshing {plan:?}");
        let key = self.calendar.cursor();
        let date = self.calendar.selected_date();
        let filter = self.calendar.filter();
        let client = &self.client;

        let (month, day, unread) = tokio::join!(
            async {
                if plan.month {
                    Some(client.month(key.year, key.month, filter).await)
                } else {
                    None
                }
            },
            async {
                if plan.day {
                    Some(client.day(date, filter).await)
                } else {
                    None
                }
            },
            async {
                if plan.notifications {
                    Some(client.unread_notifications().await)
                } else {
                    None
                }
            },
        );

        if let Some(result) = month
            && let Some(month) = self.soften(result, "month")?
        {
            self.calendar.set_month(month);
        }
        if let Some(result) = day
            && let Some(items) = self.soften(result, "day")?
        {
            self.calendar.set_day(date, items);
        }
        let mut fresh = Vec::new();
        if let Some(result) = unread
            && let Some(unread) = self.soften(result, "notifications")?
        {
            fresh = self.inbox.set_unread(unread);
        }

        if plan.month {
            let keys = self.calendar.week_keys();
            self.fetch_week_months(&keys).await?;
        }
        Ok(fresh)
    }

    /// Re-fetches the calendar views that are cached. Nothing is fetched
    /// when no view is loaded.
    async fn reconcile(&mut self) {
        let plan = RefreshPlan {
            month: self.calendar.month().is_some() || !self.calendar.week_keys().is_empty(),
            day: self.calendar.day_items().is_some(),
            notifications: false,
        };
        if plan.is_empty() {
            debug!("No cached calendar view to refresh");
            return;
        }
        if let Err(e) = self.apply_refresh(plan).await {
            debug!("Refresh after mutation stopped: {e}");
        }
    }

    // Calendar mutations

    /// Creates (`id` is `None`) or replaces an item.
    ///
    /// The confirmed item is merged into the caches at once, then the cached
    /// month and day views are re-fetched.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the server error.
    pub async fn save_item(
        &mut self,
        id: Option<ItemId>,
        request: &CalendarItemRequest,
    ) -> Result<CalendarItem> {
        validate_item(request)?;
        let result = match id {
            Some(id) => self.client.update_item(id, request).await,
            None => self.client.create_item(request).await,
        };
        let saved = self.guard(result)?;
        info!("Saved item {} on {}", saved.id, saved.date);

        self.calendar.apply_saved(&saved);
        self.reconcile().await;
        Ok(saved)
    }

    /// Deletes an item, removes it from the caches, then re-fetches the
    /// cached views.
    ///
    /// # Errors
    ///
    /// Returns the server error.
    pub async fn delete_item(&mut self, id: ItemId) -> Result<()> {
        let result = self.client.delete_item(id).await;
        self.guard(result)?;
        info!("Deleted item {id}");

        self.calendar.apply_deleted(id);
        self.reconcile().await;
        Ok(())
    }

    /// Sets the done flag of a cached item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ItemNotLoaded`] if the item is in no cached view, or
    /// the server error.
    pub async fn set_done(&mut self, id: ItemId, done: bool) -> Result<CalendarItem> {
        let item = self.calendar.find(id).ok_or(Error::ItemNotLoaded(id))?;
        let mut request = item.to_request();
        request.done = Some(done);
        self.save_item(Some(id), &request).await
    }

    /// Flips the done flag of a cached item.
    ///
    /// # Errors
    ///
    /// See [`Planner::set_done`].
    pub async fn toggle_done(&mut self, id: ItemId) -> Result<CalendarItem> {
        let done = self
            .calendar
            .find(id)
            .map(|item| item.done)
            .ok_or(Error::ItemNotLoaded(id))?;
        self.set_done(id, !done).await
    }

    // Notifications

    /// Re-fetches unread notifications and returns the ones not seen before.
    ///
    /// # Errors
    ///
    /// Returns the server error.
    pub async fn refresh_notifications(&mut self) -> Result<Vec<Notification>> {
        let result = self.client.unread_notifications().await;
        let unread = self.guard(result)?;
        Ok(self.inbox.set_unread(unread))
    }

    /// Loads the full notification history.
    ///
    /// # Errors
    ///
    /// Returns the server error.
    pub async fn load_all_notifications(&mut self) -> Result<()> {
        let result = self.client.notifications().await;
        let all = self.guard(result)?;
        self.inbox.set_all(all);
        Ok(())
    }

    /// Marks a notification read.
    ///
    /// # Errors
    ///
    /// Returns the server error.
    pub async fn mark_read(&mut self, id: NotificationId) -> Result<Notification> {
        let result = self.client.mark_notification_read(id).await;
        let notification = self.guard(result)?;
        self.inbox.apply_read(&notification);
        Ok(notification)
    }

    // Workout library

    /// Loads exercises and templates concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first server error.
    pub async fn refresh_workout_library(&mut self) -> Result<()> {
        let (exercises, templates) =
            tokio::join!(self.client.exercises(), self.client.templates());
        let mut exercises = self.guard(exercises)?;
        let templates = self.guard(templates)?;
        sort_by_name(&mut exercises);
        self.exercises = exercises;
        self.templates = templates;
        Ok(())
    }

    /// Adds an exercise to the library.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the server error.
    pub async fn create_exercise(&mut self, name: &str) -> Result<Exercise> {
        validate_exercise_name(name)?;
        let result = self.client.create_exercise(name.trim()).await;
        let exercise = self.guard(result)?;
        self.exercises.retain(|e| e.id != exercise.id);
        self.exercises.push(exercise.clone());
        sort_by_name(&mut self.exercises);
        Ok(exercise)
    }

    /// Removes an exercise from the library.
    ///
    /// # Errors
    ///
    /// Returns the server error.
    pub async fn delete_exercise(&mut self, id: ExerciseId) -> Result<()> {
        let result = self.client.delete_exercise(id).await;
        self.guard(result)?;
        self.exercises.retain(|e| e.id != id);
        Ok(())
    }

    /// Creates (`id` is `None`) or replaces a template.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the server error.
    pub async fn save_template(
        &mut self,
        id: Option<TemplateId>,
        request: &WorkoutTemplateRequest,
    ) -> Result<WorkoutTemplate> {
        validate_template(request)?;
        let result = match id {
            Some(id) => self.client.update_template(id, request).await,
            None => self.client.create_template(request).await,
        };
        let template = self.guard(result)?;
        if let Some(slot) = self.templates.iter_mut().find(|t| t.id == template.id) {
            *slot = template.clone();
        } else {
            self.templates.push(template.clone());
        }
        Ok(template)
    }

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// Returns the server error.
    pub async fn delete_template(&mut self, id: TemplateId) -> Result<()> {
        let result = self.client.delete_template(id).await;
        self.guard(result)?;
        self.templates.retain(|t| t.id != id);
        Ok(())
    }

    /// Loads the exercise log of a workout item.
    ///
    /// # Errors
    ///
    /// Returns the server error.
    pub async fn workout_session(&mut self, item: ItemId) -> Result<WorkoutSession> {
        let result = self.client.workout_session(item).await;
        self.guard(result)
    }

    /// Replaces the exercise log of a workout item.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the server error.
    pub async fn save_workout_session(
        &mut self,
        item: ItemId,
        entries: Vec<WorkoutEntryRequest>,
    ) -> Result<WorkoutSession> {
        validate_entries(&entries)?;
        let request = WorkoutSessionRequest { entries };
        let result = self.client.update_workout_session(item, &request).await;
        self.guard(result)
    }

    /// Replaces the exercise log of a workout item with the entries of a
    /// template. Templates are fetched when `template` is not cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] if the server has no such
    /// template, a validation error, or the server error.
    pub async fn apply_template(
        &mut self,
        item: ItemId,
        template: TemplateId,
    ) -> Result<WorkoutSession> {
        if !self.templates.iter().any(|t| t.id == template) {
            let result = self.client.templates().await;
            self.templates = self.guard(result)?;
        }
        let entries: Vec<WorkoutEntryRequest> = self
            .templates
            .iter()
            .find(|t| t.id == template)
            .ok_or(Error::TemplateNotFound(template))?
            .entries
            .iter()
            .map(WorkoutEntry::to_request)
            .collect();

        debug!("Applying template {template} to item {item}");
        self.save_workout_session(item, entries).await
    }
}

fn sort_by_name(exercises: &mut [Exercise]) {
    exercises.sort_by_cached_key(|e| e.name.to_lowercase());
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use planner_client::{MemoryTokenStore, Session};

    const ITEM: &str = r#"{"id":3,"date":"2024-05-01","startTime":"18:00:00","type":"WORKOUT",
        "importance":"MEDIUM","title":"Leg day","done":false,
        "createdAt":"2024-04-01T10:00:00Z","updatedAt":"2024-04-01T10:00:00Z"}"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn planner_for(server: &mockito::ServerGuard) -> Planner {
        let session = Session::new(MemoryTokenStore::with_token("jwt-1"));
        Planner::new(ApiClient::new(&server.url(), session).unwrap(), today())
    }

    fn month_body(month: u32, items: &str) -> String {
        format!(r#"{{"year":2024,"month":{month},"items":[{items}]}}"#)
    }

    #[tokio::test]
    async fn test_validation_runs_before_network() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/api/calendar/items")
            .expect(0)
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        let request = CalendarItemRequest::new(today(), ItemType::Other, "  ");
        let err = planner.save_item(None, &request).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Title is required");
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_applies_then_refreshes_cached_views() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/api/calendar/items")
            .with_body(ITEM)
            .create_async()
            .await;
        let month = server
            .mock("GET", "/api/calendar/month")
            .match_query(Matcher::UrlEncoded("month".into(), "5".into()))
            .with_body(month_body(5, ITEM))
            .expect(2)
            .create_async()
            .await;
        let day = server
            .mock("GET", "/api/calendar/day")
            .expect(0)
            .create_async()
            .await;
        let unread = server
            .mock("GET", "/api/notifications/unread")
            .expect(0)
            .create_async()
            .await;
        let mut planner = planner_for(&server);
        planner.refresh_month().await.unwrap();

        let request = CalendarItemRequest::new(today(), ItemType::Workout, "Leg day");
        let saved = planner.save_item(None, &request).await.unwrap();

        assert_eq!(saved.id, ItemId(3));
        assert_eq!(planner.calendar().month().unwrap().items.len(), 1);
        assert!(planner.calendar().day_items().is_none());
        create.assert_async().await;
        month.assert_async().await;
        day.assert_async().await;
        unread.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_without_cached_views_skips_refresh() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/api/calendar/items")
            .with_body(ITEM)
            .create_async()
            .await;
        let month = server
            .mock("GET", "/api/calendar/month")
            .expect(0)
            .create_async()
            .await;
        let day = server
            .mock("GET", "/api/calendar/day")
            .expect(0)
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        let request = CalendarItemRequest::new(today(), ItemType::Workout, "Leg day");
        planner.save_item(None, &request).await.unwrap();

        create.assert_async().await;
        month.assert_async().await;
        day.assert_async().await;
    }

    #[tokio::test]
    async fn test_toggle_done_resubmits_item() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/calendar/day")
            .match_query(Matcher::Any)
            .with_body(format!("[{ITEM}]"))
            .create_async()
            .await;
        server
            .mock("GET", "/api/calendar/month")
            .match_query(Matcher::Any)
            .with_body(month_body(5, ""))
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/api/calendar/items/3")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "done": true,
                "title": "Leg day",
                "startTime": "18:00:00"
            })))
            .with_body(ITEM.replace(r#""done":false"#, r#""done":true"#))
            .create_async()
            .await;
        let mut planner = planner_for(&server);
        planner.refresh_day().await.unwrap();

        let updated = planner.toggle_done(ItemId(3)).await.unwrap();
        assert!(updated.done);
        update.assert_async().await;

        let missing = planner.toggle_done(ItemId(99)).await.unwrap_err();
        assert!(matches!(missing, Error::ItemNotLoaded(ItemId(99))));
    }

    #[tokio::test]
    async fn test_rejected_session_clears_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/calendar/month")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;
        let mut planner = planner_for(&server);
        assert!(planner.is_authenticated());

        let err = planner.refresh_month().await.unwrap_err();
        assert!(err.is_session_invalid());
        assert!(!planner.is_authenticated());
    }

    #[tokio::test]
    async fn test_notification_plan_only_touches_notifications() {
        let mut server = mockito::Server::new_async().await;
        let month = server
            .mock("GET", "/api/calendar/month")
            .expect(0)
            .create_async()
            .await;
        let day = server
            .mock("GET", "/api/calendar/day")
            .expect(0)
            .create_async()
            .await;
        let unread = server
            .mock("GET", "/api/notifications/unread")
            .with_body(
                r#"[{"id":7,"type":"ITEM_CREATED","importance":"LOW","message":"New item",
                    "calendarItemId":3,"read":false,"createdAt":"2024-05-01T08:00:00Z"}]"#,
            )
            .expect(2)
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        let fresh = planner.apply_refresh(RefreshPlan::NOTIFICATIONS).await.unwrap();
        assert_eq!(fresh.len(), 1);
        let fresh = planner.apply_refresh(RefreshPlan::NOTIFICATIONS).await.unwrap();
        assert!(fresh.is_empty());
        assert_eq!(planner.inbox().unread_count(), 1);

        month.assert_async().await;
        day.assert_async().await;
        unread.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_failure_is_logged_not_raised() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/calendar/month")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/api/calendar/day")
            .match_query(Matcher::Any)
            .with_body("[]")
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        planner.apply_refresh(RefreshPlan::CALENDAR).await.unwrap();
        assert!(planner.calendar().month().is_none());
        assert!(planner.calendar().day_items().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_week_keeps_working_when_adjacent_month_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/calendar/month")
            .match_query(Matcher::UrlEncoded("month".into(), "4".into()))
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/api/calendar/month")
            .match_query(Matcher::UrlEncoded("month".into(), "5".into()))
            .with_body(month_body(5, ITEM))
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        let week = planner.load_week().await.unwrap();
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 4, 29).unwrap());
        assert!(planner.calendar().week_month(MonthKey::new(2024, 4)).is_none());
        assert!(planner.calendar().week_month(MonthKey::new(2024, 5)).is_some());
        assert_eq!(planner.calendar().week_items_by_date().len(), 1);
    }

    #[tokio::test]
    async fn test_workout_filter_loads_library() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/calendar/month")
            .match_query(Matcher::UrlEncoded("type".into(), "WORKOUT".into()))
            .with_body(month_body(5, ITEM))
            .create_async()
            .await;
        server
            .mock("GET", "/api/calendar/day")
            .match_query(Matcher::UrlEncoded("type".into(), "WORKOUT".into()))
            .with_body(format!("[{ITEM}]"))
            .create_async()
            .await;
        server
            .mock("GET", "/api/workout/exercises")
            .with_body(r#"[{"id":2,"name":"squat"},{"id":1,"name":"Bench"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/workout/templates")
            .with_body("[]")
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        planner.set_filter(Some(ItemType::Workout)).await.unwrap();

        let names: Vec<&str> = planner.exercises().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bench", "squat"]);
        assert!(planner.templates().is_empty());
        assert_eq!(planner.calendar().filter(), Some(ItemType::Workout));
    }

    #[tokio::test]
    async fn test_delete_removes_from_caches() {
        let mut server = mockito::Server::new_async().await;
        let day = server
            .mock("GET", "/api/calendar/day")
            .match_query(Matcher::Any)
            .with_body(format!("[{ITEM}]"))
            .create_async()
            .await;
        server
            .mock("DELETE", "/api/calendar/items/3")
            .with_status(204)
            .create_async()
            .await;
        let mut planner = planner_for(&server);
        planner.refresh_day().await.unwrap();
        assert_eq!(planner.calendar().day_items().unwrap().len(), 1);

        // The follow-up refresh fails; the local removal must still hold.
        day.remove_async().await;
        planner.delete_item(ItemId(3)).await.unwrap();
        assert!(planner.calendar().find(ItemId(3)).is_none());
        assert!(planner.calendar().day_items().unwrap().is_empty());
    }

    const TEMPLATE: &str = r#"[{"id":2,"title":"Push","entries":[
        {"exerciseId":1,"exerciseName":"Bench","sets":3,"reps":8,"weight":60.0},
        {"exerciseId":4,"exerciseName":"Dips","sets":2,"reps":12}],
        "createdAt":"2024-04-01T10:00:00Z","updatedAt":"2024-04-01T10:00:00Z"}]"#;

    #[tokio::test]
    async fn test_apply_template_fills_session() {
        let mut server = mockito::Server::new_async().await;
        let templates = server
            .mock("GET", "/api/workout/templates")
            .with_body(TEMPLATE)
            .expect(1)
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/api/workout/sessions/3")
            .match_body(Matcher::Json(serde_json::json!({
                "entries": [
                    {"exerciseId": 1, "sets": 3, "reps": 8, "weight": 60.0},
                    {"exerciseId": 4, "sets": 2, "reps": 12}
                ]
            })))
            .with_body(
                r#"{"calendarItemId":3,"entries":[
                    {"exerciseId":1,"exerciseName":"Bench","sets":3,"reps":8,"weight":60.0},
                    {"exerciseId":4,"exerciseName":"Dips","sets":2,"reps":12}]}"#,
            )
            .expect(2)
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        let session = planner.apply_template(ItemId(3), TemplateId(2)).await.unwrap();
        assert_eq!(session.entries.len(), 2);
        assert_eq!(session.entries[0].exercise_name, "Bench");

        // Second run uses the cached template.
        planner.apply_template(ItemId(3), TemplateId(2)).await.unwrap();
        templates.assert_async().await;
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_apply_unknown_template() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/workout/templates")
            .with_body(TEMPLATE)
            .create_async()
            .await;
        let put = server
            .mock("PUT", Matcher::Regex("^/api/workout/sessions/".into()))
            .expect(0)
            .create_async()
            .await;
        let mut planner = planner_for(&server);

        let err = planner.apply_template(ItemId(3), TemplateId(9)).await.unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(TemplateId(9))));
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:9", Session::in_memory()).unwrap();
        let mut planner = Planner::new(client, today());

        let err = planner.refresh_month().await.unwrap_err();
        assert!(err.is_transport());
        assert!(!err.is_session_invalid());
    }
}
