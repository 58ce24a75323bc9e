//! Notification endpoints.

use reqwest::Method;

use crate::client::{ApiClient, Auth};
use crate::error::Result;
use crate::model::{Notification, NotificationId};

impl ApiClient {
    /// Every notification of the user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        self.fetch::<_, ()>(Method::GET, "/api/notifications", &[], None, Auth::Bearer)
            .await
    }

    /// Unread notifications only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unread_notifications(&self) -> Result<Vec<Notification>> {
        self.fetch::<_, ()>(
            Method::GET,
            "/api/notifications/unread",
            &[],
            None,
            Auth::Bearer,
        )
        .await
    }

    /// Marks one notification as read and returns its new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_notification_read(&self, id: NotificationId) -> Result<Notification> {
        let path = format!("/api/notifications/{id}/read");
        self.fetch::<_, ()>(Method::POST, &path, &[], None, Auth::Bearer)
            .await
    }
}
