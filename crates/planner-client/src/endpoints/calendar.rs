//! Calendar endpoints.

use chrono::NaiveDate;
use reqwest::Method;

use crate::client::{ApiClient, Auth};
use crate::error::Result;
use crate::model::{CalendarItem, CalendarItemRequest, CalendarMonth, ItemId, ItemType};

impl ApiClient {
    /// Items of one month, optionally restricted to one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn month(
        &self,
        year: i32,
        month: u32,
        filter: Option<ItemType>,
    ) -> Result<CalendarMonth> {
        let mut query = vec![("year", year.to_string()), ("month", month.to_string())];
        if let Some(item_type) = filter {
            query.push(("type", item_type.as_str().to_string()));
        }
        self.fetch::<_, ()>(Method::GET, "/api/calendar/month", &query, None, Auth::Bearer)
            .await
    }

    /// Items of one day, optionally restricted to one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn day(&self, date: NaiveDate, filter: Option<ItemType>) -> Result<Vec<CalendarItem>> {
        let mut query = vec![("date", date.format("%Y-%m-%d").to_string())];
        if let Some(item_type) = filter {
            query.push(("type", item_type.as_str().to_string()));
        }
        self.fetch::<_, ()>(Method::GET, "/api/calendar/day", &query, None, Auth::Bearer)
            .await
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_item(&self, request: &CalendarItemRequest) -> Result<CalendarItem> {
        self.fetch(
            Method::POST,
            "/api/calendar/items",
            &[],
            Some(request),
            Auth::Bearer,
        )
        .await
    }

    /// Replaces an item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_item(&self, id: ItemId, request: &CalendarItemRequest) -> Result<CalendarItem> {
        let path = format!("/api/calendar/items/{id}");
        self.fetch(Method::PUT, &path, &[], Some(request), Auth::Bearer)
            .await
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_item(&self, id: ItemId) -> Result<()> {
        self.execute(Method::DELETE, &format!("/api/calendar/items/{id}"))
            .await
    }
}
