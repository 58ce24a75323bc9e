//! Push frame classification.
//!
//! The server broadcasts two JSON shapes on the push channel:
//!
//! - calendar item events: `{ eventId, type, userId, itemId, date, occurredAt }`
//! - notification events: `{ eventId, type, userId, notificationId, ... }`
//!
//! Only key presence matters. Anything else, including frames that are not
//! JSON objects, refreshes every view.

use serde_json::Value;

/// Which views a push frame asks to re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RefreshPlan {
    /// Re-fetch the month shown in the grid (and its week buckets).
    pub month: bool,
    /// Re-fetch the selected day.
    pub day: bool,
    /// Re-fetch unread notifications.
    pub notifications: bool,
}

impl RefreshPlan {
    /// Month and selected day.
    pub const CALENDAR: Self = Self {
        month: true,
        day: true,
        notifications: false,
    };

    /// Unread notifications only.
    pub const NOTIFICATIONS: Self = Self {
        month: false,
        day: false,
        notifications: true,
    };

    /// Every view.
    pub const FULL: Self = Self {
        month: true,
        day: true,
        notifications: true,
    };

    /// Whether anything needs fetching.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.month || self.day || self.notifications)
    }

    /// Whether the calendar views need fetching.
    #[must_use]
    pub const fn touches_calendar(&self) -> bool {
        self.month || self.day
    }
}

/// Classifies a text frame from the push channel.
#[must_use]
pub fn classify(frame: &str) -> RefreshPlan {
    match serde_json::from_str::<Value>(frame) {
        Ok(value) => classify_value(&value),
        Err(_) => RefreshPlan::FULL,
    }
}

/// Classifies an already decoded frame.
#[must_use]
pub fn classify_value(value: &Value) -> RefreshPlan {
    let Value::Object(map) = value else {
        return RefreshPlan::FULL;
    };

    if map.contains_key("notificationId") {
        RefreshPlan::NOTIFICATIONS
    } else if map.contains_key("itemId") && map.contains_key("date") {
        RefreshPlan::CALENDAR
    } else {
        RefreshPlan::FULL
    }
}
