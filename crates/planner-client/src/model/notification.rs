//! Notification wire types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::{Importance, ItemId};

/// Server-assigned identifier of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub i64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// An item was created.
    ItemCreated,
    /// An item was updated.
    ItemUpdated,
    /// An item was deleted.
    ItemDeleted,
    /// An item is coming up soon.
    Upcoming,
}

impl NotificationType {
    /// Short label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ItemCreated => "created",
            Self::ItemUpdated => "updated",
            Self::ItemDeleted => "deleted",
            Self::Upcoming => "upcoming",
        }
    }
}

/// A notification addressed to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier.
    pub id: NotificationId,
    /// Trigger.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// Importance level.
    pub importance: Importance,
    /// Human readable text.
    pub message: String,
    /// Related calendar item, if any.
    #[serde(default)]
    pub calendar_item_id: Option<ItemId>,
    /// Whether the user has read it.
    #[serde(default)]
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_deserialization() {
        let json = r#"{
            "id": 7,
            "type": "ITEM_UPDATED",
            "importance": "LOW",
            "message": "Lunch moved",
            "calendarItemId": 3,
            "read": false,
            "createdAt": "2024-05-01T08:00:00Z"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.id, NotificationId(7));
        assert_eq!(n.notification_type, NotificationType::ItemUpdated);
        assert_eq!(n.calendar_item_id, Some(ItemId(3)));
        assert!(!n.read);
    }

    #[test]
    fn test_notification_without_item() {
        let json = r#"{
            "id": 8,
            "type": "UPCOMING",
            "importance": "CRITICAL",
            "message": "Rent due",
            "calendarItemId": null,
            "read": true,
            "createdAt": "2024-05-01T08:00:00Z"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert!(n.calendar_item_id.is_none());
        assert_eq!(n.notification_type.label(), "upcoming");
    }
}
