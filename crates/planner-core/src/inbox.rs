//! Cached notification lists.

use std::collections::HashSet;

use planner_client::{Notification, NotificationId};

/// Unread notifications, the optional full history and what has been seen.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    unread: Vec<Notification>,
    all: Option<Vec<Notification>>,
    seen: HashSet<NotificationId>,
}

impl Inbox {
    /// Creates an empty inbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Unread notifications, newest first.
    #[must_use]
    pub fn unread(&self) -> &[Notification] {
        &self.unread
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.unread.len()
    }

    /// Full history, if it was loaded.
    #[must_use]
    pub fn all(&self) -> Option<&[Notification]> {
        self.all.as_deref()
    }

    /// Replaces the unread list and returns the notifications not seen
    /// before in this inbox.
    pub fn set_unread(&mut self, mut unread: Vec<Notification>) -> Vec<Notification> {
        sort_newest_first(&mut unread);
        let fresh = unread
            .iter()
            .filter(|n| self.seen.insert(n.id))
            .cloned()
            .collect();
        self.unread = unread;
        fresh
    }

    /// Replaces the full history.
    pub fn set_all(&mut self, mut all: Vec<Notification>) {
        sort_newest_first(&mut all);
        self.seen.extend(all.iter().map(|n| n.id));
        self.all = Some(all);
    }

    /// Applies a notification the server confirmed as read.
    pub fn apply_read(&mut self, notification: &Notification) {
        self.unread.retain(|n| n.id != notification.id);
        if let Some(all) = self.all.as_mut()
            && let Some(slot) = all.iter_mut().find(|n| n.id == notification.id)
        {
            *slot = notification.clone();
        }
    }

    /// Forgets everything, e.g. after logout.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn sort_newest_first(list: &mut [Notification]) {
    list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use planner_client::{Importance, NotificationType};

    fn notification(id: i64, minute: u32, read: bool) -> Notification {
        Notification {
            id: NotificationId(id),
            notification_type: NotificationType::Upcoming,
            importance: Importance::High,
            message: format!("n{id}"),
            calendar_item_id: None,
            read,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_set_unread_reports_fresh_only() {
        let mut inbox = Inbox::new();
        let fresh = inbox.set_unread(vec![notification(1, 0, false), notification(2, 5, false)]);
        assert_eq!(fresh.len(), 2);
        assert_eq!(inbox.unread()[0].id, NotificationId(2));

        let fresh = inbox.set_unread(vec![notification(2, 5, false), notification(3, 9, false)]);
        assert_eq!(fresh.iter().map(|n| n.id.0).collect::<Vec<_>>(), vec![3]);
        assert_eq!(inbox.unread_count(), 2);
    }

    #[test]
    fn test_apply_read_updates_both_lists() {
        let mut inbox = Inbox::new();
        inbox.set_unread(vec![notification(1, 0, false)]);
        inbox.set_all(vec![notification(1, 0, false), notification(0, 0, true)]);

        inbox.apply_read(&notification(1, 0, true));

        assert_eq!(inbox.unread_count(), 0);
        let all = inbox.all().unwrap();
        assert!(all.iter().all(|n| n.read));
    }

    #[test]
    fn test_clear() {
        let mut inbox = Inbox::new();
        inbox.set_unread(vec![notification(1, 0, false)]);
        inbox.clear();
        assert_eq!(inbox.unread_count(), 0);
        assert_eq!(inbox.set_unread(vec![notification(1, 0, false)]).len(), 1);
    }
}
