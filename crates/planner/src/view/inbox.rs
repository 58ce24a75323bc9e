//! Notification listing.

use chrono::Local;
use planner_client::Notification;

/// Renders notifications; unread ones are marked with `*`.
pub fn render_notifications(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "No notifications".to_string();
    }
    notifications
        .iter()
        .map(notification_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn notification_line(n: &Notification) -> String {
    let mut line = format!(
        "{} #{:<4} {}  {:<8} {:<8} {}",
        if n.read { ' ' } else { '*' },
        n.id.0,
        n.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        n.importance.as_str(),
        n.notification_type.label(),
        n.message,
    );
    if let Some(item) = n.calendar_item_id {
        line.push_str(&format!("  (item #{item})"));
    }
    line
}

/// Summary and body for a desktop notification.
pub fn desktop_text(n: &Notification) -> (String, String) {
    (
        format!("Planner: {}", n.notification_type.label()),
        n.message.clone(),
    )
}
