//! Desktop notifications.

use planner_client::Notification;
use tracing::{debug, warn};

use crate::view::inbox::desktop_text;

/// Shows `notification` through the desktop notification service.
///
/// Runs on the blocking pool; failures are logged and otherwise ignored.
pub async fn show(notification: &Notification) {
    let (summary, body) = desktop_text(notification);
    let id = notification.id;
    let result = tokio::task::spawn_blocking(move || {
        notify_rust::Notification::new()
            .appname("planner")
            .summary(&summary)
            .body(&body)
            .show()
            .map(|_| ())
    })
    .await;

    match result {
        Ok(Ok(())) => debug!("Desktop notification shown for {id}"),
        Ok(Err(e)) => warn!("Failed to show desktop notification: {e}"),
        Err(e) => warn!("Desktop notification task failed: {e}"),
    }
}
