//! Notification listing and read receipts.

use anyhow::Result;
use planner_client::NotificationId;

use crate::app::{App, today};
use crate::view::inbox::render_notifications;

pub async fn list(app: &App, all: bool) -> Result<()> {
    let mut planner = app.planner(today())?;
    if all {
        planner.load_all_notifications().await?;
        println!("{}", render_notifications(planner.inbox().all().unwrap_or_default()));
    } else {
        planner.refresh_notifications().await?;
        println!("{}", render_notifications(planner.inbox().unread()));
    }
    Ok(())
}

pub async fn read(app: &App, id: i64) -> Result<()> {
    let notification = app
        .planner(today())?
        .mark_read(NotificationId(id))
        .await?;
    println!("Marked #{} read", notification.id);
    Ok(())
}
