//! `planner watch`: follow the push channel.
//!
//! Push frames are debounced into refresh plans on a separate task so the
//! select loop below only waits on cancel-safe futures.

use anyhow::{Context, Result};
use chrono::Local;
use planner_client::{ItemType, Notification};
use planner_core::push::{
    COALESCE_WINDOW, Coalescer, PushListener, RECONNECT_DELAY, RefreshPlan, WsConnector,
};
use planner_core::{MonthKey, Planner};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::app::{App, today};
use crate::notify;
use crate::view::agenda::render_day;
use crate::view::inbox::render_notifications;

const FRAME_BUFFER: usize = 64;

pub async fn run(app: &App, filter: Option<ItemType>, desktop: bool) -> Result<()> {
    let push_url = app.settings.push_url().context("No usable push URL")?;
    let mut planner = app.planner(today())?.with_filter(filter);

    planner.apply_refresh(RefreshPlan::FULL).await?;
    print_day(&planner);
    let unread = planner.inbox().unread_count();
    if unread > 0 {
        println!("{unread} unread notification(s)");
    }

    let (frames_tx, frames_rx) = mpsc::channel(FRAME_BUFFER);
    let listener = PushListener::spawn(
        WsConnector::new(push_url.clone()),
        frames_tx,
        RECONNECT_DELAY,
    );
    info!("Watching {push_url}");

    let (plans_tx, mut plans) = mpsc::channel(1);
    let forward = tokio::spawn(async move {
        let mut coalescer = Coalescer::new(frames_rx, COALESCE_WINDOW);
        while let Some(plan) = coalescer.next().await {
            if plans_tx.send(plan).await.is_err() {
                break;
            }
        }
    });

    let mut poll = tokio::time::interval(app.settings.poll_interval());
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    poll.reset();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                if let Err(e) = signal {
                    warn!("Failed to listen for ctrl-c: {e}");
                }
                break Ok(());
            }
            plan = plans.recv() => {
                let Some(plan) = plan else {
                    break Ok(());
                };
                if let Err(e) = on_plan(&mut planner, plan, desktop).await {
                    break Err(e);
                }
            }
            _ = poll.tick() => {
                if let Err(e) = on_poll(&mut planner, desktop).await {
                    break Err(e);
                }
            }
        }
    };

    drop(plans);
    forward.abort();
    if let Err(e) = forward.await
        && !e.is_cancelled()
    {
        warn!("Refresh scheduler failed: {e}");
    }
    listener.shutdown().await;
    info!("Stopped watching");
    result
}

async fn on_plan(planner: &mut Planner, plan: RefreshPlan, desktop: bool) -> Result<()> {
    follow_today(planner).await?;
    let fresh = planner.apply_refresh(plan).await?;
    if plan.touches_calendar() {
        println!("-- updated {}", Local::now().format("%H:%M:%S"));
        print_day(planner);
    }
    announce(&fresh, desktop).await;
    Ok(())
}

async fn on_poll(planner: &mut Planner, desktop: bool) -> Result<()> {
    follow_today(planner).await?;
    match planner.refresh_notifications().await {
        Ok(fresh) => announce(&fresh, desktop).await,
        Err(e) if e.is_session_invalid() => return Err(e.into()),
        Err(e) => warn!("Notification poll failed: {e}"),
    }
    Ok(())
}

/// Moves the selection to the new date after midnight.
async fn follow_today(planner: &mut Planner) -> Result<()> {
    let today = today();
    if planner.calendar().selected_date() == today {
        return Ok(());
    }
    info!("Date changed to {today}");
    planner.show_month(MonthKey::of(today)).await?;
    planner.select_date(today).await?;
    Ok(())
}

fn print_day(planner: &Planner) {
    let date = planner.calendar().selected_date();
    let items = planner.calendar().day_items().unwrap_or_default();
    println!("{}", render_day(date, items));
}

async fn announce(fresh: &[Notification], desktop: bool) {
    if fresh.is_empty() {
        return;
    }
    println!("{}", render_notifications(fresh));
    if desktop {
        for notification in fresh {
            notify::show(notification).await;
        }
    }
}
