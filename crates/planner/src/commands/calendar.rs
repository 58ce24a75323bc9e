//! Month, week and day views and item mutations.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use planner_client::{ItemId, ItemType};
use planner_core::calendar::{MonthKey, ViewDensity, month_view};

use crate::app::{App, today};
use crate::cli::ItemArgs;
use crate::view::{agenda, item_line, month::render_month};

pub async fn month(
    app: &App,
    month: Option<MonthKey>,
    filter: Option<ItemType>,
    density: Option<ViewDensity>,
) -> Result<()> {
    let key = month.unwrap_or_else(|| MonthKey::of(today()));
    let density = density.unwrap_or(app.settings.density);
    let mut planner = app.planner(today())?.with_filter(filter);
    planner.show_month(key).await?;

    let by_date = planner.calendar().month_items_by_date();
    let cells = month_view(key, &by_date, density);
    println!("{}", render_month(key, &cells, density));
    Ok(())
}

pub async fn week(app: &App, date: Option<NaiveDate>, filter: Option<ItemType>) -> Result<()> {
    let mut planner = app.planner(date.unwrap_or_else(today))?.with_filter(filter);
    let week = planner.load_week().await?;
    let by_date = planner.calendar().week_items_by_date();
    println!("{}", agenda::render_week(&week, &by_date, today()));
    Ok(())
}

pub async fn day(app: &App, date: Option<NaiveDate>, filter: Option<ItemType>) -> Result<()> {
    let date = date.unwrap_or_else(today);
    let mut planner = app.planner(date)?.with_filter(filter);
    planner.refresh_day().await?;
    let items = planner.calendar().day_items().unwrap_or_default();
    println!("{}", agenda::render_day(date, items));
    Ok(())
}

pub async fn save(app: &App, id: Option<i64>, args: &ItemArgs) -> Result<()> {
    let request = args.to_request();
    let mut planner = app.planner(request.date)?;
    let saved = planner.save_item(id.map(ItemId), &request).await?;
    let verb = if id.is_some() { "Updated" } else { "Created" };
    println!("{verb} {}", item_line(&saved));
    Ok(())
}

pub async fn delete(app: &App, id: i64) -> Result<()> {
    app.planner(today())?.delete_item(ItemId(id)).await?;
    println!("Deleted #{id}");
    Ok(())
}

pub async fn done(app: &App, id: i64, date: Option<NaiveDate>, done: bool) -> Result<()> {
    let date = date.unwrap_or_else(today);
    let mut planner = app.planner(date)?;
    planner.refresh_day().await?;
    let saved = match planner.set_done(ItemId(id), done).await {
        Err(planner_core::Error::ItemNotLoaded(_)) => {
            bail!("Item #{id} is not on {date}; pass its date with --date")
        }
        other => other?,
    };
    println!("{}", item_line(&saved));
    Ok(())
}
