//! Local reconciliation cache.
//!
//! Mirrors the month, selected day and week buckets the user is looking at.
//! Server responses replace cached state wholesale; confirmed mutations are
//! merged in place so the view updates before the next authoritative fetch.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use planner_client::{CalendarItem, CalendarMonth, ItemId, ItemType};
use tracing::debug;

use super::list::{remove, sort_items, upsert};

/// Year and month (1-12) of a month bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
}

impl MonthKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Month offset by `delta` months.
    #[must_use]
    pub fn shift(self, delta: i32) -> Self {
        let index = self.year * 12 + i32::try_from(self.month).unwrap_or(1) - 1 + delta;
        Self::new(index.div_euclid(12), index.rem_euclid(12).unsigned_abs() + 1)
    }

    /// First day of the month, if the key is a valid month.
    #[must_use]
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<&CalendarMonth> for MonthKey {
    fn from(month: &CalendarMonth) -> Self {
        Self::new(month.year, month.month)
    }
}

/// Cached calendar state for one signed-in user.
#[derive(Debug, Clone)]
pub struct CalendarCache {
    filter: Option<ItemType>,
    cursor: MonthKey,
    selected: NaiveDate,
    month: Option<CalendarMonth>,
    day: Option<Vec<CalendarItem>>,
    week_months: BTreeMap<MonthKey, CalendarMonth>,
}

impl CalendarCache {
    /// Creates an empty cache looking at the month of `selected`.
    #[must_use]
    pub fn new(selected: NaiveDate) -> Self {
        Self {
            filter: None,
            cursor: MonthKey::of(selected),
            selected,
            month: None,
            day: None,
            week_months: BTreeMap::new(),
        }
    }

    /// Active type filter.
    #[must_use]
    pub const fn filter(&self) -> Option<ItemType> {
        self.filter
    }

    /// Month currently shown in the grid.
    #[must_use]
    pub const fn cursor(&self) -> MonthKey {
        self.cursor
    }

    /// Currently selected date.
    #[must_use]
    pub const fn selected_date(&self) -> NaiveDate {
        self.selected
    }

    /// Whether `item` is visible under the active filter.
    #[must_use]
    pub fn matches_filter(&self, item: &CalendarItem) -> bool {
        self.filter.is_none_or(|t| item.item_type == t)
    }

    /// Changes the type filter. Every cached view is dropped when it changes.
    ///
    /// Returns whether the filter changed.
    pub fn set_filter(&mut self, filter: Option<ItemType>) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.month = None;
        self.day = None;
        self.week_months.clear();
        true
    }

    /// Moves the grid to another month. Returns whether it changed.
    pub fn set_cursor(&mut self, cursor: MonthKey) -> bool {
        if self.cursor == cursor {
            return false;
        }
        self.cursor = cursor;
        self.month = None;
        true
    }

    /// Selects another date. Returns whether it changed.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if self.selected == date {
            return false;
        }
        self.selected = date;
        self.day = None;
        true
    }

    /// Drops every cached view, keeping cursor, date and filter.
    pub fn clear(&mut self) {
        self.month = None;
        self.day = None;
        self.week_months.clear();
    }

    /// Cached month response for the cursor, if loaded.
    #[must_use]
    pub const fn month(&self) -> Option<&CalendarMonth> {
        self.month.as_ref()
    }

    /// Cached items of the selected date, if loaded.
    #[must_use]
    pub fn day_items(&self) -> Option<&[CalendarItem]> {
        self.day.as_deref()
    }

    /// Cached week bucket for `key`.
    #[must_use]
    pub fn week_month(&self, key: MonthKey) -> Option<&CalendarMonth> {
        self.week_months.get(&key)
    }

    /// Stores a month response. Responses for another month than the cursor
    /// are stale and ignored.
    ///
    /// Returns whether the response was stored.
    pub fn set_month(&mut self, mut month: CalendarMonth) -> bool {
        if MonthKey::from(&month) != self.cursor {
            debug!("Ignoring stale month {}", month.key());
            return false;
        }
        sort_items(&mut month.items);
        self.month = Some(month);
        true
    }

    /// Stores a day response. Responses for another date than the selected
    /// one are stale and ignored.
    ///
    /// Returns whether the response was stored.
    pub fn set_day(&mut self, date: NaiveDate, mut items: Vec<CalendarItem>) -> bool {
        if date != self.selected {
            debug!("Ignoring stale day {date}");
            return false;
        }
        sort_items(&mut items);
        self.day = Some(items);
        true
    }

    /// Keys of the cached week buckets.
    #[must_use]
    pub fn week_keys(&self) -> Vec<MonthKey> {
        self.week_months.keys().copied().collect()
    }

    /// Stores a week bucket.
    pub fn insert_week_month(&mut self, mut month: CalendarMonth) {
        sort_items(&mut month.items);
        self.week_months.insert(MonthKey::from(&month), month);
    }

    /// Month buckets spanned by `dates` that are not cached yet.
    #[must_use]
    pub fn missing_week_months(&self, dates: &[NaiveDate]) -> Vec<MonthKey> {
        let mut keys: Vec<MonthKey> = dates.iter().copied().map(MonthKey::of).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.retain(|k| !self.week_months.contains_key(k));
        keys
    }

    /// Merges a server-confirmed create or update into every cached view.
    ///
    /// Views the item no longer belongs to (other date, other month, filtered
    /// out) drop it instead.
    pub fn apply_saved(&mut self, item: &CalendarItem) {
        let visible = self.matches_filter(item);

        if let Some(day) = self.day.as_mut() {
            if visible && item.date == self.selected {
                upsert(day, item.clone());
            } else {
                remove(day, item.id);
            }
        }

        if let Some(month) = self.month.as_mut() {
            if visible && MonthKey::from(&*month).contains(item.date) {
                upsert(&mut month.items, item.clone());
            } else {
                remove(&mut month.items, item.id);
            }
        }

        for (key, month) in &mut self.week_months {
            if visible && key.contains(item.date) {
                upsert(&mut month.items, item.clone());
            } else {
                remove(&mut month.items, item.id);
            }
        }

        debug!("Applied saved item {} on {}", item.id, item.date);
    }

    /// Removes a deleted item from every cached view.
    pub fn apply_deleted(&mut self, id: ItemId) {
        if let Some(day) = self.day.as_mut() {
            remove(day, id);
        }
        if let Some(month) = self.month.as_mut() {
            remove(&mut month.items, id);
        }
        for month in self.week_months.values_mut() {
            remove(&mut month.items, id);
        }
        debug!("Applied deleted item {id}");
    }

    /// Finds a cached item by id, looking at the day, month and week views.
    #[must_use]
    pub fn find(&self, id: ItemId) -> Option<&CalendarItem> {
        self.day
            .iter()
            .flatten()
            .chain(self.month.iter().flat_map(|m| m.items.iter()))
            .chain(self.week_months.values().flat_map(|m| m.items.iter()))
            .find(|x| x.id == id)
    }

    /// Items of the loaded month grouped by date.
    #[must_use]
    pub fn month_items_by_date(&self) -> BTreeMap<NaiveDate, Vec<&CalendarItem>> {
        group_by_date(self.month.iter().flat_map(|m| m.items.iter()))
    }

    /// Items of every week bucket grouped by date.
    #[must_use]
    pub fn week_items_by_date(&self) -> BTreeMap<NaiveDate, Vec<&CalendarItem>> {
        group_by_date(self.week_months.values().flat_map(|m| m.items.iter()))
    }
}

/// Groups items by date, each group sorted by start time.
pub fn group_by_date<'a>(
    items: impl IntoIterator<Item = &'a CalendarItem>,
) -> BTreeMap<NaiveDate, Vec<&'a CalendarItem>> {
    let mut map: BTreeMap<NaiveDate, Vec<&CalendarItem>> = BTreeMap::new();
    for item in items {
        map.entry(item.date).or_default().push(item);
    }
    for group in map.values_mut() {
        group.sort_by_key(|x| x.start_time);
    }
    map
}
