//! Month grid and week strip construction.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use planner_client::CalendarItem;
use serde::{Deserialize, Serialize};

use super::cache::MonthKey;

/// Number of cells in a month grid (six Monday-first weeks).
pub const GRID_CELLS: usize = 42;

/// Placeholder shown for a missing time of day.
pub const NO_TIME: &str = "--:--";

/// How much of each day the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewDensity {
    /// Phone-sized cells, dots only.
    Compact,
    /// Medium cells.
    Tablet,
    /// Large cells with two preview lines.
    #[default]
    Detailed,
    /// Every item as a line.
    List,
    /// Seven-day strip with every item.
    Week,
}

impl ViewDensity {
    /// Every density, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Compact,
        Self::Tablet,
        Self::Detailed,
        Self::List,
        Self::Week,
    ];

    /// Maximum indicator dots per cell, `None` meaning unlimited.
    #[must_use]
    pub const fn max_dots(self) -> Option<usize> {
        match self {
            Self::Compact | Self::Detailed => Some(4),
            Self::Tablet => Some(3),
            Self::List | Self::Week => None,
        }
    }

    /// Maximum preview lines per cell, `None` meaning unlimited.
    #[must_use]
    pub const fn max_lines(self) -> Option<usize> {
        match self {
            Self::Compact => Some(0),
            Self::Tablet => Some(1),
            Self::Detailed => Some(2),
            Self::List | Self::Week => None,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Tablet => "tablet",
            Self::Detailed => "detailed",
            Self::List => "list",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for ViewDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewDensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown density: {s}"))
    }
}

/// Monday-first weekday index, 0 for Monday through 6 for Sunday.
#[must_use]
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Builds the 42 cells of a month, `None` for leading and trailing padding.
///
/// Returns all-empty cells for an invalid month key.
#[must_use]
pub fn month_grid(key: MonthKey) -> Vec<Option<NaiveDate>> {
    let mut cells = Vec::with_capacity(GRID_CELLS);
    let Some(first) = key.first_day() else {
        cells.resize(GRID_CELLS, None);
        return cells;
    };

    cells.resize(weekday_index(first), None);
    cells.extend(first.iter_days().take_while(|d| d.month() == first.month()).map(Some));
    cells.resize(GRID_CELLS, None);
    cells
}

/// The Monday..Sunday week containing `date`.
#[must_use]
pub fn week_strip(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
    let mut days = [monday; 7];
    for (offset, day) in (0u64..).zip(days.iter_mut()) {
        *day = monday + Days::new(offset);
    }
    days
}

/// What a single grid cell shows.
#[derive(Debug, Clone, PartialEq)]
pub struct CellView<'a> {
    /// Date of the cell, `None` for padding.
    pub date: Option<NaiveDate>,
    /// Items drawn as indicator dots.
    pub dots: Vec<&'a CalendarItem>,
    /// Items drawn as preview lines.
    pub lines: Vec<&'a CalendarItem>,
    /// Total items on the date.
    pub total: usize,
}

impl CellView<'_> {
    /// Items on the date that no preview line shows.
    #[must_use]
    pub const fn hidden(&self) -> usize {
        self.total.saturating_sub(self.lines.len())
    }
}

/// Lays out one cell from items grouped by date.
#[must_use]
pub fn cell_view<'a>(
    date: Option<NaiveDate>,
    by_date: &BTreeMap<NaiveDate, Vec<&'a CalendarItem>>,
    density: ViewDensity,
) -> CellView<'a> {
    let items: &[&CalendarItem] = date
        .and_then(|d| by_date.get(&d))
        .map_or(&[][..], Vec::as_slice);
    let take = |limit: Option<usize>| {
        items
            .iter()
            .copied()
            .take(limit.unwrap_or(usize::MAX))
            .collect::<Vec<_>>()
    };

    CellView {
        date,
        dots: take(density.max_dots()),
        lines: take(density.max_lines()),
        total: items.len(),
    }
}

/// Lays out a whole month grid.
#[must_use]
pub fn month_view<'a>(
    key: MonthKey,
    by_date: &BTreeMap<NaiveDate, Vec<&'a CalendarItem>>,
    density: ViewDensity,
) -> Vec<CellView<'a>> {
    month_grid(key)
        .into_iter()
        .map(|date| cell_view(date, by_date, density))
        .collect()
}

/// Formats a time of day as `HH:MM`, or `--:--` when absent.
#[must_use]
pub fn format_time(time: Option<NaiveTime>) -> String {
    time.map_or_else(|| NO_TIME.to_string(), |t| t.format("%H:%M").to_string())
}

/// Formats an item's time span, e.g. `09:00-10:30`, `09:00` or `--:--`.
#[must_use]
pub fn format_time_range(item: &CalendarItem) -> String {
    match (item.start_time, item.end_time) {
        (Some(start), Some(end)) => {
            format!("{}-{}", format_time(Some(start)), format_time(Some(end)))
        }
        (start, _) => format_time(start),
    }
}
