//! Calendar view state: ordered lists, the reconciliation cache and grids.

mod cache;
mod grid;
mod list;

pub use cache::{CalendarCache, MonthKey, group_by_date};
pub use grid::{
    CellView, GRID_CELLS, NO_TIME, ViewDensity, cell_view, format_time, format_time_range,
    month_grid, month_view, week_strip, weekday_index,
};
pub use list::{compare_items, remove, sort_items, upsert};
