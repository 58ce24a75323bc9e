//! Month grid.

use chrono::{Datelike, NaiveDate};
use planner_core::calendar::{CellView, MonthKey, ViewDensity, format_time};

use super::{agenda, truncate, type_glyph};

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const CELL_WIDTH: usize = 8;
const PREVIEW_WIDTH: usize = 48;

/// Renders a month laid out by [`planner_core::calendar::month_view`].
///
/// Grid densities draw one glyph per item type with a `+` when items are
/// hidden, followed by the preview lines. List and week densities print every
/// item by date instead.
pub fn render_month(key: MonthKey, cells: &[CellView<'_>], density: ViewDensity) -> String {
    let title = key
        .first_day()
        .map_or_else(|| key.to_string(), |d| d.format("%B %Y").to_string());

    if density.max_lines().is_none() {
        let days: Vec<(NaiveDate, Vec<_>)> = cells
            .iter()
            .filter_map(|c| c.date.map(|d| (d, c.lines.clone())))
            .filter(|(_, items)| !items.is_empty())
            .collect();
        let mut lines = vec![title];
        if days.is_empty() {
            lines.push("  nothing planned".to_string());
        }
        for (date, items) in days {
            lines.push(agenda::render_date(date, &items, false));
        }
        return lines.join("\n");
    }

    let mut lines = vec![
        format!("{title:^width$}", width = CELL_WIDTH * 7)
            .trim_end()
            .to_string(),
        WEEKDAYS
            .iter()
            .map(|d| format!("{d:>2}{:width$}", "", width = CELL_WIDTH - 2))
            .collect::<String>()
            .trim_end()
            .to_string(),
    ];
    for week in cells.chunks(7) {
        if week.iter().all(|c| c.date.is_none()) {
            continue;
        }
        let row: String = week.iter().map(grid_cell).collect();
        lines.push(row.trim_end().to_string());
    }

    let previews: Vec<String> = cells.iter().flat_map(preview_lines).collect();
    if !previews.is_empty() {
        lines.push(String::new());
        lines.extend(previews);
    }
    lines.join("\n")
}

fn grid_cell(cell: &CellView<'_>) -> String {
    let Some(date) = cell.date else {
        return " ".repeat(CELL_WIDTH);
    };
    let mut marker: String = cell.dots.iter().map(|i| type_glyph(i.item_type)).collect();
    if cell.total > cell.dots.len() {
        marker.push('+');
    }
    format!("{:>2} {marker:<width$}", date.day(), width = CELL_WIDTH - 3)
}

fn preview_lines(cell: &CellView<'_>) -> Vec<String> {
    let Some(date) = cell.date else {
        return Vec::new();
    };
    let mut lines: Vec<String> = cell
        .lines
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let day = if i == 0 { format!("{:>2}", date.day()) } else { "  ".to_string() };
            format!(
                "{day}  {} {}",
                format_time(item.start_time),
                truncate(&item.title, PREVIEW_WIDTH)
            )
        })
        .collect();
    if !lines.is_empty() && cell.hidden() > 0 {
        lines.push(format!("        +{} more", cell.hidden()));
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::view::tests::item;
    use planner_client::ItemType;
    use planner_core::calendar::{group_by_date, month_view};

    #[test]
    fn test_february_2024_grid() {
        let items = vec![item(1, "2024-02-29", Some("09:00"), "Leap")];
        let by_date = group_by_date(items.iter());
        let key = MonthKey::new(2024, 2);
        let cells = month_view(key, &by_date, ViewDensity::Compact);
        let text = render_month(key, &cells, ViewDensity::Compact);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "February 2024");
        assert!(lines[1].starts_with("Mo      Tu"));
        // Thursday first, padding-only sixth row skipped.
        assert!(lines[2].starts_with(&" ".repeat(CELL_WIDTH * 3)));
        assert!(lines[2].contains(" 1"));
        assert_eq!(lines.len(), 7);
        assert!(lines[6].contains("29 o"));
        assert!(!text.contains("Leap"));
    }

    #[test]
    fn test_tablet_marks_hidden_items() {
        let mut items: Vec<_> = (1..=5)
            .map(|i| item(i, "2024-05-01", Some("08:00"), &format!("Task {i}")))
            .collect();
        items[0].item_type = ItemType::Workout;
        let by_date = group_by_date(items.iter());
        let key = MonthKey::new(2024, 5);
        let cells = month_view(key, &by_date, ViewDensity::Tablet);
        let text = render_month(key, &cells, ViewDensity::Tablet);

        assert!(text.contains(" 1 Woo+"));
        assert!(text.contains(" 1  08:00 Task 1"));
        assert!(!text.contains("Task 2"));
        assert!(text.contains("+4 more"));
    }

    #[test]
    fn test_list_density_prints_everything() {
        let items: Vec<_> = (1..=5)
            .map(|i| item(i, "2024-05-03", None, &format!("Task {i}")))
            .collect();
        let by_date = group_by_date(items.iter());
        let key = MonthKey::new(2024, 5);
        let cells = month_view(key, &by_date, ViewDensity::List);
        let text = render_month(key, &cells, ViewDensity::List);

        assert!(text.starts_with("May 2024\nFri 2024-05-03"));
        assert_eq!(text.matches("Task").count(), 5);

        let cells = month_view(key, &Default::default(), ViewDensity::List);
        let empty = render_month(key, &cells, ViewDensity::List);
        assert!(empty.contains("nothing planned"));
    }
}
