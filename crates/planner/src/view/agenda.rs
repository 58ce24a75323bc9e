//! Day and week listings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use planner_client::CalendarItem;

use super::{item_line, truncate};

const LOG_WIDTH: usize = 72;

/// Renders one date with its items; `highlight` marks the date with `*`.
pub fn render_date(date: NaiveDate, items: &[&CalendarItem], highlight: bool) -> String {
    let mut lines = vec![format!(
        "{}{}",
        date.format("%a %Y-%m-%d"),
        if highlight { " *" } else { "" }
    )];
    if items.is_empty() {
        lines.push("  -".to_string());
    }
    for item in items {
        lines.push(format!("  {}", item_line(item)));
        if let Some(log) = item.log.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            let first = log.lines().next().unwrap_or_default();
            lines.push(format!("        {}", truncate(first, LOG_WIDTH)));
        }
    }
    lines.join("\n")
}

/// Renders the selected day.
pub fn render_day(date: NaiveDate, items: &[CalendarItem]) -> String {
    let refs: Vec<&CalendarItem> = items.iter().collect();
    render_date(date, &refs, false)
}

/// Renders a week strip, marking `today`.
pub fn render_week(
    week: &[NaiveDate],
    by_date: &BTreeMap<NaiveDate, Vec<&CalendarItem>>,
    today: NaiveDate,
) -> String {
    week.iter()
        .map(|date| {
            let items = by_date.get(date).map_or(&[][..], Vec::as_slice);
            render_date(*date, items, *date == today)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::view::tests::item;
    use planner_core::calendar::{group_by_date, week_strip};

    #[test]
    fn test_day_with_log() {
        let mut lunch = item(4, "2024-05-01", Some("12:30"), "Lunch");
        lunch.log = Some("pasta\nsecond line".into());
        let text = render_day(lunch.date, &[lunch]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Wed 2024-05-01");
        assert!(lines[1].contains("12:30"));
        assert!(lines[1].ends_with("Lunch"));
        assert_eq!(lines[2].trim(), "pasta");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(render_day(date, &[]), "Wed 2024-05-01\n  -");
    }

    #[test]
    fn test_week_spans_months() {
        let items = vec![
            item(1, "2024-04-30", None, "April"),
            item(2, "2024-05-02", None, "May"),
        ];
        let by_date = group_by_date(items.iter());
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let text = render_week(&week_strip(today), &by_date, today);

        assert!(text.starts_with("Mon 2024-04-29\n  -\nTue 2024-04-30\n"));
        assert!(text.contains("Thu 2024-05-02 *"));
        assert!(text.ends_with("Sun 2024-05-05\n  -"));
        assert_eq!(text.matches("[ ]").count(), 2);
    }
}
