//! Plain-text rendering of planner state.
//!
//! Every function returns the finished text so the commands only print.

pub mod agenda;
pub mod inbox;
pub mod month;
pub mod workout;

use planner_client::{CalendarItem, ItemType};
use planner_core::calendar::format_time_range;

/// One-character marker used for an item in grid cells.
pub const fn type_glyph(item_type: ItemType) -> char {
    match item_type {
        ItemType::School => 'S',
        ItemType::Workout => 'W',
        ItemType::MainMeal => 'M',
        ItemType::Job => 'J',
        ItemType::FixedCost => '$',
        ItemType::Birthday => 'B',
        ItemType::Other => 'o',
    }
}

/// Single-line summary of an item.
pub fn item_line(item: &CalendarItem) -> String {
    let mut line = format!(
        "[{}] #{:<4} {:<11} {:<10} {:<8} {}",
        if item.done { 'x' } else { ' ' },
        item.id.0,
        format_time_range(item),
        item.item_type.as_str(),
        item.importance.as_str(),
        item.title,
    );
    if let Some(amount) = item.amount {
        line.push_str(&format!("  ({amount:.2}"));
        if let Some(frequency) = item.fixed_cost_frequency {
            line.push_str(&format!(" {}", frequency.as_str().to_lowercase()));
        }
        line.push(')');
    }
    if let Some(kind) = item.school_kind {
        line.push_str(&format!("  [{}]", kind.as_str().to_lowercase()));
    }
    line
}

/// Truncates `text` to `max` characters, marking the cut with `~`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
