//! Ordered item lists.
//!
//! Every cached list keeps items sorted by `(date, start time, id)`, with
//! items lacking a start time placed first within their day.

use std::cmp::Ordering;

use planner_client::{CalendarItem, ItemId};

/// Display ordering of calendar items.
#[must_use]
pub fn compare_items(a: &CalendarItem, b: &CalendarItem) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.start_time.cmp(&b.start_time))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts a list into display order.
pub fn sort_items(items: &mut [CalendarItem]) {
    items.sort_by(compare_items);
}

/// Replaces the item with the same id, or appends it, then re-sorts.
///
/// Applying the same item twice leaves the list as after the first call.
pub fn upsert(items: &mut Vec<CalendarItem>, item: CalendarItem) {
    if let Some(existing) = items.iter_mut().find(|x| x.id == item.id) {
        *existing = item;
    } else {
        items.push(item);
    }
    sort_items(items);
}

/// Removes the item with `id`. Returns whether anything was removed.
pub fn remove(items: &mut Vec<CalendarItem>, id: ItemId) -> bool {
    let before = items.len();
    items.retain(|x| x.id != id);
    items.len() != before
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use planner_client::{Importance, ItemType};
    use proptest::prelude::*;

    pub(crate) fn item(id: i64, date: &str, start: Option<&str>) -> CalendarItem {
        let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        CalendarItem {
            id: ItemId(id),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: start.map(|s| NaiveTime::parse_from_str(s, "%H:%M").unwrap()),
            end_time: None,
            item_type: ItemType::Other,
            importance: Importance::Medium,
            title: format!("item {id}"),
            log: None,
            done: false,
            amount: None,
            school_kind: None,
            fixed_cost_frequency: None,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn ids(items: &[CalendarItem]) -> Vec<i64> {
        items.iter().map(|x| x.id.0).collect()
    }

    #[test]
    fn test_untimed_items_come_first() {
        let mut list = vec![];
        upsert(&mut list, item(1, "2024-05-01", Some("09:00")));
        upsert(&mut list, item(2, "2024-05-01", None));
        upsert(&mut list, item(3, "2024-04-30", Some("23:00")));
        assert_eq!(ids(&list), vec![3, 2, 1]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let mut list = vec![];
        upsert(&mut list, item(9, "2024-05-01", Some("09:00")));
        upsert(&mut list, item(4, "2024-05-01", Some("09:00")));
        assert_eq!(ids(&list), vec![4, 9]);
    }

    #[test]
    fn test_upsert_replaces_and_resorts() {
        let mut list = vec![
            item(1, "2024-05-01", Some("08:00")),
            item(2, "2024-05-01", Some("10:00")),
        ];
        let mut moved = item(1, "2024-05-01", Some("12:00"));
        moved.title = "moved".into();
        upsert(&mut list, moved);

        assert_eq!(ids(&list), vec![2, 1]);
        assert_eq!(list[1].title, "moved");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = vec![item(1, "2024-05-01", None)];
        assert!(!remove(&mut list, ItemId(42)));
        assert_eq!(ids(&list), vec![1]);
        assert!(remove(&mut list, ItemId(1)));
        assert!(list.is_empty());
    }

    fn arb_item() -> impl Strategy<Value = CalendarItem> {
        (0i64..20, 1u32..=28, proptest::option::of(0u32..24)).prop_map(|(id, day, hour)| {
            let date = format!("2024-02-{day:02}");
            let start = hour.map(|h| format!("{h:02}:00"));
            item(id, &date, start.as_deref())
        })
    }

    proptest! {
        #[test]
        fn prop_upsert_is_idempotent(
            seed in proptest::collection::vec(arb_item(), 0..12),
            extra in arb_item(),
        ) {
            let mut once = vec![];
            for it in seed {
                upsert(&mut once, it);
            }
            upsert(&mut once, extra.clone());
            let mut twice = once.clone();
            upsert(&mut twice, extra);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_list_is_ordered(items in proptest::collection::vec(arb_item(), 0..16)) {
            let mut list = vec![];
            for it in items {
                upsert(&mut list, it);
            }
            for pair in list.windows(2) {
                let a = (pair[0].date, pair[0].start_time, pair[0].id);
                let b = (pair[1].date, pair[1].start_time, pair[1].id);
                prop_assert!(a < b);
            }
        }

        #[test]
        fn prop_remove_unknown_id_is_noop(items in proptest::collection::vec(arb_item(), 0..12)) {
            let mut list = vec![];
            for it in items {
                upsert(&mut list, it);
            }
            let before = list.clone();
            prop_assert!(!remove(&mut list, ItemId(1_000)));
            prop_assert_eq!(list, before);
        }
    }
}
