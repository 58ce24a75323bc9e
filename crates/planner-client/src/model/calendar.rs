//! Calendar item wire types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a calendar item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing one of the enumerations from text fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire representation (e.g. used as a query parameter).
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            /// Case-insensitive; `-` is accepted in place of `_`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
                match normalized.as_str() {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseEnumError::new($kind, s)),
                }
            }
        }
    };
}

wire_enum! {
    /// Kind of planning entry. Also the key of the type filter tabs.
    ItemType, "item type" {
        /// Lecture or compulsory school activity.
        School => "SCHOOL",
        /// Training session, may carry a workout log.
        Workout => "WORKOUT",
        /// Main meal of the day.
        MainMeal => "MAIN_MEAL",
        /// Work shift.
        Job => "JOB",
        /// Recurring cost such as rent or a subscription.
        FixedCost => "FIXED_COST",
        /// Birthday.
        Birthday => "BIRTHDAY",
        /// Anything else.
        Other => "OTHER",
    }
}

wire_enum! {
    /// How much attention an item or notification deserves.
    Importance, "importance" {
        /// Low.
        Low => "LOW",
        /// Medium.
        Medium => "MEDIUM",
        /// High.
        High => "HIGH",
        /// Critical.
        Critical => "CRITICAL",
    }
}

wire_enum! {
    /// Sub-kind of a school item.
    SchoolKind, "school kind" {
        /// Regular lecture.
        Lecture => "LECTURE",
        /// Mandatory attendance.
        Compulsory => "COMPULSORY",
    }
}

wire_enum! {
    /// Recurrence of a fixed cost.
    FixedCostFrequency, "fixed cost frequency" {
        /// Every week.
        Weekly => "WEEKLY",
        /// Every month.
        Monthly => "MONTHLY",
        /// Every year.
        Yearly => "YEARLY",
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self::Medium
    }
}

/// A single dated planning entry as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarItem {
    /// Identifier.
    pub id: ItemId,
    /// Calendar date, no time zone.
    pub date: NaiveDate,
    /// Optional start time of day.
    #[serde(default, with = "time_of_day")]
    pub start_time: Option<NaiveTime>,
    /// Optional end time of day.
    #[serde(default, with = "time_of_day")]
    pub end_time: Option<NaiveTime>,
    /// Item type.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Importance level.
    pub importance: Importance,
    /// Title.
    pub title: String,
    /// Free-text log.
    #[serde(default)]
    pub log: Option<String>,
    /// Whether the item has been completed.
    #[serde(default)]
    pub done: bool,
    /// Monetary amount (fixed costs).
    #[serde(default)]
    pub amount: Option<f64>,
    /// School sub-kind.
    #[serde(default)]
    pub school_kind: Option<SchoolKind>,
    /// Fixed-cost recurrence.
    #[serde(default)]
    pub fixed_cost_frequency: Option<FixedCostFrequency>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CalendarItem {
    /// Month bucket key (`YYYY-MM`) this item belongs to.
    #[must_use]
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Builds the request that re-submits this item unchanged.
    #[must_use]
    pub fn to_request(&self) -> CalendarItemRequest {
        CalendarItemRequest {
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            item_type: self.item_type,
            importance: self.importance,
            title: self.title.clone(),
            log: self.log.clone(),
            done: Some(self.done),
            amount: self.amount,
            school_kind: self.school_kind,
            fixed_cost_frequency: self.fixed_cost_frequency,
        }
    }
}

/// Body of create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarItemRequest {
    /// Calendar date.
    pub date: NaiveDate,
    /// Optional start time of day.
    #[serde(
        default,
        with = "time_of_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveTime>,
    /// Optional end time of day.
    #[serde(
        default,
        with = "time_of_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
    /// Item type.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Importance level.
    pub importance: Importance,
    /// Title.
    pub title: String,
    /// Free-text log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    /// Done flag; the server keeps the current value when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    /// Monetary amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// School sub-kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_kind: Option<SchoolKind>,
    /// Fixed-cost recurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_cost_frequency: Option<FixedCostFrequency>,
}

impl CalendarItemRequest {
    /// Creates a request with the required fields set.
    #[must_use]
    pub fn new(date: NaiveDate, item_type: ItemType, title: impl Into<String>) -> Self {
        Self {
            date,
            start_time: None,
            end_time: None,
            item_type,
            importance: Importance::default(),
            title: title.into(),
            log: None,
            done: None,
            amount: None,
            school_kind: None,
            fixed_cost_frequency: None,
        }
    }
}

/// Response of the month endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Items of the month, in server order.
    #[serde(default)]
    pub items: Vec<CalendarItem>,
}

impl CalendarMonth {
    /// Month bucket key (`YYYY-MM`).
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Time of day in `HH:MM` or `HH:MM:SS` form, written back as `HH:MM:SS`.
pub(crate) mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Option<NaiveTime> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .ok()
    }

    #[allow(clippy::ref_option)] // Required by serde with= signature
    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format("%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {text}"))),
        }
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
#[must_use]
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    time_of_day::parse(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ITEM_JSON: &str = r#"{
        "id": 12,
        "date": "2024-05-01",
        "startTime": "09:30:00",
        "endTime": "10:15",
        "type": "MAIN_MEAL",
        "importance": "HIGH",
        "title": "Lunch",
        "log": null,
        "createdAt": "2024-04-30T10:00:00Z",
        "updatedAt": "2024-04-30T11:00:00Z"
    }"#;

    #[test]
    fn test_item_deserialization() {
        let item: CalendarItem = serde_json::from_str(ITEM_JSON).unwrap();
        assert_eq!(item.id, ItemId(12));
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(item.start_time, NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(item.end_time, NaiveTime::from_hms_opt(10, 15, 0));
        assert_eq!(item.item_type, ItemType::MainMeal);
        assert_eq!(item.importance, Importance::High);
        assert!(!item.done);
        assert!(item.amount.is_none());
        assert_eq!(item.month_key(), "2024-05");
    }

    #[test]
    fn test_missing_times_are_none() {
        let json = ITEM_JSON
            .replace(r#""startTime": "09:30:00","#, "")
            .replace(r#""endTime": "10:15","#, r#""endTime": null,"#);
        let item: CalendarItem = serde_json::from_str(&json).unwrap();
        assert!(item.start_time.is_none());
        assert!(item.end_time.is_none());
    }

    #[test]
    fn test_request_skips_empty_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let mut request = CalendarItemRequest::new(date, ItemType::FixedCost, "Rent");
        request.amount = Some(950.0);
        request.fixed_cost_frequency = Some(FixedCostFrequency::Monthly);
        request.start_time = NaiveTime::from_hms_opt(8, 0, 0);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["date"], "2024-02-29");
        assert_eq!(value["type"], "FIXED_COST");
        assert_eq!(value["importance"], "MEDIUM");
        assert_eq!(value["startTime"], "08:00:00");
        assert_eq!(value["fixedCostFrequency"], "MONTHLY");
        assert!(value.get("endTime").is_none());
        assert!(value.get("log").is_none());
        assert!(value.get("done").is_none());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("main-meal".parse::<ItemType>().unwrap(), ItemType::MainMeal);
        assert_eq!("FIXED_COST".parse::<ItemType>().unwrap(), ItemType::FixedCost);
        assert_eq!(" critical ".parse::<Importance>().unwrap(), Importance::Critical);
        assert!("party".parse::<ItemType>().is_err());
        assert_eq!(ItemType::ALL.len(), 7);
    }

    #[test]
    fn test_month_key() {
        let month = CalendarMonth {
            year: 2024,
            month: 3,
            items: Vec::new(),
        };
        assert_eq!(month.key(), "2024-03");
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("07:05"), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(parse_time_of_day("07:05:09"), NaiveTime::from_hms_opt(7, 5, 9));
        assert!(parse_time_of_day("7pm").is_none());
    }
}
