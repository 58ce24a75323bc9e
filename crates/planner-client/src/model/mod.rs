//! Wire models shared by the endpoints.

mod calendar;
mod notification;
mod workout;

use serde::{Deserialize, Serialize};

pub use calendar::{
    CalendarItem, CalendarItemRequest, CalendarMonth, FixedCostFrequency, Importance, ItemId,
    ItemType, ParseEnumError, SchoolKind, parse_time_of_day,
};
pub use notification::{Notification, NotificationId, NotificationType};
pub(crate) use workout::ExerciseCreateRequest;
pub use workout::{
    Exercise, ExerciseId, TemplateId, WorkoutEntry, WorkoutEntryRequest, WorkoutSession,
    WorkoutSessionRequest, WorkoutTemplate, WorkoutTemplateRequest,
};

/// Username/password pair for register and login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    /// Account name.
    pub username: &'a str,
    /// Plain password, sent over TLS only.
    pub password: &'a str,
}

/// Token issued by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
}
