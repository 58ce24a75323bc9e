//! # planner-client
//!
//! Typed HTTP client for the planner REST API.
//!
//! ## Features
//!
//! - **One method per endpoint**: auth, calendar items, notifications and the
//!   workout library (exercises, templates, sessions)
//! - **Typed errors**: non-2xx answers carry the status and the server's
//!   `message` when it sent one
//! - **Explicit session**: the bearer token lives in a [`TokenStore`] handed to
//!   the client, never in global state
//!
//! ## Quick Start
//!
//! ```ignore
//! use planner_client::{ApiClient, ItemType, Session};
//!
//! #[tokio::main]
//! async fn main() -> planner_client::Result<()> {
//!     let client = ApiClient::new("http://localhost:8080", Session::in_memory())?;
//!     client.login("ada", "correct horse battery").await?;
//!
//!     let month = client.month(2024, 5, Some(ItemType::Workout)).await?;
//!     for item in &month.items {
//!         println!("{} {}", item.date, item.title);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod endpoints;
mod error;
pub mod model;
pub mod session;

pub use client::{ApiClient, decode};
pub use error::{Error, Result, error_message};
pub use model::{
    AuthResponse, CalendarItem, CalendarItemRequest, CalendarMonth, Exercise, ExerciseId,
    FixedCostFrequency, Importance, ItemId, ItemType, Notification, NotificationId,
    NotificationType, ParseEnumError, SchoolKind, TemplateId, WorkoutEntry, WorkoutEntryRequest,
    WorkoutSession, WorkoutSessionRequest, WorkoutTemplate, WorkoutTemplateRequest,
    parse_time_of_day,
};
pub use session::{MemoryTokenStore, Session, StoreError, TokenStore};
