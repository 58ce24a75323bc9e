//! # planner-core
//!
//! Client-side business logic for the Planner calendar.
//!
//! This crate provides:
//! - Calendar caching with optimistic reconciliation of saved and deleted items
//! - Month grid, week strip and per-density cell summaries
//! - Push channel listener with reconnect and refresh coalescing
//! - Local input validation
//! - Notification inbox
//! - Persistent settings and keyring token storage

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod calendar;
pub mod credentials;
mod error;
pub mod inbox;
pub mod push;
pub mod service;
pub mod settings;
pub mod validation;

pub use calendar::{CalendarCache, CellView, MonthKey, ViewDensity};
pub use credentials::{CredentialError, CredentialResult, KeyringTokenStore};
pub use error::{Error, Result};
pub use inbox::Inbox;
pub use push::{Coalescer, PushListener, RefreshPlan, WsConnector};
pub use service::Planner;
pub use settings::{Settings, derive_push_url};
pub use validation::{ValidationError, ValidationResult};
