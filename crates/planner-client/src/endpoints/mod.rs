//! One method per REST endpoint, grouped by resource.

mod auth;
mod calendar;
mod notifications;
mod workout;
