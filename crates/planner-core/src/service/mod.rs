//! Service layer.
//!
//! Bridges the front end with the REST client: every user action goes
//! through [`Planner`], which keeps the local caches in step with the server.

pub mod planner;

pub use planner::Planner;
