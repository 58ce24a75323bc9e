//! Error types for the core library.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// API call failed.
    #[error(transparent)]
    Api(#[from] planner_client::Error),

    /// Input rejected before reaching the server.
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token store error.
    #[error("Session error: {0}")]
    Session(#[from] planner_client::StoreError),

    /// Requested item is not in any cached view.
    #[error("Item {0} is not loaded")]
    ItemNotLoaded(planner_client::ItemId),

    /// Workout template does not exist on the server.
    #[error("Template {0} not found")]
    TemplateNotFound(planner_client::TemplateId),
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl Error {
    /// Whether the stored session is no longer accepted (401 or 403).
    #[must_use]
    pub const fn is_session_invalid(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_session_invalid())
    }

    /// Whether the server could not be reached at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_transport())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
