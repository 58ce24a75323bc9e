//! Local validation run before anything is sent to the server.

use planner_client::{CalendarItemRequest, WorkoutEntryRequest, WorkoutTemplateRequest};

/// Longest accepted item title, in characters.
pub const MAX_TITLE_LEN: usize = 120;
/// Longest accepted item log, in characters.
pub const MAX_LOG_LEN: usize = 2000;
/// Longest accepted exercise name, in characters.
pub const MAX_EXERCISE_NAME_LEN: usize = 80;

/// Validation error for user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty.
    EmptyUsername,
    /// Username length outside 3-64.
    UsernameLength,
    /// Password is empty.
    EmptyPassword,
    /// Password length outside 8-128.
    PasswordLength,
    /// Item title is empty.
    EmptyTitle,
    /// Item title is too long.
    TitleTooLong,
    /// Item log is too long.
    LogTooLong,
    /// Amount is negative or not a number.
    InvalidAmount,
    /// End time is before start time.
    EndBeforeStart,
    /// Workout entry sets below 1.
    InvalidSets,
    /// Workout entry reps below 1.
    InvalidReps,
    /// Workout entry weight negative or not a number.
    InvalidWeight,
    /// Exercise name is empty.
    EmptyExerciseName,
    /// Exercise name is too long.
    ExerciseNameTooLong,
    /// Template title is empty.
    EmptyTemplateTitle,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "Username is required",
            Self::UsernameLength => "Username must be 3-64 characters",
            Self::EmptyPassword => "Password is required",
            Self::PasswordLength => "Password must be 8-128 characters",
            Self::EmptyTitle => "Title is required",
            Self::TitleTooLong => "Title must be at most 120 characters",
            Self::LogTooLong => "Log must be at most 2000 characters",
            Self::InvalidAmount => "Amount must be zero or more",
            Self::EndBeforeStart => "End time must not be before start time",
            Self::InvalidSets => "Sets must be at least 1",
            Self::InvalidReps => "Reps must be at least 1",
            Self::InvalidWeight => "Weight must be zero or more",
            Self::EmptyExerciseName => "Exercise name is required",
            Self::ExerciseNameTooLong => "Exercise name must be at most 80 characters",
            Self::EmptyTemplateTitle => "Template title is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameLength => "username",
            Self::EmptyPassword | Self::PasswordLength => "password",
            Self::EmptyTitle | Self::TitleTooLong | Self::EmptyTemplateTitle => "title",
            Self::LogTooLong => "log",
            Self::InvalidAmount => "amount",
            Self::EndBeforeStart => "end_time",
            Self::InvalidSets => "sets",
            Self::InvalidReps => "reps",
            Self::InvalidWeight => "weight",
            Self::EmptyExerciseName | Self::ExerciseNameTooLong => "name",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of a validation pass: every problem found, not just the first.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validate login input. Both fields must be non-blank.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_login(username: &str, password: &str) -> ValidationResult {
    let mut errors = Vec::new();
    if username.trim().is_empty() {
        errors.push(ValidationError::EmptyUsername);
    }
    if password.trim().is_empty() {
        errors.push(ValidationError::EmptyPassword);
    }
    finish(errors)
}

/// Validate registration input.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_register(username: &str, password: &str) -> ValidationResult {
    let mut errors = Vec::new();

    let name = username.trim();
    if name.is_empty() {
        errors.push(ValidationError::EmptyUsername);
    } else if !(3..=64).contains(&char_len(name)) {
        errors.push(ValidationError::UsernameLength);
    }

    if password.trim().is_empty() {
        errors.push(ValidationError::EmptyPassword);
    } else if !(8..=128).contains(&char_len(password)) {
        errors.push(ValidationError::PasswordLength);
    }

    finish(errors)
}

/// Validate a calendar item before create or update.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_item(item: &CalendarItemRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let title = item.title.trim();
    if title.is_empty() {
        errors.push(ValidationError::EmptyTitle);
    } else if char_len(title) > MAX_TITLE_LEN {
        errors.push(ValidationError::TitleTooLong);
    }

    if item.log.as_deref().is_some_and(|log| char_len(log) > MAX_LOG_LEN) {
        errors.push(ValidationError::LogTooLong);
    }

    if item.amount.is_some_and(|a| a.is_nan() || a < 0.0) {
        errors.push(ValidationError::InvalidAmount);
    }

    if let (Some(start), Some(end)) = (item.start_time, item.end_time)
        && end < start
    {
        errors.push(ValidationError::EndBeforeStart);
    }

    finish(errors)
}

/// Validate workout entries of a template or session.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any entry is invalid. Each kind
/// of problem is reported once.
pub fn validate_entries(entries: &[WorkoutEntryRequest]) -> ValidationResult {
    let mut errors = Vec::new();
    if entries.iter().any(|e| e.sets < 1) {
        errors.push(ValidationError::InvalidSets);
    }
    if entries.iter().any(|e| e.reps < 1) {
        errors.push(ValidationError::InvalidReps);
    }
    if entries
        .iter()
        .any(|e| e.weight.is_some_and(|w| w.is_nan() || w < 0.0))
    {
        errors.push(ValidationError::InvalidWeight);
    }
    finish(errors)
}

/// Validate a workout template.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_template(template: &WorkoutTemplateRequest) -> ValidationResult {
    let mut errors = Vec::new();
    if template.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTemplateTitle);
    }
    if let Err(entry_errors) = validate_entries(&template.entries) {
        errors.extend(entry_errors);
    }
    finish(errors)
}

/// Validate a new exercise name.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if the name is invalid.
pub fn validate_exercise_name(name: &str) -> ValidationResult {
    let name = name.trim();
    if name.is_empty() {
        Err(vec![ValidationError::EmptyExerciseName])
    } else if char_len(name) > MAX_EXERCISE_NAME_LEN {
        Err(vec![ValidationError::ExerciseNameTooLong])
    } else {
        Ok(())
    }
}
