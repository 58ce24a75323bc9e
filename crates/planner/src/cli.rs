//! Command line definition.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use planner_client::{
    CalendarItemRequest, ExerciseId, FixedCostFrequency, Importance, ItemType, SchoolKind,
    WorkoutEntryRequest, parse_time_of_day,
};
use planner_core::{MonthKey, ViewDensity};

/// Planner calendar client.
#[derive(Debug, Parser)]
#[command(name = "planner", version, about = "Planner calendar client")]
pub struct Cli {
    /// REST API base URL for this run
    #[arg(long, global = true)]
    pub api: Option<String>,
    /// Push channel URL for this run
    #[arg(long, global = true)]
    pub ws: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and sign in
    Register(Credentials),
    /// Sign in
    Login(Credentials),
    /// Forget the stored token
    Logout,
    /// Show server reachability and session state
    Status,
    /// Show or change settings
    Config(ConfigArgs),
    /// Show a month grid
    Month {
        /// Month as YYYY-MM, defaults to the current month
        #[arg(value_parser = parse_month)]
        month: Option<MonthKey>,
        /// Only show items of this type
        #[arg(long = "type")]
        filter: Option<ItemType>,
        /// Grid density for this run
        #[arg(long)]
        density: Option<ViewDensity>,
    },
    /// Show the Monday-Sunday week around a date
    Week {
        /// Any date in the week, defaults to today
        date: Option<NaiveDate>,
        /// Only show items of this type
        #[arg(long = "type")]
        filter: Option<ItemType>,
    },
    /// Show the items of one date
    Day {
        /// Date, defaults to today
        date: Option<NaiveDate>,
        /// Only show items of this type
        #[arg(long = "type")]
        filter: Option<ItemType>,
    },
    /// Create an item
    Add(ItemArgs),
    /// Replace an item
    Edit {
        /// Item id
        id: i64,
        #[command(flatten)]
        item: ItemArgs,
    },
    /// Delete an item
    Delete {
        /// Item id
        id: i64,
    },
    /// Mark an item done, or not done with --undo
    Done {
        /// Item id
        id: i64,
        /// Date of the item, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Clear the done flag instead
        #[arg(long)]
        undo: bool,
    },
    /// List notifications
    Notifications {
        /// Include read notifications
        #[arg(long)]
        all: bool,
    },
    /// Mark a notification read
    Read {
        /// Notification id
        id: i64,
    },
    /// Manage the exercise library
    Exercises {
        #[command(subcommand)]
        action: Option<ExerciseAction>,
    },
    /// Manage workout templates
    Templates {
        #[command(subcommand)]
        action: Option<TemplateAction>,
    },
    /// Show or replace the exercise log of a workout item
    Session {
        /// Workout item id
        item: i64,
        /// Replace the log with these entries (EXERCISE:SETS:REPS[:WEIGHT])
        #[arg(long = "entry", value_parser = parse_entry)]
        entries: Vec<WorkoutEntryRequest>,
        /// Replace the log with an empty one
        #[arg(long, conflicts_with = "entries")]
        clear: bool,
        /// Replace the log with the entries of this template
        #[arg(long, conflicts_with_all = ["entries", "clear"])]
        template: Option<i64>,
    },
    /// Follow the push channel and print changes as they happen
    Watch {
        /// Do not show desktop notifications
        #[arg(long)]
        no_desktop: bool,
        /// Only show items of this type
        #[arg(long = "type")]
        filter: Option<ItemType>,
    },
}

#[derive(Debug, Args)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Password; read from stdin when omitted
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Persist a new REST API base URL
    #[arg(long)]
    pub set_api: Option<String>,
    /// Persist a push channel URL; an empty value derives it from the API URL
    #[arg(long)]
    pub set_ws: Option<String>,
    /// Persist the grid density
    #[arg(long)]
    pub density: Option<ViewDensity>,
    /// Persist the notification poll interval in seconds
    #[arg(long)]
    pub poll_secs: Option<u64>,
}

impl ConfigArgs {
    pub const fn is_empty(&self) -> bool {
        self.set_api.is_none()
            && self.set_ws.is_none()
            && self.density.is_none()
            && self.poll_secs.is_none()
    }
}

#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Title
    pub title: String,
    /// Date of the item
    #[arg(long)]
    pub date: NaiveDate,
    /// Item type
    #[arg(long = "type")]
    pub item_type: ItemType,
    /// Start time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub start: Option<NaiveTime>,
    /// End time, HH:MM
    #[arg(long, value_parser = parse_time)]
    pub end: Option<NaiveTime>,
    /// Importance, defaults to medium
    #[arg(long)]
    pub importance: Option<Importance>,
    /// Free-text log
    #[arg(long)]
    pub log: Option<String>,
    /// Amount for fixed costs
    #[arg(long)]
    pub amount: Option<f64>,
    /// School sub-kind
    #[arg(long)]
    pub school_kind: Option<SchoolKind>,
    /// Fixed-cost recurrence
    #[arg(long)]
    pub frequency: Option<FixedCostFrequency>,
    /// Mark the item done
    #[arg(long)]
    pub done: bool,
}

impl ItemArgs {
    pub fn to_request(&self) -> CalendarItemRequest {
        let mut request = CalendarItemRequest::new(self.date, self.item_type, self.title.clone());
        request.start_time = self.start;
        request.end_time = self.end;
        if let Some(importance) = self.importance {
            request.importance = importance;
        }
        request.log.clone_from(&self.log);
        request.amount = self.amount;
        request.school_kind = self.school_kind;
        request.fixed_cost_frequency = self.frequency;
        request.done = self.done.then_some(true);
        request
    }
}

#[derive(Debug, Subcommand)]
pub enum ExerciseAction {
    /// List exercises
    List,
    /// Add an exercise
    Add {
        /// Exercise name
        name: String,
    },
    /// Delete an exercise
    Delete {
        /// Exercise id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum TemplateAction {
    /// List templates
    List,
    /// Create a template
    Add {
        /// Template title
        title: String,
        /// Entries in order (EXERCISE:SETS:REPS[:WEIGHT])
        #[arg(long = "entry", value_parser = parse_entry)]
        entries: Vec<WorkoutEntryRequest>,
    },
    /// Replace a template
    Edit {
        /// Template id
        id: i64,
        /// Template title
        title: String,
        /// Entries in order (EXERCISE:SETS:REPS[:WEIGHT])
        #[arg(long = "entry", value_parser = parse_entry)]
        entries: Vec<WorkoutEntryRequest>,
    },
    /// Delete a template
    Delete {
        /// Template id
        id: i64,
    },
}

fn parse_month(value: &str) -> Result<MonthKey, String> {
    let invalid = || format!("expected YYYY-MM, got {value}");
    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().map_err(|_| invalid())?;
    let key = MonthKey::new(year, month);
    key.first_day().map(|_| key).ok_or_else(invalid)
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    parse_time_of_day(value).ok_or_else(|| format!("expected HH:MM, got {value}"))
}

/// Parses `EXERCISE:SETS:REPS[:WEIGHT]`.
fn parse_entry(value: &str) -> Result<WorkoutEntryRequest, String> {
    let invalid = || format!("expected EXERCISE:SETS:REPS[:WEIGHT], got {value}");
    let parts: Vec<&str> = value.split(':').map(str::trim).collect();
    let (exercise, sets, reps, weight) = match parts.as_slice() {
        [e, s, r] => (e, s, r, None),
        [e, s, r, w] => (e, s, r, Some(w)),
        _ => return Err(invalid()),
    };
    Ok(WorkoutEntryRequest {
        exercise_id: ExerciseId(exercise.parse().map_err(|_| invalid())?),
        sets: sets.parse().map_err(|_| invalid())?,
        reps: reps.parse().map_err(|_| invalid())?,
        weight: weight
            .map(|w| w.parse::<f64>())
            .transpose()
            .map_err(|_| invalid())?,
    })
}
