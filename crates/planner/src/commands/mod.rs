//! Subcommand handlers.

mod account;
mod calendar;
mod config;
mod notifications;
mod watch;
mod workout;

use anyhow::Result;

use crate::app::App;
use crate::cli::{Cli, Command};

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let app = App::load(cli.api, cli.ws).await?;
    match cli.command {
        Command::Register(credentials) => account::register(&app, credentials).await,
        Command::Login(credentials) => account::login(&app, credentials).await,
        Command::Logout => account::logout(&app),
        Command::Status => account::status(&app).await,
        Command::Config(args) => config::run(app, args).await,
        Command::Month {
            month,
            filter,
            density,
        } => calendar::month(&app, month, filter, density).await,
        Command::Week { date, filter } => calendar::week(&app, date, filter).await,
        Command::Day { date, filter } => calendar::day(&app, date, filter).await,
        Command::Add(item) => calendar::save(&app, None, &item).await,
        Command::Edit { id, item } => calendar::save(&app, Some(id), &item).await,
        Command::Delete { id } => calendar::delete(&app, id).await,
        Command::Done { id, date, undo } => calendar::done(&app, id, date, !undo).await,
        Command::Notifications { all } => notifications::list(&app, all).await,
        Command::Read { id } => notifications::read(&app, id).await,
        Command::Exercises { action } => workout::exercises(&app, action).await,
        Command::Templates { action } => workout::templates(&app, action).await,
        Command::Session {
            item,
            entries,
            clear,
            template,
        } => workout::session(&app, item, entries, clear, template).await,
        Command::Watch { no_desktop, filter } => watch::run(&app, filter, !no_desktop).await,
    }
}
