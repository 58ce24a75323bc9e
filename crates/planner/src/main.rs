//! `planner` - terminal client for the Planner calendar
//!
//! Every subcommand is one API action; `watch` follows the push channel and
//! reprints the day whenever the server reports a change.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod commands;
mod notify;
mod view;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planner=info,planner_core=info,planner_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if server_unreachable(&e) => {
            tracing::debug!("Request failed: {e:#}");
            eprintln!(
                "error: could not reach the server; check `planner status` and `planner config`"
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            if session_expired(&e) {
                eprintln!("Your session is no longer valid; run `planner login`.");
            }
            ExitCode::FAILURE
        }
    }
}

fn session_expired(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<planner_core::Error>()
            .is_some_and(planner_core::Error::is_session_invalid)
            || cause
                .downcast_ref::<planner_client::Error>()
                .is_some_and(planner_client::Error::is_session_invalid)
    })
}

fn server_unreachable(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<planner_core::Error>()
            .is_some_and(planner_core::Error::is_transport)
            || cause
                .downcast_ref::<planner_client::Error>()
                .is_some_and(planner_client::Error::is_transport)
    })
}
