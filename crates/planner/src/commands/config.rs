//! `planner config`.

use anyhow::{Context, Result};
use planner_core::{Settings, derive_push_url};

use crate::app::App;
use crate::cli::ConfigArgs;

pub async fn run(app: App, args: ConfigArgs) -> Result<()> {
    let settings = if args.is_empty() {
        app.settings
    } else {
        let stored = apply(app.stored, args)?;
        stored.save_to(&app.path).await?;
        println!("Saved {}", app.path.display());
        stored.with_env_overrides()
    };

    println!("Settings file: {}", app.path.display());
    println!("API:           {}", settings.api_base_url);
    match settings.push_url() {
        Ok(url) if settings.ws_url.is_some() => println!("Push:          {url}"),
        Ok(url) => println!("Push:          {url} (derived)"),
        Err(e) => println!("Push:          {e}"),
    }
    println!("Density:       {}", settings.density);
    println!("Poll interval: {}s", settings.poll_interval().as_secs());
    Ok(())
}

fn apply(mut stored: Settings, args: ConfigArgs) -> Result<Settings> {
    if let Some(api) = args.set_api {
        let api = api.trim().to_string();
        derive_push_url(&api).with_context(|| format!("Rejected API URL {api}"))?;
        stored.api_base_url = api;
    }
    if let Some(ws) = args.set_ws {
        stored.ws_url = Some(ws.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(density) = args.density {
        stored.density = density;
    }
    if let Some(secs) = args.poll_secs {
        stored.notification_poll_secs = secs;
    }
    Ok(stored)
}
