//! Register, login, logout and status.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::app::{App, today};
use crate::cli::Credentials;

pub async fn register(app: &App, credentials: Credentials) -> Result<()> {
    let password = password(credentials.password).await?;
    let mut planner = app.planner(today())?;
    planner.register(&credentials.username, &password).await?;
    println!("Registered and signed in as {}", credentials.username.trim());
    Ok(())
}

pub async fn login(app: &App, credentials: Credentials) -> Result<()> {
    let password = password(credentials.password).await?;
    let mut planner = app.planner(today())?;
    planner.login(&credentials.username, &password).await?;
    println!("Signed in as {}", credentials.username.trim());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.planner(today())?.logout()?;
    println!("Signed out");
    Ok(())
}

pub async fn status(app: &App) -> Result<()> {
    let planner = app.planner(today())?;
    println!("API:     {}", app.settings.api_base_url);
    match app.settings.push_url() {
        Ok(url) => println!("Push:    {url}"),
        Err(e) => println!("Push:    {e}"),
    }
    match planner.client().ping().await {
        Ok(body) if body.is_empty() => println!("Server:  reachable"),
        Ok(body) => println!("Server:  reachable {}", serde_json::to_string(&body)?),
        Err(e) => println!("Server:  unreachable ({})", e.message()),
    }
    let state = if planner.is_authenticated() {
        "signed in"
    } else {
        "signed out"
    };
    println!("Session: {state}");
    Ok(())
}

async fn password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let mut stderr = tokio::io::stderr();
    stderr.write_all(b"Password: ").await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
