//! Account endpoints.

use std::collections::BTreeMap;

use reqwest::Method;
use tracing::info;

use crate::client::{ApiClient, Auth};
use crate::error::Result;
use crate::model::{AuthResponse, Credentials};

impl ApiClient {
    /// Creates an account and stores the issued token in the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token cannot be stored.
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let auth = self.authenticate("/api/auth/register", username, password).await?;
        info!("Registered account {username}");
        Ok(auth)
    }

    /// Logs in and stores the issued token in the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token cannot be stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let auth = self.authenticate("/api/auth/login", username, password).await?;
        info!("Logged in as {username}");
        Ok(auth)
    }

    async fn authenticate(&self, path: &str, username: &str, password: &str) -> Result<AuthResponse> {
        let credentials = Credentials { username, password };
        let auth: AuthResponse = self
            .fetch(Method::POST, path, &[], Some(&credentials), Auth::Anonymous)
            .await?;
        self.session().save(&auth.token)?;
        Ok(auth)
    }

    /// Checks that the server is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or answers non-2xx.
    pub async fn ping(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        let body = self
            .request::<BTreeMap<String, serde_json::Value>, ()>(
                Method::GET,
                "/api/ping",
                &[],
                None,
                Auth::Anonymous,
            )
            .await?;
        Ok(body.unwrap_or_default())
    }
}
