//! Request plumbing shared by every endpoint.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::session::Session;

/// Whether a call carries the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// Sent without credentials (register, login, ping).
    Anonymous,
    /// Bearer token attached when the session holds one.
    Bearer,
}

/// Client for the planner REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    session: Session,
    http_client: Client,
}

impl ApiClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        let base_url = Url::parse(base_url.trim().trim_end_matches('/'))?;
        Ok(Self {
            base_url,
            session,
            http_client: Client::new(),
        })
    }

    /// Uses a preconfigured HTTP client (proxy, custom TLS roots, ...).
    #[must_use]
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Session holding the bearer token.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Issues one call and decodes the body.
    ///
    /// `Ok(None)` means the server answered 2xx with no content.
    pub(crate) async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        auth: Auth,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let mut builder = self
            .http_client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }

        if auth == Auth::Bearer {
            match self.session.token() {
                Ok(Some(token)) => {
                    builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
                }
                Ok(None) => debug!("No token stored, sending {method} {path} without credentials"),
                Err(e) => warn!("Could not read token for {method} {path}: {e}"),
            }
        }

        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("{method} {path} -> {}", status.as_u16());

        decode(status, &text)
    }

    /// Issues a call whose response must carry a JSON body.
    pub(crate) async fn fetch<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        auth: Auth,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(method, path, query, body, auth)
            .await?
            .ok_or_else(|| Error::InvalidResponse(format!("empty body from {path}")))
    }

    /// Issues a call whose response body is ignored.
    pub(crate) async fn execute(&self, method: Method, path: &str) -> Result<()> {
        self.request::<serde_json::Value, ()>(method, path, &[], None, Auth::Bearer)
            .await
            .map(|_| ())
    }
}

/// Interprets a raw response.
///
/// Non-2xx statuses become [`Error::Status`]. A 204 or an empty 2xx body
/// resolves to `None`.
///
/// # Errors
///
/// Returns [`Error::Status`] for non-2xx answers and [`Error::Json`] when a
/// 2xx body does not decode as `T`.
pub fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<Option<T>> {
    if !status.is_success() {
        return Err(Error::from_response(status, body));
    }
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::AuthResponse;

    #[test]
    fn test_no_content_resolves_to_none() {
        let decoded: Option<AuthResponse> = decode(StatusCode::NO_CONTENT, "").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_empty_ok_resolves_to_none() {
        let decoded: Option<AuthResponse> = decode(StatusCode::OK, "  ").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_ok_body_is_decoded() {
        let decoded: Option<AuthResponse> = decode(StatusCode::OK, r#"{"token":"jwt"}"#).unwrap();
        assert_eq!(decoded.unwrap().token, "jwt");
    }

    #[test]
    fn test_bad_request_carries_server_message() {
        let err = decode::<AuthResponse>(StatusCode::BAD_REQUEST, r#"{"message":"Invalid date"}"#)
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Invalid date");
    }

    #[test]
    fn test_malformed_success_body_is_json_error() {
        let err = decode::<AuthResponse>(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_endpoint_joins_base_with_prefix() {
        let client = ApiClient::new("http://example.com/planner/", Session::in_memory()).unwrap();
        let url = client.endpoint("/api/ping").unwrap();
        assert_eq!(url.as_str(), "http://example.com/planner/api/ping");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", Session::in_memory()),
            Err(Error::Url(_))
        ));
    }
}
