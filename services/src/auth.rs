//! HTTP Basic authentication for protected routes.
//!
//! Two account sets are configured: publisher accounts guard `POST /tweet`,
//! admin accounts guard `/admin/trending/...`. The extractors resolve the
//! authenticated username and hand it to the handler as a plain value; the
//! tweet store itself never sees credentials.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chirp_services::auth::RequirePublisher;
//!
//! async fn protected_handler(publisher: RequirePublisher) -> impl IntoResponse {
//!     format!("Hello, {}!", publisher.username())
//! }
//! ```

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, StatusCode, header::WWW_AUTHENTICATE, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

/// A set of `username -> password` accounts.
#[derive(Debug, Clone, Default)]
pub struct Accounts(HashMap<String, String>);

impl Accounts {
    /// Build from `(username, password)` pairs. Used by tests and the
    /// local-environment config defaults.
    pub fn from_pairs<I, S1, S2>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S1, S2)>,
        S1: Into<String>,
        S2: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(user, pass)| (user.into(), pass.into()))
                .collect(),
        )
    }

    /// Whether `username`/`password` matches a configured account.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.0.get(username).is_some_and(|expected| expected == password)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses `user:password` pairs separated by commas, e.g.
/// `henry:secretpass,ada:lovelace`.
impl FromStr for Accounts {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut accounts = HashMap::new();
        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (username, password) = entry
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("malformed account entry {entry:?}, expected user:password"))?;
            if username.is_empty() {
                anyhow::bail!("account entry {entry:?} has an empty username");
            }
            accounts.insert(username.to_owned(), password.to_owned());
        }
        if accounts.is_empty() {
            anyhow::bail!("account list must contain at least one user:password entry");
        }
        Ok(Self(accounts))
    }
}

/// Error type for authentication failures.
#[derive(Debug, Serialize)]
pub struct AuthError {
    pub error: String,
    pub message: String,
}

impl AuthError {
    fn missing_credentials() -> Self {
        Self {
            error: "missing_credentials".to_owned(),
            message: "Authorization header with Basic credentials is required".to_owned(),
        }
    }

    fn bad_credentials() -> Self {
        Self {
            error: "bad_credentials".to_owned(),
            message: "Unknown user or wrong password".to_owned(),
        }
    }

    fn missing_config() -> Self {
        Self {
            error: "server_error".to_owned(),
            message: "Server configuration error".to_owned(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::UNAUTHORIZED, Json(self)).into_response();
        response.headers_mut().insert(
            WWW_AUTHENTICATE,
            HeaderValue::from_static("Basic realm=\"chirp\""),
        );
        response
    }
}

/// Resolve and verify the Basic credentials in `headers` against `accounts`,
/// returning the authenticated username.
fn authenticate(headers: &HeaderMap, accounts: &Accounts) -> Result<String, AuthError> {
    let Authorization(credentials) = headers
        .typed_get::<Authorization<Basic>>()
        .ok_or_else(AuthError::missing_credentials)?;

    if accounts.verify(credentials.username(), credentials.password()) {
        Ok(credentials.username().to_owned())
    } else {
        Err(AuthError::bad_credentials())
    }
}

/// Authenticated publisher, resolved from a publisher account.
#[derive(Debug, Clone)]
pub struct RequirePublisher(String);

impl RequirePublisher {
    /// The authenticated username. Never empty for a verified account.
    pub fn username(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RequirePublisher
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<crate::config::Config>()
            .ok_or_else(AuthError::missing_config)?;

        authenticate(&parts.headers, config.publisher_accounts()).map(Self)
    }
}

/// Authenticated admin, resolved from an admin account.
#[derive(Debug, Clone)]
pub struct RequireAdmin(String);

impl RequireAdmin {
    pub fn username(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<crate::config::Config>()
            .ok_or_else(AuthError::missing_config)?;

        authenticate(&parts.headers, config.admin_accounts()).map(Self)
    }
}
