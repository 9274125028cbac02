//! Chirp: a minimal microblogging backend.
//!
//! Authenticated publishers post short texts; the service extracts `#hashtag`
//! tokens, persists each post with its tags and author, and serves a per-tag
//! timeline plus a per-tag trend count over a calendar-year range.

use crate::config::Config;
use crate::tweets::routes::AppState;
use crate::tweets::storage::TweetStore;
use axum::{
    Router,
    extract::{Extension, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{any, get, post},
};
use chirp_utils::version_info::{RuntimeEnv, format_version_for_runtime_env};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod database;
pub mod tags;
pub mod telemetry;
pub mod tweets;

/// Build the application router around an injected tweet store.
///
/// The store is constructed once at process start; handlers never reach for
/// ambient globals.
pub fn routes<S>(store: S, config: Config) -> Router
where
    S: TweetStore,
{
    let state = AppState::new(store);

    Router::new()
        .route("/is-health", get(health_check::<S>))
        .route("/tweet", post(tweets::routes::publish::<S>))
        .route("/tweet/{tag}", get(tweets::routes::timeline::<S>))
        .route(
            "/admin/trending/{from}/{to}/{tag}",
            get(tweets::routes::trending::<S>),
        )
        .fallback(any(catch_all))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(config))
        .with_state(state)
}

async fn health_check<S>(
    State(state): State<AppState<S>>,
    Extension(config): Extension<Config>,
) -> impl IntoResponse
where
    S: TweetStore,
{
    let mut response = if state.store.is_connected().await {
        (StatusCode::OK, "OK").into_response()
    } else {
        (StatusCode::BAD_GATEWAY, "502").into_response()
    };

    let env_value = config.environment().to_string();
    response.headers_mut().insert(
        HeaderName::from_static("x-service-env"),
        HeaderValue::from_str(&env_value).expect("environment header is valid ASCII"),
    );

    let runtime_env: RuntimeEnv = config.environment().into();
    let version_value = format_version_for_runtime_env(runtime_env);
    response.headers_mut().insert(
        HeaderName::from_static("x-service-version"),
        HeaderValue::from_str(&version_value).expect("version header is valid ASCII"),
    );

    response
}

async fn catch_all() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
