//! Tweet endpoint handlers.
//!
//! The handlers receive already-resolved inputs (authenticated username, path
//! parameters, parsed JSON) and talk to the injected [`TweetStore`]. Every
//! store failure is logged here and collapsed into the uniform
//! `{"error": ...}` wire shape.

use crate::auth::{RequireAdmin, RequirePublisher};
use crate::tweets::storage::{TweetStore, TweetStoreError};
use crate::tweets::{TrendRange, Tweet};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shared handler state: the tweet store, constructed once at startup.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
}

impl<S> AppState<S>
where
    S: TweetStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

/// Uniform error body; every failure kind shares this shape on the wire.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    fn new(err: impl std::fmt::Display) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewTweet {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub status: String,
    pub tags: Vec<String>,
}

/// A timeline entry. The internal id and tags stay server-side.
#[derive(Debug, Serialize)]
pub struct TweetItem {
    pub text: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

impl From<Tweet> for TweetItem {
    fn from(tweet: Tweet) -> Self {
        Self {
            text: tweet.text,
            author: tweet.author,
            created: tweet.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub tweets: Vec<TweetItem>,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub count: i64,
}

fn store_failure(err: TweetStoreError) -> axum::response::Response {
    tracing::error!("Store operation failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(err))).into_response()
}

/// `POST /tweet` — publish a new tweet as the authenticated publisher.
pub async fn publish<S>(
    State(state): State<AppState<S>>,
    publisher: RequirePublisher,
    Json(payload): Json<NewTweet>,
) -> impl IntoResponse
where
    S: TweetStore,
{
    match state
        .store
        .publish(&payload.text, publisher.username())
        .await
    {
        Ok(tags) => (
            StatusCode::OK,
            Json(PublishResponse {
                status: "success".to_owned(),
                tags,
            }),
        )
            .into_response(),
        Err(e) => store_failure(e),
    }
}

/// `GET /tweet/{tag}` — the most recent tweets carrying `tag`.
///
/// An unknown tag is a 200 with an empty list, not a 404.
pub async fn timeline<S>(
    State(state): State<AppState<S>>,
    Path(tag): Path<String>,
) -> impl IntoResponse
where
    S: TweetStore,
{
    match state.store.timeline(&tag).await {
        Ok(tweets) => (
            StatusCode::OK,
            Json(TimelineResponse {
                tweets: tweets.into_iter().map(TweetItem::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => store_failure(e),
    }
}

/// `GET /admin/trending/{from}/{to}/{tag}` — count tweets carrying `tag`
/// within the inclusive `from..=to` calendar-year range.
pub async fn trending<S>(
    State(state): State<AppState<S>>,
    _admin: RequireAdmin,
    Path((from, to, tag)): Path<(String, String, String)>,
) -> impl IntoResponse
where
    S: TweetStore,
{
    let range = match TrendRange::parse_years(&from, &to) {
        Ok(range) => range,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e))).into_response();
        }
    };

    match state.store.trend_count(&tag, &range).await {
        Ok(count) => (StatusCode::OK, Json(TrendResponse { count })).into_response(),
        Err(e) => store_failure(e),
    }
}
