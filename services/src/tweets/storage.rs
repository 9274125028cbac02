//! Tweet storage trait and implementations.
//!
//! The store owns persistence and query semantics for tweets: writing a new
//! record with its extracted tags, the per-tag timeline, and the per-tag
//! trend count over a date range.
//!
//! Two implementations are provided:
//! - `PgTweetStore`: PostgreSQL, one append-only `tweets` table
//! - `MockTweetStore`: in-memory, for unit and router tests
//!
//! Every backend operation is a single independent round trip with a bounded
//! deadline; there are no retries, locks, or transactions. A store is
//! constructed once at startup and injected into the router.

use crate::tags::extract_tags;
use crate::tweets::{TrendRange, Tweet};
use chrono::Utc;
use sqlx::PgPool;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Fixed timeline result cap. Not configurable.
pub const TIMELINE_LIMIT: usize = 100;

/// Failure modes of the store backend.
///
/// The wire shape collapses these into one generic error response, but the
/// variants stay distinct so callers and tests can tell a deadline from a
/// database failure.
#[derive(Debug, thiserror::Error)]
pub enum TweetStoreError {
    /// Backend communication or write-durability failure.
    #[error("database error: {0}")]
    Database(String),

    /// The per-call deadline elapsed before the backend answered.
    #[error("backend call exceeded the {}s deadline", .0.as_secs())]
    Timeout(Duration),
}

/// Trait for tweet storage operations.
///
/// A failed operation is surfaced to the caller as-is; the store performs no
/// retries and no logging of its own.
pub trait TweetStore: Clone + Send + Sync + 'static {
    /// Whether the backend currently answers queries. Used by the health route.
    fn is_connected(&self) -> impl Future<Output = bool> + Send;

    /// Persist a new tweet and return the tags extracted from its text.
    ///
    /// The creation timestamp comes from the store's clock; callers cannot
    /// forge timeline order. The author string is persisted as given — an
    /// empty author is a valid, if meaningless, record, because
    /// authentication is the caller's responsibility, not the store's.
    fn publish(
        &self,
        text: &str,
        author: &str,
    ) -> impl Future<Output = Result<Vec<String>, TweetStoreError>> + Send;

    /// The most recent tweets whose tags contain `tag`, newest first.
    ///
    /// Matching is exact and case-sensitive. At most [`TIMELINE_LIMIT`]
    /// tweets are returned; ties on `created_at` break on the insertion
    /// sequence id, descending. No matches is an empty vector, not an error.
    fn timeline(
        &self,
        tag: &str,
    ) -> impl Future<Output = Result<Vec<Tweet>, TweetStoreError>> + Send;

    /// Count tweets whose tags contain `tag` and whose creation instant falls
    /// within `range`, boundaries inclusive. Zero is a valid result.
    fn trend_count(
        &self,
        tag: &str,
        range: &TrendRange,
    ) -> impl Future<Output = Result<i64, TweetStoreError>> + Send;
}

/// PostgreSQL-backed tweet store.
#[derive(Clone)]
pub struct PgTweetStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PgTweetStore {
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Run one backend call under the per-call deadline.
    async fn bounded<T>(
        &self,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, TweetStoreError> {
        match tokio::time::timeout(self.op_timeout, query).await {
            Ok(result) => result.map_err(|e| TweetStoreError::Database(e.to_string())),
            Err(_) => Err(TweetStoreError::Timeout(self.op_timeout)),
        }
    }
}

impl TweetStore for PgTweetStore {
    async fn is_connected(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn publish(&self, text: &str, author: &str) -> Result<Vec<String>, TweetStoreError> {
        let tags = extract_tags(text);
        let created_at = Utc::now();

        self.bounded(
            sqlx::query("INSERT INTO tweets (text, author, tags, created_at) VALUES ($1, $2, $3, $4)")
                .bind(text)
                .bind(author)
                .bind(&tags)
                .bind(created_at)
                .execute(&self.pool),
        )
        .await?;

        Ok(tags)
    }

    async fn timeline(&self, tag: &str) -> Result<Vec<Tweet>, TweetStoreError> {
        // LIMIT matches TIMELINE_LIMIT.
        self.bounded(
            sqlx::query_as::<_, Tweet>(
                "SELECT id, text, author, tags, created_at FROM tweets \
                 WHERE $1 = ANY(tags) \
                 ORDER BY created_at DESC, id DESC \
                 LIMIT 100",
            )
            .bind(tag)
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn trend_count(&self, tag: &str, range: &TrendRange) -> Result<i64, TweetStoreError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM tweets \
                 WHERE $1 = ANY(tags) AND created_at BETWEEN $2 AND $3",
            )
            .bind(tag)
            .bind(range.from)
            .bind(range.to)
            .fetch_one(&self.pool),
        )
        .await
    }
}

/// In-memory mock implementation of `TweetStore` for testing.
///
/// Implements the full query semantics (exact tag match, newest-first order,
/// the timeline cap, inclusive range counting) so router-level tests exercise
/// real behavior without a database.
#[derive(Clone, Default)]
pub struct MockTweetStore {
    tweets: Arc<RwLock<Vec<Tweet>>>,
    fail: bool,
}

impl MockTweetStore {
    /// Creates a new empty `MockTweetStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every operation fails with a database error,
    /// for exercising error paths.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Seed a tweet with an explicit creation instant (builder pattern).
    ///
    /// Tags are derived from `text` exactly as on the write path, so the
    /// tags-are-a-function-of-text invariant holds for seeded records too.
    pub fn with_tweet(
        self,
        text: &str,
        author: &str,
        created_at: chrono::DateTime<Utc>,
    ) -> Self {
        {
            let mut tweets = self.tweets.write().expect("lock poisoned");
            let id = tweets.len() as i64 + 1;
            tweets.push(Tweet {
                id,
                text: text.to_owned(),
                author: author.to_owned(),
                tags: extract_tags(text),
                created_at,
            });
        }
        self
    }

    /// Returns the number of stored tweets.
    pub fn len(&self) -> usize {
        self.tweets.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no tweets are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), TweetStoreError> {
        if self.fail {
            Err(TweetStoreError::Database(
                "mock store is failing".to_owned(),
            ))
        } else {
            Ok(())
        }
    }
}

impl TweetStore for MockTweetStore {
    async fn is_connected(&self) -> bool {
        !self.fail
    }

    async fn publish(&self, text: &str, author: &str) -> Result<Vec<String>, TweetStoreError> {
        self.check_available()?;

        let tags = extract_tags(text);
        let mut tweets = self.tweets.write().expect("lock poisoned");
        let id = tweets.len() as i64 + 1;
        tweets.push(Tweet {
            id,
            text: text.to_owned(),
            author: author.to_owned(),
            tags: tags.clone(),
            created_at: Utc::now(),
        });

        Ok(tags)
    }

    async fn timeline(&self, tag: &str) -> Result<Vec<Tweet>, TweetStoreError> {
        self.check_available()?;

        let tweets = self.tweets.read().expect("lock poisoned");
        let mut matches: Vec<Tweet> = tweets
            .iter()
            .filter(|t| t.tags.iter().any(|candidate| candidate == tag))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matches.truncate(TIMELINE_LIMIT);

        Ok(matches)
    }

    async fn trend_count(&self, tag: &str, range: &TrendRange) -> Result<i64, TweetStoreError> {
        self.check_available()?;

        let tweets = self.tweets.read().expect("lock poisoned");
        let count = tweets
            .iter()
            .filter(|t| t.tags.iter().any(|candidate| candidate == tag))
            .filter(|t| range.contains(t.created_at))
            .count();

        Ok(count as i64)
    }
}
