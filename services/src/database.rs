use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;

/// Initialize a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new().connect(config.database_url()).await?;

    tracing::info!("Database connection pool established");

    Ok(pool)
}

/// Create the `tweets` table and its indexes if they do not exist yet.
///
/// One append-only collection of immutable records; the GIN index serves the
/// tag containment filter, the btree index the trend-count range filter.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tweets (
            id BIGSERIAL PRIMARY KEY,
            text TEXT NOT NULL,
            author TEXT NOT NULL,
            tags TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS tweets_tags_idx ON tweets USING GIN (tags)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS tweets_created_at_idx ON tweets (created_at)")
        .execute(pool)
        .await?;

    tracing::info!("Database schema is up to date");

    Ok(())
}
