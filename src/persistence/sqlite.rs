//! SQLite implementation of the quote store.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Connection, SqlitePool};
use tokio::time::Instant;
use tracing::{Instrument, Span};

use super::models::QuoteRecord;
use crate::domain::Quote;
use crate::error::SaveError;

const CREATE_QUOTES_TABLE: &str = "CREATE TABLE IF NOT EXISTS cotacoes (\
     id INTEGER PRIMARY KEY AUTOINCREMENT, \
     bid TEXT NOT NULL, \
     timestamp INTEGER NOT NULL)";

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// SQLite-backed append-only quote store using a shared `SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteQuoteStore {
    pool: SqlitePool,
    span: Span,
}

impl SqliteQuoteStore {
    /// Wraps an existing pool. The schema is not checked; call
    /// [`Self::ensure_schema`] before the first insert.
    #[must_use]
    pub fn new(pool: SqlitePool, span: Span) -> Self {
        Self { pool, span }
    }

    /// Opens (creating if missing) the database at `url` and ensures the
    /// `cotacoes` table exists.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Database`] if the URL is invalid, the file
    /// cannot be opened or the schema cannot be created.
    pub async fn connect(url: &str, max_connections: u32, span: Span) -> Result<Self, SaveError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let store = Self::new(pool, span);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Opens a private in-memory database with the schema in place.
    ///
    /// The pool holds exactly one connection that never expires, since each
    /// SQLite in-memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Database`] if the connection or schema fails.
    pub async fn in_memory(span: Span) -> Result<Self, SaveError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self::new(pool, span);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Creates the `cotacoes` table if it does not exist yet. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Database`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), SaveError> {
        sqlx::query(CREATE_QUOTES_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts one row for `quote`, stamped with `timestamp` (unix seconds).
    ///
    /// `timeout` bounds connection acquisition and the insert. The insert
    /// runs in its own transaction on a connection whose busy timeout is set
    /// to the remaining budget, so a locked database fails inside SQLite
    /// rather than finishing later in the background. The transaction is
    /// rolled back if the deadline passed before commit: a timed-out save
    /// never leaves a row behind.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Timeout`] if the deadline elapses or the
    /// database stays locked for the whole budget, and
    /// [`SaveError::Database`] on any other database failure.
    pub async fn save(
        &self,
        quote: &Quote,
        timestamp: i64,
        timeout: Duration,
    ) -> Result<QuoteRecord, SaveError> {
        let deadline = Instant::now() + timeout;

        async {
            let mut conn = tokio::time::timeout_at(deadline, self.pool.acquire())
                .await
                .map_err(|_| SaveError::Timeout)??;

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(SaveError::Timeout);
            }
            sqlx::query(&format!(
                "PRAGMA busy_timeout = {}",
                remaining.as_millis().max(1)
            ))
            .execute(&mut *conn)
            .await?;

            let mut tx = conn.begin().await?;
            let result = sqlx::query("INSERT INTO cotacoes (bid, timestamp) VALUES (?, ?)")
                .bind(quote.bid.as_str())
                .bind(timestamp)
                .execute(&mut *tx)
                .await
                .map_err(classify)?;

            if Instant::now() > deadline {
                if let Err(err) = tx.rollback().await {
                    tracing::warn!(error = %err, "rollback of late quote insert failed");
                }
                return Err(SaveError::Timeout);
            }
            // A failed commit drops `tx`, which rolls the insert back.
            tx.commit().await.map_err(classify)?;

            let record = QuoteRecord {
                id: result.last_insert_rowid(),
                bid: quote.bid.clone(),
                timestamp,
            };
            tracing::debug!(id = record.id, bid = %record.bid, "quote row inserted");
            Ok::<_, SaveError>(record)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Returns the number of stored quotes.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Database`] on database failure.
    pub async fn count(&self) -> Result<i64, SaveError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cotacoes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Closes the pool. Subsequent operations fail with
    /// [`SaveError::Database`].
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Maps `SQLITE_BUSY` and `SQLITE_LOCKED` (any extended variant) to
/// [`SaveError::Timeout`]: the busy handler gave up after the save budget.
fn classify(err: sqlx::Error) -> SaveError {
    let busy = err
        .as_database_error()
        .and_then(|db| db.code())
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED));

    if busy {
        SaveError::Timeout
    } else {
        SaveError::Database(err)
    }
}
