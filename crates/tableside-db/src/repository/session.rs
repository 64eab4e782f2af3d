//! # Session Repository
//!
//! Database operations for table sessions.
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two waiters open table 4 at the same moment                           │
//! │                                                                         │
//! │  Request A: latest = CLOSED ──► INSERT ──► ok                          │
//! │  Request B: latest = CLOSED ──► INSERT ──► UNIQUE constraint failed    │
//! │                                              (ux_tables_sessions_one_open)
//! │                                              └──► TableAlreadyOpen     │
//! │                                                                         │
//! │  Two waiters close session 9 at the same moment                        │
//! │                                                                         │
//! │  UPDATE ... WHERE id = 9 AND closed_at IS NULL                         │
//! │  Request A: 1 row  ──► closed session                                  │
//! │  Request B: 0 rows ──► None ──► SessionAlreadyClosed                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use tableside_core::ports::SessionStore;
use tableside_core::{CoreError, CoreResult, TableSession};

/// Repository for table session database operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Lists all sessions: open first, then by `closed_at` ascending,
    /// newest `opened_at` first within each group.
    pub async fn list(&self) -> DbResult<Vec<TableSession>> {
        let sessions = sqlx::query_as::<_, TableSession>(
            r#"
            SELECT id, table_id, opened_at, closed_at
            FROM tables_sessions
            ORDER BY closed_at ASC NULLS FIRST, opened_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = sessions.len(), "Listed table sessions");
        Ok(sessions)
    }

    /// Gets a session by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<TableSession>> {
        let session = sqlx::query_as::<_, TableSession>(
            r#"
            SELECT id, table_id, opened_at, closed_at
            FROM tables_sessions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Gets the most recent session of a table by `opened_at`.
    pub async fn latest_for_table(&self, table_id: i64) -> DbResult<Option<TableSession>> {
        let session = sqlx::query_as::<_, TableSession>(
            r#"
            SELECT id, table_id, opened_at, closed_at
            FROM tables_sessions
            WHERE table_id = ?1
            ORDER BY opened_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(table_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Inserts an open session for a table.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The table already has an open session
    /// * `Err(DbError::ForeignKeyViolation)` - The table does not exist
    pub async fn insert_open(&self, table_id: i64) -> DbResult<TableSession> {
        debug!(table_id, "Opening table session");

        let now = Utc::now();

        let session = sqlx::query_as::<_, TableSession>(
            r#"
            INSERT INTO tables_sessions (table_id, opened_at, closed_at)
            VALUES (?1, ?2, NULL)
            RETURNING id, table_id, opened_at, closed_at
            "#,
        )
        .bind(table_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        info!(session_id = session.id, table_id, "Table session opened");
        Ok(session)
    }

    /// Closes a session that is still open.
    ///
    /// ## Returns
    /// * `Ok(None)` - No open session with this ID (missing or already closed)
    pub async fn close(&self, id: i64) -> DbResult<Option<TableSession>> {
        debug!(session_id = id, "Closing table session");

        let now = Utc::now();

        let session = sqlx::query_as::<_, TableSession>(
            r#"
            UPDATE tables_sessions
            SET closed_at = ?2
            WHERE id = ?1 AND closed_at IS NULL
            RETURNING id, table_id, opened_at, closed_at
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(closed) = &session {
            info!(session_id = closed.id, table_id = closed.table_id, "Table session closed");
        }

        Ok(session)
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn list_sessions(&self) -> CoreResult<Vec<TableSession>> {
        Ok(self.list().await?)
    }

    async fn find_session(&self, id: i64) -> CoreResult<Option<TableSession>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn latest_session_for_table(&self, table_id: i64) -> CoreResult<Option<TableSession>> {
        Ok(self.latest_for_table(table_id).await?)
    }

    async fn insert_open_session(&self, table_id: i64) -> CoreResult<TableSession> {
        self.insert_open(table_id).await.map_err(|err| match err {
            DbError::UniqueViolation { .. } => CoreError::TableAlreadyOpen,
            DbError::ForeignKeyViolation { .. } => CoreError::TableNotFound,
            other => other.into(),
        })
    }

    async fn close_session(&self, id: i64) -> CoreResult<Option<TableSession>> {
        Ok(self.close(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
