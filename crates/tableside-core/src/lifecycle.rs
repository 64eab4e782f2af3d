//! # Session Lifecycle
//!
//! Opening and closing table sessions.
//!
//! ## State Machine (per table)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐   open    ┌──────┐   close   ┌────────┐                      │
//! │   │ NONE │─────────► │ OPEN │─────────► │ CLOSED │                      │
//! │   └──────┘           └──────┘           └────────┘                      │
//! │                        │  ▲                  │                          │
//! │            open → 409  │  └──────open────────┘ (new session)            │
//! │                        ▼                                                │
//! │                 "this table has already been opened"                    │
//! │                                                                         │
//! │   close on CLOSED → 409 "this session table has already been closed"    │
//! │   close on NONE   → 404 "session table not found"                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invariant: a table has at most one session with `closed_at = null`.
//! The guards below check it against the latest session; the store
//! enforces it again at insert time for concurrent opens.

use crate::commands::{CloseSession, OpenSession};
use crate::error::{CoreError, CoreResult};
use crate::ports::{SessionStore, TableStore};
use crate::types::{SessionState, Table, TableSession};

// =============================================================================
// Guards
// =============================================================================

/// Checks that a table whose latest session is `latest` may be opened.
pub fn ensure_can_open(latest: Option<&TableSession>) -> CoreResult<()> {
    match SessionState::of(latest) {
        SessionState::Open => Err(CoreError::TableAlreadyOpen),
        SessionState::None | SessionState::Closed => Ok(()),
    }
}

/// Checks that `session` exists and is still open.
pub fn ensure_can_close(session: Option<&TableSession>) -> CoreResult<&TableSession> {
    match session {
        None => Err(CoreError::SessionNotFound),
        Some(s) if !s.is_open() => Err(CoreError::SessionAlreadyClosed),
        Some(s) => Ok(s),
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Opens a new session on a table.
///
/// ## Flow
/// ```text
/// OpenSession { table_id }
///      │
///      ├── table missing?          → TableNotFound
///      ├── latest session open?    → TableAlreadyOpen
///      └── insert { opened_at = now, closed_at = null }
///               └── lost a race?   → TableAlreadyOpen (from the store)
/// ```
pub async fn open_session(
    tables: &impl TableStore,
    sessions: &impl SessionStore,
    cmd: OpenSession,
) -> CoreResult<TableSession> {
    let table_id = cmd.table_id();

    if tables.find_table(table_id).await?.is_none() {
        return Err(CoreError::TableNotFound);
    }

    let latest = sessions.latest_session_for_table(table_id).await?;
    ensure_can_open(latest.as_ref())?;

    sessions.insert_open_session(table_id).await
}

/// Closes an open session and returns it with `closed_at` set.
pub async fn close_session(
    sessions: &impl SessionStore,
    cmd: CloseSession,
) -> CoreResult<TableSession> {
    let id = cmd.session_id();

    let current = sessions.find_session(id).await?;
    ensure_can_close(current.as_ref())?;

    // Zero rows here means a concurrent close won.
    sessions
        .close_session(id)
        .await?
        .ok_or(CoreError::SessionAlreadyClosed)
}

/// All sessions, open first.
pub async fn list_sessions(sessions: &impl SessionStore) -> CoreResult<Vec<TableSession>> {
    sessions.list_sessions().await
}

/// All tables by number.
pub async fn list_tables(tables: &impl TableStore) -> CoreResult<Vec<Table>> {
    tables.list_tables().await
}

// =============================================================================
// Unit Tests
// =============================================================================
