//! # Table Repository
//!
//! Dining room tables. Written by the seed binary, read by the API.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use tableside_core::ports::TableStore;
use tableside_core::{CoreResult, Table};

/// Repository for table database operations.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    /// Lists all tables ordered by table number.
    pub async fn list(&self) -> DbResult<Vec<Table>> {
        let tables = sqlx::query_as::<_, Table>(
            r#"
            SELECT id, table_number, capacity, created_at, updated_at
            FROM tables
            ORDER BY table_number ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = tables.len(), "Listed tables");
        Ok(tables)
    }

    /// Gets a table by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Table>> {
        let table = sqlx::query_as::<_, Table>(
            r#"
            SELECT id, table_number, capacity, created_at, updated_at
            FROM tables
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(table)
    }

    /// Gets a table by the number printed on it.
    pub async fn get_by_number(&self, table_number: i64) -> DbResult<Option<Table>> {
        let table = sqlx::query_as::<_, Table>(
            r#"
            SELECT id, table_number, capacity, created_at, updated_at
            FROM tables
            WHERE table_number = ?1
            "#,
        )
        .bind(table_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(table)
    }

    /// Inserts a table.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Table number already exists
    pub async fn insert(&self, table_number: i64, capacity: Option<i64>) -> DbResult<Table> {
        debug!(table_number, ?capacity, "Inserting table");

        let now = Utc::now();

        let table = sqlx::query_as::<_, Table>(
            r#"
            INSERT INTO tables (table_number, capacity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, table_number, capacity, created_at, updated_at
            "#,
        )
        .bind(table_number)
        .bind(capacity)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(table)
    }

    /// Counts tables (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tables")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl TableStore for TableRepository {
    async fn list_tables(&self) -> CoreResult<Vec<Table>> {
        Ok(self.list().await?)
    }

    async fn find_table(&self, id: i64) -> CoreResult<Option<Table>> {
        Ok(self.get_by_id(id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::repository::test_support::memory_db;

    #[tokio::test]
    async fn test_insert_and_list_ordered_by_number() {
        let db = memory_db().await;
        let repo = db.tables();

        repo.insert(3, Some(6)).await.unwrap();
        repo.insert(1, Some(2)).await.unwrap();
        repo.insert(2, None).await.unwrap();

        let numbers: Vec<i64> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|t| t.table_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_table_number() {
        let db = memory_db().await;
        let repo = db.tables();

        repo.insert(1, Some(4)).await.unwrap();
        let err = repo.insert(1, Some(2)).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_get_by_id_and_number() {
        let db = memory_db().await;
        let repo = db.tables();

        let created = repo.insert(7, Some(4)).await.unwrap();
        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.table_number, 7);
        assert_eq!(by_id.capacity, Some(4));

        assert!(repo.get_by_number(7).await.unwrap().is_some());
        assert!(repo.get_by_number(8).await.unwrap().is_none());
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }
}
