//! # Product Repository
//!
//! Database operations for the menu.
//!
//! ## Name Filter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /products?name=pizza                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  like_pattern("pizza") = "%pizza%"                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  name LIKE '%pizza%' ESCAPE '\'   (case-insensitive for ASCII only)    │
//! │       │                                                                 │
//! │       ├── Pizza Margherita  ← MATCH                                    │
//! │       ├── Pizza Diavola     ← MATCH                                    │
//! │       └── Tiramisu                                                     │
//! │                                                                         │
//! │  "50%" searches for a literal percent sign: "%50\%%"                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tableside_core::commands::{ProductDraft, ProductFilter};
use tableside_core::ports::ProductStore;
use tableside_core::{CoreError, CoreResult, Money, Product};

/// Builds a `LIKE` substring pattern with `\` escaping the wildcards.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by name.
    ///
    /// ## Arguments
    /// * `name` - Case-insensitive substring filter; `None` lists everything
    pub async fn list(&self, name: Option<&str>) -> DbResult<Vec<Product>> {
        let pattern = name.map(like_pattern);

        debug!(filter = ?pattern, "Listing products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents AS price, created_at, updated_at
            FROM products
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\'
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price_cents AS price, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn insert(&self, name: &str, price: Money) -> DbResult<Product> {
        debug!(name = %name, price = %price, "Inserting product");

        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, name, price_cents AS price, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces name and price of a product.
    ///
    /// Existing orders keep their own `price_cents`.
    ///
    /// ## Returns
    /// * `Ok(None)` - Product doesn't exist
    pub async fn update(&self, id: i64, name: &str, price: Money) -> DbResult<Option<Product>> {
        debug!(id, name = %name, price = %price, "Updating product");

        let now = Utc::now();

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = ?2, price_cents = ?3, updated_at = ?4
            WHERE id = ?1
            RETURNING id, name, price_cents AS price, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(price)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// * `Ok(false)` - Product doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - Orders reference the product
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_products(&self, filter: &ProductFilter) -> CoreResult<Vec<Product>> {
        Ok(self.list(filter.name()).await?)
    }

    async fn find_product(&self, id: i64) -> CoreResult<Option<Product>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn insert_product(&self, draft: &ProductDraft) -> CoreResult<Product> {
        Ok(self.insert(draft.name(), draft.price()).await?)
    }

    async fn update_product(&self, id: i64, draft: &ProductDraft) -> CoreResult<Option<Product>> {
        Ok(self.update(id, draft.name(), draft.price()).await?)
    }

    async fn delete_product(&self, id: i64) -> CoreResult<bool> {
        self.delete(id).await.map_err(|err| match err {
            DbError::ForeignKeyViolation { .. } => CoreError::ProductInUse,
            other => other.into(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
