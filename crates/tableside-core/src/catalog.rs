//! # Catalog
//!
//! Product maintenance: list, create, update and delete menu items.
//!
//! Updating a product never touches existing orders; they keep the price
//! they were placed at.

use crate::commands::{ProductDraft, ProductFilter};
use crate::error::{CoreError, CoreResult};
use crate::ports::ProductStore;
use crate::types::Product;
use crate::validation::validate_id;

/// Products matching `filter`, ordered by name.
pub async fn list_products(
    products: &impl ProductStore,
    filter: &ProductFilter,
) -> CoreResult<Vec<Product>> {
    products.list_products(filter).await
}

pub async fn create_product(
    products: &impl ProductStore,
    draft: ProductDraft,
) -> CoreResult<Product> {
    products.insert_product(&draft).await
}

/// Replaces name and price of an existing product.
pub async fn update_product(
    products: &impl ProductStore,
    id: i64,
    draft: ProductDraft,
) -> CoreResult<Product> {
    let id = validate_id("id", id)?;
    products
        .update_product(id, &draft)
        .await?
        .ok_or(CoreError::ProductNotFound)
}

/// Deletes a product that no order references.
pub async fn delete_product(products: &impl ProductStore, id: i64) -> CoreResult<()> {
    let id = validate_id("id", id)?;

    if products.find_product(id).await?.is_none() {
        return Err(CoreError::ProductNotFound);
    }

    if products.delete_product(id).await? {
        Ok(())
    } else {
        Err(CoreError::ProductNotFound)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{OpenSessionInput, PlaceOrderInput, ProductFilterInput, ProductInput};
    use crate::memory::MemoryStore;
    use crate::money::Money;
    use crate::{lifecycle, ordering};

    fn draft(name: &str, cents: i64) -> ProductDraft {
        ProductInput {
            name: name.to_string(),
            price: Money::from_cents(cents),
        }
        .validate()
        .unwrap()
    }

    fn filter(name: Option<&str>) -> ProductFilter {
        ProductFilterInput {
            name: name.map(str::to_string),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_products_filter() {
        let store = MemoryStore::with_tables(0);
        create_product(&store, draft("Pizza Margherita", 2550)).await.unwrap();
        create_product(&store, draft("Pizza Diavola", 2800)).await.unwrap();
        create_product(&store, draft("Tiramisu", 900)).await.unwrap();

        let all = list_products(&store, &filter(Some(""))).await.unwrap();
        assert_eq!(all.len(), 3);
        // ordered by name
        assert_eq!(all[0].name, "Pizza Diavola");

        let pizzas = list_products(&store, &filter(Some("pizza"))).await.unwrap();
        assert_eq!(pizzas.len(), 2);

        let none = list_products(&store, &filter(Some("sushi"))).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_product() {
        let store = MemoryStore::with_tables(0);
        let created = create_product(&store, draft("Pizza Margherita", 2550)).await.unwrap();

        let updated = update_product(&store, created.id, draft("Pizza Margherita XL", 3100))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Pizza Margherita XL");
        assert_eq!(updated.price.cents(), 3100);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let store = MemoryStore::with_tables(0);
        let err = update_product(&store, 3, draft("Pizza Margherita", 2550))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound));
        assert_eq!(err.to_string(), "Product not found");
    }

    #[tokio::test]
    async fn test_delete_product() {
        let store = MemoryStore::with_tables(0);
        let created = create_product(&store, draft("Tiramisu", 900)).await.unwrap();

        delete_product(&store, created.id).await.unwrap();
        assert!(matches!(
            delete_product(&store, created.id).await,
            Err(CoreError::ProductNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_ordered_product_conflicts() {
        let store = MemoryStore::with_tables(1);
        let product = create_product(&store, draft("Tiramisu", 900)).await.unwrap();
        let session = lifecycle::open_session(
            &store,
            &store,
            OpenSessionInput { table_id: 1 }.validate().unwrap(),
        )
        .await
        .unwrap();
        ordering::place_order(
            &store,
            &store,
            &store,
            PlaceOrderInput {
                table_session_id: session.id,
                product_id: product.id,
                quantity: 1,
            }
            .validate()
            .unwrap(),
        )
        .await
        .unwrap();

        let err = delete_product(&store, product.id).await.unwrap_err();
        assert!(matches!(err, CoreError::ProductInUse));
    }
}
