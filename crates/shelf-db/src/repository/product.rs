//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Catalog snapshots (by id, by price, filtered by name)
//! - CRUD operations
//! - Storage-side inventory aggregates
//!
//! ## Snapshot Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Which read feeds which analytic                      │
//! │                                                                         │
//! │  list_by_price()  ORDER BY price_cents, id  ──► find_combinations       │
//! │  list_all()       ORDER BY id               ──► summarize               │
//! │                                                                         │
//! │  Ids are UUID v7, so "ORDER BY id" is creation order and the first      │
//! │  product created wins an inventory-value tie.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use shelf_core::validation::validate_name_query;
use shelf_core::{InventoryValue, Money, Product, ProductDraft};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let created = repo.insert(draft).await?;
/// let found = repo.get_by_id(&created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Lists every product, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at, updated_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed all products");
        Ok(products)
    }

    /// Lists every product by price ascending; equal prices by id.
    pub async fn list_by_price(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at, updated_at
            FROM products
            ORDER BY price_cents, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products by price");
        Ok(products)
    }

    /// Case-insensitive substring match on the product name.
    ///
    /// `%` and `_` in the fragment match literally. A blank fragment
    /// matches every product.
    ///
    /// ## Example
    /// ```rust,ignore
    /// // "Blue Pen", "pen refill", "Open Notebook"
    /// let pens = repo.search_by_name("PEN").await?;
    /// ```
    pub async fn search_by_name(&self, fragment: &str) -> DbResult<Vec<Product>> {
        let fragment = validate_name_query(fragment)?;
        let pattern = like_pattern(&fragment);

        debug!(fragment = %fragment, "Searching products by name");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at, updated_at
            FROM products
            WHERE name LIKE ?1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at, updated_at
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
    ///
    /// The draft is normalized and validated first; the id and both
    /// timestamps are assigned here.
    pub async fn insert(&self, draft: ProductDraft) -> DbResult<Product> {
        let draft = draft.normalized();
        draft.validate()?;

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            name: draft.name,
            description: draft.description,
            price_cents: draft.price_cents,
            stock_quantity: draft.stock_quantity,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_cents, stock_quantity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.stock_quantity)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces the four mutable fields of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - the product as stored after the update
    /// * `Ok(None)` - no product has this id
    pub async fn update(&self, id: &str, draft: ProductDraft) -> DbResult<Option<Product>> {
        let draft = draft.normalized();
        draft.validate()?;

        debug!(id = %id, "Updating product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                stock_quantity = ?5,
                updated_at = ?6
            WHERE id = ?1
            RETURNING id, name, description, price_cents, stock_quantity, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price_cents)
        .bind(draft.stock_quantity)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Deletes a product. Returns `false` when no product has this id.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Sum of `price × stock_quantity`; zero when empty.
    ///
    /// SQLite integers are 64-bit and a single valid product can be worth
    /// more than that, so only the two factors come back from SQL.
    pub async fn total_inventory_value(&self) -> DbResult<InventoryValue> {
        let total = self
            .value_rows()
            .await?
            .into_iter()
            .fold(InventoryValue::zero(), |total, row| {
                total.saturating_add(row.value())
            });

        Ok(total)
    }

    /// The product with the highest inventory value, lowest id on ties.
    pub async fn top_inventory_product(&self) -> DbResult<Option<Product>> {
        let mut top: Option<ValueRow> = None;
        for row in self.value_rows().await? {
            // rows come in id order, strictly greater keeps the lowest id
            if top.as_ref().map_or(true, |best| row.value() > best.value()) {
                top = Some(row);
            }
        }

        match top {
            Some(row) => self.get_by_id(&row.id).await,
            None => Ok(None),
        }
    }

    async fn value_rows(&self) -> DbResult<Vec<ValueRow>> {
        let rows = sqlx::query_as::<_, ValueRow>(
            "SELECT id, price_cents, stock_quantity FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// The columns an inventory valuation needs.
#[derive(Debug, sqlx::FromRow)]
struct ValueRow {
    id: String,
    price_cents: i64,
    stock_quantity: i64,
}

impl ValueRow {
    fn value(&self) -> InventoryValue {
        Money::from_cents(self.price_cents).times_quantity(self.stock_quantity)
    }
}

/// Generates a new time-ordered product ID.
pub fn generate_product_id() -> String {
    Uuid::now_v7().to_string()
}

/// Wraps a name fragment for `LIKE ... ESCAPE '\'`.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use shelf_core::{find_combinations, summarize, MAX_PRICE_CENTS, MAX_STOCK_QUANTITY};

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory())
            .await
            .unwrap()
            .products()
    }

    fn draft(name: &str, price_cents: i64, stock_quantity: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            price_cents,
            stock_quantity,
        }
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("pen"), "%pen%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_generated_ids_are_uuids() {
        let id = generate_product_id();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, generate_product_id());
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;

        let created = repo
            .insert(ProductDraft {
                name: "  Notebook ".to_string(),
                description: Some("A5, dotted".to_string()),
                price_cents: 1250,
                stock_quantity: 4,
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Notebook");

        let found = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Notebook");
        assert_eq!(found.description.as_deref(), Some("A5, dotted"));
        assert_eq!(found.price_cents, 1250);
        assert_eq!(found.stock_quantity, 4);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let repo = repo().await;
        assert!(repo.get_by_id(&generate_product_id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_draft() {
        let repo = repo().await;

        let err = repo.insert(draft("Pen", 0, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = repo.insert(draft("   ", 100, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = repo.insert(draft("Pen", 100, -1)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_schema_rejects_rows_that_bypass_validation() {
        let repo = repo().await;

        let err = sqlx::query(
            "INSERT INTO products (id, name, price_cents, stock_quantity, created_at, updated_at)
             VALUES ('x', 'Pen', -5, 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .execute(&repo.pool)
        .await
        .map_err(DbError::from)
        .unwrap_err();

        assert!(matches!(err, DbError::ConstraintViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_all_is_ordered_by_id() {
        let repo = repo().await;
        for (name, price) in [("B", 2000), ("A", 1000), ("C", 500)] {
            repo.insert(draft(name, price, 1)).await.unwrap();
        }

        let all = repo.list_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(all.len(), 3);
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_list_by_price_is_ascending() {
        let repo = repo().await;
        for (name, price) in [("A", 1000), ("B", 2000), ("C", 500), ("D", 1000)] {
            repo.insert(draft(name, price, 1)).await.unwrap();
        }

        let by_price = repo.list_by_price().await.unwrap();
        let prices: Vec<i64> = by_price.iter().map(|p| p.price_cents).collect();

        assert_eq!(prices, vec![500, 1000, 1000, 2000]);
        // equal prices fall back to id order
        assert!(by_price[1].id < by_price[2].id);
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let repo = repo().await;
        for name in ["Blue Pen", "pen refill", "Open Notebook", "Stapler"] {
            repo.insert(draft(name, 100, 1)).await.unwrap();
        }

        let mut found = names(&repo.search_by_name("PEN").await.unwrap())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        found.sort();

        assert_eq!(found, vec!["Blue Pen", "Open Notebook", "pen refill"]);
        assert!(repo.search_by_name("eraser").await.unwrap().is_empty());
        assert_eq!(repo.search_by_name("  ").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_search_matches_wildcards_literally() {
        let repo = repo().await;
        repo.insert(draft("50% off bundle", 100, 1)).await.unwrap();
        repo.insert(draft("500 sheets", 100, 1)).await.unwrap();
        repo.insert(draft("snake_case mug", 100, 1)).await.unwrap();
        repo.insert(draft("snakes mug", 100, 1)).await.unwrap();

        let percent = repo.search_by_name("50%").await.unwrap();
        assert_eq!(names(&percent), vec!["50% off bundle"]);

        let underscore = repo.search_by_name("e_").await.unwrap();
        assert_eq!(names(&underscore), vec!["snake_case mug"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = repo().await;
        let created = repo
            .insert(ProductDraft {
                name: "Pen".to_string(),
                description: Some("black".to_string()),
                price_cents: 150,
                stock_quantity: 10,
            })
            .await
            .unwrap();

        let updated = repo
            .update(&created.id, draft("Gel Pen", 199, 7))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Gel Pen");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price_cents, 199);
        assert_eq!(updated.stock_quantity, 7);
        assert!(updated.updated_at >= created.updated_at);

        let stored = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Gel Pen");
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let repo = repo().await;
        let result = repo
            .update(&generate_product_id(), draft("Pen", 100, 1))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let repo = repo().await;
        let created = repo.insert(draft("Pen", 100, 1)).await.unwrap();

        let err = repo
            .update(&created.id, draft("Pen", 100, -3))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(
            repo.get_by_id(&created.id).await.unwrap().unwrap().stock_quantity,
            1
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let created = repo.insert(draft("Pen", 100, 1)).await.unwrap();

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_aggregates_on_empty_catalog() {
        let repo = repo().await;

        assert!(repo.total_inventory_value().await.unwrap().is_zero());
        assert!(repo.top_inventory_product().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_aggregates_match_summarize() {
        let repo = repo().await;
        repo.insert(draft("A", 1000, 5)).await.unwrap();
        repo.insert(draft("B", 2000, 2)).await.unwrap();
        repo.insert(draft("C", 500, 100)).await.unwrap();

        let summary = summarize(&repo.list_all().await.unwrap());
        let total = repo.total_inventory_value().await.unwrap();
        let top = repo.top_inventory_product().await.unwrap().unwrap();

        assert_eq!(total.cents(), 59_000);
        assert_eq!(total, summary.total_value);
        assert_eq!(top.name, "C");
        assert_eq!(Some(top.id), summary.top_product.map(|p| p.id));
    }

    #[tokio::test]
    async fn test_storage_top_product_tie_matches_summarize() {
        let repo = repo().await;
        repo.insert(draft("Early", 1000, 3)).await.unwrap();
        repo.insert(draft("Late", 3000, 1)).await.unwrap();

        let summary = summarize(&repo.list_all().await.unwrap());
        let top = repo.top_inventory_product().await.unwrap().unwrap();

        assert_eq!(Some(top.id), summary.top_product.map(|p| p.id));
    }

    #[tokio::test]
    async fn test_aggregates_of_largest_valid_products() {
        let repo = repo().await;
        repo.insert(draft("Cheap", 100, 1)).await.unwrap();
        repo.insert(draft("Vault A", MAX_PRICE_CENTS, MAX_STOCK_QUANTITY))
            .await
            .unwrap();
        repo.insert(draft("Vault B", MAX_PRICE_CENTS, MAX_STOCK_QUANTITY))
            .await
            .unwrap();

        let stored = repo.list_all().await.unwrap();
        assert_eq!(stored[1].price_cents, MAX_PRICE_CENTS);
        assert_eq!(stored[1].stock_quantity, MAX_STOCK_QUANTITY);

        let total = repo.total_inventory_value().await.unwrap();
        let top = repo.top_inventory_product().await.unwrap().unwrap();
        let summary = summarize(&stored);

        assert_eq!(total.cents(), 2 * 2_147_483_646_997_852_516_353 + 100);
        assert_eq!(total, summary.total_value);
        assert_eq!(top.name, "Vault A");
        assert_eq!(Some(top.id), summary.top_product.map(|p| p.id));
    }

    #[tokio::test]
    async fn test_price_snapshot_feeds_combinations() {
        let repo = repo().await;
        repo.insert(draft("A", 1000, 5)).await.unwrap();
        repo.insert(draft("B", 2000, 2)).await.unwrap();
        repo.insert(draft("C", 500, 100)).await.unwrap();

        let snapshot = repo.list_by_price().await.unwrap();
        let combos = find_combinations(&snapshot, Money::from_cents(3000)).unwrap();

        let rows: Vec<(Vec<String>, i64)> = combos
            .into_iter()
            .map(|c| (c.product_names, c.total.cents()))
            .collect();

        assert_eq!(
            rows,
            vec![
                (vec!["A".to_string(), "B".to_string()], 3000),
                (vec!["C".to_string(), "B".to_string()], 2500),
                (vec!["C".to_string(), "A".to_string()], 1500),
            ]
        );
    }
}
