//! Stock persistence with atomic read-modify-write.
//!
//! Computing a new quantity from a fetched value and writing it back in two
//! round trips loses updates under concurrent writers. Stores implementing
//! [`StockStore`] must instead provide:
//!
//! - an atomic increment and a clamped atomic decrement;
//! - an atomic compare-and-set for absolute (`set`) updates.
//!
//! [`apply_stock_change`] maps each [`StockOperation`] onto those primitives.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{DomainError, ProductId};
use stockroom_inventory::{StockOperation, validate_amount};

use crate::config::BackOfficeConfig;

pub use in_memory::InMemoryStockStore;
pub use postgres::PostgresStockStore;

#[derive(Debug, Error)]
pub enum StockStoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Another writer changed the quantity between read and write.
    #[error("concurrent stock update on {product_id} (expected {expected})")]
    Conflict { product_id: ProductId, expected: i64 },

    #[error("stock store unavailable: {0}")]
    Unavailable(String),
}

/// Storage primitives for per-product stock quantities.
///
/// Every method is a single atomic step against the stored row. Implementations
/// must refuse to modify a row whose stored quantity is negative and report it
/// as [`DomainError::InvariantViolation`].
#[async_trait]
pub trait StockStore: Send + Sync {
    async fn fetch_quantity(&self, product_id: &ProductId) -> Result<i64, StockStoreError>;

    /// Atomically add `amount`; returns the stored quantity afterwards.
    async fn increment(&self, product_id: &ProductId, amount: i64) -> Result<i64, StockStoreError>;

    /// Atomically subtract `amount`, clamping at zero; returns the stored
    /// quantity afterwards.
    async fn decrement_clamped(
        &self,
        product_id: &ProductId,
        amount: i64,
    ) -> Result<i64, StockStoreError>;

    /// Store `new` only if the current value is still `expected`.
    async fn compare_and_set(
        &self,
        product_id: &ProductId,
        expected: i64,
        new: i64,
    ) -> Result<bool, StockStoreError>;
}

#[async_trait]
impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    async fn fetch_quantity(&self, product_id: &ProductId) -> Result<i64, StockStoreError> {
        (**self).fetch_quantity(product_id).await
    }

    async fn increment(&self, product_id: &ProductId, amount: i64) -> Result<i64, StockStoreError> {
        (**self).increment(product_id, amount).await
    }

    async fn decrement_clamped(
        &self,
        product_id: &ProductId,
        amount: i64,
    ) -> Result<i64, StockStoreError> {
        (**self).decrement_clamped(product_id, amount).await
    }

    async fn compare_and_set(
        &self,
        product_id: &ProductId,
        expected: i64,
        new: i64,
    ) -> Result<bool, StockStoreError> {
        (**self).compare_and_set(product_id, expected, new).await
    }
}

/// Apply a stock change through the store's atomic primitives.
///
/// `add` and `subtract` never conflict. `set` reads the current value and
/// writes with compare-and-set; if another writer got in between it returns
/// [`StockStoreError::Conflict`] without retrying.
pub async fn apply_stock_change<S>(
    store: &S,
    product_id: &ProductId,
    amount: i64,
    operation: StockOperation,
) -> Result<i64, StockStoreError>
where
    S: StockStore + ?Sized,
{
    validate_amount(amount, operation)?;

    let new_quantity = match operation {
        StockOperation::Add => store.increment(product_id, amount).await?,
        StockOperation::Subtract => store.decrement_clamped(product_id, amount).await?,
        StockOperation::Set => {
            let current = store.fetch_quantity(product_id).await?;
            let target = stockroom_inventory::apply_stock_change(current, amount, operation)?;
            if !store.compare_and_set(product_id, current, target).await? {
                tracing::warn!(%product_id, expected = current, "stock set lost a race");
                return Err(StockStoreError::Conflict {
                    product_id: product_id.clone(),
                    expected: current,
                });
            }
            target
        }
    };

    tracing::info!(%product_id, amount, %operation, new_quantity, "stock updated");
    Ok(new_quantity)
}

/// Pick the store for this process: Postgres when a database URL is
/// configured, otherwise an empty in-memory store (dev/test).
pub async fn build_stock_store(
    config: &BackOfficeConfig,
) -> Result<Arc<dyn StockStore>, StockStoreError> {
    match config.database_url.as_deref() {
        Some(url) => Ok(Arc::new(PostgresStockStore::connect(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stock store");
            Ok(Arc::new(InMemoryStockStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn without_database_url_the_store_is_in_memory() {
        let store = build_stock_store(&BackOfficeConfig::default()).await.unwrap();
        let err = apply_stock_change(&*store, &ProductId::from("p"), 1, StockOperation::Add)
            .await
            .unwrap_err();
        assert!(matches!(err, StockStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn arc_wrapped_store_delegates() {
        let store = Arc::new(InMemoryStockStore::with_quantities([(ProductId::from("p"), 2)]));
        let quantity = apply_stock_change(&store, &ProductId::from("p"), 3, StockOperation::Add)
            .await
            .unwrap();
        assert_eq!(quantity, 5);
        assert_eq!(store.fetch_quantity(&ProductId::from("p")).await.unwrap(), 5);
    }
}
