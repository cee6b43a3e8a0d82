use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use stockroom_core::ProductId;
use stockroom_inventory::StockOperation;

use super::{StockStore, StockStoreError};

/// In-memory stock store for tests/dev.
///
/// Each primitive holds the write lock across read, compute, and write, which
/// is what makes it atomic.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    inner: RwLock<HashMap<ProductId, i64>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quantities<I>(quantities: I) -> Self
    where
        I: IntoIterator<Item = (ProductId, i64)>,
    {
        Self {
            inner: RwLock::new(quantities.into_iter().collect()),
        }
    }

    async fn update(
        &self,
        product_id: &ProductId,
        amount: i64,
        operation: StockOperation,
    ) -> Result<i64, StockStoreError> {
        let mut map = self.inner.write().await;
        let slot = map
            .get_mut(product_id)
            .ok_or_else(|| StockStoreError::NotFound(product_id.clone()))?;
        let next = stockroom_inventory::apply_stock_change(*slot, amount, operation)?;
        *slot = next;
        Ok(next)
    }
}

#[async_trait]
impl StockStore for InMemoryStockStore {
    async fn fetch_quantity(&self, product_id: &ProductId) -> Result<i64, StockStoreError> {
        self.inner
            .read()
            .await
            .get(product_id)
            .copied()
            .ok_or_else(|| StockStoreError::NotFound(product_id.clone()))
    }

    async fn increment(&self, product_id: &ProductId, amount: i64) -> Result<i64, StockStoreError> {
        self.update(product_id, amount, StockOperation::Add).await
    }

    async fn decrement_clamped(
        &self,
        product_id: &ProductId,
        amount: i64,
    ) -> Result<i64, StockStoreError> {
        self.update(product_id, amount, StockOperation::Subtract).await
    }

    async fn compare_and_set(
        &self,
        product_id: &ProductId,
        expected: i64,
        new: i64,
    ) -> Result<bool, StockStoreError> {
        let mut map = self.inner.write().await;
        let slot = map
            .get_mut(product_id)
            .ok_or_else(|| StockStoreError::NotFound(product_id.clone()))?;
        if *slot != expected {
            return Ok(false);
        }
        *slot = stockroom_inventory::apply_stock_change(*slot, new, StockOperation::Set)?;
        Ok(true)
    }
}
