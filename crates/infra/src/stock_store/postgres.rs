//! Postgres-backed stock store.
//!
//! Each primitive is a single `UPDATE ... RETURNING` statement, so the row lock
//! Postgres takes for the update is the only synchronization needed.
//!
//! Expects a `products` table with an `id` column (any type with a text cast)
//! and an integer `stock_quantity` column.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use stockroom_core::{DomainError, ProductId};

use super::{StockStore, StockStoreError};

const FETCH_SQL: &str = r#"
    SELECT stock_quantity::bigint
    FROM products
    WHERE id::text = $1
"#;

const INCREMENT_SQL: &str = r#"
    UPDATE products
    SET stock_quantity = stock_quantity + $2,
        updated_at = NOW()
    WHERE id::text = $1 AND stock_quantity >= 0
    RETURNING stock_quantity::bigint
"#;

const DECREMENT_CLAMPED_SQL: &str = r#"
    UPDATE products
    SET stock_quantity = GREATEST(0, stock_quantity - $2),
        updated_at = NOW()
    WHERE id::text = $1 AND stock_quantity >= 0
    RETURNING stock_quantity::bigint
"#;

const COMPARE_AND_SET_SQL: &str = r#"
    UPDATE products
    SET stock_quantity = $3,
        updated_at = NOW()
    WHERE id::text = $1 AND stock_quantity = $2
"#;

/// Postgres stock store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PostgresStockStore {
    pool: Arc<PgPool>,
}

impl PostgresStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect with a small pool; the back office is a low-traffic client.
    pub async fn connect(database_url: &str) -> Result<Self, StockStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(database_error)?;
        tracing::info!("connected to stock database");
        Ok(Self::new(pool))
    }

    /// An update matched no row: either the product is missing or its stored
    /// quantity is negative.
    async fn explain_miss(&self, product_id: &ProductId) -> StockStoreError {
        match self.fetch_quantity(product_id).await {
            Ok(quantity) if quantity < 0 => DomainError::invariant(format!(
                "stock quantity cannot be negative (found {quantity})"
            ))
            .into(),
            Ok(_) => StockStoreError::Unavailable(format!(
                "update on {product_id} matched no row"
            )),
            Err(err) => err,
        }
    }
}

/// SQLSTATE raised when an `add` pushes the column past its integer range.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

fn database_error(err: sqlx::Error) -> StockStoreError {
    let code = match &err {
        sqlx::Error::Database(db) => db.code().map(|code| code.into_owned()),
        _ => None,
    };
    error_for_sqlstate(code.as_deref(), err.to_string())
}

fn error_for_sqlstate(code: Option<&str>, detail: String) -> StockStoreError {
    if code == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
        tracing::warn!(error = %detail, "stock quantity out of range");
        return DomainError::invalid_argument("stock quantity overflow").into();
    }
    tracing::error!(error = %detail, "stock database error");
    StockStoreError::Unavailable(detail)
}

#[async_trait]
impl StockStore for PostgresStockStore {
    async fn fetch_quantity(&self, product_id: &ProductId) -> Result<i64, StockStoreError> {
        sqlx::query_scalar::<_, i64>(FETCH_SQL)
            .bind(product_id.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(database_error)?
            .ok_or_else(|| StockStoreError::NotFound(product_id.clone()))
    }

    async fn increment(&self, product_id: &ProductId, amount: i64) -> Result<i64, StockStoreError> {
        let updated = sqlx::query_scalar::<_, i64>(INCREMENT_SQL)
            .bind(product_id.as_str())
            .bind(amount)
            .fetch_optional(&*self.pool)
            .await
            .map_err(database_error)?;
        match updated {
            Some(quantity) => Ok(quantity),
            None => Err(self.explain_miss(product_id).await),
        }
    }

    async fn decrement_clamped(
        &self,
        product_id: &ProductId,
        amount: i64,
    ) -> Result<i64, StockStoreError> {
        let updated = sqlx::query_scalar::<_, i64>(DECREMENT_CLAMPED_SQL)
            .bind(product_id.as_str())
            .bind(amount)
            .fetch_optional(&*self.pool)
            .await
            .map_err(database_error)?;
        match updated {
            Some(quantity) => Ok(quantity),
            None => Err(self.explain_miss(product_id).await),
        }
    }

    async fn compare_and_set(
        &self,
        product_id: &ProductId,
        expected: i64,
        new: i64,
    ) -> Result<bool, StockStoreError> {
        if new < 0 {
            return Err(DomainError::invalid_argument(format!(
                "stock quantity must be non-negative (got {new})"
            ))
            .into());
        }
        let result = sqlx::query(COMPARE_AND_SET_SQL)
            .bind(product_id.as_str())
            .bind(expected)
            .bind(new)
            .execute(&*self.pool)
            .await
            .map_err(database_error)?;
        Ok(result.rows_affected() == 1)
    }
}
