use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

use crate::status::{StockStatus, classify};

pub const DEFAULT_MIN_STOCK_LEVEL: i64 = 10;
pub const DEFAULT_MAX_STOCK_LEVEL: i64 = 100;

/// Per-product stock thresholds.
///
/// `max_stock_level` is informational only; nothing caps quantities at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    #[serde(default = "default_min")]
    pub min_stock_level: i64,
    #[serde(default = "default_max")]
    pub max_stock_level: i64,
}

fn default_min() -> i64 {
    DEFAULT_MIN_STOCK_LEVEL
}

fn default_max() -> i64 {
    DEFAULT_MAX_STOCK_LEVEL
}

impl Default for StockLevels {
    fn default() -> Self {
        Self {
            min_stock_level: DEFAULT_MIN_STOCK_LEVEL,
            max_stock_level: DEFAULT_MAX_STOCK_LEVEL,
        }
    }
}

impl StockLevels {
    /// Build validated thresholds.
    pub fn new(min_stock_level: i64, max_stock_level: i64) -> DomainResult<Self> {
        let levels = Self {
            min_stock_level,
            max_stock_level,
        };
        levels.validate()?;
        Ok(levels)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.min_stock_level < 0 {
            return Err(DomainError::invalid_argument(format!(
                "min_stock_level must be non-negative (got {})",
                self.min_stock_level
            )));
        }
        if self.max_stock_level < 0 {
            return Err(DomainError::invalid_argument(format!(
                "max_stock_level must be non-negative (got {})",
                self.max_stock_level
            )));
        }
        Ok(())
    }
}

/// Anything carrying an on-hand quantity and a low-stock threshold.
pub trait Stocked {
    fn stock_quantity(&self) -> i64;

    fn min_stock_level(&self) -> i64;

    /// Always recomputed; there is no stored status to go stale.
    fn stock_status(&self) -> StockStatus {
        classify(self.stock_quantity(), self.min_stock_level())
    }
}

/// Products needing a restock (low or out of stock), in input order.
pub fn select_low_stock<T: Stocked>(items: &[T]) -> Vec<&T> {
    let selected: Vec<&T> = items
        .iter()
        .filter(|item| item.stock_status().needs_restock())
        .collect();
    tracing::debug!(
        total = items.len(),
        alerts = selected.len(),
        "low stock selection computed"
    );
    selected
}
