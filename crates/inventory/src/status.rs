use serde::{Deserialize, Serialize};

/// Derived stock classification. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::InStock => "in_stock",
        }
    }

    /// Low and out-of-stock products drive restock alerts.
    pub fn needs_restock(self) -> bool {
        matches!(self, StockStatus::OutOfStock | StockStatus::LowStock)
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way stock classification.
///
/// - `out_of_stock` when nothing is on hand;
/// - `low_stock` when `quantity <= min_stock_level`;
/// - `in_stock` otherwise.
///
/// Total over all inputs: a (corrupt) negative quantity classifies as out of stock.
pub fn classify(quantity: i64, min_stock_level: i64) -> StockStatus {
    if quantity <= 0 {
        StockStatus::OutOfStock
    } else if quantity <= min_stock_level {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}
