use serde::{Deserialize, Serialize};

use stockroom_inventory::{StockStatus, Stocked};

/// Catalog-wide stock counts for the overview panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOverview {
    pub total_products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Sum of on-hand units; corrupt negative quantities count as zero.
    pub total_units: i64,
}

impl StockOverview {
    pub fn from_products<T: Stocked>(products: &[T]) -> Self {
        products.iter().fold(Self::default(), |mut overview, product| {
            overview.total_products += 1;
            overview.total_units = overview
                .total_units
                .saturating_add(product.stock_quantity().max(0));
            match product.stock_status() {
                StockStatus::InStock => overview.in_stock += 1,
                StockStatus::LowStock => overview.low_stock += 1,
                StockStatus::OutOfStock => overview.out_of_stock += 1,
            }
            overview
        })
    }

    pub fn alert_count(&self) -> usize {
        self.low_stock + self.out_of_stock
    }
}
