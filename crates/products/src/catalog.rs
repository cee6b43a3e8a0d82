use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Money, ProductId};
use stockroom_inventory::{StockLevels, StockOperation, Stocked, apply_stock_change};

/// Catalog entry with its stock fields, as stored in the `products` table.
///
/// `stock_status` is deliberately not a field: call [`Stocked::stock_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub unit: String,
    /// Price in smallest currency unit. Missing prices read as zero.
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(flatten)]
    pub levels: StockLevels,
}

impl Product {
    pub fn price_or_zero(&self) -> Money {
        self.price.unwrap_or(Money::ZERO)
    }

    /// Quantity to persist after applying `operation` to the current stock.
    ///
    /// Does not mutate `self`: the stored row is authoritative, so callers should
    /// pass a freshly fetched product (or use an atomic store operation).
    pub fn next_stock_quantity(
        &self,
        amount: i64,
        operation: StockOperation,
    ) -> DomainResult<i64> {
        apply_stock_change(self.stock_quantity, amount, operation)
    }

    /// Replace the editable catalog fields. Stock quantity is left untouched;
    /// it only changes through the stock ledger.
    pub fn update_details(&mut self, details: ProductDetails) -> DomainResult<()> {
        details.validate()?;
        self.title = details.title.trim().to_string();
        self.unit = details.unit.trim().to_string();
        self.price = Some(details.price);
        self.description = details.description;
        self.levels = details.levels;
        tracing::debug!(product_id = %self.id, "product details updated");
        Ok(())
    }
}

impl Stocked for Product {
    fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    fn min_stock_level(&self) -> i64 {
        self.levels.min_stock_level
    }
}

/// Editable catalog fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub title: String,
    pub unit: String,
    pub price: Money,
    pub description: Option<String>,
    pub levels: StockLevels,
}

impl ProductDetails {
    fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::invalid_argument("title cannot be empty"));
        }
        if self.unit.trim().is_empty() {
            return Err(DomainError::invalid_argument("unit cannot be empty"));
        }
        self.levels.validate()
    }
}

/// Draft for a product that does not exist yet.
///
/// Title, price, and unit are required. Stock fields fall back to an initial
/// quantity of zero and the supplied default thresholds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub unit: String,
    pub price: Option<Money>,
    pub description: Option<String>,
    pub stock_quantity: Option<i64>,
    pub min_stock_level: Option<i64>,
    pub max_stock_level: Option<i64>,
}

impl NewProduct {
    /// Validate the draft and turn it into a catalog entry with a fresh id.
    pub fn into_product(self, defaults: StockLevels) -> DomainResult<Product> {
        self.into_product_with_id(ProductId::generate(), defaults)
    }

    pub fn into_product_with_id(
        self,
        id: ProductId,
        defaults: StockLevels,
    ) -> DomainResult<Product> {
        let price = self
            .price
            .ok_or_else(|| DomainError::invalid_argument("price is required"))?;

        let stock_quantity = self.stock_quantity.unwrap_or(0);
        if stock_quantity < 0 {
            return Err(DomainError::invalid_argument(format!(
                "initial stock quantity must be non-negative (got {stock_quantity})"
            )));
        }

        let levels = StockLevels {
            min_stock_level: self.min_stock_level.unwrap_or(defaults.min_stock_level),
            max_stock_level: self.max_stock_level.unwrap_or(defaults.max_stock_level),
        };

        let mut product = Product {
            id,
            title: String::new(),
            unit: String::new(),
            price: None,
            description: None,
            stock_quantity,
            levels,
        };
        product.update_details(ProductDetails {
            title: self.title,
            unit: self.unit,
            price,
            description: self.description,
            levels,
        })?;

        tracing::debug!(
            product_id = %product.id,
            stock_quantity,
            status = %product.stock_status(),
            "product drafted"
        );
        Ok(product)
    }
}
