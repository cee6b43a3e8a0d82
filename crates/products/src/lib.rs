//! Product catalog records.
//!
//! Catalog entries as the back office sees them: descriptive fields plus the
//! stock quantity and thresholds consumed by `stockroom-inventory`.

pub mod catalog;
pub mod overview;
pub mod search;

pub use catalog::{NewProduct, Product, ProductDetails};
pub use overview::StockOverview;
pub use search::search_products;
