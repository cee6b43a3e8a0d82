//! Infrastructure layer: configuration and stock persistence adapters.

pub mod config;
pub mod stock_store;

pub use config::{BackOfficeConfig, ConfigError};
pub use stock_store::{
    InMemoryStockStore, PostgresStockStore, StockStore, StockStoreError, apply_stock_change,
    build_stock_store,
};
