//! Inventory stock ledger.
//!
//! This crate contains the business rules for stock quantities, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). Persisting
//! a computed quantity is the caller's job; see `stockroom-infra` for stores
//! that provide the atomic primitives needed to do that safely.

pub mod ledger;
pub mod levels;
pub mod status;

pub use ledger::{
    QUICK_ADD_AMOUNT, StockOperation, apply_stock_change, mark_out_of_stock, quick_add_10,
    validate_amount,
};
pub use levels::{
    DEFAULT_MAX_STOCK_LEVEL, DEFAULT_MIN_STOCK_LEVEL, StockLevels, Stocked, select_low_stock,
};
pub use status::{StockStatus, classify};
