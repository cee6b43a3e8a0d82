//! Customer order views.
//!
//! Orders are read-only here. Everything in this crate is a pure function of
//! the order collection and explicit criteria passed on each call: filtering,
//! sorting, summary statistics, and the monthly revenue series.

pub mod customers;
pub mod order;
pub mod query;
pub mod summary;
pub mod trend;

pub use customers::{CustomerProfile, search_profiles};
pub use order::{LinkedProfile, Order, OrderStatus};
pub use query::{OrderQuery, OrderSort, StatusFilter, filter_and_sort};
pub use summary::{OrderSummary, summarize};
pub use trend::{MonthlyRevenue, group_revenue_by_month};
