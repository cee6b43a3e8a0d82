//! Configuration loading and representation.

use anyhow::Context;
use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::{DEFAULT_MAX_STOCK_LEVEL, DEFAULT_MIN_STOCK_LEVEL, StockLevels};
use stockroom_sales::{OrderQuery, OrderSort};

pub const ENV_DEFAULT_MIN_STOCK: &str = "STOCKROOM_DEFAULT_MIN_STOCK";
pub const ENV_DEFAULT_MAX_STOCK: &str = "STOCKROOM_DEFAULT_MAX_STOCK";
pub const ENV_DEFAULT_ORDER_SORT: &str = "STOCKROOM_DEFAULT_ORDER_SORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an integer (got {value:?})")]
    NotAnInteger { key: &'static str, value: String },

    #[error("invalid value for {key}: {source}")]
    Invalid {
        key: &'static str,
        #[source]
        source: DomainError,
    },
}

/// Back-office settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackOfficeConfig {
    /// Thresholds given to new products that don't specify their own.
    pub default_stock_levels: StockLevels,
    /// Sort applied when the order list opens.
    pub default_order_sort: OrderSort,
    /// Postgres connection string; `None` means in-memory stores.
    pub database_url: Option<String>,
}

impl Default for BackOfficeConfig {
    fn default() -> Self {
        Self {
            default_stock_levels: StockLevels::default(),
            default_order_sort: OrderSort::DateDesc,
            database_url: None,
        }
    }
}

impl BackOfficeConfig {
    /// Load from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())
            .context("failed to load back-office configuration from environment")?;
        tracing::info!(
            min_stock = config.default_stock_levels.min_stock_level,
            max_stock = config.default_stock_levels.max_stock_level,
            order_sort = %config.default_order_sort,
            persistent = config.database_url.is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load using an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min = parse_i64(&lookup, ENV_DEFAULT_MIN_STOCK)?.unwrap_or(DEFAULT_MIN_STOCK_LEVEL);
        let max = parse_i64(&lookup, ENV_DEFAULT_MAX_STOCK)?.unwrap_or(DEFAULT_MAX_STOCK_LEVEL);
        let default_stock_levels = StockLevels::new(min, max).map_err(|source| {
            ConfigError::Invalid {
                key: if min < 0 {
                    ENV_DEFAULT_MIN_STOCK
                } else {
                    ENV_DEFAULT_MAX_STOCK
                },
                source,
            }
        })?;

        let default_order_sort = match non_blank(&lookup, ENV_DEFAULT_ORDER_SORT) {
            Some(raw) => raw.parse().map_err(|source| ConfigError::Invalid {
                key: ENV_DEFAULT_ORDER_SORT,
                source,
            })?,
            None => OrderSort::DateDesc,
        };

        Ok(Self {
            default_stock_levels,
            default_order_sort,
            database_url: non_blank(&lookup, ENV_DATABASE_URL),
        })
    }

    /// Criteria for the first render of the order list.
    pub fn initial_order_query(&self) -> OrderQuery {
        OrderQuery {
            sort_by: self.default_order_sort,
            ..OrderQuery::default()
        }
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_i64<F>(lookup: &F, key: &'static str) -> Result<Option<i64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(lookup, key)
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| ConfigError::NotAnInteger { key, value: raw.clone() })
        })
        .transpose()
}
