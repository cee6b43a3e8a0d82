use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockroom_core::Money;

use crate::order::Order;

/// One point of the sales trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// `"Mon YYYY"`, e.g. `"Mar 2024"` (UTC).
    pub label: String,
    pub total: Money,
}

/// Bucket revenue by calendar month of `created_at`.
///
/// Every order counts regardless of visibility. Buckets appear in order of
/// first occurrence, so pre-sort the input for a chronological series.
pub fn group_revenue_by_month(orders: &[Order]) -> Vec<MonthlyRevenue> {
    let mut series: Vec<MonthlyRevenue> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for order in orders {
        let label = order.created_at.format("%b %Y").to_string();
        match index.get(&label) {
            Some(&slot) => {
                if let Some(bucket) = series.get_mut(slot) {
                    bucket.total = bucket.total + order.total_or_zero();
                }
            }
            None => {
                index.insert(label.clone(), series.len());
                series.push(MonthlyRevenue {
                    label,
                    total: order.total_or_zero(),
                });
            }
        }
    }

    tracing::debug!(orders = orders.len(), months = series.len(), "revenue trend computed");
    series
}
