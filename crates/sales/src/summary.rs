use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroom_core::Money;

use crate::order::{Order, OrderStatus};

/// Headline statistics over admin-visible orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub count: usize,
    pub total_revenue: Money,
    /// `total_revenue / count`, unrounded; zero when there are no orders.
    pub average_order_value: Money,
    pub status_counts: BTreeMap<OrderStatus, usize>,
}

impl OrderSummary {
    pub fn count_for(&self, status: &str) -> usize {
        self.status_counts
            .get(&OrderStatus::new(status))
            .copied()
            .unwrap_or(0)
    }
}

/// Summarize the orders an administrator should see.
///
/// Orders with `admin_visible == Some(false)` are skipped; everything else
/// counts, including unknown statuses and orders without a total.
pub fn summarize(orders: &[Order]) -> OrderSummary {
    let mut summary = orders
        .iter()
        .filter(|order| order.is_admin_visible())
        .fold(OrderSummary::default(), |mut acc, order| {
            acc.count += 1;
            acc.total_revenue = acc.total_revenue + order.total_or_zero();
            *acc.status_counts.entry(order.status.clone()).or_insert(0) += 1;
            acc
        });
    summary.average_order_value = summary.total_revenue.average_over(summary.count);

    tracing::debug!(
        orders = orders.len(),
        visible = summary.count,
        revenue = %summary.total_revenue,
        "order summary computed"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn order(id: &str, status: &str, total: Option<u64>, visible: Option<bool>) -> Order {
        let mut o = Order::new(id, Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(), status);
        o.total = total.map(Money::from_minor);
        o.admin_visible = visible;
        o
    }

    #[test]
    fn empty_collection_is_zero_record() {
        let summary = summarize(&[]);
        assert_eq!(summary, OrderSummary::default());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_revenue, Money::ZERO);
        assert_eq!(summary.average_order_value, Money::ZERO);
        assert!(summary.status_counts.is_empty());
    }

    #[test]
    fn hidden_orders_are_excluded() {
        let orders = vec![
            order("a", "completed", Some(100), Some(true)),
            order("b", "completed", Some(50), Some(false)),
        ];
        let summary = summarize(&orders);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total_revenue, Money::from_minor(100));
        assert_eq!(summary.average_order_value, Money::from_minor(100));
        assert_eq!(summary.count_for("completed"), 1);
    }

    #[test]
    fn missing_visibility_counts_as_visible() {
        let orders = vec![order("a", "pending", Some(300), None)];
        assert_eq!(summarize(&orders).count, 1);
    }

    #[test]
    fn missing_totals_count_as_zero() {
        let orders = vec![
            order("a", "pending", None, None),
            order("b", "pending", Some(90), None),
        ];
        let summary = summarize(&orders);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_revenue, Money::from_minor(90));
        assert_eq!(summary.average_order_value, Money::from_minor(45));
    }

    #[test]
    fn status_counts_accept_novel_statuses() {
        let orders = vec![
            order("a", "pending", None, None),
            order("b", "pending", None, None),
            order("c", "awaiting_pickup", None, None),
            order("d", "cancelled", None, Some(false)),
        ];
        let summary = summarize(&orders);
        assert_eq!(summary.count_for("pending"), 2);
        assert_eq!(summary.count_for("awaiting_pickup"), 1);
        assert_eq!(summary.count_for("cancelled"), 0);
        assert_eq!(summary.status_counts.len(), 2);
    }

    #[test]
    fn all_hidden_gives_zero_average() {
        let orders = vec![order("a", "completed", Some(500), Some(false))];
        let summary = summarize(&orders);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_order_value, Money::ZERO);
    }

    #[test]
    fn store_rows_in_major_units() {
        let rows = serde_json::json!([
            {"id": "o1", "created_at": "2024-03-01T10:00:00Z", "status": "completed", "total": 249.50},
            {"id": "o2", "created_at": "2024-03-02T10:00:00Z", "status": "pending", "total": 1299},
            {"id": "o3", "created_at": "2024-03-03T10:00:00Z", "status": "completed", "total": 0.1},
            {"id": "o4", "created_at": "2024-03-04T10:00:00Z", "status": "cancelled",
             "total": 75.25, "admin_visible": false}
        ]);
        let orders: Vec<Order> = serde_json::from_value(rows).unwrap();
        let summary = summarize(&orders);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_revenue, Money::from_minor(154_860));
        assert_eq!(summary.total_revenue.to_string(), "1548.60");
        assert_eq!(summary.average_order_value, Money::from_minor(51_620));
    }

    #[test]
    fn average_is_not_rounded() {
        let orders = vec![
            order("a", "completed", Some(1_000), None),
            order("b", "completed", Some(0), None),
            order("c", "completed", Some(0), None),
        ];
        let average = summarize(&orders).average_order_value;
        assert_ne!(average, Money::from_minor(333));
        assert_eq!(average.to_string(), "3.33");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: counts and revenue only ever reflect visible orders.
            #[test]
            fn summary_matches_visible_subset(
                rows in proptest::collection::vec((0u64..100_000, any::<Option<bool>>()), 0..50)
            ) {
                let orders: Vec<Order> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, (total, visible))| order(&i.to_string(), "completed", Some(*total), *visible))
                    .collect();
                let summary = summarize(&orders);

                let visible: Vec<u64> = rows
                    .iter()
                    .filter(|(_, v)| *v != Some(false))
                    .map(|(t, _)| *t)
                    .collect();
                prop_assert_eq!(summary.count, visible.len());
                prop_assert_eq!(summary.total_revenue, Money::from_minor(visible.iter().sum::<u64>()));
                prop_assert_eq!(summary.status_counts.values().sum::<usize>(), visible.len());
            }
        }
    }
}
