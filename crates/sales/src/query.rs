//! Order list filtering and sorting.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

use crate::order::{Order, OrderStatus};

/// Which statuses the order list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// Parse, falling back to [`StatusFilter::All`] on malformed input.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err: DomainError| {
            tracing::warn!(raw, error = %err, "falling back to status filter 'all'");
            StatusFilter::All
        })
    }

    /// Exact, case-sensitive comparison.
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == *status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "" => Err(DomainError::invalid_argument("status filter cannot be empty")),
            other if other.trim() != other => Err(DomainError::invalid_argument(format!(
                "status filter has surrounding whitespace: {other:?}"
            ))),
            other => Ok(StatusFilter::Only(OrderStatus::new(other))),
        }
    }
}

/// Sort order of the order list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSort {
    /// Newest first.
    #[default]
    DateDesc,
    DateAsc,
    /// Largest total first.
    AmountDesc,
    AmountAsc,
}

impl OrderSort {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderSort::DateDesc => "date_desc",
            OrderSort::DateAsc => "date_asc",
            OrderSort::AmountDesc => "amount_desc",
            OrderSort::AmountAsc => "amount_asc",
        }
    }

    /// Parse, falling back to [`OrderSort::DateDesc`] on malformed input.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err: DomainError| {
            tracing::warn!(raw, error = %err, "falling back to sort 'date_desc'");
            OrderSort::DateDesc
        })
    }

    fn compare(self, a: &Order, b: &Order) -> Ordering {
        match self {
            OrderSort::DateDesc => b.created_at.cmp(&a.created_at),
            OrderSort::DateAsc => a.created_at.cmp(&b.created_at),
            OrderSort::AmountDesc => b.total_or_zero().cmp(&a.total_or_zero()),
            OrderSort::AmountAsc => a.total_or_zero().cmp(&b.total_or_zero()),
        }
    }
}

impl core::fmt::Display for OrderSort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date_desc" => Ok(OrderSort::DateDesc),
            "date_asc" => Ok(OrderSort::DateAsc),
            "amount_desc" => Ok(OrderSort::AmountDesc),
            "amount_asc" => Ok(OrderSort::AmountAsc),
            other => Err(DomainError::invalid_argument(format!(
                "unknown order sort: {other}"
            ))),
        }
    }
}

/// Criteria for one refresh of the order list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub sort_by: OrderSort,
}

impl OrderQuery {
    /// Build a query from raw UI values, substituting safe defaults for
    /// malformed filter or sort values.
    pub fn from_raw(status_filter: &str, search_term: &str, sort_by: &str) -> Self {
        Self {
            status_filter: StatusFilter::parse_or_default(status_filter),
            search_term: search_term.to_string(),
            sort_by: OrderSort::parse_or_default(sort_by),
        }
    }

    /// Strict variant of [`OrderQuery::from_raw`].
    pub fn try_from_raw(
        status_filter: &str,
        search_term: &str,
        sort_by: &str,
    ) -> DomainResult<Self> {
        Ok(Self {
            status_filter: status_filter.parse()?,
            search_term: search_term.to_string(),
            sort_by: sort_by.parse()?,
        })
    }
}

/// Case-insensitive substring match over an order's searchable fields.
///
/// `needle` must already be lowercased. Absent fields are skipped.
fn matches_search(order: &Order, needle: &str) -> bool {
    order
        .search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Filter by status and search term, then stable-sort.
///
/// A search term that is blank after trimming disables the search. Any other
/// term is lowercased and matched as typed, surrounding whitespace included,
/// so `" a1"` does not match an order number of `"A1"`.
///
/// Returns references into `orders` in display order; the input slice is
/// never reordered, so the same collection can back other views.
pub fn filter_and_sort<'a>(orders: &'a [Order], query: &OrderQuery) -> Vec<&'a Order> {
    let searching = !query.search_term.trim().is_empty();
    let needle = query.search_term.to_lowercase();

    let mut selected: Vec<&Order> = orders
        .iter()
        .filter(|order| query.status_filter.matches(order))
        .filter(|order| !searching || matches_search(order, &needle))
        .collect();

    // `sort_by` is stable: ties keep their filtered order.
    selected.sort_by(|a, b| query.sort_by.compare(a, b));

    tracing::debug!(
        total = orders.len(),
        matched = selected.len(),
        sort_by = %query.sort_by,
        "order list filtered"
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::LinkedProfile;
    use chrono::{DateTime, TimeZone, Utc};
    use stockroom_core::Money;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap()
    }

    fn order(id: &str, day: u32, status: &str, total: Option<u64>) -> Order {
        let mut o = Order::new(id, at(day), status);
        o.total = total.map(Money::from_minor);
        o
    }

    fn ids(found: Vec<&Order>) -> Vec<&str> {
        found.into_iter().map(|o| o.id.as_str()).collect()
    }

    fn query(status: &str, term: &str, sort: &str) -> OrderQuery {
        OrderQuery::try_from_raw(status, term, sort).unwrap()
    }

    #[test]
    fn status_filter_keeps_exact_matches() {
        let orders = vec![
            order("a", 1, "pending", Some(100)),
            order("b", 2, "completed", Some(100)),
        ];
        let found = filter_and_sort(&orders, &query("completed", "", "date_desc"));
        assert_eq!(ids(found), vec!["b"]);
    }

    #[test]
    fn status_filter_is_case_sensitive() {
        let orders = vec![order("a", 1, "Completed", None), order("b", 2, "completed", None)];
        let found = filter_and_sort(&orders, &query("completed", "", "date_asc"));
        assert_eq!(ids(found), vec!["b"]);
    }

    #[test]
    fn all_keeps_unknown_statuses() {
        let orders = vec![order("a", 1, "on_hold", None), order("b", 2, "refunded", None)];
        let found = filter_and_sort(&orders, &query("all", "", "date_asc"));
        assert_eq!(ids(found), vec!["a", "b"]);
    }

    #[test]
    fn search_matches_snapshot_email_case_insensitively() {
        let orders = vec![
            order("a", 1, "pending", None)
                .with_order_number("A1")
                .with_customer(None, Some("x@y.com"), None),
        ];
        assert_eq!(ids(filter_and_sort(&orders, &query("all", "X@Y", "date_desc"))), vec!["a"]);
        assert!(filter_and_sort(&orders, &query("all", "z@y", "date_desc")).is_empty());
    }

    #[test]
    fn search_covers_every_field() {
        let orders = vec![
            order("number", 1, "pending", None).with_order_number("ORD-778"),
            order("profile_name", 2, "pending", None).with_profile(LinkedProfile {
                name: Some("Meera Iyer".to_string()),
                email: None,
            }),
            order("snapshot_name", 3, "pending", None).with_customer(Some("Ravi"), None, None),
            order("profile_email", 4, "pending", None).with_profile(LinkedProfile {
                name: None,
                email: Some("meera@shop.in".to_string()),
            }),
            order("phone", 5, "pending", None).with_customer(None, None, Some("+91 98450 12345")),
        ];
        let search = |term: &str| ids(filter_and_sort(&orders, &query("all", term, "date_asc")));

        assert_eq!(search("ord-778"), vec!["number"]);
        assert_eq!(search("meera"), vec!["profile_name", "profile_email"]);
        assert_eq!(search("RAVI"), vec!["snapshot_name"]);
        assert_eq!(search("98450"), vec!["phone"]);
    }

    #[test]
    fn search_term_is_matched_untrimmed() {
        let orders = vec![
            order("a", 1, "pending", None).with_order_number("A1"),
            order("b", 2, "pending", None).with_customer(Some("Ravi A1"), None, None),
        ];
        assert_eq!(ids(filter_and_sort(&orders, &query("all", "a1", "date_desc"))), vec!["b", "a"]);
        assert_eq!(ids(filter_and_sort(&orders, &query("all", " a1", "date_desc"))), vec!["b"]);
        assert!(filter_and_sort(&orders, &query("all", "a1 ", "date_desc")).is_empty());
    }

    #[test]
    fn blank_search_term_keeps_orders_without_fields() {
        let orders = vec![order("a", 1, "pending", None)];
        assert_eq!(ids(filter_and_sort(&orders, &query("all", "   ", "date_desc"))), vec!["a"]);
    }

    #[test]
    fn orders_without_searchable_fields_never_match() {
        let orders = vec![order("a", 1, "pending", None)];
        assert!(filter_and_sort(&orders, &query("all", "a", "date_desc")).is_empty());
    }

    #[test]
    fn date_sorts() {
        let orders = vec![
            order("mid", 10, "pending", None),
            order("old", 1, "pending", None),
            order("new", 20, "pending", None),
        ];
        assert_eq!(
            ids(filter_and_sort(&orders, &query("all", "", "date_desc"))),
            vec!["new", "mid", "old"]
        );
        assert_eq!(
            ids(filter_and_sort(&orders, &query("all", "", "date_asc"))),
            vec!["old", "mid", "new"]
        );
    }

    #[test]
    fn amount_sorts_treat_missing_as_zero() {
        let orders = vec![
            order("fifty", 1, "pending", Some(50)),
            order("none", 2, "pending", None),
            order("hundred", 3, "pending", Some(100)),
        ];
        assert_eq!(
            ids(filter_and_sort(&orders, &query("all", "", "amount_desc"))),
            vec!["hundred", "fifty", "none"]
        );
        assert_eq!(
            ids(filter_and_sort(&orders, &query("all", "", "amount_asc"))),
            vec!["none", "fifty", "hundred"]
        );
    }

    #[test]
    fn equal_amounts_keep_input_order() {
        let orders = vec![
            order("first", 5, "pending", Some(100)),
            order("small", 1, "pending", Some(10)),
            order("second", 2, "pending", Some(100)),
        ];
        assert_eq!(
            ids(filter_and_sort(&orders, &query("all", "", "amount_desc"))),
            vec!["first", "second", "small"]
        );
    }

    #[test]
    fn input_is_left_untouched() {
        let orders = vec![order("old", 1, "pending", None), order("new", 2, "pending", None)];
        let before = orders.clone();
        let _ = filter_and_sort(&orders, &query("all", "", "date_desc"));
        assert_eq!(orders, before);
    }

    #[test]
    fn malformed_sort_and_filter_are_invalid_arguments() {
        assert!("price".parse::<OrderSort>().unwrap_err().is_invalid_argument());
        assert!("".parse::<StatusFilter>().unwrap_err().is_invalid_argument());
        assert!(" all".parse::<StatusFilter>().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn from_raw_falls_back_to_safe_defaults() {
        let q = OrderQuery::from_raw("", "abc", "by_price");
        assert_eq!(q.status_filter, StatusFilter::All);
        assert_eq!(q.sort_by, OrderSort::DateDesc);
        assert_eq!(q.search_term, "abc");
    }

    #[test]
    fn default_query_is_all_newest_first() {
        let q = OrderQuery::default();
        assert_eq!(q.status_filter, StatusFilter::All);
        assert_eq!(q.sort_by, OrderSort::DateDesc);
        assert!(q.search_term.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: amount sorts are stable for any set of totals.
            #[test]
            fn amount_sort_is_stable(totals in proptest::collection::vec(0u64..5, 0..40)) {
                let orders: Vec<Order> = totals
                    .iter()
                    .enumerate()
                    .map(|(i, t)| order(&i.to_string(), 1, "pending", Some(*t)))
                    .collect();
                let sorted = filter_and_sort(&orders, &query("all", "", "amount_desc"));
                prop_assert_eq!(sorted.len(), orders.len());
                for pair in sorted.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    prop_assert!(a.total_or_zero() >= b.total_or_zero());
                    if a.total_or_zero() == b.total_or_zero() {
                        let ia: usize = a.id.as_str().parse().unwrap();
                        let ib: usize = b.id.as_str().parse().unwrap();
                        prop_assert!(ia < ib);
                    }
                }
            }
        }
    }
}
