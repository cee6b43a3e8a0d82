use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Money, OrderId};

/// Order status.
///
/// Open enumeration: the store may hold statuses this crate has never heard
/// of, and they are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub const PENDING: &'static str = "pending";
    pub const COMPLETED: &'static str = "completed";
    pub const CANCELLED: &'static str = "cancelled";

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn pending() -> Self {
        Self::new(Self::PENDING)
    }

    pub fn completed() -> Self {
        Self::new(Self::COMPLETED)
    }

    pub fn cancelled() -> Self {
        Self::new(Self::CANCELLED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Customer profile fields joined onto an order (`profiles` relation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Customer order as fetched from the `orders` table.
///
/// Customer contact details exist twice: on the linked profile and as a
/// snapshot captured at checkout. Profile values win when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    /// Missing totals count as zero everywhere.
    #[serde(default)]
    pub total: Option<Money>,
    /// Only an explicit `false` hides an order from statistics.
    #[serde(default)]
    pub admin_visible: Option<bool>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub cancelled_by: Option<String>,
    #[serde(default, rename = "profiles")]
    pub profile: Option<LinkedProfile>,
}

impl Order {
    /// Minimal order; every optional field starts empty.
    pub fn new(
        id: impl Into<OrderId>,
        created_at: DateTime<Utc>,
        status: impl Into<OrderStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at,
            status: status.into(),
            total: None,
            admin_visible: None,
            order_number: None,
            customer_name: None,
            customer_email: None,
            customer_phone: None,
            payment_method: None,
            cancelled_at: None,
            cancellation_reason: None,
            cancelled_by: None,
            profile: None,
        }
    }

    pub fn with_total(mut self, total: Money) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_admin_visible(mut self, visible: bool) -> Self {
        self.admin_visible = Some(visible);
        self
    }

    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    pub fn with_customer(
        mut self,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Self {
        self.customer_name = name.map(str::to_string);
        self.customer_email = email.map(str::to_string);
        self.customer_phone = phone.map(str::to_string);
        self
    }

    pub fn with_profile(mut self, profile: LinkedProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn total_or_zero(&self) -> Money {
        self.total.unwrap_or(Money::ZERO)
    }

    pub fn is_admin_visible(&self) -> bool {
        self.admin_visible != Some(false)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.as_str() == OrderStatus::CANCELLED || self.cancelled_at.is_some()
    }

    fn profile_name(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.name.as_deref())
    }

    fn profile_email(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.email.as_deref())
    }

    /// Display name: profile first, then the checkout snapshot.
    pub fn customer_display_name(&self) -> Option<&str> {
        self.profile_name().or(self.customer_name.as_deref())
    }

    /// Contact email: profile first, then the checkout snapshot.
    pub fn customer_display_email(&self) -> Option<&str> {
        self.profile_email().or(self.customer_email.as_deref())
    }

    /// Free-text fields searched by the order list, in precedence order.
    pub(crate) fn search_fields(&self) -> [Option<&str>; 6] {
        [
            self.order_number.as_deref(),
            self.profile_name(),
            self.customer_name.as_deref(),
            self.profile_email(),
            self.customer_email.as_deref(),
            self.customer_phone.as_deref(),
        ]
    }
}
