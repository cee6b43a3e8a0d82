use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

/// Amount used by the one-click restock shortcut.
pub const QUICK_ADD_AMOUNT: i64 = 10;

/// How a caller-supplied amount is combined with the current quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOperation {
    /// Receive units: `current + amount`.
    Add,
    /// Remove units, clamping at zero: `max(0, current - amount)`.
    Subtract,
    /// Overwrite with an absolute count: `amount`.
    Set,
}

impl StockOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            StockOperation::Add => "add",
            StockOperation::Subtract => "subtract",
            StockOperation::Set => "set",
        }
    }
}

impl core::fmt::Display for StockOperation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockOperation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(StockOperation::Add),
            "subtract" => Ok(StockOperation::Subtract),
            "set" => Ok(StockOperation::Set),
            other => Err(DomainError::invalid_argument(format!(
                "unknown stock operation: {other}"
            ))),
        }
    }
}

/// Compute the quantity that should be persisted after applying `operation`.
///
/// `current_quantity` must be the authoritative value read immediately before
/// the call. Over-subtraction clamps at zero instead of failing.
///
/// # Errors
///
/// - [`DomainError::InvariantViolation`] if `current_quantity` is negative.
/// - [`DomainError::InvalidArgument`] if `amount` is negative, or an `add`
///   would overflow.
pub fn apply_stock_change(
    current_quantity: i64,
    amount: i64,
    operation: StockOperation,
) -> DomainResult<i64> {
    if current_quantity < 0 {
        tracing::warn!(current_quantity, "refusing stock change on negative quantity");
        return Err(DomainError::invariant(format!(
            "stock quantity cannot be negative (found {current_quantity})"
        )));
    }
    validate_amount(amount, operation)?;

    let new_quantity = match operation {
        StockOperation::Add => current_quantity
            .checked_add(amount)
            .ok_or_else(|| DomainError::invalid_argument("stock quantity overflow"))?,
        StockOperation::Subtract => (current_quantity - amount).max(0),
        StockOperation::Set => amount,
    };

    tracing::debug!(
        current_quantity,
        amount,
        %operation,
        new_quantity,
        "stock change computed"
    );
    Ok(new_quantity)
}

/// Reject amounts no operation accepts. Stores that apply changes atomically
/// call this before touching a row.
pub fn validate_amount(amount: i64, operation: StockOperation) -> DomainResult<()> {
    if amount < 0 {
        tracing::warn!(amount, %operation, "rejecting negative stock amount");
        return Err(DomainError::invalid_argument(format!(
            "amount for {operation} must be non-negative (got {amount})"
        )));
    }
    Ok(())
}

/// One-click restock: `add` with [`QUICK_ADD_AMOUNT`].
pub fn quick_add_10(current_quantity: i64) -> DomainResult<i64> {
    apply_stock_change(current_quantity, QUICK_ADD_AMOUNT, StockOperation::Add)
}

/// `set` to zero.
pub fn mark_out_of_stock(current_quantity: i64) -> DomainResult<i64> {
    apply_stock_change(current_quantity, 0, StockOperation::Set)
}
