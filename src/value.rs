//! The value stored at a price level: either a level-2 aggregate size,
//! or a level-3 per-order breakdown.

use indexmap::IndexMap;
use rust_decimal::Decimal;

/// A price-level value.
///
/// Level-2 feeds carry one aggregated size per price (`Scalar`).
/// Level-3 feeds carry a mapping from opaque order id to that order's
/// size (`Orders`); the price level itself is not removed when the
/// last order at it is removed — that remains the caller's decision,
/// mirroring the reference implementation's semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Aggregated size at this price level.
    Scalar(Decimal),
    /// Per-order sizes at this price level, keyed by order id.
    Orders(IndexMap<String, Decimal>),
}

impl Value {
    /// The size represented by this value: the scalar itself, or the
    /// sum of all order sizes for a level-3 entry.
    pub fn size(&self) -> Decimal {
        match self {
            Value::Scalar(size) => *size,
            Value::Orders(orders) => orders
                .values()
                .fold(Decimal::ZERO, |total, size| total + *size),
        }
    }

    /// `true` if this is a level-3 entry with no orders left at this
    /// price. The price level is not implicitly removed in that case;
    /// this is only a query.
    pub fn is_empty_orders(&self) -> bool {
        matches!(self, Value::Orders(orders) if orders.is_empty())
    }
}

impl From<Decimal> for Value {
    fn from(size: Decimal) -> Self {
        Value::Scalar(size)
    }
}
