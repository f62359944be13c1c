//! The paired bid/ask order book: construction, bulk assignment,
//! snapshotting, and checksum dispatch.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::checksum::{self, ChecksumFormat};
use crate::error::OrderBookError;
use crate::side::{Role, Side};
use crate::value::Value;

/// A `{bid, ask}` snapshot of a book, preserving each side's
/// directional order. Generic over `T` so callers can either take a
/// plain clone ([`OrderBook::to_dict`]) or a mapped projection
/// ([`OrderBook::to_dict_map`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// Bid side, highest price first.
    pub bid: IndexMap<Decimal, T>,
    /// Ask side, lowest price first.
    pub ask: IndexMap<Decimal, T>,
}

/// Normalises one of the eight legal side spellings
/// (`bid`/`bids`/`BID`/`BIDS` and the ask equivalents) to a [`Role`].
///
/// Centralising this in one place (rather than matching side names at
/// every call site) is the fix for the "dynamic dispatch on side
/// names" design note: every entry point below routes through here.
fn resolve_side(name: &str) -> Option<Role> {
    match name {
        "bid" | "bids" | "BID" | "BIDS" => Some(Role::Bid),
        "ask" | "asks" | "ASK" | "ASKS" => Some(Role::Ask),
        _ => None,
    }
}

/// A limit order book: one bid [`Side`], one ask [`Side`], and the
/// depth/truncation/checksum configuration shared by both.
#[derive(Debug, Clone)]
pub struct OrderBook {
    bid: Side,
    ask: Side,
    checksum_format: ChecksumFormat,
}

impl OrderBook {
    /// Creates an empty book.
    ///
    /// `max_depth` of `0` means unbounded. `eager_truncate` requires
    /// `max_depth > 0`, exactly as for a bare [`crate::SortedMap`].
    pub fn new(
        max_depth: usize,
        eager_truncate: bool,
        checksum_format: ChecksumFormat,
    ) -> Result<Self, OrderBookError> {
        Ok(Self {
            bid: Side::new(Role::Bid, max_depth, eager_truncate)?,
            ask: Side::new(Role::Ask, max_depth, eager_truncate)?,
            checksum_format,
        })
    }

    /// The bid side.
    pub fn bids(&self) -> &Side {
        &self.bid
    }

    /// The ask side.
    pub fn asks(&self) -> &Side {
        &self.ask
    }

    /// Mutable access to the bid side, for per-level inserts/removes.
    pub fn bids_mut(&mut self) -> &mut Side {
        &mut self.bid
    }

    /// Mutable access to the ask side, for per-level inserts/removes.
    pub fn asks_mut(&mut self) -> &mut Side {
        &mut self.ask
    }

    /// Reads a side by any of its eight legal spellings.
    ///
    /// Unknown names fail with [`OrderBookError::KeyNotFound`] — this
    /// is a read-path failure per the error taxonomy, distinct from
    /// the `ValueError` an unknown name produces on write.
    pub fn side(&self, name: &str) -> Result<&Side, OrderBookError> {
        match resolve_side(name) {
            Some(Role::Bid) => Ok(&self.bid),
            Some(Role::Ask) => Ok(&self.ask),
            None => Err(OrderBookError::key_not_found(name)),
        }
    }

    /// Wholesale-replaces one side's contents with `levels`, keyed by
    /// any of its eight legal spellings.
    ///
    /// Unknown names fail with [`OrderBookError::Value`] — on the
    /// write path an invalid name is a bad *value*, not a missing key.
    pub fn assign_side(
        &mut self,
        name: &str,
        levels: impl IntoIterator<Item = (Decimal, Value)>,
    ) -> Result<(), OrderBookError> {
        match resolve_side(name) {
            Some(Role::Bid) => {
                self.bid.replace_all(levels);
                Ok(())
            }
            Some(Role::Ask) => {
                self.ask.replace_all(levels);
                Ok(())
            }
            None => Err(OrderBookError::value_error(format!(
                "'{name}' is not a valid side name"
            ))),
        }
    }

    /// A whole side can never be deleted, independent of whether
    /// `name` resolves to a real side — this always fails.
    pub fn remove_side(&self, name: &str) -> Result<(), OrderBookError> {
        match resolve_side(name) {
            Some(_) => Err(OrderBookError::value_error(
                "a book side cannot be deleted, only reassigned",
            )),
            None => Err(OrderBookError::value_error(format!(
                "'{name}' is not a valid side name"
            ))),
        }
    }

    /// `|bids| + |asks|`, each respecting its own depth cap.
    pub fn len(&self) -> usize {
        self.bid.len() + self.ask.len()
    }

    /// `true` if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A `{bid, ask}` snapshot with cloned values.
    pub fn to_dict(&self) -> Snapshot<Value> {
        Snapshot {
            bid: self.bid.to_index_map(),
            ask: self.ask.to_index_map(),
        }
    }

    /// A `{bid, ask}` snapshot with each `(price, value)` pair mapped
    /// through `f` — the Rust equivalent of the host binding's
    /// `from_type`/`to_type` conversion parameters.
    pub fn to_dict_map<T>(&self, f: impl Fn(&Decimal, &Value) -> T) -> Snapshot<T> {
        Snapshot {
            bid: self.bid.to_index_map_map(&f),
            ask: self.ask.to_index_map_map(&f),
        }
    }

    /// Computes the configured venue checksum over the top of book.
    pub fn checksum(&self) -> Result<u32, OrderBookError> {
        checksum::compute(&self.bid, &self.ask, self.checksum_format)
    }

    /// The configured checksum format.
    pub fn checksum_format(&self) -> ChecksumFormat {
        self.checksum_format
    }
}
