//! An in-memory limit order book core: a sorted, rank-addressable map
//! keyed by exact decimal price, paired into bid/ask sides, with
//! level-2/level-3 value semantics and venue-specific checksums.
//!
//! ## Architecture
//!
//! The crate is built from the inside out:
//!
//! 1. [`SortedMap`]: a generic ordered map over [`rust_decimal::Decimal`]
//!    keys, with a fixed iteration direction, O(log n) operations, and
//!    optional bounded depth (eager or lazy truncation).
//! 2. [`Side`]: a `SortedMap<Value>` pinned to a [`Role`] (bid or ask),
//!    which fixes its direction automatically.
//! 3. [`OrderBook`]: a paired bid/ask [`Side`], with bulk assignment by
//!    side name and venue checksum computation over the top of book.
//!
//! Every level carries a [`Value`]: either a level-2 aggregated size,
//! or a level-3 per-order breakdown keyed by order id.
//!
//! ## Example
//!
//! ```rust
//! use order_book::{ChecksumFormat, OrderBook, Value};
//! use rust_decimal::Decimal;
//!
//! let mut book = OrderBook::new(10, true, ChecksumFormat::Okx).unwrap();
//! book.bids_mut().set(Decimal::new(10050, 2), Value::Scalar(Decimal::from(7)));
//! book.asks_mut().set(Decimal::new(10060, 2), Value::Scalar(Decimal::from(9)));
//!
//! assert_eq!(book.len(), 2);
//! assert!(book.checksum().is_ok());
//! ```
//!
//! This crate has no internal synchronization: an `OrderBook` is a
//! plain single-threaded value, and callers that need to share one
//! across threads wrap it themselves (e.g. behind a `RwLock`).

mod checksum;
mod decimal;
mod error;
mod order_book;
mod side;
mod sorted_map;
mod value;

pub use checksum::ChecksumFormat;
pub use decimal::{canonical_str, normalize_for_kraken, parse_decimal};
pub use error::OrderBookError;
pub use order_book::{OrderBook, Snapshot};
pub use side::{Role, Side};
pub use sorted_map::{Direction, SortedMap};
pub use value::Value;

// Re-export commonly used external dependencies.
pub use rust_decimal::Decimal;
