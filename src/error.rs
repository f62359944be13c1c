//! Error taxonomy for the order book core.
//!
//! The kinds mirror the four failure categories a dynamically-typed
//! host binding would surface (`TypeError`, `ValueError`, `KeyError`,
//! `IndexError`): wrong category of input, right category but wrong
//! value, missing key, and out-of-range positional access. All errors
//! are fatal to the single operation that raised them; no state is
//! partially applied before an error is returned.

use thiserror::Error;

/// Errors produced by [`crate::SortedMap`], [`crate::Side`], and
/// [`crate::OrderBook`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// Wrong category of input, e.g. a non-numeric string at a decimal
    /// parsing boundary.
    #[error("type error: {message}")]
    Type {
        /// Human-readable description of the mismatch.
        message: String,
    },

    /// Right category of input, wrong value, e.g. `truncate=true` with
    /// `max_depth=0`, an unrecognised side name on write, or a
    /// checksum request with insufficient book depth.
    #[error("value error: {message}")]
    Value {
        /// Human-readable description of the invalid value.
        message: String,
    },

    /// A key was missing on a read or delete operation.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// String form of the key that was not present.
        key: String,
    },

    /// A positional (rank) access fell outside `[0, len)` after
    /// negative-index resolution.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index as originally supplied (may be negative).
        index: isize,
        /// The length the index was resolved against.
        len: usize,
    },
}

impl OrderBookError {
    /// Builds a [`OrderBookError::Type`] from any displayable message.
    pub fn type_error(message: impl Into<String>) -> Self {
        OrderBookError::Type {
            message: message.into(),
        }
    }

    /// Builds a [`OrderBookError::Value`] from any displayable message.
    pub fn value_error(message: impl Into<String>) -> Self {
        OrderBookError::Value {
            message: message.into(),
        }
    }

    /// Builds a [`OrderBookError::KeyNotFound`] for the given key.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        OrderBookError::KeyNotFound { key: key.into() }
    }
}
