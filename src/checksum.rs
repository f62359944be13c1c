//! Venue-specific top-of-book checksums.
//!
//! Every format reduces to the same shape: derive a byte string from
//! the top levels of the book, then CRC32 it with the classic
//! IEEE/zlib parameters (`crc32fast::hash` computes the identical
//! 32-bit value `zlib.crc32` does, so these outputs are bit-exact with
//! the venues that publish them).

use crate::decimal::{canonical_str, normalize_for_kraken};
use crate::error::OrderBookError;
use crate::side::Side;

/// Which venue's checksum algorithm to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumFormat {
    /// Kraken: top 10 per side, normalised tokens, asks then bids.
    Kraken,
    /// OKX: up to 25 per side, original string tokens, bid/ask interleave.
    Okx,
    /// OKCoin: identical algorithm to OKX.
    OkCoin,
    /// FTX: no minimum depth, bid/ask interleave with remainder.
    Ftx,
    /// Checksums disabled; `checksum()` always fails.
    None,
}

const KRAKEN_MIN_DEPTH: usize = 10;
const OKX_MAX_DEPTH: usize = 25;

/// Computes the checksum over `bids`/`asks` per `format`.
pub fn compute(bids: &Side, asks: &Side, format: ChecksumFormat) -> Result<u32, OrderBookError> {
    let value = match format {
        ChecksumFormat::None => {
            return Err(OrderBookError::value_error(
                "checksum requested with checksum_format=none",
            ));
        }
        ChecksumFormat::Kraken => kraken(bids, asks)?,
        ChecksumFormat::Okx | ChecksumFormat::OkCoin => okx(bids, asks),
        ChecksumFormat::Ftx => ftx(bids, asks),
    };
    log::debug!("computed {format:?} checksum over {} bids / {} asks", bids.len(), asks.len());
    Ok(value)
}

fn kraken(bids: &Side, asks: &Side) -> Result<u32, OrderBookError> {
    if bids.len() < KRAKEN_MIN_DEPTH || asks.len() < KRAKEN_MIN_DEPTH {
        return Err(OrderBookError::value_error(format!(
            "kraken checksum requires at least {KRAKEN_MIN_DEPTH} levels per side (have {} bids, {} asks)",
            bids.len(),
            asks.len()
        )));
    }

    let mut payload = String::new();
    for (price, value) in asks.iter().take(KRAKEN_MIN_DEPTH) {
        payload.push_str(&normalize_for_kraken(&price));
        payload.push_str(&normalize_for_kraken(&value.size()));
    }
    for (price, value) in bids.iter().take(KRAKEN_MIN_DEPTH) {
        payload.push_str(&normalize_for_kraken(&price));
        payload.push_str(&normalize_for_kraken(&value.size()));
    }

    Ok(crc32fast::hash(payload.as_bytes()))
}

fn okx(bids: &Side, asks: &Side) -> u32 {
    let bid_tokens: Vec<String> = bids
        .iter()
        .take(OKX_MAX_DEPTH)
        .map(|(price, value)| format!("{}:{}", canonical_str(&price), canonical_str(&value.size())))
        .collect();
    let ask_tokens: Vec<String> = asks
        .iter()
        .take(OKX_MAX_DEPTH)
        .map(|(price, value)| format!("{}:{}", canonical_str(&price), canonical_str(&value.size())))
        .collect();

    let depth = bid_tokens.len().max(ask_tokens.len());
    let mut combined = Vec::with_capacity(bid_tokens.len() + ask_tokens.len());
    for i in 0..depth {
        if let Some(bid) = bid_tokens.get(i) {
            combined.push(bid.clone());
        }
        if let Some(ask) = ask_tokens.get(i) {
            combined.push(ask.clone());
        }
    }

    crc32fast::hash(combined.join(":").as_bytes())
}

fn ftx(bids: &Side, asks: &Side) -> u32 {
    let bid_tokens: Vec<String> = bids
        .iter()
        .map(|(price, value)| format!("{}:{}", canonical_str(&price), canonical_str(&value.size())))
        .collect();
    let ask_tokens: Vec<String> = asks
        .iter()
        .map(|(price, value)| format!("{}:{}", canonical_str(&price), canonical_str(&value.size())))
        .collect();

    let shared = bid_tokens.len().min(ask_tokens.len());
    let mut combined = Vec::with_capacity(bid_tokens.len() + ask_tokens.len());
    for i in 0..shared {
        combined.push(bid_tokens[i].clone());
        combined.push(ask_tokens[i].clone());
    }
    if bid_tokens.len() > shared {
        combined.extend_from_slice(&bid_tokens[shared..]);
    } else {
        combined.extend_from_slice(&ask_tokens[shared..]);
    }

    crc32fast::hash(combined.join(":").as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Role;
    use crate::value::Value;
    use rust_decimal::Decimal;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn sized(s: &str) -> Value {
        Value::Scalar(d(s))
    }

    /// S5: the Kraken reference vector published in their checksum docs.
    #[test]
    fn s5_kraken_reference_vector() {
        let mut bids = Side::new(Role::Bid, 10, true).unwrap();
        let mut asks = Side::new(Role::Ask, 10, true).unwrap();

        let ask_rows = [
            ("0.05005", "0.00000500"),
            ("0.05010", "0.00000500"),
            ("0.05015", "0.00000500"),
            ("0.05020", "0.00000500"),
            ("0.05025", "0.00000500"),
            ("0.05030", "0.00000500"),
            ("0.05035", "0.00000500"),
            ("0.05040", "0.00000500"),
            ("0.05045", "0.00000500"),
            ("0.05050", "0.00000500"),
        ];
        let bid_rows = [
            ("0.05000", "0.00000500"),
            ("0.04995", "0.00000500"),
            ("0.04990", "0.00000500"),
            ("0.04980", "0.00000500"),
            ("0.04975", "0.00000500"),
            ("0.04970", "0.00000500"),
            ("0.04965", "0.00000500"),
            ("0.04960", "0.00000500"),
            ("0.04955", "0.00000500"),
            ("0.04950", "0.00000500"),
        ];

        for (price, size) in ask_rows {
            asks.set(d(price), sized(size));
        }
        for (price, size) in bid_rows {
            bids.set(d(price), sized(size));
        }

        assert_eq!(compute(&bids, &asks, ChecksumFormat::Kraken).unwrap(), 974947235);
    }

    #[test]
    fn kraken_rejects_insufficient_depth() {
        let bids = Side::new(Role::Bid, 0, false).unwrap();
        let asks = Side::new(Role::Ask, 0, false).unwrap();
        assert!(compute(&bids, &asks, ChecksumFormat::Kraken).is_err());
    }

    /// S6: the OKX/OKCoin worked example from the reference test suite.
    #[test]
    fn s6_okx_worked_example() {
        let mut bids = Side::new(Role::Bid, 0, false).unwrap();
        let mut asks = Side::new(Role::Ask, 0, false).unwrap();

        asks.set(d("3366.8"), sized("9"));
        asks.set(d("3368"), sized("8"));
        asks.set(d("3372"), sized("8"));
        bids.set(d("3366.1"), sized("7"));

        assert_eq!(compute(&bids, &asks, ChecksumFormat::Okx).unwrap(), 831078360);
        assert_eq!(compute(&bids, &asks, ChecksumFormat::OkCoin).unwrap(), 831078360);
    }

    #[test]
    fn checksum_format_none_always_fails() {
        let bids = Side::new(Role::Bid, 0, false).unwrap();
        let asks = Side::new(Role::Ask, 0, false).unwrap();
        assert!(compute(&bids, &asks, ChecksumFormat::None).is_err());
    }

    #[test]
    fn ftx_appends_remainder_of_longer_side() {
        let mut bids = Side::new(Role::Bid, 0, false).unwrap();
        let mut asks = Side::new(Role::Ask, 0, false).unwrap();

        bids.set(d("100"), sized("1"));
        bids.set(d("99"), sized("2"));
        asks.set(d("101"), sized("3"));

        // bid tokens (DESC): 100:1, 99:2 ; ask tokens (ASC): 101:3
        // shared = 1 -> [100:1, 101:3] then remainder bid [99:2]
        let expected = crc32fast::hash(b"100:1:101:3:99:2");
        assert_eq!(compute(&bids, &asks, ChecksumFormat::Ftx).unwrap(), expected);
    }

    #[test]
    fn checksum_is_deterministic_across_calls() {
        let mut bids = Side::new(Role::Bid, 0, false).unwrap();
        let mut asks = Side::new(Role::Ask, 0, false).unwrap();
        bids.set(d("100"), sized("1"));
        asks.set(d("101"), sized("2"));

        let first = compute(&bids, &asks, ChecksumFormat::Ftx).unwrap();
        let second = compute(&bids, &asks, ChecksumFormat::Ftx).unwrap();
        assert_eq!(first, second);
    }
}
