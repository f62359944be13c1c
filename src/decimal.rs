//! Helpers over [`rust_decimal::Decimal`] for canonical string form and
//! venue checksum normalisation.
//!
//! `Decimal` already gives us exact arithmetic, a total order, and
//! value-based equality (`0.10 == 0.1` compares equal despite the
//! different scale), so there is no need for a separate key wrapper
//! type — these are the two free functions the checksum engine and
//! boundary parsing actually need.

use rust_decimal::Decimal;

use crate::error::OrderBookError;

/// Returns the canonical string form of `value`, preserving whatever
/// precision the caller originally supplied (`Decimal`'s `Display`
/// keeps the scale it was parsed or constructed with, and never
/// renders in scientific notation).
pub fn canonical_str(value: &Decimal) -> String {
    value.to_string()
}

/// Normalises `value` the way Kraken's checksum algorithm requires:
/// strip the decimal point, then strip leading zeros. An all-zero
/// value normalises to `"0"` rather than the empty string.
///
/// Operates on the full fixed-point string, so values small enough
/// that a naive formatter might render in scientific notation (e.g.
/// `4.8e-7`) are still normalised correctly.
pub fn normalize_for_kraken(value: &Decimal) -> String {
    let rendered = canonical_str(value);
    let digits_only: String = rendered.chars().filter(|c| *c != '.' && *c != '-').collect();
    let stripped = digits_only.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Parses a decimal from a caller-supplied string at the crate
/// boundary, preserving the exact scale the string carries.
///
/// This is the one place the "numeric coercion from textual decimals"
/// concern (an external collaborator per the specification) touches
/// this crate's own surface: a minimal, explicit parse used for bulk
/// assignment and by callers who hold prices as text.
pub fn parse_decimal(text: &str) -> Result<Decimal, OrderBookError> {
    Decimal::from_str_exact(text)
        .map_err(|err| OrderBookError::type_error(format!("invalid decimal '{text}': {err}")))
}
