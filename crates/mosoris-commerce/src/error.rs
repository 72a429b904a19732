//! Commerce error types.

use thiserror::Error;

/// Errors raised at the boundary where backend data enters the crate.
///
/// The line tree and price reconciliation never surface these: inside the
/// core a failure only means "no comparison price".
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Amount is not a decimal string.
    #[error("Invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Currency code not known to the storefront.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Cart snapshot could not be decoded.
    #[error("Invalid cart snapshot: {0}")]
    Snapshot(String),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Snapshot(e.to_string())
    }
}
