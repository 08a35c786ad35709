//! The errors the engine can raise.
//!
//! Everything here is recoverable: validation problems surface as a
//! user-facing message and an unchanged wizard state, never a crash.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid rate: {0}")]
    InvalidRate(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}
