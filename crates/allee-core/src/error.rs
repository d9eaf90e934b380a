//! Error types for colony operations.
//!
//! The colony clamps every numeric input instead of failing, so the only
//! representable failure is trying to spend more technology points than the
//! elapsed days have earned.

/// Errors returned by colony mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColonyError {
    /// Not enough technology points for the requested purchase.
    #[error("insufficient technology points: requested {requested}, available {available}")]
    InsufficientTechnologyPoints {
        /// Points the caller asked to spend.
        requested: u64,
        /// Points currently available.
        available: u64,
    },
}
