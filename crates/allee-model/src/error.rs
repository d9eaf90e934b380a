//! Error types for the `allee-model` crate.

/// Errors raised while building an event catalog.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A catalog must contain at least one event.
    #[error("event catalog is empty")]
    EmptyCatalog,

    /// An event weight is zero, negative, or not finite.
    #[error("event {index} has invalid weight {weight}")]
    InvalidWeight {
        /// Position of the entry in the catalog.
        index: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// An event multiplier is negative or not finite.
    #[error("event {index} has invalid {field} multiplier {value}")]
    InvalidMultiplier {
        /// Position of the entry in the catalog.
        index: usize,
        /// Which multiplier was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}
