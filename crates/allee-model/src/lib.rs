//! Population dynamics and environmental randomness for the Allee colony
//! simulator.
//!
//! This crate holds everything that operates on raw model numbers without
//! owning any simulation state. It sits between `allee-types` (the data
//! structures) and `allee-core` (state, analysis, and orchestration).
//!
//! # Modules
//!
//! - [`model`] -- The Allee-effect map, its analytic derivative, and the
//!   clamping rules callers apply between iterations.
//! - [`catalog`] -- The immutable weighted table of environmental events.
//! - [`events`] -- [`RandomEventGenerator`] and the [`EventSource`] seam used
//!   to drive a colony from a seeded or scripted stream.
//! - [`error`] -- Error types for catalog construction ([`ModelError`]).
//!
//! [`RandomEventGenerator`]: events::RandomEventGenerator
//! [`EventSource`]: events::EventSource
//! [`ModelError`]: error::ModelError

pub mod catalog;
pub mod error;
pub mod events;
pub mod model;

// Re-export primary types at crate root.
pub use catalog::{EventCatalog, Rarity, WeightedEvent};
pub use error::ModelError;
pub use events::{EventSource, RandomEventGenerator, ScriptedEventSource};
