//! Shared type definitions for the Allee colony simulator.
//!
//! This crate is the single source of truth for the data exchanged between
//! the simulation core and its presentation collaborator. Types defined here
//! flow downstream to `TypeScript` via `ts-rs` so a dashboard can consume the
//! JSON exports of the headless driver.
//!
//! # Modules
//!
//! - [`enums`] -- Enumeration types (colony phase)
//! - [`structs`] -- Model parameters, events, chart points, status snapshots

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::ColonyPhase;
pub use structs::{AnalysisSnapshot, ColonyEvent, ColonyStatus, ModelParameters, Point2D};
