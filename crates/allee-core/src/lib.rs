//! Colony state, dynamics analysis, and session orchestration for the Allee
//! colony simulator.
//!
//! This crate owns the interactive simulation: the colony's mutable state,
//! the four analytical views derived from it, and the session that routes
//! collaborator actions into the colony and publishes every update.
//!
//! # Modules
//!
//! - [`actions`] -- The four chamber/egg actions and their multipliers.
//! - [`analysis`] -- [`AnalysisEngine`]: history, projection, Lyapunov and
//!   bifurcation series, plus the sweep memo.
//! - [`colony`] -- [`Colony`]: parameters, day counter, population history,
//!   and the daily advance.
//! - [`config`] -- Configuration loading from `allee-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`ColonyError`].
//! - [`observer`] -- [`ColonyObserver`], the outbound interface to the
//!   presentation layer.
//! - [`session`] -- [`ColonySession`], which ties the pieces together.
//! - [`technology`] -- Technology upgrades bought with elapsed days.
//!
//! [`AnalysisEngine`]: analysis::AnalysisEngine
//! [`Colony`]: colony::Colony
//! [`ColonyError`]: error::ColonyError
//! [`ColonyObserver`]: observer::ColonyObserver
//! [`ColonySession`]: session::ColonySession

pub mod actions;
pub mod analysis;
pub mod colony;
pub mod config;
pub mod error;
pub mod observer;
pub mod session;
pub mod technology;

pub use actions::Action;
pub use analysis::{AnalysisEngine, Sweeps};
pub use colony::{Colony, DayReport};
pub use config::{ConfigError, SimulatorConfig};
pub use error::ColonyError;
pub use observer::{ColonyObserver, NoOpObserver};
pub use session::ColonySession;
pub use technology::Technology;
