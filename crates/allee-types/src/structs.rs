//! Core data structs for the Allee colony simulator.
//!
//! Covers the model parameter set, environmental events, chart points, and
//! the status/analysis snapshots handed to the presentation collaborator.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ColonyPhase;

// ---------------------------------------------------------------------------
// Model parameters
// ---------------------------------------------------------------------------

/// The four parameters of the Allee-effect map.
///
/// In the model equations these are written `x` (population), `r` (growth
/// rate), `K` (carrying capacity), and `A` (Allee threshold).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ModelParameters {
    /// Current population `x`. Never negative.
    pub population: f64,
    /// Growth rate `r`. Never negative.
    pub growth_rate: f64,
    /// Carrying capacity `K`. Strictly positive.
    pub carrying_capacity: f64,
    /// Allee threshold `A`. Never negative.
    pub allee_threshold: f64,
}

impl ModelParameters {
    /// Build a parameter set from raw `(x, r, K, A)` values.
    pub const fn new(
        population: f64,
        growth_rate: f64,
        carrying_capacity: f64,
        allee_threshold: f64,
    ) -> Self {
        Self {
            population,
            growth_rate,
            carrying_capacity,
            allee_threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// An environmental event applied to the colony at the start of a day.
///
/// Each multiplier scales the matching model parameter; `1.0` means "no
/// effect". The population multiplier is applied as a shock before the map
/// step, not as part of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ColonyEvent {
    /// News text shown to the player.
    pub message: String,
    /// Multiplier applied to the growth rate.
    pub r_multiplier: f64,
    /// Multiplier applied to the carrying capacity.
    pub k_multiplier: f64,
    /// Multiplier applied to the Allee threshold.
    pub a_multiplier: f64,
    /// Multiplier applied to the population before the map step.
    pub population_multiplier: f64,
}

impl ColonyEvent {
    /// Create an event that leaves the population untouched.
    pub fn new(message: impl Into<String>, r: f64, k: f64, a: f64) -> Self {
        Self {
            message: message.into(),
            r_multiplier: r,
            k_multiplier: k,
            a_multiplier: a,
            population_multiplier: 1.0,
        }
    }

    /// Set the population shock of this event.
    #[must_use]
    pub const fn with_population_multiplier(mut self, multiplier: f64) -> Self {
        self.population_multiplier = multiplier;
        self
    }

    /// Whether every multiplier is exactly `1.0`.
    #[allow(clippy::float_cmp)]
    pub fn is_calm(&self) -> bool {
        self.r_multiplier == 1.0
            && self.k_multiplier == 1.0
            && self.a_multiplier == 1.0
            && self.population_multiplier == 1.0
    }
}

// ---------------------------------------------------------------------------
// Chart output
// ---------------------------------------------------------------------------

/// One point of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Point2D {
    /// Horizontal coordinate (day or growth rate).
    pub x: f64,
    /// Vertical coordinate (population or exponent).
    pub y: f64,
}

impl Point2D {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Status panel contents published after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ColonyStatus {
    /// Elapsed simulated days.
    pub day: u64,
    /// Current population.
    pub population: f64,
    /// Current growth rate.
    pub growth_rate: f64,
    /// Current carrying capacity.
    pub carrying_capacity: f64,
    /// Current Allee threshold.
    pub allee_threshold: f64,
    /// Spendable technology points (one per ten days).
    pub technology_points: u64,
    /// Whether the population is above the extinction threshold.
    pub phase: ColonyPhase,
}

impl fmt::Display for ColonyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day {} | Population: {:.2} ants | r={:.3} K={:.2} A={:.2} | tech points: {}",
            self.day,
            self.population,
            self.growth_rate,
            self.carrying_capacity,
            self.allee_threshold,
            self.technology_points,
        )
    }
}

/// Every published view of the colony at one instant.
///
/// Used by the headless driver for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AnalysisSnapshot {
    /// Status panel contents.
    pub status: ColonyStatus,
    /// `(day, population)` for every recorded day.
    pub history: Vec<Point2D>,
    /// Deterministic forward projection.
    pub projection: Vec<Point2D>,
    /// `(growth rate, exponent)` sweep.
    pub lyapunov: Vec<Point2D>,
    /// `(growth rate, population)` scatter.
    pub bifurcation: Vec<Point2D>,
}
