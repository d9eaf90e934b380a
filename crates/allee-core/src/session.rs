//! The session: one colony, its analysis engine, and the observers that
//! render it.
//!
//! Every inbound action mutates the colony and then publishes the full set
//! of views to each subscribed observer, in this order: status, history,
//! projection, Lyapunov, bifurcation. A day advance additionally sends the
//! event message (and an extinction warning when the population ended below
//! the threshold) before the views.
//!
//! A failed technology purchase changes nothing and publishes nothing.

use std::fmt;

use allee_types::AnalysisSnapshot;
use tracing::info;

use crate::actions::Action;
use crate::analysis::AnalysisEngine;
use crate::colony::{Colony, DayReport};
use crate::config::SimulatorConfig;
use crate::error::ColonyError;
use crate::observer::ColonyObserver;
use crate::technology::Technology;

/// Owns the colony and routes actions from the presentation layer.
pub struct ColonySession {
    colony: Colony,
    analysis: AnalysisEngine,
    observers: Vec<Box<dyn ColonyObserver>>,
}

impl ColonySession {
    /// A session over an existing colony and engine, with no observers.
    pub const fn new(colony: Colony, analysis: AnalysisEngine) -> Self {
        Self {
            colony,
            analysis,
            observers: Vec::new(),
        }
    }

    /// A fresh colony and engine built from configuration.
    pub fn from_config(config: &SimulatorConfig) -> Self {
        let colony = config
            .events
            .seed
            .map_or_else(Colony::new, Colony::with_seed);
        info!(seed = ?config.events.seed, "Colony session started");
        Self::new(colony, AnalysisEngine::new(config.analysis.clone()))
    }

    /// Register an observer. It receives updates from the next mutation (or
    /// explicit [`publish`](Self::publish)) on.
    pub fn subscribe(&mut self, observer: Box<dyn ColonyObserver>) {
        self.observers.push(observer);
    }

    /// Read-only view of the colony.
    pub const fn colony(&self) -> &Colony {
        &self.colony
    }

    /// The analysis engine.
    pub const fn analysis(&self) -> &AnalysisEngine {
        &self.analysis
    }

    // -----------------------------------------------------------------------
    // Inbound actions
    // -----------------------------------------------------------------------

    /// Simulate one day and publish.
    pub fn advance_day(&mut self) -> DayReport {
        let report = self.colony.advance_day();
        for observer in &mut self.observers {
            observer.on_event_message(report.day, &report.event.message);
            if report.extinct {
                observer.on_extinction_warning(report.day, report.population);
            }
        }
        self.publish();
        report
    }

    /// Apply any of the four player actions and publish.
    pub fn apply_action(&mut self, action: Action) {
        self.colony.apply_action(action);
        self.publish();
    }

    /// `r *= 1.20` and publish.
    pub fn lay_more_eggs(&mut self) {
        self.colony.lay_more_eggs();
        self.publish();
    }

    /// `r *= 0.75` and publish.
    pub fn lay_less_eggs(&mut self) {
        self.colony.lay_less_eggs();
        self.publish();
    }

    /// `K *= 1.5`, `A *= 0.80` and publish.
    pub fn build_chambers(&mut self) {
        self.colony.build_chambers();
        self.publish();
    }

    /// `K *= 0.70`, `A *= 1.15` and publish.
    pub fn destroy_chambers(&mut self) {
        self.colony.destroy_chambers();
        self.publish();
    }

    /// Restore the initial colony and publish.
    pub fn reset(&mut self) {
        self.colony.reset();
        self.publish();
    }

    /// Spend technology points and publish.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::InsufficientTechnologyPoints`] without
    /// publishing when the colony cannot afford `points`.
    pub fn spend_technology_points(&mut self, points: u64) -> Result<u64, ColonyError> {
        let day = self.colony.spend_technology_points(points)?;
        self.publish();
        Ok(day)
    }

    /// Buy a technology upgrade and publish.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::InsufficientTechnologyPoints`] without
    /// publishing when the colony cannot afford the upgrade.
    pub fn apply_technology(&mut self, technology: Technology) -> Result<(), ColonyError> {
        self.colony.apply_technology(technology)?;
        self.publish();
        Ok(())
    }

    /// Set the population (floored at zero) and publish.
    pub fn set_population(&mut self, population: f64) {
        self.colony.set_population(population);
        self.publish();
    }

    /// Set the growth rate (floored at zero) and publish.
    pub fn set_growth_rate(&mut self, growth_rate: f64) {
        self.colony.set_growth_rate(growth_rate);
        self.publish();
    }

    /// Set the Allee threshold (floored at a small positive minimum) and publish.
    pub fn set_allee_threshold(&mut self, allee_threshold: f64) {
        self.colony.set_allee_threshold(allee_threshold);
        self.publish();
    }

    // -----------------------------------------------------------------------
    // Outbound
    // -----------------------------------------------------------------------

    /// Push the status and all four series to every observer.
    pub fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let status = self.colony.status();
        let history = self.analysis.history_series(&self.colony);
        let projection = self.analysis.projection_series(&self.colony);
        let sweeps = self.analysis.sweeps(
            self.colony.carrying_capacity(),
            self.colony.allee_threshold(),
        );

        for observer in &mut self.observers {
            observer.on_status_changed(&status);
            observer.on_history_series(&history);
            observer.on_projection_series(&projection);
            observer.on_lyapunov_series(&sweeps.lyapunov);
            observer.on_bifurcation_series(&sweeps.bifurcation);
        }
    }

    /// Every view of the colony as one owned value.
    pub fn snapshot(&mut self) -> AnalysisSnapshot {
        let status = self.colony.status();
        let history = self.analysis.history_series(&self.colony);
        let projection = self.analysis.projection_series(&self.colony);
        let sweeps = self
            .analysis
            .sweeps(
                self.colony.carrying_capacity(),
                self.colony.allee_threshold(),
            )
            .clone();
        AnalysisSnapshot {
            status,
            history,
            projection,
            lyapunov: sweeps.lyapunov,
            bifurcation: sweeps.bifurcation,
        }
    }
}

impl Default for ColonySession {
    fn default() -> Self {
        Self::from_config(&SimulatorConfig::default())
    }
}

impl fmt::Debug for ColonySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColonySession")
            .field("colony", &self.colony)
            .field("analysis", &self.analysis)
            .field("observers", &self.observers.len())
            .finish()
    }
}
