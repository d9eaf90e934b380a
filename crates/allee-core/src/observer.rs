//! Outbound interface from the session to the presentation layer.
//!
//! A [`ColonySession`](crate::session::ColonySession) calls every subscribed
//! [`ColonyObserver`] inline after each mutation. Slices are borrowed from the
//! session for the duration of the call only.

use allee_types::{ColonyStatus, Point2D};

/// Receives colony updates.
///
/// Every method has an empty default body, so implementations override only
/// what they render.
pub trait ColonyObserver {
    /// The status panel changed.
    fn on_status_changed(&mut self, _status: &ColonyStatus) {}

    /// Full recorded history, `(day, population)`.
    fn on_history_series(&mut self, _points: &[Point2D]) {}

    /// Forward projection, `(day, population)`.
    fn on_projection_series(&mut self, _points: &[Point2D]) {}

    /// Lyapunov sweep, `(growth rate, exponent)`.
    fn on_lyapunov_series(&mut self, _points: &[Point2D]) {}

    /// Bifurcation scatter, `(growth rate, population)`.
    fn on_bifurcation_series(&mut self, _points: &[Point2D]) {}

    /// The event drawn for `day`.
    fn on_event_message(&mut self, _day: u64, _message: &str) {}

    /// The population ended `day` below the extinction threshold.
    fn on_extinction_warning(&mut self, _day: u64, _population: f64) {}
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ColonyObserver for NoOpObserver {}

/// News feed line for an event message: `Day N: message`.
pub fn news_line(day: u64, message: &str) -> String {
    format!("Day {day}: {message}")
}
