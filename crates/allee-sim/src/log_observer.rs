//! Observer that reports session updates through `tracing`.

use allee_core::ColonyObserver;
use allee_core::observer::news_line;
use allee_types::{ColonyStatus, Point2D};
use tracing::{debug, warn};

/// Logs every published view.
#[derive(Debug, Default)]
pub struct LogObserver;

impl ColonyObserver for LogObserver {
    fn on_status_changed(&mut self, status: &ColonyStatus) {
        debug!(
            day = status.day,
            population = status.population,
            r = status.growth_rate,
            k = status.carrying_capacity,
            a = status.allee_threshold,
            technology_points = status.technology_points,
            phase = %status.phase,
            "Status published"
        );
    }

    fn on_history_series(&mut self, points: &[Point2D]) {
        debug!(points = points.len(), "History series published");
    }

    fn on_projection_series(&mut self, points: &[Point2D]) {
        let last = points.last().map(|p| p.y);
        debug!(points = points.len(), final_population = ?last, "Projection published");
    }

    fn on_lyapunov_series(&mut self, points: &[Point2D]) {
        let chaotic = points.iter().filter(|p| p.y > 0.0).count();
        debug!(points = points.len(), chaotic, "Lyapunov series published");
    }

    fn on_bifurcation_series(&mut self, points: &[Point2D]) {
        debug!(points = points.len(), "Bifurcation series published");
    }

    fn on_event_message(&mut self, day: u64, message: &str) {
        debug!(day, news = %news_line(day, message), "Event message published");
    }

    fn on_extinction_warning(&mut self, day: u64, population: f64) {
        warn!(day, population, "The colony is extinct");
    }
}
