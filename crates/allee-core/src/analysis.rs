//! The four analytical views derived from the colony.
//!
//! - **History**: the recorded trajectory, one point per day.
//! - **Projection**: the next days iterated deterministically with the
//!   current `r`, `K`, `A` held fixed. No events are drawn.
//! - **Lyapunov**: the average log-stretch `ln|f'(x)|` along a trajectory,
//!   swept across growth rates. Positive values indicate chaos.
//! - **Bifurcation**: the long-run population values visited at each growth
//!   rate, swept across growth rates.
//!
//! The two sweeps ignore the colony's own `r` and `x`; they depend only on
//! `(K, A)` and the sweep settings. [`AnalysisEngine::sweeps`] memoizes them
//! on exactly those inputs so a day advance that leaves `K` and `A` alone
//! does not recompute several hundred thousand map steps.
//!
//! Sweep grids are generated by index (`r_min + i·step`) so the point count
//! is fixed and the values do not drift.

use allee_model::model::{
    MIN_DERIVATIVE_MAGNITUDE, clamp_for_lyapunov, clamp_population, derivative, step,
};
use allee_types::Point2D;
use tracing::{debug, warn};

use crate::colony::Colony;
use crate::config::{AnalysisConfig, BifurcationConfig, LyapunovConfig};

/// Days covered by the projection, counting the current day.
pub const PROJECTION_POINTS: usize = 30;

/// Slack added in index space so a grid point that lands on `r_max` within
/// rounding is kept.
const GRID_EPSILON: f64 = 1e-9;

/// Both growth-rate sweeps for one `(K, A)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sweeps {
    /// `(r, exponent)` per grid point.
    pub lyapunov: Vec<Point2D>,
    /// `(r, population)`, `samples` points per grid point.
    pub bifurcation: Vec<Point2D>,
}

/// Single-entry memo of the last computed sweeps.
#[derive(Debug, Clone, Default)]
struct SweepCache {
    key: Option<(u64, u64)>,
    sweeps: Sweeps,
}

/// Turns colony state into chart series.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    cache: SweepCache,
}

impl AnalysisEngine {
    /// Engine using the given sweep settings.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            cache: SweepCache::default(),
        }
    }

    /// The active settings.
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// `(day, population)` for every recorded day.
    #[allow(clippy::cast_precision_loss)]
    pub fn history_series(&self, colony: &Colony) -> Vec<Point2D> {
        colony
            .history()
            .iter()
            .enumerate()
            .map(|(day, &population)| Point2D::new(day as f64, population))
            .collect()
    }

    /// Deterministic forward projection from the current day.
    ///
    /// Point 0 is `(current_day, x)`. Each further point applies one map step
    /// with the colony's current parameters, clamped at zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn projection_series(&self, colony: &Colony) -> Vec<Point2D> {
        let params = colony.parameters();
        let start = colony.current_day() as f64;
        let mut x = params.population;
        let mut points = Vec::with_capacity(PROJECTION_POINTS);
        let mut degenerate = false;

        for i in 0..PROJECTION_POINTS {
            if i > 0 {
                let next = step(
                    x,
                    params.growth_rate,
                    params.carrying_capacity,
                    params.allee_threshold,
                );
                degenerate |= !next.is_finite();
                x = clamp_population(next);
            }
            points.push(Point2D::new(start + i as f64, x));
        }

        if degenerate {
            warn!(
                allee_threshold = params.allee_threshold,
                "Projection produced non-finite values, collapsed to zero"
            );
        }
        points
    }

    /// Lyapunov exponent for each growth rate on the configured grid.
    pub fn lyapunov_series(&self, k: f64, a: f64) -> Vec<Point2D> {
        let settings = &self.config.lyapunov;
        grid(settings.r_min, settings.r_max, settings.r_step)
            .map(|r| Point2D::new(r, lyapunov_exponent(settings, r, k, a)))
            .collect()
    }

    /// Long-run population samples for each growth rate on the configured
    /// grid.
    pub fn bifurcation_series(&self, k: f64, a: f64) -> Vec<Point2D> {
        let settings = &self.config.bifurcation;
        grid(settings.r_min, settings.r_max, settings.r_step)
            .flat_map(|r| bifurcation_column(settings, r, k, a))
            .collect()
    }

    /// Both sweeps for `(k, a)`, recomputed only when either input changed
    /// since the previous call.
    pub fn sweeps(&mut self, k: f64, a: f64) -> &Sweeps {
        let key = (k.to_bits(), a.to_bits());
        if self.cache.key != Some(key) {
            debug!(k, a, "Recomputing growth-rate sweeps");
            self.cache.sweeps = Sweeps {
                lyapunov: self.lyapunov_series(k, a),
                bifurcation: self.bifurcation_series(k, a),
            };
            self.cache.key = Some(key);
        }
        &self.cache.sweeps
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Derivative-based Lyapunov estimate at growth rate `r`.
///
/// Starts from `K/2`, discards `warmup` iterations, then averages
/// `ln|f'(x)|` over `samples` iterations. Iterates are clamped into
/// `[1e-10, 10·K]`; near-zero and non-finite derivatives are skipped. Returns 0 when no
/// sample survives.
pub fn lyapunov_exponent(settings: &LyapunovConfig, r: f64, k: f64, a: f64) -> f64 {
    let mut x = k / 2.0;
    for _ in 0..settings.warmup {
        x = clamp_for_lyapunov(step(x, r, k, a), k);
    }

    let mut sum = 0.0;
    let mut valid: u32 = 0;
    for _ in 0..settings.samples {
        let slope = derivative(x, r, k, a).abs();
        if slope.is_finite() && slope > MIN_DERIVATIVE_MAGNITUDE {
            sum += slope.ln();
            valid = valid.saturating_add(1);
        }
        x = clamp_for_lyapunov(step(x, r, k, a), k);
    }

    if valid == 0 {
        0.0
    } else {
        sum / f64::from(valid)
    }
}

fn bifurcation_column(settings: &BifurcationConfig, r: f64, k: f64, a: f64) -> Vec<Point2D> {
    let mut x = settings.initial_population;
    for _ in 0..settings.warmup {
        x = clamp_population(step(x, r, k, a));
    }
    let mut column = Vec::with_capacity(settings.samples);
    for _ in 0..settings.samples {
        x = clamp_population(step(x, r, k, a));
        column.push(Point2D::new(r, x));
    }
    column
}

/// `r_min, r_min + step, ...` up to and including `r_max`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn grid(r_min: f64, r_max: f64, r_step: f64) -> impl Iterator<Item = f64> {
    let span = (r_max - r_min) / r_step + GRID_EPSILON;
    let count = if span.is_finite() && span >= 0.0 {
        span.floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| (i as f64).mul_add(r_step, r_min))
}
