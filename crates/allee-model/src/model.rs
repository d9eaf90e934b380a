//! The Allee-effect population map.
//!
//! The map is a logistic map with an extra Allee factor:
//!
//! ```text
//! f(x) = x + r·x·(1 − x/K)·(x/A − 1)
//! ```
//!
//! Below the threshold `A` the factor `(x/A − 1)` is negative, so a small
//! colony shrinks even when it is far below carrying capacity. That is the
//! minimum-viable-population effect the simulator is built around.
//!
//! The functions here are pure and never clamp. Every caller clamps the
//! result with the rule that fits its context: [`clamp_non_negative`] for the
//! simulated trajectory, the projection and the bifurcation sweep, and
//! [`clamp_for_lyapunov`] for the Lyapunov sweep.

use allee_types::ModelParameters;

/// Population below which the colony is reported as extinct.
pub const EXTINCTION_THRESHOLD: f64 = 0.1;

/// Lowest carrying capacity the simulation will hold. `K` appears as a
/// divisor in the map, so it is floored here after every mutation.
pub const MIN_CARRYING_CAPACITY: f64 = 1e-6;

/// Lowest Allee threshold the simulation will hold. `A` is a divisor in the
/// map, so it is floored here after every mutation.
pub const MIN_ALLEE_THRESHOLD: f64 = 1e-6;

/// Lower clamp for Lyapunov iterations.
pub const LYAPUNOV_FLOOR: f64 = 1e-10;

/// Upper clamp for Lyapunov iterations, as a multiple of `K`.
pub const LYAPUNOV_CEILING_FACTOR: f64 = 10.0;

/// Derivative magnitudes at or below this are skipped by the Lyapunov sum.
pub const MIN_DERIVATIVE_MAGNITUDE: f64 = 1e-15;

/// Apply one step of the map.
pub fn step(x: f64, r: f64, k: f64, a: f64) -> f64 {
    x + r * x * (1.0 - x / k) * (x / a - 1.0)
}

/// Analytic derivative of [`step`] with respect to `x`:
///
/// ```text
/// f'(x) = 1 + r·[(x/A − 1)(1 − 2x/K) + (x/A)(1 − x/K)]
/// ```
pub fn derivative(x: f64, r: f64, k: f64, a: f64) -> f64 {
    let allee_term = (x / a - 1.0) * (1.0 - 2.0 * x / k);
    let capacity_term = (x / a) * (1.0 - x / k);
    1.0 + r * (allee_term + capacity_term)
}

/// Apply [`step`] to a parameter set.
pub fn step_params(params: &ModelParameters) -> f64 {
    step(
        params.population,
        params.growth_rate,
        params.carrying_capacity,
        params.allee_threshold,
    )
}

/// Floor a value at zero. NaN collapses to zero as well.
pub const fn clamp_non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Clamp a simulated population: negative values floor at zero and
/// non-finite values (a degenerate `A = 0` map) collapse to zero.
pub const fn clamp_population(value: f64) -> f64 {
    if value.is_finite() {
        clamp_non_negative(value)
    } else {
        0.0
    }
}

/// Floor a carrying capacity at [`MIN_CARRYING_CAPACITY`].
pub const fn clamp_carrying_capacity(k: f64) -> f64 {
    if k.is_nan() || k < MIN_CARRYING_CAPACITY {
        MIN_CARRYING_CAPACITY
    } else {
        k
    }
}

/// Floor an Allee threshold at [`MIN_ALLEE_THRESHOLD`].
pub const fn clamp_allee_threshold(a: f64) -> f64 {
    if a.is_nan() || a < MIN_ALLEE_THRESHOLD {
        MIN_ALLEE_THRESHOLD
    } else {
        a
    }
}

/// Clamp a Lyapunov iterate into `[1e-10, 10·K]`.
///
/// Keeps the trajectory away from the absorbing zero state and from runaway
/// growth, either of which would poison the derivative samples.
pub fn clamp_for_lyapunov(x: f64, k: f64) -> f64 {
    let ceiling = k * LYAPUNOV_CEILING_FACTOR;
    if x.is_nan() || x < LYAPUNOV_FLOOR {
        LYAPUNOV_FLOOR
    } else if x > ceiling {
        ceiling
    } else {
        x
    }
}

/// Whether a population counts as extinct.
pub fn is_extinct(population: f64) -> bool {
    population < EXTINCTION_THRESHOLD
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn central_difference(x: f64, r: f64, k: f64, a: f64) -> f64 {
        let h = 1e-5 * x.abs().max(1.0);
        (step(x + h, r, k, a) - step(x - h, r, k, a)) / (2.0 * h)
    }

    #[test]
    fn step_matches_hand_computation() {
        // 5 + 0.05·5·0.8·4
        let next = step(5.0, 0.05, 25.0, 1.0);
        assert!((next - 5.8).abs() < 1e-12, "got {next}");
    }

    #[test]
    fn fixed_points_are_stationary() {
        for fixed in [0.0, 1.0, 25.0] {
            let next = step(fixed, 0.7, 25.0, 1.0);
            assert!((next - fixed).abs() < 1e-12, "{fixed} moved to {next}");
        }
    }

    #[test]
    fn below_threshold_population_declines() {
        let next = step(0.5, 0.2, 25.0, 1.0);
        assert!(next < 0.5);
    }

    #[test]
    fn derivative_matches_numerical_derivative() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let x = rng.random_range(0.0..40.0);
            let r = rng.random_range(0.0..3.0);
            let k = rng.random_range(5.0..80.0);
            let a = rng.random_range(0.5..10.0);

            let analytic = derivative(x, r, k, a);
            let numeric = central_difference(x, r, k, a);
            let tolerance = 1e-6 * analytic.abs().max(1.0);
            assert!(
                (analytic - numeric).abs() <= tolerance,
                "x={x} r={r} k={k} a={a}: analytic {analytic} vs numeric {numeric}"
            );
        }
    }

    #[test]
    fn derivative_at_carrying_capacity() {
        // f'(K) = 1 − r(K/A − 1)
        let d = derivative(25.0, 0.01, 25.0, 1.0);
        assert!((d - 0.76).abs() < 1e-12);
    }

    #[test]
    fn step_params_uses_all_fields() {
        let params = ModelParameters::new(5.0, 0.05, 25.0, 1.0);
        assert_eq!(step_params(&params), step(5.0, 0.05, 25.0, 1.0));
    }

    #[test]
    fn non_negative_clamp() {
        assert_eq!(clamp_non_negative(-3.0), 0.0);
        assert_eq!(clamp_non_negative(f64::NAN), 0.0);
        assert_eq!(clamp_non_negative(2.5), 2.5);
    }

    #[test]
    fn population_clamp_drops_infinities() {
        assert_eq!(clamp_population(f64::INFINITY), 0.0);
        assert_eq!(clamp_population(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_population(-0.5), 0.0);
        assert_eq!(clamp_population(3.0), 3.0);
    }

    #[test]
    fn carrying_capacity_floor() {
        assert_eq!(clamp_carrying_capacity(0.0), MIN_CARRYING_CAPACITY);
        assert_eq!(clamp_carrying_capacity(-1.0), MIN_CARRYING_CAPACITY);
        assert_eq!(clamp_carrying_capacity(25.0), 25.0);
    }

    #[test]
    fn allee_threshold_floor() {
        assert_eq!(clamp_allee_threshold(0.0), MIN_ALLEE_THRESHOLD);
        assert_eq!(clamp_allee_threshold(-3.0), MIN_ALLEE_THRESHOLD);
        assert_eq!(clamp_allee_threshold(f64::NAN), MIN_ALLEE_THRESHOLD);
        assert_eq!(clamp_allee_threshold(1.0), 1.0);
    }

    #[test]
    fn floored_threshold_keeps_the_map_finite() {
        let next = step(5.0, 0.05, 25.0, MIN_ALLEE_THRESHOLD);
        assert!(next.is_finite());
        assert!(next > 5.0);
    }

    #[test]
    fn lyapunov_clamp_bounds() {
        assert_eq!(clamp_for_lyapunov(-5.0, 25.0), LYAPUNOV_FLOOR);
        assert_eq!(clamp_for_lyapunov(1e6, 25.0), 250.0);
        assert_eq!(clamp_for_lyapunov(12.0, 25.0), 12.0);
        assert_eq!(clamp_for_lyapunov(f64::NAN, 25.0), LYAPUNOV_FLOOR);
    }

    #[test]
    fn extinction_threshold_is_strict() {
        assert!(is_extinct(0.099));
        assert!(!is_extinct(0.1));
    }
}
