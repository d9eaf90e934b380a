//! Colony state and the daily advance.
//!
//! The colony owns the four model parameters, the day counter, and the
//! population history. It is the single place where those values change.
//!
//! # Invariants
//!
//! - `x` and `r` are never negative; every mutation clamps them.
//! - `K` never drops below [`MIN_CARRYING_CAPACITY`] and `A` never drops
//!   below [`MIN_ALLEE_THRESHOLD`]. Both are divisors in the map.
//! - `history[i]` is the population at the end of day `i`; `history[0]` is
//!   the starting population. The history only grows, except on reset.
//! - Technology points are derived from the day counter, never stored.
//!
//! [`MIN_CARRYING_CAPACITY`]: allee_model::model::MIN_CARRYING_CAPACITY
//! [`MIN_ALLEE_THRESHOLD`]: allee_model::model::MIN_ALLEE_THRESHOLD

use allee_model::model::{
    clamp_allee_threshold, clamp_carrying_capacity, clamp_non_negative, clamp_population,
    is_extinct, step_params,
};
use allee_model::{EventSource, RandomEventGenerator};
use allee_types::{ColonyEvent, ColonyPhase, ColonyStatus, ModelParameters};
use tracing::{debug, info, warn};

use crate::actions::Action;
use crate::error::ColonyError;
use crate::technology::Technology;

/// Parameters every colony starts from (and returns to on reset).
pub const INITIAL_PARAMETERS: ModelParameters = ModelParameters::new(5.0, 0.05, 25.0, 1.0);

/// Elapsed days that earn one technology point.
pub const DAYS_PER_TECHNOLOGY_POINT: u64 = 10;

/// Outcome of one simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    /// The day number just reached.
    pub day: u64,
    /// The event applied before the map step.
    pub event: ColonyEvent,
    /// Population at the end of the day.
    pub population: f64,
    /// Whether the population ended below the extinction threshold.
    pub extinct: bool,
}

/// The simulated ant colony.
#[derive(Debug)]
pub struct Colony {
    params: ModelParameters,
    day: u64,
    history: Vec<f64>,
    events: Box<dyn EventSource>,
}

impl Colony {
    /// A colony drawing events from an OS-seeded generator.
    pub fn new() -> Self {
        Self::with_event_source(Box::new(RandomEventGenerator::new()))
    }

    /// A colony whose event sequence is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_event_source(Box::new(RandomEventGenerator::seeded(seed)))
    }

    /// A colony drawing events from a caller-supplied source.
    pub fn with_event_source(events: Box<dyn EventSource>) -> Self {
        Self {
            params: INITIAL_PARAMETERS,
            day: 0,
            history: vec![INITIAL_PARAMETERS.population],
            events,
        }
    }

    // -----------------------------------------------------------------------
    // Day advance
    // -----------------------------------------------------------------------

    /// Simulate one day.
    ///
    /// Draws an event, scales `r`, `K`, `A`, and `x` by its multipliers,
    /// applies one map step, clamps the result, records it, and bumps the
    /// day counter.
    pub fn advance_day(&mut self) -> DayReport {
        let event = self.events.next_event();

        self.params.growth_rate = clamp_non_negative(self.params.growth_rate * event.r_multiplier);
        self.params.carrying_capacity =
            clamp_carrying_capacity(self.params.carrying_capacity * event.k_multiplier);
        self.params.allee_threshold =
            clamp_allee_threshold(self.params.allee_threshold * event.a_multiplier);
        self.params.population =
            clamp_non_negative(self.params.population * event.population_multiplier);

        let raw = step_params(&self.params);
        if !raw.is_finite() {
            warn!(
                day = self.day,
                allee_threshold = self.params.allee_threshold,
                "Map produced a non-finite population, collapsing to zero"
            );
        }
        let population = clamp_population(raw);

        self.params.population = population;
        self.day = self.day.saturating_add(1);
        self.history.push(population);

        let extinct = is_extinct(population);
        debug!(
            day = self.day,
            population,
            r = self.params.growth_rate,
            k = self.params.carrying_capacity,
            a = self.params.allee_threshold,
            calm = event.is_calm(),
            "Day advanced"
        );
        if extinct {
            warn!(day = self.day, population, "Colony has gone extinct");
        }

        DayReport {
            day: self.day,
            event,
            population,
            extinct,
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Apply one of the four player actions.
    pub fn apply_action(&mut self, action: Action) {
        let effect = action.effect();
        self.params.growth_rate = clamp_non_negative(self.params.growth_rate * effect.r);
        self.params.carrying_capacity =
            clamp_carrying_capacity(self.params.carrying_capacity * effect.k);
        self.params.allee_threshold =
            clamp_allee_threshold(self.params.allee_threshold * effect.a);
        debug!(
            action = action.name(),
            r = self.params.growth_rate,
            k = self.params.carrying_capacity,
            a = self.params.allee_threshold,
            "Action applied"
        );
    }

    /// `r *= 1.20`.
    pub fn lay_more_eggs(&mut self) {
        self.apply_action(Action::LayMoreEggs);
    }

    /// `r *= 0.75`.
    pub fn lay_less_eggs(&mut self) {
        self.apply_action(Action::LayLessEggs);
    }

    /// `K *= 1.5`, `A *= 0.80`.
    pub fn build_chambers(&mut self) {
        self.apply_action(Action::BuildChambers);
    }

    /// `K *= 0.70`, `A *= 1.15`.
    pub fn destroy_chambers(&mut self) {
        self.apply_action(Action::DestroyChambers);
    }

    /// Restore the initial parameters, history, and day counter, and rewind
    /// the event source.
    pub fn reset(&mut self) {
        self.params = INITIAL_PARAMETERS;
        self.day = 0;
        self.history.clear();
        self.history.push(INITIAL_PARAMETERS.population);
        self.events.restart();
        info!("Colony reset to initial state");
    }

    // -----------------------------------------------------------------------
    // Technology
    // -----------------------------------------------------------------------

    /// Points earned so far: one per ten elapsed days.
    pub const fn technology_points(&self) -> u64 {
        self.day / DAYS_PER_TECHNOLOGY_POINT
    }

    /// Spend `points` by advancing the day counter ten days per point.
    ///
    /// Returns the new day number. The population history and the model
    /// parameters are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::InsufficientTechnologyPoints`] when fewer than
    /// `points` are available. Nothing changes in that case.
    pub fn spend_technology_points(&mut self, points: u64) -> Result<u64, ColonyError> {
        let available = self.technology_points();
        if available < points {
            return Err(ColonyError::InsufficientTechnologyPoints {
                requested: points,
                available,
            });
        }
        let days = points.saturating_mul(DAYS_PER_TECHNOLOGY_POINT);
        self.day = self.day.saturating_add(days);
        debug!(points, day = self.day, "Technology points spent");
        Ok(self.day)
    }

    /// Buy and apply a technology upgrade.
    ///
    /// # Errors
    ///
    /// Returns [`ColonyError::InsufficientTechnologyPoints`] when the colony
    /// cannot afford the upgrade. Nothing changes in that case.
    pub fn apply_technology(&mut self, technology: Technology) -> Result<(), ColonyError> {
        self.spend_technology_points(technology.cost())?;
        match technology {
            Technology::Cull => {
                self.set_population(self.params.population * Technology::CULL_FACTOR);
            }
            Technology::BreedingFrenzy => {
                self.set_growth_rate(self.params.growth_rate * Technology::FRENZY_FACTOR);
            }
            Technology::NannyAnts => {
                self.set_allee_threshold(
                    self.params.allee_threshold
                        + Technology::NANNY_SHARE_OF_K * self.params.carrying_capacity,
                );
            }
        }
        info!(technology = technology.name(), day = self.day, "Technology applied");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    /// Set the population, flooring at zero.
    pub const fn set_population(&mut self, population: f64) {
        self.params.population = clamp_non_negative(population);
    }

    /// Set the growth rate, flooring at zero.
    pub const fn set_growth_rate(&mut self, growth_rate: f64) {
        self.params.growth_rate = clamp_non_negative(growth_rate);
    }

    /// Set the Allee threshold, flooring at
    /// [`MIN_ALLEE_THRESHOLD`](allee_model::model::MIN_ALLEE_THRESHOLD).
    pub const fn set_allee_threshold(&mut self, allee_threshold: f64) {
        self.params.allee_threshold = clamp_allee_threshold(allee_threshold);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current model parameters.
    pub const fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    /// Current population `x`.
    pub const fn population(&self) -> f64 {
        self.params.population
    }

    /// Current growth rate `r`.
    pub const fn growth_rate(&self) -> f64 {
        self.params.growth_rate
    }

    /// Current carrying capacity `K`.
    pub const fn carrying_capacity(&self) -> f64 {
        self.params.carrying_capacity
    }

    /// Current Allee threshold `A`.
    pub const fn allee_threshold(&self) -> f64 {
        self.params.allee_threshold
    }

    /// Elapsed days.
    pub const fn current_day(&self) -> u64 {
        self.day
    }

    /// Population at the end of every recorded day.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Active or extinct.
    pub fn phase(&self) -> ColonyPhase {
        if is_extinct(self.params.population) {
            ColonyPhase::Extinct
        } else {
            ColonyPhase::Active
        }
    }

    /// Status panel contents.
    pub fn status(&self) -> ColonyStatus {
        ColonyStatus {
            day: self.day,
            population: self.params.population,
            growth_rate: self.params.growth_rate,
            carrying_capacity: self.params.carrying_capacity,
            allee_threshold: self.params.allee_threshold,
            technology_points: self.technology_points(),
            phase: self.phase(),
        }
    }
}

impl Default for Colony {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use allee_model::ScriptedEventSource;
    use allee_model::model::MIN_ALLEE_THRESHOLD;

    use super::*;

    fn calm_colony() -> Colony {
        Colony::with_event_source(Box::new(ScriptedEventSource::calm()))
    }

    fn scripted(events: Vec<ColonyEvent>) -> Colony {
        Colony::with_event_source(Box::new(ScriptedEventSource::new(events)))
    }

    fn assert_initial(colony: &Colony) {
        assert_eq!(*colony.parameters(), INITIAL_PARAMETERS);
        assert_eq!(colony.current_day(), 0);
        assert_eq!(colony.history(), &[5.0]);
    }

    #[test]
    fn starts_from_initial_parameters() {
        let colony = Colony::with_seed(1);
        assert_initial(&colony);
        assert_eq!(colony.phase(), ColonyPhase::Active);
        assert_eq!(colony.technology_points(), 0);
    }

    #[test]
    fn calm_day_follows_the_map() {
        let mut colony = calm_colony();
        let report = colony.advance_day();

        assert_eq!(report.day, 1);
        assert!(report.event.is_calm());
        assert!(!report.extinct);
        assert!((colony.population() - 5.8).abs() < 1e-12);
        assert_eq!(colony.current_day(), 1);
        assert_eq!(colony.history().len(), 2);
        assert!((colony.history().last().copied().unwrap() - 5.8).abs() < 1e-12);
    }

    #[test]
    fn event_multipliers_apply_before_the_step() {
        let event = ColonyEvent::new("shock", 2.0, 0.5, 1.5).with_population_multiplier(0.5);
        let mut colony = scripted(vec![event]);
        colony.advance_day();

        let r = 0.1;
        let k = 12.5;
        let a = 1.5;
        let x = 2.5;
        let expected = x + r * x * (1.0 - x / k) * (x / a - 1.0);
        assert!((colony.growth_rate() - r).abs() < 1e-12);
        assert!((colony.carrying_capacity() - k).abs() < 1e-12);
        assert!((colony.allee_threshold() - a).abs() < 1e-12);
        assert!((colony.population() - expected).abs() < 1e-12);
    }

    #[test]
    fn each_day_grows_history_by_one() {
        let mut colony = Colony::with_seed(3);
        for expected_day in 1..=200_u64 {
            let before = colony.history().len();
            colony.advance_day();
            assert_eq!(colony.history().len(), before + 1);
            assert_eq!(colony.current_day(), expected_day);
            assert!(colony.population() >= 0.0);
            assert!(colony.growth_rate() >= 0.0);
            assert!(colony.allee_threshold() >= MIN_ALLEE_THRESHOLD);
            assert!(colony.carrying_capacity() > 0.0);
        }
    }

    #[test]
    fn below_threshold_colony_goes_extinct() {
        let mut colony = calm_colony();
        colony.set_population(0.05);
        let report = colony.advance_day();
        assert!(report.extinct);
        assert_eq!(colony.phase(), ColonyPhase::Extinct);
        // Extinction does not lock the colony.
        colony.lay_more_eggs();
        colony.advance_day();
        assert_eq!(colony.current_day(), 2);
    }

    #[test]
    fn actions_apply_exact_multipliers() {
        let mut colony = calm_colony();
        colony.lay_more_eggs();
        assert!((colony.growth_rate() - 0.06).abs() < 1e-12);
        colony.lay_less_eggs();
        assert!((colony.growth_rate() - 0.045).abs() < 1e-12);
        colony.build_chambers();
        assert!((colony.carrying_capacity() - 37.5).abs() < 1e-12);
        assert!((colony.allee_threshold() - 0.8).abs() < 1e-12);
        colony.destroy_chambers();
        assert!((colony.carrying_capacity() - 26.25).abs() < 1e-12);
        assert!((colony.allee_threshold() - 0.92).abs() < 1e-12);
        assert_eq!(colony.current_day(), 0);
    }

    #[test]
    fn carrying_capacity_never_reaches_zero() {
        let mut colony = calm_colony();
        for _ in 0..200 {
            colony.destroy_chambers();
        }
        assert!(colony.carrying_capacity() >= allee_model::model::MIN_CARRYING_CAPACITY);
        let report = colony.advance_day();
        assert!(report.population.is_finite());
    }

    #[test]
    fn reset_restores_everything() {
        let mut colony = Colony::with_seed(11);
        for _ in 0..37 {
            colony.advance_day();
        }
        colony.build_chambers();
        colony.lay_more_eggs();
        colony.set_population(123.0);
        colony.reset();
        assert_initial(&colony);
    }

    #[test]
    fn reset_replays_seeded_events() {
        let mut colony = Colony::with_seed(8);
        let first: Vec<ColonyEvent> = (0..30).map(|_| colony.advance_day().event).collect();
        colony.reset();
        let second: Vec<ColonyEvent> = (0..30).map(|_| colony.advance_day().event).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn technology_points_floor_days() {
        let mut colony = calm_colony();
        for _ in 0..25 {
            colony.advance_day();
        }
        assert_eq!(colony.technology_points(), 2);
    }

    #[test]
    fn spending_advances_days() {
        let mut colony = calm_colony();
        for _ in 0..25 {
            colony.advance_day();
        }
        let history_len = colony.history().len();
        let params = *colony.parameters();

        assert_eq!(colony.spend_technology_points(2).unwrap(), 45);
        assert_eq!(colony.current_day(), 45);
        assert_eq!(colony.history().len(), history_len);
        assert_eq!(*colony.parameters(), params);
    }

    #[test]
    fn overspending_changes_nothing() {
        let mut colony = calm_colony();
        for _ in 0..25 {
            colony.advance_day();
        }
        let err = colony.spend_technology_points(3).unwrap_err();
        assert_eq!(
            err,
            ColonyError::InsufficientTechnologyPoints {
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(colony.current_day(), 25);
    }

    #[test]
    fn cull_halves_population() {
        let mut colony = calm_colony();
        for _ in 0..10 {
            colony.advance_day();
        }
        let before = colony.population();
        colony.apply_technology(Technology::Cull).unwrap();
        assert!((colony.population() - before * 0.5).abs() < 1e-12);
        assert_eq!(colony.current_day(), 20);
    }

    #[test]
    fn breeding_frenzy_needs_two_points() {
        let mut colony = calm_colony();
        for _ in 0..10 {
            colony.advance_day();
        }
        assert!(colony.apply_technology(Technology::BreedingFrenzy).is_err());
        assert_eq!(colony.current_day(), 10);
        assert!((colony.growth_rate() - 0.05).abs() < 1e-12);

        for _ in 0..10 {
            colony.advance_day();
        }
        colony.apply_technology(Technology::BreedingFrenzy).unwrap();
        assert!((colony.growth_rate() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn nanny_ants_raise_threshold_by_share_of_capacity() {
        let mut colony = calm_colony();
        for _ in 0..10 {
            colony.advance_day();
        }
        colony.apply_technology(Technology::NannyAnts).unwrap();
        assert!((colony.allee_threshold() - 2.25).abs() < 1e-12);
    }

    #[test]
    fn setters_clamp_to_their_floors() {
        let mut colony = calm_colony();
        colony.set_population(-4.0);
        colony.set_growth_rate(-0.1);
        colony.set_allee_threshold(-2.0);
        assert_eq!(colony.population(), 0.0);
        assert_eq!(colony.growth_rate(), 0.0);
        assert_eq!(colony.allee_threshold(), MIN_ALLEE_THRESHOLD);
    }

    #[test]
    fn zero_threshold_is_floored_and_grows() {
        let mut colony = calm_colony();
        colony.set_allee_threshold(0.0);
        assert_eq!(colony.allee_threshold(), MIN_ALLEE_THRESHOLD);

        let report = colony.advance_day();
        assert!(report.population.is_finite());
        assert!(report.population > 5.0);
        assert!(!report.extinct);
        assert_eq!(colony.phase(), ColonyPhase::Active);
    }

    #[test]
    fn shrinking_actions_respect_threshold_floor() {
        let mut colony = calm_colony();
        for _ in 0..200 {
            colony.build_chambers();
        }
        assert_eq!(colony.allee_threshold(), MIN_ALLEE_THRESHOLD);
    }

    #[test]
    fn status_reflects_state() {
        let mut colony = calm_colony();
        for _ in 0..12 {
            colony.advance_day();
        }
        let status = colony.status();
        assert_eq!(status.day, 12);
        assert_eq!(status.technology_points, 1);
        assert_eq!(status.population, colony.population());
        assert_eq!(status.phase, ColonyPhase::Active);
    }
}
