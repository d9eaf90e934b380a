//! End-to-end tests for the colony session.
//!
//! A recording observer captures everything the session publishes so the
//! tests can check the outbound contract alongside the colony state.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use std::cell::RefCell;
use std::rc::Rc;

use allee_core::config::AnalysisConfig;
use allee_core::observer::news_line;
use allee_core::{
    AnalysisEngine, Colony, ColonyError, ColonyObserver, ColonySession, SimulatorConfig,
    Technology,
};
use allee_model::{RandomEventGenerator, ScriptedEventSource};
use allee_types::{ColonyEvent, ColonyPhase, ColonyStatus, Point2D};

// =============================================================================
// Recording observer
// =============================================================================

#[derive(Debug, Default)]
struct Recording {
    statuses: Vec<ColonyStatus>,
    history: Vec<Point2D>,
    projection: Vec<Point2D>,
    lyapunov: Vec<Point2D>,
    bifurcation: Vec<Point2D>,
    news: Vec<String>,
    extinction_warnings: Vec<(u64, f64)>,
}

struct Recorder(Rc<RefCell<Recording>>);

impl ColonyObserver for Recorder {
    fn on_status_changed(&mut self, status: &ColonyStatus) {
        self.0.borrow_mut().statuses.push(*status);
    }

    fn on_history_series(&mut self, points: &[Point2D]) {
        self.0.borrow_mut().history = points.to_vec();
    }

    fn on_projection_series(&mut self, points: &[Point2D]) {
        self.0.borrow_mut().projection = points.to_vec();
    }

    fn on_lyapunov_series(&mut self, points: &[Point2D]) {
        self.0.borrow_mut().lyapunov = points.to_vec();
    }

    fn on_bifurcation_series(&mut self, points: &[Point2D]) {
        self.0.borrow_mut().bifurcation = points.to_vec();
    }

    fn on_event_message(&mut self, day: u64, message: &str) {
        self.0.borrow_mut().news.push(news_line(day, message));
    }

    fn on_extinction_warning(&mut self, day: u64, population: f64) {
        self.0
            .borrow_mut()
            .extinction_warnings
            .push((day, population));
    }
}

fn coarse_engine() -> AnalysisEngine {
    let mut config = AnalysisConfig::default();
    config.lyapunov.r_step = 0.25;
    config.bifurcation.r_step = 0.25;
    AnalysisEngine::new(config)
}

fn session_with(colony: Colony) -> (ColonySession, Rc<RefCell<Recording>>) {
    let mut session = ColonySession::new(colony, coarse_engine());
    let recording = Rc::new(RefCell::new(Recording::default()));
    session.subscribe(Box::new(Recorder(Rc::clone(&recording))));
    (session, recording)
}

fn calm_session() -> (ColonySession, Rc<RefCell<Recording>>) {
    session_with(Colony::with_event_source(Box::new(
        ScriptedEventSource::calm(),
    )))
}

// =============================================================================
// Day advance
// =============================================================================

#[test]
fn first_calm_day_reaches_five_point_eight() {
    let (mut session, recording) = calm_session();
    let report = session.advance_day();

    assert_eq!(report.day, 1);
    assert!((report.population - 5.8).abs() < 1e-12);

    let recording = recording.borrow();
    let status = recording.statuses.last().copied().unwrap();
    assert_eq!(status.day, 1);
    assert!((status.population - 5.8).abs() < 1e-12);
    assert_eq!(status.phase, ColonyPhase::Active);

    assert_eq!(recording.history.len(), 2);
    assert_eq!(recording.history[0], Point2D::new(0.0, 5.0));
    assert!((recording.history[1].y - 5.8).abs() < 1e-12);

    assert_eq!(recording.projection.len(), 30);
    assert_eq!(recording.projection[0].x, 1.0);
    assert!((recording.projection[0].y - 5.8).abs() < 1e-12);

    assert_eq!(recording.news.len(), 1);
    assert!(recording.news[0].starts_with("Day 1: "));
    assert!(recording.extinction_warnings.is_empty());
}

#[test]
fn extinction_warning_fires_below_threshold() {
    let (mut session, recording) = calm_session();
    session.set_population(0.05);
    let report = session.advance_day();
    assert!(report.extinct);

    let recording = recording.borrow();
    assert_eq!(recording.extinction_warnings.len(), 1);
    assert_eq!(recording.extinction_warnings[0].0, 1);
    assert!(recording.extinction_warnings[0].1 < 0.1);
    assert_eq!(
        recording.statuses.last().map(|s| s.phase),
        Some(ColonyPhase::Extinct)
    );
}

#[test]
fn plague_halves_population_before_step() {
    let plague = ColonyEvent::new("plague", 0.80, 1.0, 1.20).with_population_multiplier(0.5);
    let (mut session, recording) = session_with(Colony::with_event_source(Box::new(
        ScriptedEventSource::new(vec![plague]),
    )));
    session.advance_day();

    let x = 2.5;
    let r = 0.04;
    let a = 1.2;
    let expected = x + r * x * (1.0 - x / 25.0) * (x / a - 1.0);
    assert!((session.colony().population() - expected).abs() < 1e-12);
    assert_eq!(recording.borrow().news, vec!["Day 1: plague".to_owned()]);
}

// =============================================================================
// Technology
// =============================================================================

#[test]
fn spending_at_day_twenty_five() {
    let (mut session, recording) = calm_session();
    for _ in 0..25 {
        session.advance_day();
    }
    assert_eq!(session.colony().technology_points(), 2);

    let published = recording.borrow().statuses.len();
    let err = session.spend_technology_points(3).unwrap_err();
    assert_eq!(
        err,
        ColonyError::InsufficientTechnologyPoints {
            requested: 3,
            available: 2,
        }
    );
    assert_eq!(session.colony().current_day(), 25);
    assert_eq!(recording.borrow().statuses.len(), published);

    assert_eq!(session.spend_technology_points(2).unwrap(), 45);
    let recording = recording.borrow();
    assert_eq!(recording.statuses.len(), published + 1);
    let status = recording.statuses.last().copied().unwrap();
    assert_eq!(status.day, 45);
    assert_eq!(status.technology_points, 4);
    // History is indexed by simulated days, not by the day counter.
    assert_eq!(recording.history.len(), 26);
}

#[test]
fn technology_purchase_updates_parameters() {
    let (mut session, _recording) = calm_session();
    for _ in 0..20 {
        session.advance_day();
    }
    session.apply_technology(Technology::BreedingFrenzy).unwrap();
    assert!((session.colony().growth_rate() - 0.125).abs() < 1e-12);
    assert_eq!(session.colony().current_day(), 40);
}

// =============================================================================
// Reset and determinism
// =============================================================================

#[test]
fn reset_restores_initial_state_and_publishes() {
    let (mut session, recording) = session_with(Colony::with_event_source(Box::new(
        RandomEventGenerator::seeded(5),
    )));
    for _ in 0..15 {
        session.advance_day();
    }
    session.build_chambers();
    session.reset();

    let colony = session.colony();
    assert_eq!(colony.population(), 5.0);
    assert_eq!(colony.growth_rate(), 0.05);
    assert_eq!(colony.carrying_capacity(), 25.0);
    assert_eq!(colony.allee_threshold(), 1.0);
    assert_eq!(colony.current_day(), 0);
    assert_eq!(colony.history(), &[5.0]);

    let recording = recording.borrow();
    assert_eq!(recording.history, vec![Point2D::new(0.0, 5.0)]);
    assert_eq!(recording.statuses.last().map(|s| s.day), Some(0));
}

#[test]
fn seeded_runs_replay_after_reset() {
    let mut config = SimulatorConfig::default();
    config.events.seed = Some(2024);
    let mut session = ColonySession::from_config(&config);

    let first: Vec<f64> = (0..60).map(|_| session.advance_day().population).collect();
    session.reset();
    let second: Vec<f64> = (0..60).map(|_| session.advance_day().population).collect();
    assert_eq!(first, second);
}

// =============================================================================
// Analysis views
// =============================================================================

#[test]
fn sweeps_follow_capacity_and_threshold() {
    let (mut session, recording) = calm_session();
    session.publish();
    let before = recording.borrow().lyapunov.clone();
    assert!(!before.is_empty());

    session.lay_more_eggs();
    assert_eq!(recording.borrow().lyapunov, before);

    session.build_chambers();
    assert_ne!(recording.borrow().lyapunov, before);
}

#[test]
fn snapshot_serializes_to_json() {
    let (mut session, _recording) = calm_session();
    session.advance_day();
    let snapshot = session.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"status\""));
    assert!(json.contains("\"bifurcation\""));
    let back: allee_types::AnalysisSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.status, snapshot.status);
    assert_eq!(back.history.len(), 2);
}
