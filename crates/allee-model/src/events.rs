//! Daily environmental event generation.
//!
//! # Weighted Draws
//!
//! Each simulated day draws one event from an [`EventCatalog`]. A uniform
//! roll `u` in `[0, total_weight)` is mapped onto the catalog's cumulative
//! weights; the first entry whose cumulative weight meets or exceeds `u`
//! wins. See [`EventCatalog::select`].
//!
//! # Determinism
//!
//! [`RandomEventGenerator`] wraps a `StdRng`. A generator built with a seed
//! produces the same event sequence on every run, and [`EventSource::restart`]
//! replays that sequence from the beginning. An unseeded generator takes its
//! seed from the operating system and picks a fresh one on restart.
//!
//! # Sources
//!
//! The colony pulls events through the [`EventSource`] trait so tests (and
//! tutorials) can drive it from a [`ScriptedEventSource`] instead of the
//! random generator.

use std::fmt;

use allee_types::ColonyEvent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::catalog::EventCatalog;

/// A stream of daily events.
pub trait EventSource: fmt::Debug {
    /// Produce the event for the next simulated day.
    fn next_event(&mut self) -> ColonyEvent;

    /// Rewind the stream to its initial state (called on colony reset).
    fn restart(&mut self);
}

/// Weighted random event generator over an immutable catalog.
#[derive(Debug, Clone)]
pub struct RandomEventGenerator {
    catalog: EventCatalog,
    seed: Option<u64>,
    rng: StdRng,
}

impl RandomEventGenerator {
    /// Generator over the standard catalog, seeded from the OS.
    pub fn new() -> Self {
        Self::with_catalog(EventCatalog::standard(), None)
    }

    /// Generator over the standard catalog with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_catalog(EventCatalog::standard(), Some(seed))
    }

    /// Generator over a custom catalog. `None` seeds from the OS.
    pub fn with_catalog(catalog: EventCatalog, seed: Option<u64>) -> Self {
        Self {
            catalog,
            seed,
            rng: make_rng(seed),
        }
    }

    /// Draw one event with probability proportional to its weight.
    pub fn generate_event(&mut self) -> &ColonyEvent {
        let roll = self.rng.random::<f64>() * self.catalog.total_weight();
        let entry = self.catalog.select(roll);
        trace!(roll, weight = entry.weight, "Event drawn");
        &entry.event
    }

    /// The seed this generator was built with, if any.
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The catalog draws are made from.
    pub const fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }
}

impl Default for RandomEventGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for RandomEventGenerator {
    fn next_event(&mut self) -> ColonyEvent {
        self.generate_event().clone()
    }

    fn restart(&mut self) {
        self.rng = make_rng(self.seed);
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Replays a fixed list of events in a loop.
///
/// Useful wherever a predictable day sequence is needed, for example to pin
/// the colony to calm days while checking the model arithmetic.
#[derive(Debug, Clone)]
pub struct ScriptedEventSource {
    script: Vec<ColonyEvent>,
    cursor: usize,
}

impl ScriptedEventSource {
    /// Build a source that cycles through `script`. An empty script behaves
    /// like an endless run of calm days.
    pub const fn new(script: Vec<ColonyEvent>) -> Self {
        Self { script, cursor: 0 }
    }

    /// A source that only ever produces the calm "beautiful day" event.
    pub fn calm() -> Self {
        let calm = EventCatalog::standard().select(0.0).event.clone();
        Self::new(vec![calm])
    }
}

impl EventSource for ScriptedEventSource {
    fn next_event(&mut self) -> ColonyEvent {
        let event = self
            .script
            .get(self.cursor)
            .cloned()
            .unwrap_or_else(|| ColonyEvent::new("Nothing happened today.", 1.0, 1.0, 1.0));
        self.cursor = self
            .cursor
            .saturating_add(1)
            .checked_rem(self.script.len())
            .unwrap_or(0);
        event
    }

    fn restart(&mut self) {
        self.cursor = 0;
    }
}
