//! The weighted table of environmental events.
//!
//! The standard catalog holds 26 events in five rarity tiers:
//!
//! | Tier      | Weight | Entries | Share of draws |
//! |-----------|--------|---------|----------------|
//! | Calm      | 75.0   | 1       | ~74.0%         |
//! | Common    | 3.0    | 4       | ~11.8%         |
//! | Uncommon  | 1.5    | 6       | ~8.9%          |
//! | Rare      | 0.5    | 8       | ~3.9%          |
//! | Very rare | 0.2    | 7       | ~1.4%          |
//!
//! The total weight is 101.4. A catalog never changes after construction;
//! custom catalogs go through [`EventCatalog::from_entries`], which validates
//! weights and multipliers up front so selection can never fail.

use allee_types::ColonyEvent;

use crate::error::ModelError;

/// Rarity tier of a catalog entry. Each tier carries a fixed draw weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    /// The "nothing happens" day.
    Calm,
    /// Everyday weather and foraging luck.
    Common,
    /// Noticeable but survivable swings.
    Uncommon,
    /// Predators, rivals, windfalls.
    Rare,
    /// Plagues and disasters.
    VeryRare,
}

impl Rarity {
    /// Draw weight of this tier.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Calm => 75.0,
            Self::Common => 3.0,
            Self::Uncommon => 1.5,
            Self::Rare => 0.5,
            Self::VeryRare => 0.2,
        }
    }
}

/// A catalog entry: an event and its relative draw weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEvent {
    /// The event applied when this entry is drawn.
    pub event: ColonyEvent,
    /// Relative draw weight. Positive and finite.
    pub weight: f64,
}

impl WeightedEvent {
    /// Create an entry with an explicit weight.
    pub const fn new(event: ColonyEvent, weight: f64) -> Self {
        Self { event, weight }
    }

    /// Create an entry weighted by its rarity tier.
    pub const fn with_rarity(event: ColonyEvent, rarity: Rarity) -> Self {
        Self::new(event, rarity.weight())
    }
}

/// Immutable, validated list of weighted events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCatalog {
    entries: Vec<WeightedEvent>,
    total_weight: f64,
    /// Copy of the first entry, returned when a roll overruns the table.
    fallback: WeightedEvent,
}

impl EventCatalog {
    /// Build a catalog from custom entries.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyCatalog`] for an empty list,
    /// [`ModelError::InvalidWeight`] for a weight that is not positive and
    /// finite, and [`ModelError::InvalidMultiplier`] for a multiplier that is
    /// negative or not finite.
    pub fn from_entries(entries: Vec<WeightedEvent>) -> Result<Self, ModelError> {
        let fallback = entries.first().cloned().ok_or(ModelError::EmptyCatalog)?;

        for (index, entry) in entries.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(ModelError::InvalidWeight {
                    index,
                    weight: entry.weight,
                });
            }
            validate_multipliers(index, &entry.event)?;
        }

        let total_weight = entries.iter().map(|entry| entry.weight).sum();
        Ok(Self {
            entries,
            total_weight,
            fallback,
        })
    }

    /// The built-in colony event table.
    pub fn standard() -> Self {
        let entries = standard_entries();
        let total_weight = entries.iter().map(|entry| entry.weight).sum();
        Self {
            entries,
            total_weight,
            fallback: WeightedEvent::with_rarity(calm_day(), Rarity::Calm),
        }
    }

    /// Select the event for a roll in `[0, total_weight)`.
    ///
    /// Walks the cumulative weights and returns the first entry whose
    /// cumulative weight meets or exceeds `roll`. A roll past the final
    /// boundary (floating-point rounding) returns the first entry.
    pub fn select(&self, roll: f64) -> &WeightedEvent {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if roll <= cumulative {
                return entry;
            }
        }
        &self.fallback
    }

    /// All entries in draw order.
    pub fn entries(&self) -> &[WeightedEvent] {
        &self.entries
    }

    /// Sum of all entry weights.
    pub const fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_multipliers(index: usize, event: &ColonyEvent) -> Result<(), ModelError> {
    let fields = [
        ("r", event.r_multiplier),
        ("K", event.k_multiplier),
        ("A", event.a_multiplier),
        ("population", event.population_multiplier),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(ModelError::InvalidMultiplier {
                index,
                field,
                value,
            });
        }
    }
    Ok(())
}

fn calm_day() -> ColonyEvent {
    ColonyEvent::new("☀️ It's a beautiful day today!", 1.0, 1.0, 1.0)
}

#[allow(clippy::too_many_lines)]
fn standard_entries() -> Vec<WeightedEvent> {
    use Rarity::{Calm, Common, Rare, Uncommon, VeryRare};

    vec![
        WeightedEvent::with_rarity(calm_day(), Calm),
        // --- Common ---
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🌧️ Light rainfall. The colony found some food.\n+5% growth rate",
                1.05,
                1.0,
                1.0,
            ),
            Common,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🌱 New foraging trail discovered!\n+8% growth rate, +5% carrying capacity",
                1.08,
                1.05,
                1.0,
            ),
            Common,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🌸 Mild spring weather. Good conditions.\n+10% growth rate",
                1.10,
                1.0,
                1.0,
            ),
            Common,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🌿 Perfect weather conditions!\n+8% growth rate, +5% carrying capacity, -8% Allee threshold",
                1.08,
                1.05,
                0.92,
            ),
            Common,
        ),
        // --- Uncommon ---
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "☀️ Hot day. Workers are less active.\n-10% growth rate",
                0.90,
                1.0,
                1.0,
            ),
            Uncommon,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🍄 Discovered a small fungus patch!\n+12% carrying capacity",
                1.0,
                1.12,
                1.0,
            ),
            Uncommon,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🦗 Insects nearby! Easy prey for workers.\n+12% growth rate, +8% carrying capacity",
                1.12,
                1.08,
                1.0,
            ),
            Uncommon,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🏗️ Workers expanded some chambers.\n+10% carrying capacity, -8% Allee threshold",
                1.0,
                1.10,
                0.92,
            ),
            Uncommon,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🔬 Workers developed better coordination!\n-12% Allee threshold",
                1.0,
                1.0,
                0.88,
            ),
            Uncommon,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🌪️ Windstorm disrupted foraging.\n-12% growth rate",
                0.88,
                1.0,
                1.0,
            ),
            Uncommon,
        ),
        // --- Rare ---
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🦎 Predator spotted near colony!\n-10% carrying capacity, +8% Allee threshold",
                1.0,
                0.90,
                1.08,
            ),
            Rare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "☀️ Drought conditions. Food scarce.\n-18% growth rate",
                0.82,
                1.0,
                1.0,
            ),
            Rare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "❄️ Cold snap! Workers sluggish.\n-15% growth rate",
                0.85,
                1.0,
                1.0,
            ),
            Rare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🐜 Rival colony detected nearby.\n-12% carrying capacity, +10% Allee threshold",
                1.0,
                0.88,
                1.10,
            ),
            Rare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🏚️ Found abandoned nest! Free chambers.\n+20% carrying capacity, -12% Allee threshold",
                1.0,
                1.20,
                0.88,
            ),
            Rare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🍯 Found a rich sugar source!\n+15% growth rate, +10% carrying capacity, -8% Allee threshold",
                1.15,
                1.10,
                0.92,
            ),
            Rare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "👑 Queen produced extra eggs!\n+25% growth rate",
                1.25,
                1.0,
                1.0,
            ),
            Rare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🌧️ Heavy rainfall! Abundant food.\n+18% growth rate, +10% carrying capacity",
                1.18,
                1.10,
                1.0,
            ),
            Rare,
        ),
        // --- Very rare ---
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🦠 Disease outbreak! Colony health compromised.\n-25% growth rate, +15% Allee threshold",
                0.75,
                1.0,
                1.15,
            ),
            VeryRare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "☠️ DEVASTATING PLAGUE! Half the colony has perished!\nPopulation reduced by 50%, -20% growth rate",
                0.80,
                1.0,
                1.0,
            )
            .with_population_multiplier(0.5),
            VeryRare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🏗️ Tunnel collapse! Lost chambers.\n-22% carrying capacity, +10% Allee threshold",
                1.0,
                0.78,
                1.10,
            ),
            VeryRare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🦂 Scorpion nest discovered nearby!\n-20% growth rate, +18% Allee threshold",
                0.80,
                1.0,
                1.18,
            ),
            VeryRare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "⚡ Lightning strike! Workers scattered.\n-28% growth rate, +12% Allee threshold",
                0.72,
                1.0,
                1.12,
            ),
            VeryRare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "🪨 Discovered deep caverns! Major expansion.\n+28% carrying capacity, -20% Allee threshold",
                1.0,
                1.28,
                0.80,
            ),
            VeryRare,
        ),
        WeightedEvent::with_rarity(
            ColonyEvent::new(
                "☠️ PLAGUE! Devastating disease sweeps through colony!\nHalf the population perished. -20% growth rate, +20% Allee threshold",
                0.80,
                1.0,
                1.20,
            )
            .with_population_multiplier(0.5),
            VeryRare,
        ),
    ]
}
