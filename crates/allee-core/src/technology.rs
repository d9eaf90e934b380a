//! Technology upgrades.
//!
//! Technology points are not a separate balance: the colony earns one point
//! per ten elapsed days, and spending a point advances the day counter by
//! ten. Each upgrade is a composition of the colony's clamped setters and is
//! applied only after its cost has been paid.

use std::fmt;

/// A purchasable upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    /// Halve the population.
    Cull,
    /// Multiply the growth rate by 2.5.
    BreedingFrenzy,
    /// Raise the Allee threshold by 5% of the carrying capacity.
    NannyAnts,
}

impl Technology {
    /// Population multiplier applied by [`Technology::Cull`].
    pub const CULL_FACTOR: f64 = 0.5;

    /// Growth-rate multiplier applied by [`Technology::BreedingFrenzy`].
    pub const FRENZY_FACTOR: f64 = 2.5;

    /// Share of `K` added to `A` by [`Technology::NannyAnts`].
    pub const NANNY_SHARE_OF_K: f64 = 0.05;

    /// Price in technology points.
    pub const fn cost(self) -> u64 {
        match self {
            Self::Cull | Self::NannyAnts => 1,
            Self::BreedingFrenzy => 2,
        }
    }

    /// Menu caption.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cull => "Cull",
            Self::BreedingFrenzy => "Breeding Frenzy",
            Self::NannyAnts => "Nanny Ants",
        }
    }

    /// One-line description of the effect.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Cull => "Population halved",
            Self::BreedingFrenzy => "Growth rate x2.5",
            Self::NannyAnts => "Allee threshold +5% of carrying capacity",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} pt]: {}",
            self.name(),
            self.cost(),
            self.description()
        )
    }
}
