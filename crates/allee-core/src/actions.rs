//! The four player actions that reshape the colony's parameters.
//!
//! | Action           | `r`   | `K`   | `A`   |
//! |------------------|-------|-------|-------|
//! | Lay more eggs    | ×1.20 |       |       |
//! | Lay less eggs    | ×0.75 |       |       |
//! | Build chambers   |       | ×1.50 | ×0.80 |
//! | Destroy chambers |       | ×0.70 | ×1.15 |
//!
//! Actions are instantaneous and deterministic. They do not advance the day
//! and never consult the event source.

use std::fmt;

/// Multipliers an action applies to `(r, K, A)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEffect {
    /// Growth-rate multiplier.
    pub r: f64,
    /// Carrying-capacity multiplier.
    pub k: f64,
    /// Allee-threshold multiplier.
    pub a: f64,
}

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Raise the growth rate.
    LayMoreEggs,
    /// Lower the growth rate.
    LayLessEggs,
    /// Raise the carrying capacity and lower the Allee threshold.
    BuildChambers,
    /// Lower the carrying capacity and raise the Allee threshold.
    DestroyChambers,
}

impl Action {
    /// The multipliers this action applies.
    pub const fn effect(self) -> ActionEffect {
        match self {
            Self::LayMoreEggs => ActionEffect {
                r: 1.20,
                k: 1.0,
                a: 1.0,
            },
            Self::LayLessEggs => ActionEffect {
                r: 0.75,
                k: 1.0,
                a: 1.0,
            },
            Self::BuildChambers => ActionEffect {
                r: 1.0,
                k: 1.5,
                a: 0.80,
            },
            Self::DestroyChambers => ActionEffect {
                r: 1.0,
                k: 0.70,
                a: 1.15,
            },
        }
    }

    /// Button caption.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LayMoreEggs => "Lay More Eggs",
            Self::LayLessEggs => "Lay Less Eggs",
            Self::BuildChambers => "Build Chambers",
            Self::DestroyChambers => "Destroy Chambers",
        }
    }

    /// Percentage summary of the action's effect, e.g. `+50% K, -20% A`.
    pub fn label(self) -> String {
        let effect = self.effect();
        match self {
            Self::LayMoreEggs | Self::LayLessEggs => percent(effect.r, "r"),
            Self::BuildChambers | Self::DestroyChambers => {
                format!("{}, {}", percent(effect.k, "K"), percent(effect.a, "A"))
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.label())
    }
}

fn percent(multiplier: f64, symbol: &str) -> String {
    format!("{:+.0}% {symbol}", (multiplier - 1.0) * 100.0)
}
