//! Enumeration types for the Allee colony simulator.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Informational life status of the colony.
///
/// `Extinct` is a soft status: the colony keeps accepting actions after the
/// population falls below the extinction threshold, and may recover if an
/// action pushes the population back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ColonyPhase {
    /// Population is at or above the extinction threshold.
    Active,
    /// Population has fallen below the extinction threshold.
    Extinct,
}

impl fmt::Display for ColonyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Extinct => f.write_str("extinct"),
        }
    }
}
