//! Capacity bound semantics.

use std::fmt;
use std::str::FromStr;

use crate::error::SlotForgeError;

/// How declared capacities constrain the realized assignment counts.
///
/// One mode applies to entities and persons alike.
///
/// # Examples
///
/// ```
/// use slotforge_core::BoundMode;
///
/// assert_eq!("at-least".parse::<BoundMode>().unwrap(), BoundMode::AtLeast);
/// assert_eq!("max".parse::<BoundMode>().unwrap(), BoundMode::AtMost);
/// assert!("sometimes".parse::<BoundMode>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum BoundMode {
    /// Counts equal capacities. With unbalanced totals only the smaller side
    /// is held to equality and the larger side is capped.
    #[default]
    Exact,

    /// Counts are at least the capacities.
    AtLeast,

    /// Counts are at most the capacities; the number of pairings is maximized.
    AtMost,
}

impl BoundMode {
    pub const ALL: [BoundMode; 3] = [BoundMode::Exact, BoundMode::AtLeast, BoundMode::AtMost];

    pub fn as_str(self) -> &'static str {
        match self {
            BoundMode::Exact => "exact",
            BoundMode::AtLeast => "at_least",
            BoundMode::AtMost => "at_most",
        }
    }

    /// Returns true if `count` honors `capacity` under this mode.
    ///
    /// For [`BoundMode::Exact`] this is the strict per-node check that holds
    /// when entity and person capacities balance.
    pub fn admits(self, count: usize, capacity: usize) -> bool {
        match self {
            BoundMode::Exact => count == capacity,
            BoundMode::AtLeast => count >= capacity,
            BoundMode::AtMost => count <= capacity,
        }
    }
}

impl FromStr for BoundMode {
    type Err = SlotForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "eq" => Ok(BoundMode::Exact),
            "at_least" | "at-least" | "atleast" | "min" => Ok(BoundMode::AtLeast),
            "at_most" | "at-most" | "atmost" | "max" => Ok(BoundMode::AtMost),
            _ => Err(SlotForgeError::InvalidBoundMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for BoundMode {
    type Error = SlotForgeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BoundMode> for String {
    fn from(mode: BoundMode) -> String {
        mode.as_str().to_string()
    }
}

impl fmt::Display for BoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
