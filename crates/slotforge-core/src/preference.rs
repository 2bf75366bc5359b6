//! Preference ranks and assignment costs.

use std::fmt;
use std::ops::Add;

use crate::error::{Result, SlotForgeError};

/// An ordinal preference rank.
///
/// `1` is most preferred, `4` means the person cannot make it at all.
///
/// # Examples
///
/// ```
/// use slotforge_core::Preference;
///
/// let rank = Preference::new(2).unwrap();
/// assert_eq!(rank.rank(), 2);
/// assert!(Preference::new(5).is_err());
/// assert!(Preference::MOST_PREFERRED < Preference::UNAVAILABLE);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "u8"))]
pub struct Preference(u8);

impl Preference {
    /// Rank 1.
    pub const MOST_PREFERRED: Preference = Preference(1);

    /// Rank 4.
    pub const UNAVAILABLE: Preference = Preference(4);

    /// All ranks, most preferred first.
    pub const ALL: [Preference; 4] = [Preference(1), Preference(2), Preference(3), Preference(4)];

    /// Creates a preference from a rank in `1..=4`.
    pub fn new(rank: i64) -> Result<Self> {
        match rank {
            1..=4 => Ok(Preference(rank as u8)),
            _ => Err(SlotForgeError::InvalidPreference(rank)),
        }
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0
    }

    /// Zero-based position in [`Preference::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    #[inline]
    pub const fn is_unavailable(self) -> bool {
        self.0 == 4
    }
}

impl TryFrom<i64> for Preference {
    type Error = SlotForgeError;

    fn try_from(rank: i64) -> Result<Self> {
        Preference::new(rank)
    }
}

impl From<Preference> for u8 {
    fn from(preference: Preference) -> u8 {
        preference.0
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative assignment cost.
///
/// Costs are produced from preferences by a [`CostModel`](crate::CostModel).
/// [`Cost::FORBIDDEN`] marks hard exclusions and is larger than any weight a
/// cost model accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    /// Sentinel for pairs that must never be matched.
    ///
    /// Small enough that a full row of sentinels sums without overflowing `i64`.
    pub const FORBIDDEN: Cost = Cost(1 << 40);

    #[inline]
    pub const fn of(value: u64) -> Self {
        Cost(value)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_forbidden(self) -> bool {
        self.0 >= Self::FORBIDDEN.0
    }

    /// Signed value used by the matching and flow arithmetic.
    #[inline]
    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Cost(self.0.saturating_add(other.0))
    }
}

impl std::iter::Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Self {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_forbidden() {
            write!(f, "forbidden")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
