//! Bidirectional mapping between preference ranks and costs.

use crate::error::{Result, SlotForgeError};
use crate::preference::{Cost, Preference};

/// Default weights for ranks 1, 2, 3 and 4.
pub const DEFAULT_WEIGHTS: [u64; 4] = [1, 4, 100, 10_000];

/// Maps preference ranks to costs and back.
///
/// The mapping is strictly increasing, so the solver never trades a
/// more-preferred pairing for a less-preferred one at equal count. The model
/// is a plain value: build it once and pass it by reference to the solver.
///
/// # Examples
///
/// ```
/// use slotforge_core::{CostModel, Preference};
///
/// let model = CostModel::default();
/// let cost = model.cost(3).unwrap();
/// assert_eq!(cost.value(), 100);
/// assert_eq!(model.preference_of(cost).unwrap(), Preference::new(3).unwrap());
/// assert!(model.cost(0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostModel {
    weights: [Cost; 4],
    forbid_unavailable: bool,
}

impl CostModel {
    /// Creates a cost model from the weights of ranks 1 to 4.
    ///
    /// # Errors
    ///
    /// Returns [`SlotForgeError::InvalidWeights`] unless the weights are
    /// strictly increasing and below [`Cost::FORBIDDEN`].
    pub fn new(weights: [u64; 4]) -> Result<Self> {
        if let Some(pair) = weights.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SlotForgeError::InvalidWeights(format!(
                "weights must be strictly increasing, got {} before {}",
                pair[0], pair[1]
            )));
        }
        if weights[3] >= Cost::FORBIDDEN.value() {
            return Err(SlotForgeError::InvalidWeights(format!(
                "weight {} reaches the forbidden sentinel {}",
                weights[3],
                Cost::FORBIDDEN.value()
            )));
        }
        Ok(Self {
            weights: weights.map(Cost::of),
            forbid_unavailable: false,
        })
    }

    /// Treats rank 4 as a hard exclusion instead of an expensive pairing.
    pub fn forbidding_unavailable(mut self) -> Self {
        self.forbid_unavailable = true;
        self
    }

    pub fn with_forbid_unavailable(mut self, forbid: bool) -> Self {
        self.forbid_unavailable = forbid;
        self
    }

    pub fn forbids_unavailable(&self) -> bool {
        self.forbid_unavailable
    }

    pub fn weights(&self) -> [Cost; 4] {
        self.weights
    }

    /// Returns the cost of a raw rank.
    ///
    /// # Errors
    ///
    /// Returns [`SlotForgeError::InvalidPreference`] if `rank` is outside `1..=4`.
    pub fn cost(&self, rank: i64) -> Result<Cost> {
        Preference::new(rank).map(|p| self.weight(p))
    }

    /// Returns the weight of a validated preference.
    #[inline]
    pub fn weight(&self, preference: Preference) -> Cost {
        self.weights[preference.index()]
    }

    /// Returns the cost of a matrix cell, or `None` if the pairing is excluded.
    #[inline]
    pub fn cell_cost(&self, preference: Preference) -> Option<Cost> {
        if self.forbid_unavailable && preference.is_unavailable() {
            None
        } else {
            Some(self.weight(preference))
        }
    }

    /// Inverse of [`CostModel::cost`].
    ///
    /// # Errors
    ///
    /// Returns [`SlotForgeError::UnknownCost`] if no rank maps to `cost`.
    pub fn preference_of(&self, cost: Cost) -> Result<Preference> {
        self.weights
            .iter()
            .zip(Preference::ALL)
            .find(|(w, _)| **w == cost)
            .map(|(_, p)| p)
            .ok_or(SlotForgeError::UnknownCost(cost.value()))
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.map(Cost::of),
            forbid_unavailable: false,
        }
    }
}
