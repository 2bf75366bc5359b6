//! Termination conditions for long solves.
//!
//! Conditions are polled between augmentations. A fired condition aborts the
//! solve with [`SlotForgeError::Cancelled`](slotforge_core::SlotForgeError::Cancelled).

mod external;
mod time;

use std::fmt::Debug;

use crate::scope::SolveScope;

pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop solving.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, scope: &SolveScope<'_>) -> bool;
}
