//! SlotForge Core - Core types for preference-weighted assignment
//!
//! This crate provides the fundamental abstractions for SlotForge:
//! - Preference ranks and costs
//! - The cost model mapping ranks to costs and back
//! - Bound modes for capacity semantics
//! - Problem input and assignment output types

pub mod assignment;
pub mod bound;
pub mod cost_model;
pub mod error;
pub mod preference;
pub mod problem;

pub use assignment::{Assignment, AssignmentRow};
pub use bound::BoundMode;
pub use cost_model::{CostModel, DEFAULT_WEIGHTS};
pub use error::{Result, SlotForgeError};
pub use preference::{Cost, Preference};
pub use problem::{AssignmentProblem, Entity, Person};
