//! SlotForge Solver Engine
//!
//! This crate provides the solving side of SlotForge:
//! - Dense cost matrices built from a problem and a cost model
//! - Hungarian matching for unit capacities
//! - Min-cost flow with lower bounds for arbitrary capacities
//! - The [`AssignmentSolver`] entry point choosing between them
//! - Termination conditions (time limit, external flag)

pub mod capacitated;
pub mod flow;
pub mod hungarian;
pub mod matrix;
pub mod scope;
pub mod solver;
pub mod termination;

pub use capacitated::CapacitatedSolver;
pub use flow::{FlowNetwork, FlowOutcome, Shortfall};
pub use hungarian::{BipartiteMatcher, Matching};
pub use matrix::CostMatrix;
pub use scope::SolveScope;
pub use solver::{AssignmentSolver, Strategy};
pub use termination::{ExternalTermination, Termination, TimeTermination};
