//! Shared test fixtures for SlotForge crates.
//!
//! This crate provides problem fixtures and reference checks for testing.
//! It depends on `slotforge-core` only, so the solver can use it as a
//! dev-dependency.
//!
//! - [`scenarios`] - Small hand-checked problems
//! - [`brute_force`] - Exhaustive reference solvers for tiny inputs
//! - [`checks`] - Capacity property checks on solver output
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! slotforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use slotforge_test::scenarios::three_by_three;
//! use slotforge_test::brute_force::min_cost_matching;
//! ```

pub mod brute_force;
pub mod checks;
pub mod scenarios;

pub use brute_force::{best_assignment, min_cost_matching, BruteForceOptimum};
pub use checks::{assert_capacities_respected, capacity_violations};
pub use scenarios::{problem_from_ranks, unit_problem};
