//! SlotForge - preference-weighted slot assignment in Rust
//!
//! Pair entities (sections, shifts) with persons so that every capacity is
//! honored and the summed preference cost is minimal.
//!
//! # Example
//!
//! ```rust
//! use slotforge::prelude::*;
//!
//! let problem = AssignmentProblem::new(
//!     vec![Entity::unit("Section 1"), Entity::unit("Section 2")],
//!     vec![Person::unit("Ada"), Person::unit("Grace")],
//!     vec![vec![1, 2], vec![2, 1]],
//! )
//! .unwrap();
//!
//! let assignment = solve_assignment(&problem, &CostModel::default(), BoundMode::Exact).unwrap();
//! assert_eq!(assignment.total_cost().value(), 2);
//! ```

// Problem and result types
pub use slotforge_core::{
    Assignment, AssignmentProblem, AssignmentRow, BoundMode, Cost, CostModel, Entity, Person,
    Preference, Result, SlotForgeError, DEFAULT_WEIGHTS,
};

// Configuration
pub use slotforge_config::{ConfigError, CostConfig, SolverConfig, TerminationConfig};

// Engines
pub use slotforge_solver::{
    AssignmentSolver, BipartiteMatcher, CapacitatedSolver, CostMatrix, Matching, Strategy,
};

#[cfg(feature = "console")]
pub mod console;

mod solve;
pub use solve::{solve_assignment, solve_with_config, solve_with_config_and_flag};

pub mod prelude {
    pub use super::{solve_assignment, solve_with_config};
    pub use super::{
        Assignment, AssignmentProblem, BoundMode, Cost, CostModel, Entity, Person, Preference,
        SlotForgeError, SolverConfig,
    };
}
