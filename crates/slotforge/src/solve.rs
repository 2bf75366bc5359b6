//! Solve entry points that hide the solver wiring.

use std::sync::atomic::AtomicBool;

use slotforge_config::SolverConfig;
use slotforge_core::{Assignment, AssignmentProblem, BoundMode, CostModel, Result, SlotForgeError};
use slotforge_solver::AssignmentSolver;
use tracing::debug;

/// Solves `problem` under `mode` with no time limit.
pub fn solve_assignment(
    problem: &AssignmentProblem,
    model: &CostModel,
    mode: BoundMode,
) -> Result<Assignment> {
    AssignmentSolver::new(model).with_bound_mode(mode).solve(problem)
}

/// Solves `problem` with every setting taken from `config`.
///
/// With `custom_counts` disabled every capacity is treated as 1.
///
/// # Errors
///
/// Returns [`SlotForgeError::Config`] for invalid cost weights, otherwise
/// whatever the solver reports.
pub fn solve_with_config(problem: &AssignmentProblem, config: &SolverConfig) -> Result<Assignment> {
    solve_with_config_and_flag(problem, config, None)
}

/// Like [`solve_with_config`], additionally cancelled once `terminate` is set.
pub fn solve_with_config_and_flag(
    problem: &AssignmentProblem,
    config: &SolverConfig,
    terminate: Option<&AtomicBool>,
) -> Result<Assignment> {
    let model = config
        .cost_model()
        .map_err(|e| SlotForgeError::Config(e.to_string()))?;

    let unit;
    let problem = if config.custom_counts {
        problem
    } else {
        debug!(event = "unit_capacities");
        unit = problem.clone().with_unit_capacities();
        &unit
    };

    let mut solver = AssignmentSolver::new(&model).with_bound_mode(config.bound_mode);
    if let Some(limit) = config.time_limit() {
        solver = solver.with_time_limit(limit);
    }
    if let Some(flag) = terminate {
        solver = solver.with_terminate(flag);
    }
    solver.solve(problem)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use slotforge_test::scenarios;

    use super::*;

    #[test]
    fn test_solve_assignment_scenario() {
        let assignment = solve_assignment(
            &scenarios::three_by_three(),
            &CostModel::default(),
            BoundMode::Exact,
        )
        .unwrap();
        assert_eq!(assignment.total_cost().value(), 3);
    }

    #[test]
    fn test_config_bound_mode_applies() {
        let config = SolverConfig::new().with_bound_mode(BoundMode::AtLeast);
        let assignment = solve_with_config(&scenarios::one_entity_six_persons(), &config).unwrap();
        assert_eq!(assignment.len(), 6);
    }

    #[test]
    fn test_without_custom_counts_uses_unit_capacities() {
        // Morning offers 2 slots, but only one counts once capacities are ignored.
        let problem = scenarios::shifts_with_counts();
        let with_counts = solve_with_config(&problem, &SolverConfig::new()).unwrap();
        let without = solve_with_config(&problem, &SolverConfig::new().without_custom_counts())
            .unwrap();

        assert_eq!(with_counts.len(), 4);
        assert_eq!(without.len(), 3);
        assert_eq!(without.count_for_entity("Morning"), 1);
    }

    #[test]
    fn test_invalid_weights_are_config_errors() {
        let config = SolverConfig::new().with_weights([5, 4, 3, 2]);
        let err = solve_with_config(&scenarios::three_by_three(), &config).unwrap_err();
        assert!(matches!(err, SlotForgeError::Config(_)));
    }

    #[test]
    fn test_forbid_unavailable_from_config() {
        let problem = slotforge_test::unit_problem(vec![vec![1, 4], vec![2, 4]]);
        let config = SolverConfig::new().with_forbid_unavailable(true);
        let err = solve_with_config(&problem, &config).unwrap_err();
        assert!(matches!(err, SlotForgeError::Infeasible { .. }));

        let relaxed = solve_with_config(&problem, &SolverConfig::new()).unwrap();
        assert_eq!(relaxed.len(), 2);
    }

    #[test]
    fn test_flag_cancels() {
        let flag = AtomicBool::new(true);
        let err = solve_with_config_and_flag(
            &scenarios::three_by_three(),
            &SolverConfig::new(),
            Some(&flag),
        )
        .unwrap_err();
        assert_eq!(err, SlotForgeError::Cancelled);
    }
}
