//! Builder-style solve entry point.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use slotforge_core::{
    Assignment, AssignmentProblem, AssignmentRow, BoundMode, Cost, CostModel, Result,
    SlotForgeError,
};
use tracing::{info, warn};

use crate::capacitated::CapacitatedSolver;
use crate::hungarian::BipartiteMatcher;
use crate::matrix::CostMatrix;
use crate::scope::SolveScope;
use crate::termination::{ExternalTermination, TimeTermination};

/// Which engine solves the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Matching for unit capacities under [`BoundMode::Exact`], flow otherwise.
    #[default]
    Auto,

    /// Hungarian matching. Requires unit capacities and exact bounds.
    Matching,

    /// Min-cost circulation. Handles every capacity and bound mode.
    Flow,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Matching => "matching",
            Strategy::Flow => "flow",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solves one [`AssignmentProblem`] at a time.
///
/// Holds no state between calls; the same solver may be reused for any
/// number of problems.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use slotforge_core::{AssignmentProblem, BoundMode, CostModel, Entity, Person};
/// use slotforge_solver::AssignmentSolver;
///
/// let problem = AssignmentProblem::new(
///     vec![Entity::unit("Section 1"), Entity::unit("Section 2")],
///     vec![Person::unit("Ada"), Person::unit("Grace")],
///     vec![vec![2, 1], vec![1, 3]],
/// )
/// .unwrap();
///
/// let model = CostModel::default();
/// let assignment = AssignmentSolver::new(&model)
///     .with_bound_mode(BoundMode::Exact)
///     .with_time_limit(Duration::from_secs(5))
///     .solve(&problem)
///     .unwrap();
///
/// assert!(assignment.contains("Section 1", "Grace"));
/// assert!(assignment.contains("Section 2", "Ada"));
/// assert_eq!(assignment.total_cost().value(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AssignmentSolver<'a> {
    model: &'a CostModel,
    mode: BoundMode,
    strategy: Strategy,
    time_limit: Option<Duration>,
    terminate: Option<&'a AtomicBool>,
}

impl<'a> AssignmentSolver<'a> {
    pub fn new(model: &'a CostModel) -> Self {
        Self {
            model,
            mode: BoundMode::default(),
            strategy: Strategy::default(),
            time_limit: None,
            terminate: None,
        }
    }

    pub fn with_bound_mode(mut self, mode: BoundMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cancels solves running longer than `limit`.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Cancels solves once `flag` is set.
    pub fn with_terminate(mut self, flag: &'a AtomicBool) -> Self {
        self.terminate = Some(flag);
        self
    }

    pub fn bound_mode(&self) -> BoundMode {
        self.mode
    }

    pub fn model(&self) -> &CostModel {
        self.model
    }

    /// Strategy that will actually run for `problem`.
    pub fn resolve_strategy(&self, problem: &AssignmentProblem) -> Strategy {
        match self.strategy {
            Strategy::Auto if self.matching_applies(problem) => Strategy::Matching,
            Strategy::Auto => Strategy::Flow,
            explicit => explicit,
        }
    }

    /// Computes a minimum-cost assignment.
    ///
    /// # Errors
    ///
    /// - [`SlotForgeError::Infeasible`] if the capacities cannot be met
    /// - [`SlotForgeError::Cancelled`] if the time limit passes or the flag is set
    /// - [`SlotForgeError::Config`] if [`Strategy::Matching`] is forced on a
    ///   problem it cannot handle
    pub fn solve(&self, problem: &AssignmentProblem) -> Result<Assignment> {
        let strategy = self.resolve_strategy(problem);
        info!(
            event = "solve_start",
            entity_count = problem.entity_count(),
            person_count = problem.person_count(),
            bound_mode = %self.mode,
            strategy = %strategy,
        );

        let mut scope = SolveScope::new();
        if let Some(limit) = self.time_limit {
            scope = scope.with_termination(TimeTermination::new(limit));
        }
        if let Some(flag) = self.terminate {
            scope = scope.with_termination(ExternalTermination::new(flag));
        }
        scope.start_solving();
        let started = Instant::now();

        let result = match strategy {
            Strategy::Matching if !self.matching_applies(problem) => Err(SlotForgeError::Config(
                "matching strategy needs unit capacities and exact bounds".to_string(),
            )),
            Strategy::Matching => solve_matching(problem, self.model, &mut scope),
            Strategy::Auto | Strategy::Flow => {
                CapacitatedSolver::new(self.model, self.mode).solve_in(problem, &mut scope)
            }
        };

        match &result {
            Ok(assignment) => info!(
                event = "solve_end",
                assignments = assignment.len(),
                total_cost = %assignment.total_cost(),
                augmentations = scope.augmentation_count(),
                duration_ms = started.elapsed().as_millis() as u64,
            ),
            Err(SlotForgeError::Infeasible {
                persons, entities, ..
            }) => warn!(
                event = "infeasible",
                bound_mode = %self.mode,
                persons = persons.len(),
                entities = entities.len(),
            ),
            Err(err) => warn!(event = "solve_failed", error = %err),
        }
        result
    }

    /// Unit capacities, exact bounds, and weights small enough that one
    /// forbidden cell outweighs any allowed matching.
    fn matching_applies(&self, problem: &AssignmentProblem) -> bool {
        let pairs = problem.entity_count().min(problem.person_count()) as u64;
        let worst = self.model.weights()[3].value().saturating_mul(pairs);
        self.mode == BoundMode::Exact
            && problem.has_unit_capacities()
            && worst < Cost::FORBIDDEN.value()
    }
}

/// Exact assignment over the capacity-1 entities and persons.
///
/// The side with fewer members is matched completely; a forbidden cell in
/// the optimum means no complete matching avoids the excluded pairings.
fn solve_matching(
    problem: &AssignmentProblem,
    model: &CostModel,
    scope: &mut SolveScope<'_>,
) -> Result<Assignment> {
    let entity_ids: Vec<usize> = (0..problem.entity_count())
        .filter(|&e| problem.entities()[e].capacity == 1)
        .collect();
    let person_ids: Vec<usize> = (0..problem.person_count())
        .filter(|&p| problem.persons()[p].capacity == 1)
        .collect();

    let matrix = CostMatrix::from_problem(problem, model).select(&entity_ids, &person_ids);
    let matching = BipartiteMatcher::new().solve_in(&matrix, scope)?;

    let forbidden: Vec<(usize, usize)> = matching.forbidden_pairs(&matrix).collect();
    if !forbidden.is_empty() {
        let entities_tight = entity_ids.len() <= person_ids.len();
        let persons_tight = person_ids.len() <= entity_ids.len();
        let entities = forbidden
            .iter()
            .filter(|_| entities_tight)
            .map(|&(r, _)| problem.entities()[entity_ids[r]].name.clone())
            .collect();
        let persons = forbidden
            .iter()
            .filter(|_| persons_tight)
            .map(|&(_, c)| problem.persons()[person_ids[c]].name.clone())
            .collect();
        return Err(SlotForgeError::Infeasible {
            mode: BoundMode::Exact,
            persons,
            entities,
        });
    }

    let rows = matching
        .pairs
        .iter()
        .map(|&(r, c)| {
            let (entity, person) = (entity_ids[r], person_ids[c]);
            AssignmentRow {
                entity: problem.entities()[entity].name.clone(),
                person: problem.persons()[person].name.clone(),
                preference: problem.preference(entity, person),
                cost: matrix.get(r, c),
                entity_index: entity,
                person_index: person,
            }
        })
        .collect();
    Ok(Assignment::new(rows))
}
