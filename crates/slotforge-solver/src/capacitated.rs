//! Capacitated assignment as a min-cost circulation.
//!
//! Network layout: source `s`, sink `t`, one node per person and one per
//! entity. `s -> person` and `entity -> t` carry the capacity bounds of the
//! bound mode, `person -> entity` carries one unit at the pairing cost and
//! is omitted for excluded pairings, and `t -> s` closes the circulation.

use slotforge_core::{
    Assignment, AssignmentProblem, AssignmentRow, BoundMode, Cost, CostModel, Result,
    SlotForgeError,
};
use tracing::debug;

use crate::flow::{EdgeId, FlowNetwork, NodeId};
use crate::scope::SolveScope;

const SOURCE: NodeId = 0;
const SINK: NodeId = 1;

/// Lower and upper flow bounds of a capacity node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounds {
    lower: usize,
    upper: usize,
}

impl Bounds {
    /// `degree` is the number of non-excluded partners, `tight` whether this
    /// side has the smaller (or equal) total capacity.
    ///
    /// A pairing is realized at most once, so `upper` never exceeds
    /// `degree`. A `lower` above `degree` is left for the degree check.
    fn of(mode: BoundMode, capacity: usize, degree: usize, tight: bool) -> Self {
        let (lower, upper) = match mode {
            _ if capacity == 0 => (0, 0),
            BoundMode::Exact if tight => (capacity, capacity),
            BoundMode::Exact | BoundMode::AtMost => (0, capacity),
            BoundMode::AtLeast => (capacity, degree),
        };
        Self {
            lower,
            upper: upper.min(degree),
        }
    }

    /// Signed bounds for the flow network.
    fn to_flow(self) -> Result<(i64, i64)> {
        Ok((flow_amount(self.lower)?, flow_amount(self.upper)?))
    }
}

fn flow_amount(units: usize) -> Result<i64> {
    i64::try_from(units)
        .map_err(|_| SlotForgeError::Internal(format!("flow amount {units} exceeds i64")))
}

/// A realizable pairing and its edge in the network.
#[derive(Clone, Copy, Debug)]
struct PairEdge {
    entity: usize,
    person: usize,
    cost: Cost,
    edge: EdgeId,
}

/// Solves assignment problems with arbitrary capacities under one bound mode.
///
/// # Examples
///
/// ```
/// use slotforge_core::{AssignmentProblem, BoundMode, CostModel, Entity, Person};
/// use slotforge_solver::CapacitatedSolver;
///
/// let problem = AssignmentProblem::new(
///     vec![Entity::new("Morning", 2)],
///     vec![Person::unit("Ada"), Person::unit("Grace"), Person::unit("Linus")],
///     vec![vec![1, 3, 2]],
/// )
/// .unwrap();
///
/// let model = CostModel::default();
/// let assignment = CapacitatedSolver::new(&model, BoundMode::Exact)
///     .solve(&problem)
///     .unwrap();
///
/// assert_eq!(assignment.len(), 2);
/// assert!(assignment.contains("Morning", "Ada"));
/// assert!(assignment.contains("Morning", "Linus"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CapacitatedSolver<'m> {
    model: &'m CostModel,
    mode: BoundMode,
}

impl<'m> CapacitatedSolver<'m> {
    pub fn new(model: &'m CostModel, mode: BoundMode) -> Self {
        Self { model, mode }
    }

    pub fn mode(&self) -> BoundMode {
        self.mode
    }

    /// Solves without termination conditions.
    pub fn solve(&self, problem: &AssignmentProblem) -> Result<Assignment> {
        let mut scope = SolveScope::new();
        scope.start_solving();
        self.solve_in(problem, &mut scope)
    }

    /// Solves within an existing scope.
    ///
    /// # Errors
    ///
    /// - [`SlotForgeError::Infeasible`] if the minimums of the bound mode
    ///   cannot be met jointly
    /// - [`SlotForgeError::Cancelled`] if a termination condition fires
    pub fn solve_in(
        &self,
        problem: &AssignmentProblem,
        scope: &mut SolveScope<'_>,
    ) -> Result<Assignment> {
        let entity_count = problem.entity_count();
        let person_count = problem.person_count();

        let costs: Vec<Option<Cost>> = (0..entity_count)
            .flat_map(|e| problem.preference_row(e).iter())
            .map(|&p| self.model.cell_cost(p))
            .collect();
        let cell = |e: usize, p: usize| costs[e * person_count + p];

        let entity_degree: Vec<usize> = (0..entity_count)
            .map(|e| (0..person_count).filter(|&p| cell(e, p).is_some()).count())
            .collect();
        let person_degree: Vec<usize> = (0..person_count)
            .map(|p| (0..entity_count).filter(|&e| cell(e, p).is_some()).count())
            .collect();

        let entity_total = problem.total_entity_capacity();
        let person_total = problem.total_person_capacity();
        let entities_tight = entity_total <= person_total;
        let persons_tight = person_total <= entity_total;
        let entity_bounds: Vec<Bounds> = problem
            .entities()
            .iter()
            .zip(&entity_degree)
            .map(|(e, &deg)| Bounds::of(self.mode, e.capacity, deg, entities_tight))
            .collect();
        let person_bounds: Vec<Bounds> = problem
            .persons()
            .iter()
            .zip(&person_degree)
            .map(|(p, &deg)| Bounds::of(self.mode, p.capacity, deg, persons_tight))
            .collect();

        self.check_degrees(
            problem,
            (&entity_bounds[..], &entity_degree[..]),
            (&person_bounds[..], &person_degree[..]),
        )?;

        let person_node = |p: usize| 2 + p;
        let entity_node = |e: usize| 2 + person_count + e;
        let mut net = FlowNetwork::new(2 + person_count + entity_count);

        for (p, b) in person_bounds.iter().enumerate() {
            let (lower, upper) = b.to_flow()?;
            net.add_edge(SOURCE, person_node(p), lower, upper, 0);
        }
        let mut pairs = Vec::new();
        for p in 0..person_count {
            for e in 0..entity_count {
                if let Some(cost) = cell(e, p) {
                    let edge = net.add_edge(person_node(p), entity_node(e), 0, 1, cost.as_i64());
                    pairs.push(PairEdge {
                        entity: e,
                        person: p,
                        cost,
                        edge,
                    });
                }
            }
        }
        for (e, b) in entity_bounds.iter().enumerate() {
            let (lower, upper) = b.to_flow()?;
            net.add_edge(entity_node(e), SINK, lower, upper, 0);
        }
        let back = net.add_edge(SINK, SOURCE, 0, flow_amount(pairs.len())?, 0);

        debug!(
            event = "network_built",
            nodes = net.node_count(),
            edges = net.edge_count(),
            pairs = pairs.len(),
            mode = %self.mode,
        );

        let shortfalls = net.satisfy_lower_bounds(scope)?;
        if !shortfalls.is_empty() {
            let mut persons = Vec::new();
            let mut entities = Vec::new();
            // Shortfalls at `s` and `t` only mirror those of the nodes.
            for shortfall in &shortfalls {
                let Some(index) = shortfall.node.checked_sub(2) else {
                    continue;
                };
                if index < person_count {
                    persons.push(problem.persons()[index].name.clone());
                } else if index - person_count < entity_count {
                    entities.push(problem.entities()[index - person_count].name.clone());
                }
            }
            return Err(self.infeasible(persons, entities));
        }

        if self.mode == BoundMode::AtMost {
            net.freeze(back);
            let extra = net.augment(SOURCE, SINK, i64::MAX, scope)?;
            debug!(event = "maximize", added = extra.flow, cost = extra.cost);
        }

        let rows = pairs
            .iter()
            .filter(|pair| net.flow(pair.edge) > 0)
            .map(|pair| {
                let preference = problem.preference(pair.entity, pair.person);
                AssignmentRow {
                    entity: problem.entities()[pair.entity].name.clone(),
                    person: problem.persons()[pair.person].name.clone(),
                    preference,
                    cost: pair.cost,
                    entity_index: pair.entity,
                    person_index: pair.person,
                }
            })
            .collect();
        Ok(Assignment::new(rows))
    }

    /// Reports every node whose minimum exceeds its number of partners.
    fn check_degrees(
        &self,
        problem: &AssignmentProblem,
        (entity_bounds, entity_degree): (&[Bounds], &[usize]),
        (person_bounds, person_degree): (&[Bounds], &[usize]),
    ) -> Result<()> {
        let short = |bounds: &[Bounds], degree: &[usize]| -> Vec<usize> {
            bounds
                .iter()
                .zip(degree)
                .enumerate()
                .filter(|(_, (b, deg))| b.lower > **deg)
                .map(|(i, _)| i)
                .collect()
        };
        let entities: Vec<String> = short(entity_bounds, entity_degree)
            .into_iter()
            .map(|i| problem.entities()[i].name.clone())
            .collect();
        let persons: Vec<String> = short(person_bounds, person_degree)
            .into_iter()
            .map(|i| problem.persons()[i].name.clone())
            .collect();

        if persons.is_empty() && entities.is_empty() {
            Ok(())
        } else {
            Err(self.infeasible(persons, entities))
        }
    }

    fn infeasible(&self, persons: Vec<String>, entities: Vec<String>) -> SlotForgeError {
        SlotForgeError::Infeasible {
            mode: self.mode,
            persons,
            entities,
        }
    }
}
