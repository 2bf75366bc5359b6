//! Small hand-checked problems.
//!
//! Preference tables are written one row per entity, one column per person.

use slotforge_core::{AssignmentProblem, Entity, Person};

/// Builds a problem with generated names `E1..` and `P1..`.
///
/// # Panics
///
/// Panics if the ranks are invalid or the shapes disagree.
pub fn problem_from_ranks(
    entity_capacities: &[usize],
    person_capacities: &[usize],
    ranks: Vec<Vec<i64>>,
) -> AssignmentProblem {
    let entities = entity_capacities
        .iter()
        .enumerate()
        .map(|(i, &c)| Entity::new(format!("E{}", i + 1), c))
        .collect();
    let persons = person_capacities
        .iter()
        .enumerate()
        .map(|(i, &c)| Person::new(format!("P{}", i + 1), c))
        .collect();
    AssignmentProblem::new(entities, persons, ranks).expect("valid fixture")
}

/// Builds a problem where every capacity is 1.
pub fn unit_problem(ranks: Vec<Vec<i64>>) -> AssignmentProblem {
    let entities = vec![1; ranks.len()];
    let persons = vec![1; ranks.first().map_or(0, Vec::len)];
    problem_from_ranks(&entities, &persons, ranks)
}

/// Three sections, three persons, one clear favourite each.
///
/// Person A ranks entity1=1, entity2=2, entity3=3; B ranks 2, 1, 3;
/// C ranks 3, 3, 1. The optimum pairs A-entity1, B-entity2, C-entity3.
pub fn three_by_three() -> AssignmentProblem {
    AssignmentProblem::new(
        vec![
            Entity::unit("entity1"),
            Entity::unit("entity2"),
            Entity::unit("entity3"),
        ],
        vec![Person::unit("A"), Person::unit("B"), Person::unit("C")],
        vec![vec![1, 2, 3], vec![2, 1, 3], vec![3, 3, 1]],
    )
    .expect("valid fixture")
}

/// Two single-slot entities and three persons: one person stays unassigned.
///
/// `P3` is the cheapest person to leave out.
pub fn two_entities_three_persons() -> AssignmentProblem {
    problem_from_ranks(&[1, 1], &[1, 1, 1], vec![vec![1, 2, 3], vec![2, 1, 3]])
}

/// One entity needing at least four persons, six single-entity persons.
pub fn one_entity_six_persons() -> AssignmentProblem {
    problem_from_ranks(&[4], &[1; 6], vec![vec![1, 2, 3, 1, 2, 4]])
}

/// Shifts with multi-slot capacities and persons taking several shifts.
pub fn shifts_with_counts() -> AssignmentProblem {
    AssignmentProblem::new(
        vec![
            Entity::new("Morning", 2),
            Entity::new("Evening", 1),
            Entity::new("Night", 1),
        ],
        vec![
            Person::new("Ada", 2),
            Person::new("Grace", 1),
            Person::new("Linus", 1),
        ],
        vec![vec![1, 2, 1], vec![2, 1, 4], vec![1, 3, 2]],
    )
    .expect("valid fixture")
}
