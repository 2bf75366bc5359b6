//! Capacity property checks on solver output.

use std::collections::HashSet;

use slotforge_core::{Assignment, AssignmentProblem, BoundMode};

/// Lists every way `assignment` breaks the capacity rules of `mode`.
///
/// Also flags pairs realized more than once.
pub fn capacity_violations(
    problem: &AssignmentProblem,
    assignment: &Assignment,
    mode: BoundMode,
) -> Vec<String> {
    let entity_total = problem.total_entity_capacity();
    let person_total = problem.total_person_capacity();
    let mut violations = Vec::new();

    let mut check = |kind: &str, name: &str, count: usize, cap: usize, tight: bool| {
        let ok = match mode {
            _ if cap == 0 => count == 0,
            BoundMode::Exact if !tight => count <= cap,
            _ => mode.admits(count, cap),
        };
        if !ok {
            violations.push(format!(
                "{kind} {name}: {count} pairings for capacity {cap} under {mode}"
            ));
        }
    };

    for entity in problem.entities() {
        let count = assignment.count_for_entity(&entity.name);
        check(
            "entity",
            &entity.name,
            count,
            entity.capacity,
            entity_total <= person_total,
        );
    }
    for person in problem.persons() {
        let count = assignment.count_for_person(&person.name);
        check(
            "person",
            &person.name,
            count,
            person.capacity,
            person_total <= entity_total,
        );
    }

    let mut seen = HashSet::new();
    for row in assignment {
        if !seen.insert((row.entity.as_str(), row.person.as_str())) {
            violations.push(format!("pair {} / {} used twice", row.entity, row.person));
        }
    }
    violations
}

/// Panics with every violation found by [`capacity_violations`].
pub fn assert_capacities_respected(
    problem: &AssignmentProblem,
    assignment: &Assignment,
    mode: BoundMode,
) {
    let violations = capacity_violations(problem, assignment, mode);
    assert!(violations.is_empty(), "violations: {violations:#?}");
}
