//! Exhaustive reference solvers for tiny inputs.

use slotforge_core::{AssignmentProblem, BoundMode, CostModel};

/// Minimum total cost of a rectangular matching by exhaustive search.
///
/// Matches `min(rows, cols)` pairs. Intended for matrices up to 8 x 8.
pub fn min_cost_matching(costs: &[Vec<u64>]) -> u64 {
    let rows = costs.len();
    let cols = costs.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return 0;
    }
    if rows > cols {
        let transposed: Vec<Vec<u64>> = (0..cols)
            .map(|c| (0..rows).map(|r| costs[r][c]).collect())
            .collect();
        return min_cost_matching(&transposed);
    }
    search_rows(costs, 0, &mut vec![false; cols])
}

fn search_rows(costs: &[Vec<u64>], row: usize, used: &mut Vec<bool>) -> u64 {
    if row == costs.len() {
        return 0;
    }
    let mut best = u64::MAX;
    for col in 0..used.len() {
        if used[col] {
            continue;
        }
        used[col] = true;
        let rest = search_rows(costs, row + 1, used);
        used[col] = false;
        best = best.min(costs[row][col].saturating_add(rest));
    }
    best
}

/// Optimum found by [`best_assignment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BruteForceOptimum {
    pub pairings: usize,
    pub total_cost: u64,
}

/// Enumerates every subset of allowed (entity, person) pairs and returns the
/// best one that satisfies the bound mode, or `None` if none does.
///
/// Semantics mirror the solver: a pair is used at most once, zero capacities
/// admit nothing, `Exact` holds the side with the smaller total capacity to
/// equality (both sides when balanced) and caps the other, `AtLeast` is a
/// floor, `AtMost` is a cap with the number of pairings maximized before cost.
///
/// # Panics
///
/// Panics if the problem has more than 16 pairs.
pub fn best_assignment(
    problem: &AssignmentProblem,
    model: &CostModel,
    mode: BoundMode,
) -> Option<BruteForceOptimum> {
    let pairs: Vec<(usize, usize, u64)> = (0..problem.entity_count())
        .flat_map(|e| (0..problem.person_count()).map(move |p| (e, p)))
        .filter_map(|(e, p)| {
            model
                .cell_cost(problem.preference(e, p))
                .map(|c| (e, p, c.value()))
        })
        .collect();
    assert!(pairs.len() <= 16, "too many pairs for brute force");

    let entity_caps: Vec<usize> = problem.entities().iter().map(|e| e.capacity).collect();
    let person_caps: Vec<usize> = problem.persons().iter().map(|p| p.capacity).collect();
    let entity_total: usize = entity_caps.iter().sum();
    let person_total: usize = person_caps.iter().sum();
    let entities_tight = entity_total <= person_total;
    let persons_tight = person_total <= entity_total;

    let admits = |count: usize, cap: usize, tight: bool| -> bool {
        if cap == 0 {
            return count == 0;
        }
        match mode {
            BoundMode::Exact if !tight => count <= cap,
            _ => mode.admits(count, cap),
        }
    };

    let mut best: Option<BruteForceOptimum> = None;
    for mask in 0u32..(1u32 << pairs.len()) {
        let mut entity_counts = vec![0usize; entity_caps.len()];
        let mut person_counts = vec![0usize; person_caps.len()];
        let mut cost = 0u64;
        for (i, &(e, p, c)) in pairs.iter().enumerate() {
            if mask & (1 << i) != 0 {
                entity_counts[e] += 1;
                person_counts[p] += 1;
                cost += c;
            }
        }

        let feasible = entity_counts
            .iter()
            .zip(&entity_caps)
            .all(|(&n, &cap)| admits(n, cap, entities_tight))
            && person_counts
                .iter()
                .zip(&person_caps)
                .all(|(&n, &cap)| admits(n, cap, persons_tight));
        if !feasible {
            continue;
        }

        let candidate = BruteForceOptimum {
            pairings: mask.count_ones() as usize,
            total_cost: cost,
        };
        best = Some(match best {
            None => candidate,
            Some(current) => {
                let better = if mode == BoundMode::AtMost {
                    (candidate.pairings, std::cmp::Reverse(candidate.total_cost))
                        > (current.pairings, std::cmp::Reverse(current.total_cost))
                } else {
                    candidate.total_cost < current.total_cost
                };
                if better {
                    candidate
                } else {
                    current
                }
            }
        });
    }
    best
}
