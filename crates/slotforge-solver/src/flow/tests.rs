//! Tests for the min-cost flow network.

use std::sync::atomic::AtomicBool;

use super::*;
use crate::termination::ExternalTermination;

fn started_scope<'a>() -> SolveScope<'a> {
    let mut scope = SolveScope::new();
    scope.start_solving();
    scope
}

/// s=0, persons X=1 Y=2, entities P=3 Q=4, t=5.
fn two_by_two(costs: [[i64; 2]; 2]) -> (FlowNetwork, [[EdgeId; 2]; 2]) {
    let mut net = FlowNetwork::new(6);
    net.add_edge(0, 1, 0, 1, 0);
    net.add_edge(0, 2, 0, 1, 0);
    let mut pairs = [[0; 2]; 2];
    for (p, row) in costs.iter().enumerate() {
        for (e, &cost) in row.iter().enumerate() {
            pairs[p][e] = net.add_edge(1 + p, 3 + e, 0, 1, cost);
        }
    }
    net.add_edge(3, 5, 0, 1, 0);
    net.add_edge(4, 5, 0, 1, 0);
    (net, pairs)
}

#[test]
fn test_empty_network() {
    let mut net = FlowNetwork::new(2);
    let outcome = net.max_flow_min_cost(0, 1).unwrap();
    assert_eq!(outcome, FlowOutcome::default());
}

#[test]
fn test_reroutes_through_reverse_edges() {
    // The cheapest first path X-P blocks Y; the optimum swaps to X-Q, Y-P.
    let (mut net, pairs) = two_by_two([[1, 2], [2, 100]]);
    let outcome = net.max_flow_min_cost(0, 5).unwrap();

    assert_eq!(outcome.flow, 2);
    assert_eq!(outcome.cost, 4);
    assert_eq!(net.flow(pairs[0][1]), 1);
    assert_eq!(net.flow(pairs[1][0]), 1);
    assert_eq!(net.flow(pairs[0][0]), 0);
}

#[test]
fn test_limit_caps_flow() {
    let (mut net, _) = two_by_two([[1, 2], [2, 100]]);
    let outcome = net.augment(0, 5, 1, &mut started_scope()).unwrap();
    assert_eq!(outcome, FlowOutcome { flow: 1, cost: 1 });
}

#[test]
fn test_lower_bounds_feasible() {
    // 0 -> 1 must carry at least 2 units; only 1 -> 2 -> 0 closes the loop.
    let mut net = FlowNetwork::new(3);
    let forced = net.add_edge(0, 1, 2, 3, 1);
    let middle = net.add_edge(1, 2, 0, 5, 4);
    let back = net.add_edge(2, 0, 0, 5, 0);

    let shortfalls = net.satisfy_lower_bounds(&mut started_scope()).unwrap();
    assert!(shortfalls.is_empty());
    assert_eq!(net.flow(forced), 2);
    assert_eq!(net.flow(middle), 2);
    assert_eq!(net.flow(back), 2);
}

#[test]
fn test_lower_bounds_infeasible() {
    // Needs 3 units through an edge that can carry 1 on the way back.
    let mut net = FlowNetwork::new(3);
    net.add_edge(0, 1, 3, 3, 0);
    net.add_edge(1, 2, 0, 1, 0);
    net.add_edge(2, 0, 0, 5, 0);

    let shortfalls = net.satisfy_lower_bounds(&mut started_scope()).unwrap();
    let total_missing: i64 = shortfalls.iter().map(|s| s.missing).sum();
    assert!(!shortfalls.is_empty());
    assert_eq!(total_missing, 4);
    assert!(shortfalls.iter().any(|s| s.node == 1));
    assert!(shortfalls.iter().any(|s| s.node == 0));
}

#[test]
fn test_lower_bounds_pick_cheapest_route() {
    let mut net = FlowNetwork::new(4);
    let forced = net.add_edge(0, 1, 1, 1, 0);
    let cheap = net.add_edge(1, 2, 0, 1, 1);
    let dear = net.add_edge(1, 3, 0, 1, 9);
    net.add_edge(2, 0, 0, 1, 0);
    net.add_edge(3, 0, 0, 1, 0);

    assert!(net.satisfy_lower_bounds(&mut started_scope()).unwrap().is_empty());
    assert_eq!(net.flow(forced), 1);
    assert_eq!(net.flow(cheap), 1);
    assert_eq!(net.flow(dear), 0);
}

#[test]
fn test_no_lower_bounds_is_trivially_feasible() {
    let (mut net, _) = two_by_two([[1, 1], [1, 1]]);
    let nodes = net.node_count();
    assert!(net.satisfy_lower_bounds(&mut started_scope()).unwrap().is_empty());
    assert_eq!(net.node_count(), nodes);
}

#[test]
fn test_augment_after_lower_bounds() {
    // Y must be served; afterwards X is added if capacity remains.
    let mut net = FlowNetwork::new(6);
    net.add_edge(0, 1, 0, 1, 0);
    net.add_edge(0, 2, 1, 1, 0);
    let xp = net.add_edge(1, 3, 0, 1, 1);
    let yp = net.add_edge(2, 3, 0, 1, 1);
    let yq = net.add_edge(2, 4, 0, 1, 5);
    net.add_edge(3, 5, 0, 1, 0);
    net.add_edge(4, 5, 0, 1, 0);
    let back = net.add_edge(5, 0, 0, 2, 0);

    assert!(net.satisfy_lower_bounds(&mut started_scope()).unwrap().is_empty());
    net.freeze(back);
    let outcome = net.augment(0, 5, INF, &mut started_scope()).unwrap();

    assert_eq!(outcome.flow, 1);
    // X can only use P, so Y moves to Q.
    assert_eq!(net.flow(xp), 1);
    assert_eq!(net.flow(yp), 0);
    assert_eq!(net.flow(yq), 1);
}

#[test]
fn test_freeze_pins_flow() {
    let (mut net, pairs) = two_by_two([[1, 2], [2, 3]]);
    net.freeze(pairs[0][0]);
    let outcome = net.max_flow_min_cost(0, 5).unwrap();
    assert_eq!(outcome.flow, 2);
    assert_eq!(net.flow(pairs[0][0]), 0);
    assert_eq!(outcome.cost, 4);
}

#[test]
fn test_cancelled() {
    let flag = AtomicBool::new(true);
    let mut scope = SolveScope::new().with_termination(ExternalTermination::new(&flag));
    scope.start_solving();

    let (mut net, _) = two_by_two([[1, 2], [2, 3]]);
    let result = net.augment(0, 5, INF, &mut scope);
    assert_eq!(result, Err(SlotForgeError::Cancelled));
}

#[test]
#[should_panic(expected = "invalid bounds")]
fn test_rejects_inverted_bounds() {
    let mut net = FlowNetwork::new(2);
    net.add_edge(0, 1, 3, 2, 0);
}
