//! Min-cost flow with lower bounds.
//!
//! Successive shortest paths: every augmentation runs Dijkstra over reduced
//! costs `cost + potential[from] - potential[to]`, which stay non-negative
//! on residual edges as long as all edge costs start non-negative.
//!
//! Lower bounds are removed up front: an edge `(u, v)` with bounds `[l, h]`
//! keeps residual capacity `h - l` and records `l` units of excess at `v`
//! and deficit at `u`. [`FlowNetwork::satisfy_lower_bounds`] routes those
//! units from a super-source to a super-sink; the bounds are jointly
//! feasible iff every super-source edge saturates.
//!
//! Edges are explored in insertion order and the heap breaks distance ties
//! by node id, so results are deterministic for a given construction order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use slotforge_core::{Result, SlotForgeError};
use smallvec::SmallVec;
use tracing::trace;

use crate::scope::SolveScope;

pub type NodeId = usize;
pub type EdgeId = usize;

/// Distance of unreachable nodes.
const INF: i64 = i64::MAX / 4;

#[derive(Clone, Debug)]
struct Edge {
    to: NodeId,
    /// Remaining residual capacity.
    residual: i64,
    cost: i64,
}

/// Totals of one call to [`FlowNetwork::augment`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowOutcome {
    pub flow: i64,
    pub cost: i64,
}

/// A node whose lower-bound demand could not be routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortfall {
    pub node: NodeId,
    /// Units still missing.
    pub missing: i64,
}

/// A residual network supporting lower bounds.
///
/// Forward edge `e` and its reverse `e ^ 1` are stored next to each other.
///
/// # Examples
///
/// ```
/// use slotforge_solver::flow::FlowNetwork;
///
/// let mut net = FlowNetwork::new(4);
/// let a = net.add_edge(0, 1, 0, 1, 0);
/// let b = net.add_edge(0, 2, 0, 1, 0);
/// let c = net.add_edge(1, 3, 0, 1, 5);
/// let d = net.add_edge(2, 3, 0, 1, 2);
///
/// let outcome = net.max_flow_min_cost(0, 3).unwrap();
/// assert_eq!(outcome.flow, 2);
/// assert_eq!(outcome.cost, 7);
/// assert_eq!(net.flow(c) + net.flow(d), 2);
/// assert_eq!(net.flow(a), 1);
/// assert_eq!(net.flow(b), 1);
/// ```
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    edges: Vec<Edge>,
    lower: Vec<i64>,
    adjacency: Vec<SmallVec<[EdgeId; 4]>>,
    excess: Vec<i64>,
    potential: Vec<i64>,
}

impl FlowNetwork {
    /// Creates a network with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            lower: Vec::new(),
            adjacency: vec![SmallVec::new(); node_count],
            excess: vec![0; node_count],
            potential: vec![0; node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of forward edges.
    pub fn edge_count(&self) -> usize {
        self.lower.len()
    }

    pub fn add_node(&mut self) -> NodeId {
        self.adjacency.push(SmallVec::new());
        self.excess.push(0);
        self.potential.push(0);
        self.adjacency.len() - 1
    }

    /// Adds an edge carrying between `lower` and `upper` units at `cost` per unit.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`, `lower < 0` or `cost < 0`.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        lower: i64,
        upper: i64,
        cost: i64,
    ) -> EdgeId {
        assert!(0 <= lower && lower <= upper, "invalid bounds [{lower}, {upper}]");
        assert!(cost >= 0, "negative edge cost {cost}");

        let id = self.edges.len();
        self.edges.push(Edge {
            to,
            residual: upper - lower,
            cost,
        });
        self.edges.push(Edge {
            to: from,
            residual: 0,
            cost: -cost,
        });
        self.adjacency[from].push(id);
        self.adjacency[to].push(id + 1);
        self.lower.push(lower);

        self.excess[to] += lower;
        self.excess[from] -= lower;
        id
    }

    /// Units currently carried by forward edge `edge`, lower bound included.
    #[inline]
    pub fn flow(&self, edge: EdgeId) -> i64 {
        self.lower[edge / 2] + self.edges[edge ^ 1].residual
    }

    /// Removes both residual directions of `edge`, pinning its current flow.
    pub fn freeze(&mut self, edge: EdgeId) {
        self.edges[edge].residual = 0;
        self.edges[edge ^ 1].residual = 0;
    }

    /// Routes every lower-bound unit through the network at minimum cost.
    ///
    /// Returns the nodes whose excess or deficit could not be routed; an
    /// empty list means the bounds are feasible and the current flow is a
    /// minimum-cost circulation meeting them.
    pub fn satisfy_lower_bounds(&mut self, scope: &mut SolveScope<'_>) -> Result<Vec<Shortfall>> {
        let demands: Vec<(NodeId, i64)> = self
            .excess
            .iter()
            .enumerate()
            .filter(|(_, &e)| e != 0)
            .map(|(v, &e)| (v, e))
            .collect();
        if demands.is_empty() {
            return Ok(Vec::new());
        }

        let source = self.add_node();
        let sink = self.add_node();
        let mut bridges = Vec::with_capacity(demands.len());
        for &(node, excess) in &demands {
            let edge = if excess > 0 {
                self.add_bridge(source, node, excess)
            } else {
                self.add_bridge(node, sink, -excess)
            };
            bridges.push((node, edge));
        }

        let required: i64 = demands.iter().filter(|(_, e)| *e > 0).map(|(_, e)| e).sum();
        let outcome = self.augment(source, sink, required, scope)?;
        trace!(
            event = "lower_bounds",
            required = required,
            routed = outcome.flow,
            cost = outcome.cost,
        );

        let shortfalls = bridges
            .iter()
            .filter(|&&(_, edge)| self.edges[edge].residual > 0)
            .map(|&(node, edge)| Shortfall {
                node,
                missing: self.edges[edge].residual,
            })
            .collect();
        for &(_, edge) in &bridges {
            self.freeze(edge);
        }
        self.excess.fill(0);
        Ok(shortfalls)
    }

    /// Bridge edges carry no lower bound and leave `excess` untouched.
    fn add_bridge(&mut self, from: NodeId, to: NodeId, capacity: i64) -> EdgeId {
        let id = self.edges.len();
        self.edges.push(Edge {
            to,
            residual: capacity,
            cost: 0,
        });
        self.edges.push(Edge {
            to: from,
            residual: 0,
            cost: 0,
        });
        self.adjacency[from].push(id);
        self.adjacency[to].push(id + 1);
        self.lower.push(0);
        id
    }

    /// Pushes as much flow as possible from `source` to `sink`, cheapest first.
    pub fn max_flow_min_cost(&mut self, source: NodeId, sink: NodeId) -> Result<FlowOutcome> {
        let mut scope = SolveScope::new();
        scope.start_solving();
        self.augment(source, sink, INF, &mut scope)
    }

    /// Pushes up to `limit` units from `source` to `sink` along successive
    /// shortest paths, polling termination once per path.
    pub fn augment(
        &mut self,
        source: NodeId,
        sink: NodeId,
        limit: i64,
        scope: &mut SolveScope<'_>,
    ) -> Result<FlowOutcome> {
        let n = self.node_count();
        let mut dist = vec![INF; n];
        let mut prev_edge: Vec<Option<EdgeId>> = vec![None; n];
        let mut outcome = FlowOutcome::default();

        while outcome.flow < limit {
            scope.check_termination()?;

            self.shortest_paths(source, &mut dist, &mut prev_edge);
            let sink_dist = dist[sink];
            if sink_dist >= INF {
                break;
            }

            // Capped distances keep reduced costs non-negative for nodes the
            // search did not reach.
            for (p, &d) in self.potential.iter_mut().zip(&dist) {
                *p += d.min(sink_dist);
            }

            let mut push = limit - outcome.flow;
            let mut node = sink;
            while let Some(edge) = prev_edge[node] {
                push = push.min(self.edges[edge].residual);
                node = self.edges[edge ^ 1].to;
            }
            if push <= 0 {
                return Err(SlotForgeError::Internal(
                    "augmenting path without residual capacity".to_string(),
                ));
            }

            let mut path_cost = 0;
            let mut node = sink;
            while let Some(edge) = prev_edge[node] {
                self.edges[edge].residual -= push;
                self.edges[edge ^ 1].residual += push;
                path_cost += self.edges[edge].cost;
                node = self.edges[edge ^ 1].to;
            }

            outcome.flow += push;
            outcome.cost += push * path_cost;
            let count = scope.increment_augmentation_count();
            trace!(
                event = "augment",
                units = push,
                path_cost = path_cost,
                augmentations = count,
            );
        }
        Ok(outcome)
    }

    /// Dijkstra over reduced costs. Unreachable nodes keep distance `INF`.
    fn shortest_paths(&self, source: NodeId, dist: &mut [i64], prev_edge: &mut [Option<EdgeId>]) {
        dist.fill(INF);
        prev_edge.fill(None);
        dist[source] = 0;

        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0i64, source)));

        while let Some(Reverse((d, node))) = heap.pop() {
            if d > dist[node] {
                continue;
            }
            for &edge in &self.adjacency[node] {
                let e = &self.edges[edge];
                if e.residual <= 0 {
                    continue;
                }
                let reduced = e.cost + self.potential[node] - self.potential[e.to];
                debug_assert!(reduced >= 0, "negative reduced cost {reduced}");
                let candidate = d + reduced;
                if candidate < dist[e.to] {
                    dist[e.to] = candidate;
                    prev_edge[e.to] = Some(edge);
                    heap.push(Reverse((candidate, e.to)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
