use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use priority_queue::PriorityQueue;
use tracing::trace;

use crate::algorithms::{PathFinder, ShortestPath};
use crate::error::{Result, RouteError};
use crate::models::Distance;
use crate::utils::graph::WeightedGraph;

// Custom wrapper to make f64 implement Ord
#[derive(PartialEq, Copy, Clone, Debug)]
struct Tentative(Distance);

impl Eq for Tentative {}

impl PartialOrd for Tentative {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tentative {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier priority: smallest tentative distance first, then smallest name
type FrontierKey<'a> = Reverse<(Tentative, &'a str)>;

/// Dijkstra's algorithm over a [`WeightedGraph`]
///
/// Distance and predecessor tables are created fresh on every call, so one
/// finder can serve any number of queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl PathFinder for Dijkstra {
    fn shortest_path(
        &self,
        graph: &WeightedGraph,
        source: &str,
        target: &str,
    ) -> Result<ShortestPath> {
        // Resolve both endpoints before searching
        let source = graph.waypoint(source)?.name.as_str();
        let target = graph.waypoint(target)?.name.as_str();

        let mut best: HashMap<&str, Distance> = graph
            .waypoints()
            .into_iter()
            .map(|w| (w.name.as_str(), f64::INFINITY))
            .collect();
        let mut predecessors: HashMap<&str, &str> = HashMap::new();
        let mut frontier: PriorityQueue<&str, FrontierKey> = PriorityQueue::new();

        best.insert(source, 0.0);
        frontier.push(source, Reverse((Tentative(0.0), source)));

        while let Some((current, Reverse((Tentative(distance), _)))) = frontier.pop() {
            if current == target {
                break;
            }

            for (neighbor, weight) in graph.neighbors(current)? {
                let candidate = distance + weight;
                if candidate < best[neighbor] {
                    best.insert(neighbor, candidate);
                    predecessors.insert(neighbor, current);
                    // Pushing a queued item again only lowers its key
                    frontier.push(neighbor, Reverse((Tentative(candidate), neighbor)));
                }
            }
        }

        let total_weight = best[target];
        if total_weight.is_infinite() {
            return Err(RouteError::NoPathExists {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        // Walk predecessors back from the target
        let mut path = vec![target.to_string()];
        let mut current = target;
        while let Some(&previous) = predecessors.get(current) {
            path.push(previous.to_string());
            current = previous;
        }
        path.reverse();

        trace!(source, target, total_weight, hops = path.len() - 1, "shortest path");

        Ok(ShortestPath { path, total_weight })
    }
}
