pub mod dijkstra;
pub mod route_simulator;

// Common algorithm traits
use crate::error::Result;
use crate::models::{Distance, WaypointId};
use crate::utils::graph::WeightedGraph;

/// Minimum-weight path between two waypoints
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Waypoints from source to target, both included
    pub path: Vec<WaypointId>,

    /// Sum of the edge weights along `path`
    pub total_weight: Distance,
}

/// Shortest-path oracle consulted by the route simulator
pub trait PathFinder {
    /// Find a minimum-weight path from `source` to `target`
    ///
    /// Fails with `UnknownWaypoint` when an endpoint is not in the graph and
    /// with `NoPathExists` when `target` cannot be reached.
    fn shortest_path(
        &self,
        graph: &WeightedGraph,
        source: &str,
        target: &str,
    ) -> Result<ShortestPath>;
}
