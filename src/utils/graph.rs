use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::{Result, RouteError};
use crate::models::{Distance, Waypoint, WaypointId};
use crate::utils::distance::euclidean_distance;

/// Undirected waypoint graph whose edge weights are derived from coordinates
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    graph: UnGraph<Waypoint, Distance>,
    index: HashMap<WaypointId, NodeIndex>, // Waypoint name -> node
}

impl WeightedGraph {
    /// Build the graph from a waypoint table and a list of undirected connections
    ///
    /// Each connection weight is the rounded Euclidean distance between its
    /// endpoints. Duplicate names, self-loops, repeated connections and
    /// connections to unknown waypoints are rejected.
    pub fn new<W, C, S>(waypoints: W, connections: C) -> Result<Self>
    where
        W: IntoIterator<Item = Waypoint>,
        C: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph: UnGraph<Waypoint, Distance> = UnGraph::default();
        let mut index: HashMap<WaypointId, NodeIndex> = HashMap::new();

        for waypoint in waypoints {
            if !waypoint.x().is_finite() || !waypoint.y().is_finite() {
                return Err(RouteError::invalid_config(format!(
                    "waypoint {} has non-finite coordinates",
                    waypoint.name
                )));
            }
            if index.contains_key(&waypoint.name) {
                return Err(RouteError::invalid_config(format!(
                    "duplicate waypoint {}",
                    waypoint.name
                )));
            }
            let name = waypoint.name.clone();
            index.insert(name, graph.add_node(waypoint));
        }

        for (a, b) in connections {
            let (a, b) = (a.as_ref(), b.as_ref());
            if a == b {
                return Err(RouteError::invalid_config(format!(
                    "waypoint {a} cannot connect to itself"
                )));
            }

            let lookup = |name: &str| {
                index.get(name).copied().ok_or_else(|| {
                    RouteError::invalid_config(format!(
                        "connection {a} - {b} references unknown waypoint {name}"
                    ))
                })
            };
            let (ia, ib) = (lookup(a)?, lookup(b)?);

            if graph.find_edge(ia, ib).is_some() {
                return Err(RouteError::invalid_config(format!(
                    "duplicate connection {a} - {b}"
                )));
            }

            let weight = euclidean_distance(&graph[ia].position, &graph[ib].position);
            graph.add_edge(ia, ib, weight);
        }

        Ok(Self { graph, index })
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn waypoint(&self, name: &str) -> Result<&Waypoint> {
        self.node(name).map(|node| &self.graph[node])
    }

    /// All waypoints, ordered by name
    pub fn waypoints(&self) -> Vec<&Waypoint> {
        let mut waypoints: Vec<&Waypoint> = self
            .graph
            .node_indices()
            .map(|node| &self.graph[node])
            .collect();
        waypoints.sort_by(|a, b| a.name.cmp(&b.name));
        waypoints
    }

    /// Every undirected edge once, as `(a, b, weight)` with `a < b`
    pub fn edges(&self) -> Vec<(&str, &str, Distance)> {
        let mut edges: Vec<(&str, &str, Distance)> = self
            .graph
            .edge_references()
            .map(|edge| {
                let a = self.graph[edge.source()].name.as_str();
                let b = self.graph[edge.target()].name.as_str();
                if a <= b {
                    (a, b, *edge.weight())
                } else {
                    (b, a, *edge.weight())
                }
            })
            .collect();
        edges.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
        edges
    }

    /// Rounded Euclidean distance between two named waypoints
    ///
    /// The waypoints need not be adjacent.
    pub fn distance(&self, a: &str, b: &str) -> Result<Distance> {
        let a = self.waypoint(a)?;
        let b = self.waypoint(b)?;
        Ok(euclidean_distance(&a.position, &b.position))
    }

    /// Waypoints directly connected to `name`, with edge weights, ordered by name
    pub fn neighbors(&self, name: &str) -> Result<Vec<(&str, Distance)>> {
        let node = self.node(name)?;
        let mut neighbors: Vec<(&str, Distance)> = self
            .graph
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other].name.as_str(), *edge.weight())
            })
            .collect();
        neighbors.sort_by(|a, b| a.0.cmp(b.0));
        Ok(neighbors)
    }

    /// Weight of the direct edge between `a` and `b`, if they are adjacent
    pub fn edge_weight(&self, a: &str, b: &str) -> Result<Option<Distance>> {
        let (ia, ib) = (self.node(a)?, self.node(b)?);
        Ok(self
            .graph
            .find_edge(ia, ib)
            .map(|edge| self.graph[edge]))
    }

    fn node(&self, name: &str) -> Result<NodeIndex> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RouteError::unknown(name))
    }
}
