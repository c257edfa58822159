use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::algorithms::dijkstra::Dijkstra;
use crate::algorithms::route_simulator::RouteSimulator;
use crate::error::{Result, RouteError};
use crate::models::{Charge, Cost, Robot, Waypoint, WaypointId, LOW_BATTERY_THRESHOLD};
use crate::utils::graph::WeightedGraph;

/// Built-in warehouse scenario
const WAREHOUSE_SCENARIO: &str = include_str!("../../data/warehouse.json");

/// A waypoint row of the configuration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub name: WaypointId,
    pub x: f64,
    pub y: f64,
}

/// Waypoint table, undirected connections and the two special waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub waypoints: Vec<WaypointRecord>,
    pub connections: Vec<(WaypointId, WaypointId)>,
    /// Where every run starts
    pub start: WaypointId,
    /// Where the robot refills its battery
    pub recharge: WaypointId,
}

/// Energy model of the robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(default = "default_capacity")]
    pub capacity: Charge,
    #[serde(default = "default_consumption")]
    pub consumption_per_km: f64,
    #[serde(default = "default_tariff")]
    pub tariff: Cost,
    #[serde(default = "default_threshold")]
    pub low_battery_threshold: Charge,
}

fn default_capacity() -> Charge {
    100.0
}

fn default_consumption() -> f64 {
    15.0
}

fn default_tariff() -> Cost {
    0.5
}

fn default_threshold() -> Charge {
    LOW_BATTERY_THRESHOLD
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            consumption_per_km: default_consumption(),
            tariff: default_tariff(),
            low_battery_threshold: default_threshold(),
        }
    }
}

impl RobotConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("capacity", self.capacity),
            ("consumption_per_km", self.consumption_per_km),
            ("tariff", self.tariff),
            ("low_battery_threshold", self.low_battery_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RouteError::invalid_config(format!(
                    "robot {field} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.capacity == 0.0 {
            return Err(RouteError::invalid_config("robot capacity must be positive"));
        }
        if self.low_battery_threshold >= self.capacity {
            return Err(RouteError::invalid_config(format!(
                "low battery threshold {} must be below capacity {}",
                self.low_battery_threshold, self.capacity
            )));
        }

        Ok(())
    }

    /// A fully charged robot with these parameters
    pub fn robot(&self) -> Robot {
        Robot::new(self.capacity, self.consumption_per_km, self.tariff)
            .with_low_battery_threshold(self.low_battery_threshold)
    }
}

/// Complete configuration of one simulation setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub graph: GraphConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl ScenarioConfig {
    /// Parses and validates a JSON scenario
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScenarioConfig = serde_json::from_str(json)?;
        config.robot.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the graph and checks that the start and recharge waypoints exist
    pub fn build(&self) -> Result<Scenario> {
        self.robot.validate()?;

        let waypoints = self
            .graph
            .waypoints
            .iter()
            .map(|record| Waypoint::new(record.name.clone(), record.x, record.y));
        let connections = self
            .graph
            .connections
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()));
        let graph = WeightedGraph::new(waypoints, connections)?;

        for (role, name) in [("start", &self.graph.start), ("recharge", &self.graph.recharge)] {
            if !graph.contains(name) {
                return Err(RouteError::invalid_config(format!(
                    "{role} waypoint {name} is not in the waypoint table"
                )));
            }
        }

        info!(
            waypoints = graph.len(),
            connections = self.graph.connections.len(),
            start = %self.graph.start,
            recharge = %self.graph.recharge,
            "scenario loaded"
        );

        Ok(Scenario {
            graph,
            robot: self.robot.robot(),
            start: self.graph.start.clone(),
            recharge: self.graph.recharge.clone(),
        })
    }
}

/// A ready-to-run scenario: the graph plus the robot that travels it
#[derive(Debug, Clone)]
pub struct Scenario {
    pub graph: WeightedGraph,
    pub robot: Robot,
    pub start: WaypointId,
    pub recharge: WaypointId,
}

impl Scenario {
    /// Simulator over this scenario's graph using Dijkstra
    pub fn simulator(&self) -> Result<RouteSimulator<'_, Dijkstra>> {
        RouteSimulator::new(&self.graph, Dijkstra, &self.recharge)
    }

    /// Waypoints a run may target: everything except the start
    pub fn destinations(&self) -> Vec<&str> {
        self.graph
            .waypoints()
            .into_iter()
            .map(|w| w.name.as_str())
            .filter(|name| *name != self.start)
            .collect()
    }
}

/// Loads a scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig> {
    let path = path.as_ref();
    info!(path = %path.display(), "reading scenario");
    let json = fs::read_to_string(path)?;
    ScenarioConfig::from_json(&json)
}

/// The built-in warehouse scenario
pub fn default_scenario() -> Result<ScenarioConfig> {
    ScenarioConfig::from_json(WAREHOUSE_SCENARIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_builds() {
        let scenario = default_scenario().unwrap().build().unwrap();

        assert_eq!(scenario.graph.len(), 7);
        assert_eq!(scenario.start, "Warehouse");
        assert_eq!(scenario.recharge, "Recharge");
        assert_eq!(scenario.robot, Robot::default());
        assert_eq!(
            scenario.destinations(),
            vec!["Area1", "Area2", "Area3", "Area4", "Area5", "Recharge"]
        );
    }

    #[test]
    fn test_robot_defaults_when_omitted() {
        let json = r#"{
            "graph": {
                "waypoints": [{ "name": "A", "x": 0, "y": 0 }, { "name": "B", "x": 3, "y": 4 }],
                "connections": [["A", "B"]],
                "start": "A",
                "recharge": "B"
            }
        }"#;
        let config = ScenarioConfig::from_json(json).unwrap();

        assert_eq!(config.robot, RobotConfig::default());
        let scenario = config.build().unwrap();
        assert_eq!(scenario.graph.edge_weight("A", "B").unwrap(), Some(5.0));
    }

    #[test]
    fn test_rejects_unknown_recharge_waypoint() {
        let mut config = default_scenario().unwrap();
        config.graph.recharge = "Nowhere".to_string();

        assert!(matches!(
            config.build(),
            Err(RouteError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_robot_parameters() {
        let mut config = RobotConfig::default();
        config.tariff = -1.0;
        assert!(config.validate().is_err());

        let mut config = RobotConfig::default();
        config.low_battery_threshold = 100.0;
        assert!(config.validate().is_err());

        let mut config = RobotConfig::default();
        config.consumption_per_km = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ScenarioConfig::from_json("{ not json"),
            Err(RouteError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_connections() {
        let config = default_scenario().unwrap();
        let reparsed = ScenarioConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scenario("does/not/exist.json"),
            Err(RouteError::Io(_))
        ));
    }
}
