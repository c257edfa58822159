use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::algorithms::PathFinder;
use crate::error::{Result, RouteError};
use crate::models::{Itinerary, ItineraryBuilder, Robot, WaypointId};
use crate::utils::graph::WeightedGraph;

/// Battery-aware traversal of shortest paths with recharge detours
///
/// The simulator follows the base shortest path edge by edge. When an edge
/// would leave the robot at or under its low-battery threshold it detours to
/// the recharge waypoint, refills, and resumes with the next edge of the base
/// path. It reacts to low battery; it never replans the remainder of the route.
///
/// A detour is only taken while the recharge waypoint is absent from the
/// itinerary. This stops endless detours but does not make every route
/// feasible: a second low-battery event falls through to the plain edge, and
/// the run is stranded if that edge would drain the battery below zero.
#[derive(Debug, Clone)]
pub struct RouteSimulator<'g, F> {
    graph: &'g WeightedGraph,
    finder: F,
    recharge: WaypointId,
}

impl<'g, F: PathFinder> RouteSimulator<'g, F> {
    /// Creates a simulator that recharges at `recharge`
    pub fn new(graph: &'g WeightedGraph, finder: F, recharge: &str) -> Result<Self> {
        let recharge = graph.waypoint(recharge)?.name.clone();
        Ok(Self {
            graph,
            finder,
            recharge,
        })
    }

    pub fn graph(&self) -> &WeightedGraph {
        self.graph
    }

    pub fn recharge_waypoint(&self) -> &str {
        &self.recharge
    }

    /// Runs one simulation from `start` to `destination`
    pub fn simulate(&self, start: &str, destination: &str, mut robot: Robot) -> Result<Itinerary> {
        // Unknown identifiers are rejected before any search
        self.graph.waypoint(start)?;
        self.graph.waypoint(destination)?;

        info!(
            start,
            destination,
            battery = robot.battery(),
            "planning route"
        );

        let base = match self.finder.shortest_path(self.graph, start, destination) {
            Ok(base) => base,
            Err(RouteError::NoPathExists { .. }) => {
                return Err(RouteError::DestinationUnreachable {
                    start: start.to_string(),
                    destination: destination.to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        let mut itinerary = ItineraryBuilder::starting_at(start);

        for leg in base.path.windows(2) {
            let (from, to) = (leg[0].as_str(), leg[1].as_str());
            let weight = self.graph.edge_weight(from, to)?.ok_or_else(|| {
                RouteError::NoPathExists {
                    from: from.to_string(),
                    to: to.to_string(),
                }
            })?;
            let energy = robot.energy_for(weight);

            if robot.would_run_low(energy) && from != start {
                warn!(
                    at = from,
                    battery = robot.battery(),
                    needed = energy,
                    "low battery, rerouting to recharge"
                );
                if self.recharge_detour(from, &mut robot, &mut itinerary)? {
                    // Rejoin the base path at the next edge boundary
                    continue;
                }
            }

            if robot.would_deplete(energy) {
                return Err(RouteError::Stranded {
                    at: from.to_string(),
                    battery: robot.battery(),
                });
            }

            robot.drain(energy);
            itinerary.record_travel(from, to, weight, energy, robot.battery());
            debug!(from, to, weight, energy, battery = robot.battery(), "edge committed");
        }

        let itinerary = itinerary.finish(robot.tariff);
        info!(
            destination,
            distance = itinerary.total_distance(),
            cost = itinerary.total_cost(),
            recharges = itinerary.recharge_count(),
            "route complete"
        );
        Ok(itinerary)
    }

    /// Detours from `from` to the recharge waypoint
    ///
    /// Returns false when the recharge waypoint was already visited.
    fn recharge_detour(
        &self,
        from: &str,
        robot: &mut Robot,
        itinerary: &mut ItineraryBuilder,
    ) -> Result<bool> {
        let detour = match self.finder.shortest_path(self.graph, from, &self.recharge) {
            Ok(detour) => detour,
            Err(RouteError::NoPathExists { .. }) => {
                return Err(RouteError::Stranded {
                    at: from.to_string(),
                    battery: robot.battery(),
                })
            }
            Err(e) => return Err(e),
        };

        if itinerary.visits(&self.recharge) {
            warn!(at = from, recharge = %self.recharge, "recharge already visited, continuing");
            return Ok(false);
        }

        robot.recharge();
        info!(
            at = from,
            detour = %detour.path.join(" -> "),
            distance = detour.total_weight,
            "recharged"
        );
        itinerary.record_recharge(detour.path, detour.total_weight, robot.battery());
        Ok(true)
    }
}

impl<'g, F: PathFinder + Sync> RouteSimulator<'g, F> {
    /// Simulates every destination other than `start` in parallel
    ///
    /// Results are ordered by destination name; failures are kept per destination.
    pub fn plan_all(&self, start: &str, robot: &Robot) -> Vec<(WaypointId, Result<Itinerary>)> {
        let destinations: Vec<&str> = self
            .graph
            .waypoints()
            .into_iter()
            .map(|w| w.name.as_str())
            .filter(|name| *name != start)
            .collect();

        destinations
            .par_iter()
            .map(|destination| {
                let result = self.simulate(start, destination, robot.clone());
                (destination.to_string(), result)
            })
            .collect()
    }
}

/// One-shot simulation without keeping a [`RouteSimulator`] around
pub fn simulate<F: PathFinder>(
    graph: &WeightedGraph,
    finder: F,
    start: &str,
    destination: &str,
    recharge: &str,
    robot: Robot,
) -> Result<Itinerary> {
    RouteSimulator::new(graph, finder, recharge)?.simulate(start, destination, robot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dijkstra::Dijkstra;
    use crate::algorithms::ShortestPath;
    use crate::models::{RouteEvent, Waypoint};
    use std::cell::Cell;

    // Depot - A - B - C - D along the y axis, 5 units apart, with Charge hanging off A
    fn corridor() -> WeightedGraph {
        WeightedGraph::new(
            vec![
                Waypoint::new("Depot", 0.0, 0.0),
                Waypoint::new("A", 0.0, 5.0),
                Waypoint::new("B", 0.0, 10.0),
                Waypoint::new("C", 0.0, 15.0),
                Waypoint::new("D", 0.0, 20.0),
                Waypoint::new("Charge", 1.0, 5.0),
            ],
            vec![
                ("Depot", "A"),
                ("A", "B"),
                ("B", "C"),
                ("C", "D"),
                ("A", "Charge"),
            ],
        )
        .unwrap()
    }

    /// Counts the queries it forwards to Dijkstra
    struct CountingFinder {
        calls: Cell<usize>,
    }

    impl PathFinder for CountingFinder {
        fn shortest_path(
            &self,
            graph: &WeightedGraph,
            source: &str,
            target: &str,
        ) -> Result<ShortestPath> {
            self.calls.set(self.calls.get() + 1);
            Dijkstra.shortest_path(graph, source, target)
        }
    }

    #[test]
    fn test_detour_skips_the_interrupted_edge() {
        let graph = corridor();
        let simulator = RouteSimulator::new(&graph, Dijkstra, "Charge").unwrap();
        let robot = Robot::new(100.0, 10.0, 1.0);

        let itinerary = simulator.simulate("Depot", "D", robot).unwrap();

        // A -> B is abandoned for the detour, the robot rejoins at B -> C
        assert_eq!(itinerary.waypoints(), ["Depot", "A", "Charge", "C", "D"]);
        assert_eq!(itinerary.total_distance(), 16.0);
        assert_eq!(itinerary.total_cost(), 16.0);
        assert_eq!(itinerary.recharge_count(), 1);
    }

    #[test]
    fn test_second_low_battery_event_falls_through() {
        let graph = corridor();
        let simulator = RouteSimulator::new(&graph, Dijkstra, "Charge").unwrap();
        let robot = Robot::new(100.0, 10.0, 1.0);

        let itinerary = simulator.simulate("Depot", "D", robot).unwrap();

        // C -> D drops to exactly 0 after the recharge was already used
        match itinerary.events().last() {
            Some(RouteEvent::Travel {
                from,
                to,
                battery_after,
                ..
            }) => {
                assert_eq!(from, "C");
                assert_eq!(to, "D");
                assert_eq!(*battery_after, 0.0);
            }
            other => panic!("unexpected last event {other:?}"),
        }
    }

    #[test]
    fn test_stranded_when_fall_through_would_deplete() {
        let graph = corridor();
        let simulator = RouteSimulator::new(&graph, Dijkstra, "Charge").unwrap();
        let robot = Robot::new(100.0, 15.0, 0.5);

        let result = simulator.simulate("Depot", "D", robot);

        assert!(matches!(
            result,
            Err(RouteError::Stranded { at, battery }) if at == "C" && battery == 25.0
        ));
    }

    #[test]
    fn test_start_waypoint_never_reroutes() {
        let graph = corridor();
        let simulator = RouteSimulator::new(&graph, Dijkstra, "Charge").unwrap();
        // The first edge drops the battery to 5%, under the threshold
        let robot = Robot::new(100.0, 19.0, 0.5);

        let result = simulator.simulate("Depot", "A", robot).unwrap();

        assert_eq!(result.waypoints(), ["Depot", "A"]);
        assert_eq!(result.recharge_count(), 0);
    }

    #[test]
    fn test_destination_unreachable() {
        let graph = WeightedGraph::new(
            vec![
                Waypoint::new("Depot", 0.0, 0.0),
                Waypoint::new("Charge", 1.0, 0.0),
                Waypoint::new("Island", 9.0, 9.0),
            ],
            vec![("Depot", "Charge")],
        )
        .unwrap();
        let simulator = RouteSimulator::new(&graph, Dijkstra, "Charge").unwrap();

        let result = simulator.simulate("Depot", "Island", Robot::default());
        assert!(matches!(
            result,
            Err(RouteError::DestinationUnreachable { start, destination })
                if start == "Depot" && destination == "Island"
        ));
    }

    #[test]
    fn test_unknown_destination_is_rejected_before_searching() {
        let graph = corridor();
        let finder = CountingFinder {
            calls: Cell::new(0),
        };
        let simulator = RouteSimulator::new(&graph, finder, "Charge").unwrap();

        let result = simulator.simulate("Depot", "Atlantis", Robot::default());

        assert!(matches!(
            result,
            Err(RouteError::UnknownWaypoint { name }) if name == "Atlantis"
        ));
        assert_eq!(simulator.finder.calls.get(), 0);
    }

    #[test]
    fn test_unknown_recharge_waypoint() {
        let graph = corridor();
        assert!(matches!(
            RouteSimulator::new(&graph, Dijkstra, "Nowhere"),
            Err(RouteError::UnknownWaypoint { .. })
        ));
    }

    #[test]
    fn test_destination_equal_to_start() {
        let graph = corridor();
        let itinerary = simulate(&graph, Dijkstra, "B", "B", "Charge", Robot::default()).unwrap();

        assert_eq!(itinerary.waypoints(), ["B"]);
        assert_eq!(itinerary.total_distance(), 0.0);
        assert_eq!(itinerary.total_cost(), 0.0);
    }

    #[test]
    fn test_plan_all_is_ordered_and_complete() {
        let graph = corridor();
        let simulator = RouteSimulator::new(&graph, Dijkstra, "Charge").unwrap();
        let robot = Robot::new(100.0, 10.0, 1.0);

        let plans = simulator.plan_all("Depot", &robot);
        let names: Vec<&str> = plans.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["A", "B", "C", "Charge", "D"]);
        assert!(plans.iter().all(|(_, result)| result.is_ok()));
    }
}
