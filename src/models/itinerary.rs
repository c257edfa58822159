// Itinerary model describing one completed simulation run

use serde::Serialize;

use crate::models::{Charge, Cost, Distance, WaypointId};
use crate::utils::distance::{round2, travel_cost};

/// One step taken by the robot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteEvent {
    /// An edge of the base route was committed
    Travel {
        from: WaypointId,
        to: WaypointId,
        distance: Distance,
        energy: Charge,
        battery_after: Charge,
    },

    /// A detour to the recharge waypoint, ending with a full battery
    Recharge {
        path: Vec<WaypointId>,
        distance: Distance,
        battery_after: Charge,
    },
}

/// Ordered list of visited waypoints with aggregate distance and cost
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    waypoints: Vec<WaypointId>,
    total_distance: Distance,
    total_cost: Cost,
    events: Vec<RouteEvent>,
}

impl Itinerary {
    /// Sequence of visited waypoints, starting at the start waypoint
    pub fn waypoints(&self) -> &[WaypointId] {
        &self.waypoints
    }

    /// Total travelled distance, rounded to 2 decimals
    pub fn total_distance(&self) -> Distance {
        self.total_distance
    }

    pub fn total_cost(&self) -> Cost {
        self.total_cost
    }

    pub fn events(&self) -> &[RouteEvent] {
        &self.events
    }

    /// Consecutive waypoint pairs of the itinerary
    pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.waypoints
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    pub fn recharge_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, RouteEvent::Recharge { .. }))
            .count()
    }

    pub fn visits(&self, waypoint: &str) -> bool {
        self.waypoints.iter().any(|w| w == waypoint)
    }
}

/// Incremental itinerary construction used while a simulation runs
#[derive(Debug)]
pub(crate) struct ItineraryBuilder {
    waypoints: Vec<WaypointId>,
    distance: Distance,
    events: Vec<RouteEvent>,
}

impl ItineraryBuilder {
    pub(crate) fn starting_at(start: &str) -> Self {
        Self {
            waypoints: vec![start.to_string()],
            distance: 0.0,
            events: Vec::new(),
        }
    }

    pub(crate) fn visits(&self, waypoint: &str) -> bool {
        self.waypoints.iter().any(|w| w == waypoint)
    }

    pub(crate) fn record_travel(
        &mut self,
        from: &str,
        to: &str,
        distance: Distance,
        energy: Charge,
        battery_after: Charge,
    ) {
        self.distance += distance;
        self.waypoints.push(to.to_string());
        self.events.push(RouteEvent::Travel {
            from: from.to_string(),
            to: to.to_string(),
            distance,
            energy,
            battery_after,
        });
    }

    /// Appends a detour; `path[0]` is the current position and is not repeated
    pub(crate) fn record_recharge(
        &mut self,
        path: Vec<WaypointId>,
        distance: Distance,
        battery_after: Charge,
    ) {
        self.distance += distance;
        self.waypoints.extend(path.iter().skip(1).cloned());
        self.events.push(RouteEvent::Recharge {
            path,
            distance,
            battery_after,
        });
    }

    pub(crate) fn finish(self, tariff: Cost) -> Itinerary {
        let total_distance = round2(self.distance);
        Itinerary {
            waypoints: self.waypoints,
            total_distance,
            total_cost: travel_cost(total_distance, tariff),
            events: self.events,
        }
    }
}
