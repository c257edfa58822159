// Robot model holding the energy state of the travelling agent

use crate::models::{Charge, Cost, Distance};

/// Remaining charge at or below which the robot diverts to recharge
pub const LOW_BATTERY_THRESHOLD: Charge = 10.0;

/// Battery-powered agent that travels the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    /// Current charge, in percent
    battery: Charge,

    /// Charge after a recharge
    pub capacity: Charge,

    /// Battery percent consumed per distance unit
    pub consumption_per_km: f64,

    /// Money charged per distance unit
    pub tariff: Cost,

    /// Remaining charge that triggers a reroute
    pub low_battery_threshold: Charge,
}

impl Robot {
    /// Creates a fully charged robot
    pub fn new(capacity: Charge, consumption_per_km: f64, tariff: Cost) -> Self {
        Self {
            battery: capacity,
            capacity,
            consumption_per_km,
            tariff,
            low_battery_threshold: LOW_BATTERY_THRESHOLD,
        }
    }

    /// Starts the robot with a partially charged battery
    pub fn with_battery(mut self, battery: Charge) -> Self {
        self.battery = battery;
        self
    }

    pub fn with_low_battery_threshold(mut self, threshold: Charge) -> Self {
        self.low_battery_threshold = threshold;
        self
    }

    pub fn battery(&self) -> Charge {
        self.battery
    }

    /// Energy needed to travel `distance`
    pub fn energy_for(&self, distance: Distance) -> Charge {
        distance * self.consumption_per_km
    }

    /// True when spending `energy` would leave the battery at or under the threshold
    pub fn would_run_low(&self, energy: Charge) -> bool {
        self.battery - energy <= self.low_battery_threshold
    }

    /// True when spending `energy` would leave the battery below zero
    pub fn would_deplete(&self, energy: Charge) -> bool {
        self.battery - energy < 0.0
    }

    pub(crate) fn drain(&mut self, energy: Charge) {
        self.battery -= energy;
    }

    pub(crate) fn recharge(&mut self) {
        self.battery = self.capacity;
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::new(100.0, 15.0, 0.5)
    }
}
