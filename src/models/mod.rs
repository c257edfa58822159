// Models module - exports all model types

mod itinerary;
mod robot;
mod waypoint;

// Re-export model types
pub use self::itinerary::{Itinerary, RouteEvent};
pub(crate) use self::itinerary::ItineraryBuilder;
pub use self::robot::{Robot, LOW_BATTERY_THRESHOLD};
pub use self::waypoint::Waypoint;

// Common type aliases for improved code readability
pub type WaypointId = String;
pub type Distance = f64;
pub type Cost = f64;
/// Battery charge, in percent of a full pack.
pub type Charge = f64;
