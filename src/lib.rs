// Public modules
pub mod algorithms;
pub mod error;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use algorithms::dijkstra::Dijkstra;
pub use algorithms::route_simulator::{simulate, RouteSimulator};
pub use algorithms::{PathFinder, ShortestPath};
pub use error::{Result, RouteError};
pub use models::{Itinerary, Robot, RouteEvent, Waypoint};
pub use utils::graph::WeightedGraph;
pub use utils::init_map::{default_scenario, load_scenario, ScenarioConfig};
