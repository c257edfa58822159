// Waypoint model representing a named location in 2D space

use geo::{EuclideanDistance, Point};

use crate::models::Distance;

/// A named location with fixed (x, y) coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Unique identifier of the waypoint
    pub name: String,

    /// Position of the waypoint
    pub position: Point<f64>,
}

impl Waypoint {
    /// Creates a new waypoint with the given name and coordinates
    pub fn new<S: Into<String>>(name: S, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            position: Point::new(x, y),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x()
    }

    pub fn y(&self) -> f64 {
        self.position.y()
    }

    /// Unrounded straight-line distance to another waypoint
    pub fn distance_to(&self, other: &Waypoint) -> Distance {
        self.position.euclidean_distance(&other.position)
    }
}
