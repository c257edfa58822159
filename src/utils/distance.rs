// Distance and cost calculation utilities

use geo::{EuclideanDistance, Point};

use crate::models::{Cost, Distance};

/// Round to 2 decimal places, the precision of every edge weight
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Euclidean distance between two points, rounded to 2 decimals
pub fn euclidean_distance(p1: &Point<f64>, p2: &Point<f64>) -> Distance {
    round2(p1.euclidean_distance(p2))
}

/// Monetary cost of travelling `total_distance` at `tariff` per distance unit
pub fn travel_cost(total_distance: Distance, tariff: Cost) -> Cost {
    total_distance * tariff
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);

        assert_eq!(euclidean_distance(&p1, &p2), 5.0);
    }

    #[test]
    fn test_euclidean_distance_is_rounded() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(2.0, 3.0);

        // sqrt(13) = 3.6055...
        assert_eq!(euclidean_distance(&p1, &p2), 3.61);
    }

    #[test]
    fn test_travel_cost() {
        assert_eq!(travel_cost(10.0, 0.5), 5.0);
        assert_eq!(travel_cost(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(5.6099999), 5.61);
        assert_eq!(round2(2.234), 2.23);
    }
}
