// Static drawing of a graph and the itinerary travelled over it

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{Result, RouteError};
use crate::models::Itinerary;
use crate::utils::graph::WeightedGraph;

const EDGE_COLOR: RGBColor = RGBColor(190, 190, 190);
const WAYPOINT_COLOR: RGBColor = RGBColor(173, 216, 230);
const VISITED_COLOR: RGBColor = RGBColor(46, 139, 87);

/// Canvas size and whether waypoint names are drawn
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            labels: true,
        }
    }
}

/// Renders to `path`; `.png` files use the bitmap backend, anything else SVG
pub fn render_route<P: AsRef<Path>>(
    graph: &WeightedGraph,
    itinerary: &Itinerary,
    path: P,
    options: RenderOptions,
) -> Result<()> {
    let path = path.as_ref();
    let size = (options.width, options.height);
    let is_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    if is_png {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw(&root, graph, itinerary, &options)
    } else {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw(&root, graph, itinerary, &options)
    }
}

/// Renders to an in-memory SVG document
pub fn render_svg_string(
    graph: &WeightedGraph,
    itinerary: &Itinerary,
    options: RenderOptions,
) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        draw(&root, graph, itinerary, &options)?;
    }
    Ok(svg)
}

fn render_error<E: std::fmt::Display>(e: E) -> RouteError {
    RouteError::Render(e.to_string())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    graph: &WeightedGraph,
    itinerary: &Itinerary,
    options: &RenderOptions,
) -> Result<()> {
    let waypoints = graph.waypoints();
    if waypoints.is_empty() {
        return Err(RouteError::Render("graph has no waypoints".to_string()));
    }

    root.fill(&WHITE).map_err(render_error)?;

    // Pad the bounding box so markers on the border stay visible
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for w in &waypoints {
        min_x = min_x.min(w.x());
        max_x = max_x.max(w.x());
        min_y = min_y.min(w.y());
        max_y = max_y.max(w.y());
    }
    let pad = ((max_x - min_x).max(max_y - min_y) * 0.1).max(1.0);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .build_cartesian_2d((min_x - pad)..(max_x + pad), (min_y - pad)..(max_y + pad))
        .map_err(render_error)?;

    let position = |name: &str| -> Result<(f64, f64)> {
        let w = graph.waypoint(name)?;
        Ok((w.x(), w.y()))
    };

    let mut edges = Vec::new();
    for (a, b, _) in graph.edges() {
        edges.push(PathElement::new(
            vec![position(a)?, position(b)?],
            EDGE_COLOR.stroke_width(1),
        ));
    }
    chart.draw_series(edges).map_err(render_error)?;

    let mut legs = Vec::new();
    for (a, b) in itinerary.legs() {
        legs.push(PathElement::new(
            vec![position(a)?, position(b)?],
            RED.stroke_width(3),
        ));
    }
    chart.draw_series(legs).map_err(render_error)?;

    chart
        .draw_series(waypoints.iter().map(|w| {
            let color = if itinerary.visits(&w.name) {
                VISITED_COLOR
            } else {
                WAYPOINT_COLOR
            };
            Circle::new((w.x(), w.y()), 8, color.filled())
        }))
        .map_err(render_error)?;

    if options.labels {
        chart
            .draw_series(waypoints.iter().map(|w| {
                Text::new(
                    w.name.clone(),
                    (w.x(), w.y()),
                    ("sans-serif", 14).into_font(),
                )
            }))
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dijkstra::Dijkstra;
    use crate::algorithms::route_simulator::simulate;
    use crate::models::{Robot, Waypoint};

    #[test]
    fn test_svg_contains_route() {
        let graph = WeightedGraph::new(
            vec![
                Waypoint::new("Depot", 0.0, 0.0),
                Waypoint::new("A", 2.0, 3.0),
                Waypoint::new("Charge", 4.0, 3.0),
            ],
            vec![("Depot", "A"), ("A", "Charge")],
        )
        .unwrap();
        let itinerary =
            simulate(&graph, Dijkstra, "Depot", "Charge", "Charge", Robot::default()).unwrap();

        let options = RenderOptions {
            labels: false,
            ..RenderOptions::default()
        };
        let svg = render_svg_string(&graph, &itinerary, options).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("circle"));
        assert!(svg.contains("polyline"));
    }
}
