//! Level map layout: node positions and the connector curve.
//!
//! Nodes sit on a horizontal track, `node_spacing` apart, starting
//! `leading_margin` from the left edge with the same margin mirrored on the
//! right. Each node is displaced vertically from the track centre by its
//! level's `vertical_offset`. Consecutive nodes are joined by cubic Bézier
//! segments whose control points are pulled half a spacing horizontally
//! from each end, so the curve leaves and enters every node level.

use serde::{Deserialize, Serialize};
use tidemap_protocol::{PathSegment, Point, svg_path_data};

use crate::config::LayoutConfig;
use crate::model::LevelRecord;

/// Position of one node, in map coordinates.
pub type NodeCoordinate = Point;

/// Derived geometry for a level sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLayout {
    /// One entry per level, in input order.
    pub coordinates: Vec<NodeCoordinate>,
    /// `coordinates.len() - 1` segments; segment `i` runs from node `i` to `i + 1`.
    pub path: Vec<PathSegment>,
    pub total_width: f64,
    pub track_height: f64,
}

/// Compute the map layout for `levels` in the order given.
///
/// Never fails; config values are used without validation.
pub fn compute_layout(levels: &[LevelRecord], config: &LayoutConfig) -> MapLayout {
    let spacing = config.node_spacing;
    let margin = config.leading_margin;
    let center_y = config.track_height / 2.0;

    let coordinates: Vec<NodeCoordinate> = levels
        .iter()
        .enumerate()
        .map(|(i, level)| {
            Point::new(
                margin + i as f64 * spacing,
                center_y + f64::from(level.vertical_offset),
            )
        })
        .collect();

    let path = coordinates
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            PathSegment {
                control1: Point::new(start.x + spacing * 0.5, start.y),
                control2: Point::new(end.x - spacing * 0.5, end.y),
                end,
            }
        })
        .collect();

    // N = 0 and N = 1 both collapse to the two margins.
    let gaps = levels.len().saturating_sub(1) as f64;
    let total_width = margin + gaps * spacing + margin;

    MapLayout {
        coordinates,
        path,
        total_width,
        track_height: config.track_height,
    }
}

impl MapLayout {
    pub fn start(&self) -> Option<Point> {
        self.coordinates.first().copied()
    }

    /// SVG path data: `M x y` followed by one `C` command per segment.
    /// Empty when there are no nodes.
    pub fn path_data(&self) -> String {
        self.start()
            .map(|start| svg_path_data(start, &self.path))
            .unwrap_or_default()
    }

    /// `(min_x, min_y, width, height)` of the coordinate space.
    pub fn view_box(&self) -> (f64, f64, f64, f64) {
        (0.0, 0.0, self.total_width, self.track_height)
    }
}
