use std::fmt::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w` x `h` centred on `center`.
    pub fn centered(center: Point, w: f64, h: f64) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }
}

/// One cubic Bézier segment of a path. The start point is the previous
/// segment's `end` (or the path's start for the first segment).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl PathSegment {
    /// Evaluate the segment at `t` in `[0, 1]`, starting from `start`.
    pub fn point_at(&self, start: Point, t: f64) -> Point {
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Point::new(
            a * start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }
}

/// SVG path data for a run of segments: `M x y` followed by one
/// `C c1x c1y, c2x c2y, ex ey` per segment.
pub fn svg_path_data(start: Point, segments: &[PathSegment]) -> String {
    let mut d = String::with_capacity(16 + segments.len() * 48);
    let _ = write!(d, "M {} {}", start.x, start.y);
    for seg in segments {
        let _ = write!(
            d,
            " C {} {}, {} {}, {} {}",
            seg.control1.x, seg.control1.y, seg.control2.x, seg.control2.y, seg.end.x, seg.end.y,
        );
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_endpoints() {
        let seg = PathSegment {
            control1: Point::new(50.0, 0.0),
            control2: Point::new(50.0, 100.0),
            end: Point::new(100.0, 100.0),
        };
        let start = Point::new(0.0, 0.0);
        assert_eq!(seg.point_at(start, 0.0), start);
        assert_eq!(seg.point_at(start, 1.0), seg.end);
    }

    #[test]
    fn segment_midpoint_of_symmetric_curve() {
        let seg = PathSegment {
            control1: Point::new(50.0, 0.0),
            control2: Point::new(50.0, 100.0),
            end: Point::new(100.0, 100.0),
        };
        let mid = seg.point_at(Point::new(0.0, 0.0), 0.5);
        assert!((mid.x - 50.0).abs() < 1e-9);
        assert!((mid.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn path_data_prints_shortest_numbers() {
        let seg = PathSegment {
            control1: Point::new(200.5, 250.0),
            control2: Point::new(200.5, 250.0),
            end: Point::new(251.0, 250.0),
        };
        assert_eq!(
            svg_path_data(Point::new(150.0, 250.0), &[seg]),
            "M 150 250 C 200.5 250, 200.5 250, 251 250"
        );
        assert_eq!(svg_path_data(Point::new(1.0, 2.0), &[]), "M 1 2");
    }

    #[test]
    fn centered_rect() {
        let r = Rect::centered(Point::new(10.0, 10.0), 4.0, 2.0);
        assert_eq!(r, Rect::new(8.0, 9.0, 4.0, 2.0));
    }
}
