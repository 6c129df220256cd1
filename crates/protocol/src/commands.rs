use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{PathSegment, Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each screen. Renderers consume
/// this list sequentially — each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a border.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
    },

    /// Draw a filled circle. `level_id` identifies the map node it belongs
    /// to (for hit-testing).
    DrawCircle {
        center: Point,
        radius: f64,
        fill: Option<ThemeToken>,
        stroke: Option<Stroke>,
        level_id: Option<u32>,
    },

    /// Stroke a path made of cubic Bézier segments starting at `start`.
    DrawPath {
        start: Point,
        segments: Vec<PathSegment>,
        stroke: Stroke,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Begin a logical group (e.g. one level node). Renderers may use this
    /// for batching, layer separation, or accessibility.
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

/// Line styling shared by paths and circle outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: ThemeToken,
    pub width: f64,
    pub opacity: f64,
    /// Dash length and gap length, if dashed.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn solid(color: ThemeToken, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some([dash, gap]);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
