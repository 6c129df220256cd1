use tidemap_protocol::{Point, Rect, RenderCommand, SharedStr, Stroke, TextAlign, ThemeToken};

use crate::layout::MapLayout;
use crate::model::{LevelRecord, LevelStatus};

pub const NODE_RADIUS: f64 = 48.0;
const CURRENT_SCALE: f64 = 1.1;
const NODE_BORDER: f64 = 4.0;
const GLYPH_SIZE: f64 = 32.0;
const STAR_SIZE: f64 = 14.0;
const STAR_SPREAD: f64 = 16.0;
const LABEL_OFFSET_Y: f64 = 64.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const LABEL_HEIGHT: f64 = 24.0;
/// Rough glyph advance for sizing the label backdrop.
const LABEL_CHAR_WIDTH: f64 = 7.0;

/// Fill, border, and glyph for a node in the given status.
fn node_style(status: LevelStatus) -> (ThemeToken, ThemeToken, &'static str, ThemeToken) {
    match status {
        LevelStatus::Locked => (
            ThemeToken::NodeLockedFill,
            ThemeToken::NodeLockedBorder,
            "🔒",
            ThemeToken::LockGlyph,
        ),
        LevelStatus::Current => (
            ThemeToken::NodeCurrentFill,
            ThemeToken::NodeCurrentBorder,
            "▶",
            ThemeToken::NodeGlyph,
        ),
        LevelStatus::Completed => (
            ThemeToken::NodeCompletedFill,
            ThemeToken::NodeCompletedBorder,
            "✓",
            ThemeToken::Star,
        ),
    }
}

/// Render the level map: the connector path underneath, then one node group
/// per level in input order.
///
/// `levels` and `layout` must come from the same `compute_layout` call; extra
/// entries on either side are ignored.
pub fn render_map(levels: &[LevelRecord], layout: &MapLayout) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(4 + levels.len() * 8);

    commands.push(RenderCommand::BeginGroup {
        id: "map".into(),
        label: Some("Level map".into()),
    });

    if let Some(start) = layout.start()
        && !layout.path.is_empty()
    {
        commands.push(RenderCommand::DrawPath {
            start,
            segments: layout.path.clone(),
            stroke: Stroke::solid(ThemeToken::PathGlow, 12.0).with_opacity(0.1),
        });
        commands.push(RenderCommand::DrawPath {
            start,
            segments: layout.path.clone(),
            stroke: Stroke::solid(ThemeToken::PathDash, 4.0)
                .with_opacity(0.4)
                .dashed(12.0, 8.0),
        });
    }

    for (level, &center) in levels.iter().zip(&layout.coordinates) {
        render_node(&mut commands, level, center);
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

fn render_node(commands: &mut Vec<RenderCommand>, level: &LevelRecord, center: Point) {
    let (fill, border, glyph, glyph_color) = node_style(level.status);
    let radius = if level.is_current() {
        NODE_RADIUS * CURRENT_SCALE
    } else {
        NODE_RADIUS
    };

    commands.push(RenderCommand::BeginGroup {
        id: SharedStr::from(format!("level-{}", level.id)),
        label: Some(level.title.clone()),
    });

    commands.push(RenderCommand::DrawCircle {
        center,
        radius,
        fill: Some(fill),
        stroke: Some(Stroke::solid(border, NODE_BORDER)),
        level_id: Some(level.id),
    });

    if level.is_current() {
        commands.push(RenderCommand::DrawCircle {
            center,
            radius,
            fill: None,
            stroke: Some(Stroke::solid(ThemeToken::CurrentRipple, 2.0).with_opacity(0.75)),
            level_id: None,
        });
    }

    commands.push(RenderCommand::DrawText {
        position: Point::new(center.x, center.y + GLYPH_SIZE * 0.35),
        text: glyph.into(),
        color: glyph_color,
        font_size: GLYPH_SIZE,
        align: TextAlign::Center,
    });

    if level.is_completed() {
        let star_y = center.y - radius - 4.0;
        for (dx, lift) in [(-STAR_SPREAD, 0.0), (0.0, 4.0), (STAR_SPREAD, 0.0)] {
            commands.push(RenderCommand::DrawText {
                position: Point::new(center.x + dx, star_y - lift),
                text: "★".into(),
                color: ThemeToken::Star,
                font_size: STAR_SIZE,
                align: TextAlign::Center,
            });
        }
    }

    let text = SharedStr::from(format!("{} {}", level.label(), level.title));
    let label_pos = Point::new(center.x, center.y + LABEL_OFFSET_Y);
    if level.is_current() {
        let width = text.chars().count() as f64 * LABEL_CHAR_WIDTH + 24.0;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::centered(label_pos, width, LABEL_HEIGHT),
            color: ThemeToken::LabelBackground,
            border_color: Some(ThemeToken::LabelBorder),
        });
    }
    commands.push(RenderCommand::DrawText {
        position: Point::new(label_pos.x, label_pos.y + LABEL_FONT_SIZE * 0.35),
        text,
        color: if level.is_current() {
            ThemeToken::LabelCurrent
        } else {
            ThemeToken::LabelText
        },
        font_size: LABEL_FONT_SIZE,
        align: TextAlign::Center,
    });

    commands.push(RenderCommand::EndGroup);
}
