//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write;

use tidemap_protocol::{RenderCommand, Stroke, TextAlign, ThemeToken, svg_path_data};

use crate::layout::MapLayout;
use crate::model::LevelRecord;
use crate::views::map::render_map;

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );

    let bg = resolve_color(ThemeToken::Background, dark);
    let _ = write!(svg, r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#);

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="6" fill="{fill}""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let _ = write!(svg, r#" stroke="{}""#, resolve_color(*border, dark));
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                level_id,
            } => {
                let fill = fill.map_or("none", |f| resolve_color(f, dark));
                let _ = write!(
                    svg,
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}""#,
                    center.x, center.y,
                );
                if let Some(stroke) = stroke {
                    push_stroke(&mut svg, stroke, dark);
                }
                if let Some(id) = level_id {
                    let _ = write!(svg, r#" data-level="{id}""#);
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawPath {
                start,
                segments,
                stroke,
            } => {
                let _ = write!(
                    svg,
                    r#"<path d="{}" fill="none" stroke-linecap="round""#,
                    svg_path_data(*start, segments),
                );
                push_stroke(&mut svg, stroke, dark);
                svg.push_str("/>");
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                );
            }
            RenderCommand::BeginGroup { id, label } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Render the level map for `levels` as a complete SVG document sized to
/// the layout's coordinate space.
pub fn render_map_svg(levels: &[LevelRecord], layout: &MapLayout, dark: bool) -> String {
    let commands = render_map(levels, layout);
    let (_, _, width, height) = layout.view_box();
    render_svg(&commands, width, height, dark)
}

fn push_stroke(svg: &mut String, stroke: &Stroke, dark: bool) {
    let _ = write!(
        svg,
        r#" stroke="{}" stroke-width="{}""#,
        resolve_color(stroke.color, dark),
        stroke.width,
    );
    if stroke.opacity < 1.0 {
        let _ = write!(svg, r#" stroke-opacity="{}""#, stroke.opacity);
    }
    if let Some([dash, gap]) = stroke.dash {
        let _ = write!(svg, r#" stroke-dasharray="{dash} {gap}""#);
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    match token {
        ThemeToken::PathGlow => "#a855f7",
        ThemeToken::PathDash => "#d8b4fe",
        ThemeToken::NodeCurrentFill => "#f97316",
        ThemeToken::NodeCurrentBorder | ThemeToken::NodeGlyph => "#ffffff",
        ThemeToken::NodeCompletedFill => "#9333ea",
        ThemeToken::NodeCompletedBorder => "#d8b4fe",
        ThemeToken::CurrentRipple => "#f97316",
        ThemeToken::Star => "#facc15",
        ThemeToken::LabelCurrent => "#fed7aa",
        _ if dark => match token {
            ThemeToken::Background => "#1a0b2e",
            ThemeToken::NodeLockedFill => "#1f2937",
            ThemeToken::NodeLockedBorder | ThemeToken::LabelBorder => "#4b5563",
            ThemeToken::LockGlyph | ThemeToken::TextMuted => "#6b7280",
            ThemeToken::LabelBackground | ThemeToken::OverlaySurface => "#111827",
            ThemeToken::OverlayScrim => "#000000",
            _ => "#ffffff",
        },
        _ => match token {
            ThemeToken::Background => "#faf5ff",
            ThemeToken::NodeLockedFill => "#e5e7eb",
            ThemeToken::NodeLockedBorder | ThemeToken::LabelBorder => "#9ca3af",
            ThemeToken::LockGlyph | ThemeToken::TextMuted => "#6b7280",
            ThemeToken::LabelBackground | ThemeToken::OverlaySurface => "#ffffff",
            ThemeToken::OverlayScrim => "#6b7280",
            _ => "#1a0b2e",
        },
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::content::default_levels;
    use crate::layout::compute_layout;
    use crate::model::LevelStatus;

    #[test]
    fn map_svg_uses_layout_view_box() {
        let levels = default_levels();
        let layout = compute_layout(&levels, &LayoutConfig::default());
        let svg = render_map_svg(&levels, &layout, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 1180 500""#));
    }

    #[test]
    fn map_svg_path_matches_layout_path_data() {
        let levels = default_levels();
        let layout = compute_layout(&levels, &LayoutConfig::default());
        let svg = render_map_svg(&levels, &layout, true);
        assert!(svg.contains(&format!(r#"d="{}""#, layout.path_data())));
        assert!(svg.contains(r#"stroke-dasharray="12 8""#));
        assert!(svg.contains(r##"stroke="#a855f7""##));
    }

    #[test]
    fn nodes_are_tagged_with_level_ids() {
        let levels = default_levels();
        let layout = compute_layout(&levels, &LayoutConfig::default());
        let svg = render_map_svg(&levels, &layout, false);
        for id in 1..=5 {
            assert!(svg.contains(&format!(r#"data-level="{id}""#)));
        }
        assert!(svg.contains(r##"cx="590" cy="310""##));
    }

    #[test]
    fn escapes_xml_entities() {
        let levels = vec![LevelRecord::new(1, "Salt & <Brine>", LevelStatus::Current, 0)];
        let layout = compute_layout(&levels, &LayoutConfig::default());
        let svg = render_map_svg(&levels, &layout, false);
        assert!(svg.contains("Salt &amp; &lt;Brine&gt;"));
        assert!(!svg.contains("<Brine>"));
    }
}
