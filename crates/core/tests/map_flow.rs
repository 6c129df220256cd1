//! Integration test: load level content, drive the view machine through a
//! session, and check what the host sees.

use tidemap_core::config::{AppConfig, LayoutConfig};
use tidemap_core::content::{default_levels, parse_levels};
use tidemap_core::layout::{MapLayout, compute_layout};
use tidemap_core::model::LevelRecord;
use tidemap_core::state::{MapRenderer, Screen, ScrollLock, ViewMachine};
use tidemap_core::svg::render_map_svg;

#[derive(Default)]
struct BodyStyle {
    overflow_hidden: bool,
}

impl ScrollLock for BodyStyle {
    fn suspend(&mut self) {
        self.overflow_hidden = true;
    }

    fn restore(&mut self) {
        self.overflow_hidden = false;
    }
}

#[derive(Default)]
struct SvgSink {
    documents: Vec<String>,
}

impl MapRenderer for SvgSink {
    fn render_map(&mut self, levels: &[LevelRecord], layout: &MapLayout) {
        self.documents.push(render_map_svg(levels, layout, true));
    }
}

#[test]
fn fixture_matches_built_in_levels() {
    let levels = parse_levels(include_bytes!("fixtures/levels.json")).expect("fixture levels");
    assert_eq!(levels, default_levels());
}

#[test]
fn session_renders_map_and_locks_scroll() {
    let levels = parse_levels(include_bytes!("fixtures/levels.json")).expect("fixture levels");
    let mut machine = ViewMachine::new(
        levels,
        LayoutConfig::default(),
        BodyStyle::default(),
        SvgSink::default(),
    );

    machine.go_to_map();
    assert_eq!(machine.screen(), Screen::Map);
    assert_eq!(machine.renderer().documents.len(), 1);
    let svg = &machine.renderer().documents[0];
    assert!(svg.contains(r#"viewBox="0 0 1180 500""#));
    assert!(svg.contains("Lvl 3 Rushing River"));

    machine.toggle_overlay();
    assert!(machine.scroll_lock().overflow_hidden);
    machine.close_overlay();
    machine.close_overlay();
    assert!(!machine.scroll_lock().overflow_hidden);

    machine.go_to_landing();
    assert_eq!(machine.screen(), Screen::Landing);
    assert_eq!(machine.renderer().documents.len(), 1);
}

#[test]
fn rendering_is_byte_identical_across_runs() {
    let levels = default_levels();
    let config = LayoutConfig::default();
    let a = render_map_svg(&levels, &compute_layout(&levels, &config), false);
    let b = render_map_svg(&levels, &compute_layout(&levels, &config), false);
    assert_eq!(a, b);
}

#[test]
fn config_file_drives_layout() {
    let config = AppConfig::from_toml_str("[layout]\nnode_spacing = 100\nleading_margin = 50\n")
        .expect("valid config");
    let layout = compute_layout(&default_levels(), &config.layout);
    assert_eq!(layout.total_width, 500.0);
    assert_eq!(layout.coordinates[4].x, 450.0);
}
