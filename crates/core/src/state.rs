//! Screen and overlay state, and the transitions that drive the host.
//!
//! The machine owns the state exclusively; hosts observe it through shared
//! references and react through two capabilities they implement:
//! [`ScrollLock`] for suspending background scrolling while the overlay is
//! open, and [`MapRenderer`] for drawing the map whenever it is entered.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::layout::{MapLayout, compute_layout};
use crate::model::LevelRecord;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Landing,
    Map,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Map => "map",
        }
    }
}

/// The pair is always read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub screen: Screen,
    pub overlay_open: bool,
}

/// Host capability to suspend and restore background scrolling.
pub trait ScrollLock {
    fn suspend(&mut self);
    fn restore(&mut self);
}

/// Host capability that draws the level map.
pub trait MapRenderer {
    fn render_map(&mut self, levels: &[LevelRecord], layout: &MapLayout);
}

pub struct ViewMachine<S, R> {
    state: ViewState,
    levels: Vec<LevelRecord>,
    config: LayoutConfig,
    scroll_lock: S,
    renderer: R,
}

impl<S: ScrollLock, R: MapRenderer> ViewMachine<S, R> {
    /// Starts on the landing screen with the overlay closed.
    pub fn new(
        levels: Vec<LevelRecord>,
        config: LayoutConfig,
        scroll_lock: S,
        renderer: R,
    ) -> Self {
        Self {
            state: ViewState::default(),
            levels,
            config,
            scroll_lock,
            renderer,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn overlay_open(&self) -> bool {
        self.state.overlay_open
    }

    pub fn levels(&self) -> &[LevelRecord] {
        &self.levels
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn scroll_lock(&self) -> &S {
        &self.scroll_lock
    }

    /// Hosts may drive their own scroll capability (e.g. move a viewport);
    /// the view state itself stays reachable only through transitions.
    pub fn scroll_lock_mut(&mut self) -> &mut S {
        &mut self.scroll_lock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Switch to the map and render it. Re-renders when already on the map.
    pub fn go_to_map(&mut self) {
        tracing::debug!(from = self.state.screen.as_str(), "go_to_map");
        self.state.screen = Screen::Map;
        self.render();
    }

    pub fn go_to_landing(&mut self) {
        tracing::debug!(from = self.state.screen.as_str(), "go_to_landing");
        self.state.screen = Screen::Landing;
    }

    pub fn toggle_overlay(&mut self) {
        self.state.overlay_open = !self.state.overlay_open;
        tracing::debug!(open = self.state.overlay_open, "toggle_overlay");
        if self.state.overlay_open {
            self.scroll_lock.suspend();
        } else {
            self.scroll_lock.restore();
        }
    }

    /// Close the overlay if open. Calling it again does nothing.
    pub fn close_overlay(&mut self) {
        if !self.state.overlay_open {
            return;
        }
        tracing::debug!("close_overlay");
        self.state.overlay_open = false;
        self.scroll_lock.restore();
    }

    /// Replace the layout configuration, re-rendering if the map is showing.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        if self.state.screen == Screen::Map {
            self.render();
        }
    }

    fn render(&mut self) {
        let layout = compute_layout(&self.levels, &self.config);
        tracing::debug!(
            nodes = layout.coordinates.len(),
            width = layout.total_width,
            "rendering map"
        );
        self.renderer.render_map(&self.levels, &layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_levels;

    #[derive(Default)]
    struct Scroll {
        suspended: bool,
        calls: Vec<&'static str>,
    }

    impl ScrollLock for Scroll {
        fn suspend(&mut self) {
            self.suspended = true;
            self.calls.push("suspend");
        }

        fn restore(&mut self) {
            self.suspended = false;
            self.calls.push("restore");
        }
    }

    #[derive(Default)]
    struct Renders(Vec<MapLayout>);

    impl MapRenderer for Renders {
        fn render_map(&mut self, _levels: &[LevelRecord], layout: &MapLayout) {
            self.0.push(layout.clone());
        }
    }

    fn machine() -> ViewMachine<Scroll, Renders> {
        ViewMachine::new(
            default_levels(),
            LayoutConfig::default(),
            Scroll::default(),
            Renders::default(),
        )
    }

    #[test]
    fn starts_on_landing_closed() {
        let m = machine();
        assert_eq!(m.state(), ViewState { screen: Screen::Landing, overlay_open: false });
        assert!(m.renderer().0.is_empty());
    }

    #[test]
    fn entering_map_renders_layout() {
        let mut m = machine();
        m.go_to_map();
        assert_eq!(m.screen(), Screen::Map);
        assert_eq!(m.renderer().0.len(), 1);
        assert_eq!(m.renderer().0[0].total_width, 1180.0);

        m.go_to_map();
        assert_eq!(m.renderer().0.len(), 2);
    }

    #[test]
    fn landing_keeps_overlay() {
        let mut m = machine();
        m.toggle_overlay();
        m.go_to_map();
        m.go_to_landing();
        assert_eq!(m.state(), ViewState { screen: Screen::Landing, overlay_open: true });
    }

    #[test]
    fn toggle_twice_restores_scroll() {
        let mut m = machine();
        m.toggle_overlay();
        assert!(m.overlay_open());
        assert!(m.scroll_lock().suspended);
        m.toggle_overlay();
        assert!(!m.overlay_open());
        assert!(!m.scroll_lock().suspended);
        assert_eq!(m.scroll_lock().calls, vec!["suspend", "restore"]);
    }

    #[test]
    fn close_overlay_is_idempotent() {
        let mut m = machine();
        m.toggle_overlay();
        m.close_overlay();
        let once = (m.state(), m.scroll_lock().calls.clone());
        m.close_overlay();
        assert_eq!((m.state(), m.scroll_lock().calls.clone()), once);
        assert!(!m.scroll_lock().suspended);
    }

    #[test]
    fn close_when_closed_does_not_touch_scroll() {
        let mut m = machine();
        m.close_overlay();
        assert!(m.scroll_lock().calls.is_empty());
    }

    #[test]
    fn map_and_overlay_commute() {
        let mut a = machine();
        a.go_to_map();
        a.toggle_overlay();

        let mut b = machine();
        b.toggle_overlay();
        b.go_to_map();

        let expected = ViewState { screen: Screen::Map, overlay_open: true };
        assert_eq!(a.state(), expected);
        assert_eq!(b.state(), expected);
    }

    #[test]
    fn set_config_rerenders_only_on_map() {
        let mut m = machine();
        let wide = LayoutConfig {
            node_spacing: 300.0,
            ..LayoutConfig::default()
        };
        m.set_config(wide);
        assert!(m.renderer().0.is_empty());
        m.go_to_map();
        m.set_config(LayoutConfig::default());
        let widths: Vec<f64> = m.renderer().0.iter().map(|l| l.total_width).collect();
        assert_eq!(widths, vec![1500.0, 1180.0]);
    }

    #[test]
    fn state_serializes_for_hosts() {
        let json = serde_json::to_string(&ViewState { screen: Screen::Map, overlay_open: true })
            .expect("serialize");
        assert_eq!(json, r#"{"screen":"map","overlayOpen":true}"#);
    }
}
