use crossterm::event::KeyCode;
use tidemap_core::config::{LayoutConfig, ThemeMode};
use tidemap_core::layout::MapLayout;
use tidemap_core::model::LevelRecord;
use tidemap_core::state::{MapRenderer, Screen, ScrollLock, ViewMachine};
use tidemap_core::views::map::render_map;
use tidemap_protocol::RenderCommand;

/// Map pixels moved per arrow key press.
const SCROLL_STEP: f64 = 110.0;
/// Map pixels covered by one terminal column.
pub const PX_PER_COL: f64 = 10.0;

/// Horizontal scroll position of the map. Arrow keys do nothing while the
/// settings overlay holds the lock.
#[derive(Debug, Default)]
pub struct MapScroll {
    offset: f64,
    suspended: bool,
}

impl MapScroll {
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn scroll_by(&mut self, dx: f64, limit: f64) {
        if self.suspended {
            return;
        }
        self.offset = (self.offset + dx).clamp(0.0, limit.max(0.0));
    }

    /// Pull the offset back after the viewport grew. Applies while suspended.
    fn clamp_to(&mut self, limit: f64) {
        self.offset = self.offset.min(limit.max(0.0));
    }
}

impl ScrollLock for MapScroll {
    fn suspend(&mut self) {
        self.suspended = true;
    }

    fn restore(&mut self) {
        self.suspended = false;
    }
}

/// Render commands for the most recently entered map.
#[derive(Debug, Default)]
pub struct MapCanvas {
    pub commands: Vec<RenderCommand>,
    pub total_width: f64,
    pub track_height: f64,
}

impl MapRenderer for MapCanvas {
    fn render_map(&mut self, levels: &[LevelRecord], layout: &MapLayout) {
        self.commands = render_map(levels, layout);
        self.total_width = layout.total_width;
        self.track_height = layout.track_height;
        tracing::debug!(commands = self.commands.len(), "map canvas updated");
    }
}

pub struct App {
    machine: ViewMachine<MapScroll, MapCanvas>,
    pub theme: ThemeMode,
    viewport_px: f64,
    quit: bool,
}

impl App {
    pub fn new(levels: Vec<LevelRecord>, layout: LayoutConfig, theme: ThemeMode) -> Self {
        Self {
            machine: ViewMachine::new(levels, layout, MapScroll::default(), MapCanvas::default()),
            theme,
            viewport_px: 0.0,
            quit: false,
        }
    }

    pub fn machine(&self) -> &ViewMachine<MapScroll, MapCanvas> {
        &self.machine
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Record the width of the map area so scrolling stops with the map's
    /// right edge at the right edge of the terminal.
    pub fn set_viewport_cols(&mut self, cols: u16) {
        self.viewport_px = f64::from(cols) * PX_PER_COL;
        let limit = self.scroll_limit();
        self.machine.scroll_lock_mut().clamp_to(limit);
    }

    fn scroll_limit(&self) -> f64 {
        (self.machine.renderer().total_width - self.viewport_px).max(0.0)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('s') => self.machine.toggle_overlay(),
            KeyCode::Esc if self.machine.overlay_open() => self.machine.close_overlay(),
            _ if self.machine.overlay_open() => {}
            _ => match self.machine.screen() {
                Screen::Landing => self.handle_landing_key(code),
                Screen::Map => self.handle_map_key(code),
            },
        }
    }

    fn handle_landing_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.machine.go_to_map();
        }
    }

    fn handle_map_key(&mut self, code: KeyCode) {
        let limit = self.scroll_limit();
        match code {
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => self.machine.go_to_landing(),
            KeyCode::Left => self.scroll(-SCROLL_STEP, limit),
            KeyCode::Right => self.scroll(SCROLL_STEP, limit),
            _ => {}
        }
    }

    fn scroll(&mut self, dx: f64, limit: f64) {
        self.machine.scroll_lock_mut().scroll_by(dx, limit);
    }
}
