use serde::Serialize;
use tidemap_core::config::LayoutConfig;
use tidemap_core::content::{default_levels, parse_levels};
use tidemap_core::layout::{MapLayout, compute_layout};
use tidemap_core::model::LevelRecord;
use tidemap_core::state::{MapRenderer, ScrollLock, ViewMachine};
use tidemap_core::svg;
use wasm_bindgen::prelude::*;

/// Layout plus the ready-to-use SVG path string, as handed to JS.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutPayload {
    #[serde(flatten)]
    layout: MapLayout,
    path_data: String,
}

fn levels_from_json(levels_json: &str) -> Result<Vec<LevelRecord>, JsError> {
    parse_levels(levels_json.as_bytes()).map_err(|e| JsError::new(&e.to_string()))
}

fn config_from_json(config_json: &str) -> Result<LayoutConfig, JsError> {
    if config_json.trim().is_empty() {
        return Ok(LayoutConfig::default());
    }
    serde_json::from_str(config_json).map_err(|e| JsError::new(&e.to_string()))
}

fn layout_payload(levels: &[LevelRecord], config: &LayoutConfig) -> LayoutPayload {
    let layout = compute_layout(levels, config);
    let path_data = layout.path_data();
    LayoutPayload { layout, path_data }
}

/// Compute node coordinates and the connector path, returned as JSON.
/// An empty `config_json` uses the default geometry.
#[wasm_bindgen(js_name = computeLayout)]
pub fn compute_layout_json(levels_json: &str, config_json: &str) -> Result<String, JsError> {
    let levels = levels_from_json(levels_json)?;
    let config = config_from_json(config_json)?;
    serde_json::to_string(&layout_payload(&levels, &config))
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Render the level map as a standalone SVG document.
#[wasm_bindgen(js_name = renderMapSvg)]
pub fn render_map_svg(levels_json: &str, config_json: &str, dark: bool) -> Result<String, JsError> {
    let levels = levels_from_json(levels_json)?;
    let config = config_from_json(config_json)?;
    let layout = compute_layout(&levels, &config);
    Ok(svg::render_map_svg(&levels, &layout, dark))
}

/// The built-in level sequence as JSON.
#[wasm_bindgen(js_name = defaultLevels)]
pub fn default_levels_json() -> Result<String, JsError> {
    serde_json::to_string(&default_levels()).map_err(|e| JsError::new(&e.to_string()))
}

/// Suspends page scrolling by hiding overflow on `document.body`.
pub struct BodyScrollLock;

impl BodyScrollLock {
    fn set_overflow(value: &str) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            web_sys::console::warn_1(&"tidemap: no document body for scroll lock".into());
            return;
        };
        if let Err(e) = body.style().set_property("overflow", value) {
            web_sys::console::error_1(&e);
        }
    }
}

impl ScrollLock for BodyScrollLock {
    fn suspend(&mut self) {
        Self::set_overflow("hidden");
    }

    fn restore(&mut self) {
        Self::set_overflow("");
    }
}

/// Writes the rendered map SVG into a DOM element.
pub struct ElementMapRenderer {
    target_id: String,
    dark: bool,
}

impl MapRenderer for ElementMapRenderer {
    fn render_map(&mut self, levels: &[LevelRecord], layout: &MapLayout) {
        let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&self.target_id))
        else {
            web_sys::console::warn_1(
                &format!("tidemap: no element with id '{}'", self.target_id).into(),
            );
            return;
        };
        element.set_inner_html(&svg::render_map_svg(levels, layout, self.dark));
    }
}

/// Landing/map screen and settings overlay state for the browser shell.
#[wasm_bindgen]
pub struct MapShell {
    machine: ViewMachine<BodyScrollLock, ElementMapRenderer>,
}

#[wasm_bindgen]
impl MapShell {
    /// `levels_json` defaults to the built-in levels when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(
        target_id: &str,
        levels_json: Option<String>,
        dark: bool,
    ) -> Result<MapShell, JsError> {
        let levels = match levels_json {
            Some(json) => levels_from_json(&json)?,
            None => default_levels(),
        };
        let renderer = ElementMapRenderer {
            target_id: target_id.to_string(),
            dark,
        };
        Ok(MapShell {
            machine: ViewMachine::new(levels, LayoutConfig::default(), BodyScrollLock, renderer),
        })
    }

    #[wasm_bindgen(js_name = goToMap)]
    pub fn go_to_map(&mut self) {
        self.machine.go_to_map();
    }

    #[wasm_bindgen(js_name = goToLanding)]
    pub fn go_to_landing(&mut self) {
        self.machine.go_to_landing();
    }

    #[wasm_bindgen(js_name = toggleOverlay)]
    pub fn toggle_overlay(&mut self) {
        self.machine.toggle_overlay();
    }

    #[wasm_bindgen(js_name = closeOverlay)]
    pub fn close_overlay(&mut self) {
        self.machine.close_overlay();
    }

    /// Replace the layout geometry from JSON; re-renders if the map is showing.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config_json: &str) -> Result<(), JsError> {
        let config = config_from_json(config_json)?;
        self.machine.set_config(config);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn screen(&self) -> String {
        self.machine.screen().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = overlayOpen)]
    pub fn overlay_open(&self) -> bool {
        self.machine.overlay_open()
    }
}
