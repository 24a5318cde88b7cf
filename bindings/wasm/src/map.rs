use choropleth_core::{load_regions, Choropleth, ChoroplethConfig, Feed, Region, Repaint, Surface};
use futures::executor::block_on;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::common::*;

/// One map bound to a host container. Feeds are handed over as text; the host is
/// responsible for fetching them.
#[wasm_bindgen]
pub struct WasmChoropleth {
    inner: Choropleth,
    config: ChoroplethConfig,
    /// Last successfully joined regions, kept for redraws after a resize.
    regions: Vec<Region>,
}

#[wasm_bindgen]
impl WasmChoropleth {
    /// config: optional JSON string, e.g. `{"title": "...", "geometry": {"name_property": "Name"}}`
    #[wasm_bindgen(constructor)]
    pub fn new(id: String, width: f64, height: f64, config: Option<String>) -> Result<WasmChoropleth, JsValue> {
        let config = match config.as_deref() {
            Some(json) => ChoroplethConfig::from_json_str(json).map_err(js_err)?,
            None => ChoroplethConfig::default(),
        };
        let inner = Choropleth::new(Surface::new(id, width, height), &config).map_err(js_err)?;
        Ok(WasmChoropleth { inner, config, regions: Vec::new() })
    }

    /// Load both feeds, join and draw. Returns the render report `{drawn, skipped}`.
    /// On failure the map is left empty.
    pub fn render(&mut self, geojson: String, metrics: String) -> Result<JsValue, JsValue> {
        self.inner.renderer_mut().clear();
        self.regions.clear();

        let geometry = self.config.geometry_source(Feed::from_bytes(geojson));
        let metrics = self.config.metric_source(Feed::from_bytes(metrics)).map_err(js_err)?;

        // byte feeds never wait, so the load completes in one poll
        let regions = block_on(load_regions(&geometry, &metrics)).map_err(js_err)?;
        let report = self.inner.render(&regions).map_err(js_err)?;
        self.regions = regions;

        serde_wasm_bindgen::to_value(&report).map_err(|e| e.into())
    }

    /// Record the new container size and redraw what was last rendered.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner.renderer_mut().resize(width, height);
        if !self.regions.is_empty() {
            self.inner.render(&self.regions).map_err(js_err)?;
        }
        Ok(())
    }

    /// Pointer entered a region's shape. Returns "none", "tooltip" or "highlight".
    pub fn pointer_enter(&mut self, region: &str, x: f64, y: f64) -> Result<JsValue, JsValue> {
        repaint(self.inner.renderer_mut().pointer_enter(region, x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        repaint(self.inner.renderer_mut().pointer_move(x, y))
    }

    /// Raw pointer position; the shape under it is found by hit testing.
    pub fn pointer_at(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        repaint(self.inner.renderer_mut().pointer_at(x, y))
    }

    /// Pointer left the whole container.
    pub fn pointer_leave(&mut self) -> Result<JsValue, JsValue> {
        repaint(self.inner.renderer_mut().pointer_leave())
    }

    /// Region under a container-relative point, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<String> {
        self.inner.renderer().hit_test(x, y).map(|name| name.to_string())
    }

    /// SVG text of the current drawing and tooltip.
    #[wasm_bindgen(js_name = "to_svg")]
    pub fn to_svg(&self) -> Result<String, JsValue> {
        self.inner.renderer().to_svg_string().map_err(js_err)
    }

    /// Shapes, labels and viewport of the last render, or null.
    pub fn scene(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.renderer().scene()).map_err(|e| e.into())
    }

    /// Hover state and tooltip.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.renderer().state()).map_err(|e| e.into())
    }
}

fn repaint(repaint: Repaint) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&repaint).map_err(|e| e.into())
}
