use wasm_bindgen::prelude::*;

mod common;
mod map;

pub use map::WasmChoropleth;

/// Called automatically when the WASM module is instantiated.
/// Sets up panic hook so Rust panics appear as console.error in the browser,
/// and routes `log` records to the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    common::init_console_logger();
}

/// Change console log verbosity: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen(js_name = "set_log_level")]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level.parse::<log::LevelFilter>()
        .map_err(|_| JsValue::from_str(&format!("unknown log level {level:?}")))?;
    log::set_max_level(filter);
    Ok(())
}
