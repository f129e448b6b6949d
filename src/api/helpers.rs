//! Shared helpers for WASM API operations
//!
//! Serialization across the boundary, error conversion, settings parsing,
//! timing and console logging used by every binding.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::LayoutError;
use crate::settings::ExportSettings;

// ============================================================================
// Console output
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(s: &str);
}

/// Browser console method a binding message goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Write one `[layout]`-prefixed line to the browser console
pub fn console_line(level: ConsoleLevel, msg: &str) {
    match level {
        ConsoleLevel::Debug => console_log(&format!("[layout] {}", msg)),
        ConsoleLevel::Info => console_info(&format!("[layout] {}", msg)),
        ConsoleLevel::Warn => console_warn(&format!("[layout] warning: {}", msg)),
        ConsoleLevel::Error => console_error(&format!("[layout] error: {}", msg)),
    }
}

/// Debug line for binding traces
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Debug, &format!($($arg)*))
    };
}

/// Summary line after a binding finished
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Warn, &format!($($arg)*))
    };
}

/// Failed binding call; every error returned to JavaScript goes through here
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::console_line($crate::api::helpers::ConsoleLevel::Error, &format!($($arg)*))
    };
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        crate::wasm_error!("{}: {}", error_context, e);
        JsValue::from_str(&format!("{}: {}", error_context, e))
    })
}

/// Deserialize an optional argument; `undefined` and `null` give the default
pub fn deserialize_or_default<T: DeserializeOwned + Default>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        deserialize(value, error_context)
    }
}

/// Serialize a value to JavaScript with automatic error handling
///
/// Maps serialize as plain objects so keyed tables read naturally on the
/// JavaScript side.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(|e| {
        crate::wasm_error!("{}: {}", error_context, e);
        JsValue::from_str(&format!("{}: {}", error_context, e))
    })
}

// ============================================================================
// Error Conversion
// ============================================================================

/// Convert a layout error into a JavaScript `Error`
pub fn layout_error(context: &str, err: LayoutError) -> JsValue {
    let msg = format!("{}: {}", context, err);
    crate::wasm_error!("{}", msg);
    js_sys::Error::new(&msg).into()
}

// ============================================================================
// Settings
// ============================================================================

/// Export settings from JavaScript, defaults when absent, grid validated
pub fn export_settings(value: JsValue) -> Result<ExportSettings, JsValue> {
    let settings: ExportSettings = deserialize_or_default(value, "Failed to deserialize settings")?;
    settings
        .validated()
        .map_err(|e| layout_error("Invalid settings", e))
}

// ============================================================================
// Timing
// ============================================================================

/// Milliseconds from the page's performance clock, if there is one
pub fn now_ms() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
}

/// Run `f` and log how long it took
pub fn timed<T>(operation: &str, f: impl FnOnce() -> T) -> T {
    let start = now_ms();
    let result = f();
    if let (Some(start), Some(end)) = (start, now_ms()) {
        crate::wasm_log!("{} took {:.2}ms", operation, end - start);
    }
    result
}
