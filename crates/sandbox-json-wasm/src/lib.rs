//! WASM bindings for sandbox-json.
//!
//! Exposes `compact` and `get` as `#[wasm_bindgen]` functions so a JavaScript
//! host can inspect call and result messages with the same parser the sandbox
//! wrappers use, instead of the stricter `JSON.parse`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p sandbox-json-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/sandbox_json_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Parse `text` and return its compact serialization.
///
/// `printf_numbers` selects C `%g` number output instead of shortest round-trip.
/// Throws a JS error if the input does not parse.
#[wasm_bindgen]
pub fn compact(text: &str, printf_numbers: bool) -> std::result::Result<String, JsValue> {
    compact_text(text, printf_numbers).map_err(|e| JsValue::from_str(&e))
}

/// Parse `text` and return the compact value at a dotted `path`, or
/// `undefined` when nothing is there. Throws if the input does not parse.
#[wasm_bindgen]
pub fn get(text: &str, path: &str) -> std::result::Result<Option<String>, JsValue> {
    get_text(text, path).map_err(|e| JsValue::from_str(&e))
}

fn compact_text(text: &str, printf_numbers: bool) -> std::result::Result<String, String> {
    let value = sandbox_json::parse(text).map_err(|e| e.to_string())?;
    let format = if printf_numbers {
        sandbox_json::NumberFormat::Printf
    } else {
        sandbox_json::NumberFormat::Shortest
    };
    let options = sandbox_json::SerializeOptions::default().with_number_format(format);
    Ok(sandbox_json::serialize_with_options(&value, &options))
}

fn get_text(text: &str, path: &str) -> std::result::Result<Option<String>, String> {
    let value = sandbox_json::parse(text).map_err(|e| e.to_string())?;
    Ok(value.lookup(path).map(sandbox_json::serialize))
}
