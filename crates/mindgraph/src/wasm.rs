//! WebAssembly bindings for Mindgraph
//!
//! Browser-facing wrappers around the persistence boundary. Documents cross
//! the boundary as JSON strings; every function validates its input the same
//! way `deserialize` does and reports failures as JavaScript errors.

use wasm_bindgen::prelude::*;

use crate::core::resolve;
use crate::plugins::mindmap::{deserialize, serialize, to_mermaid};

fn to_js(err: crate::core::DiagramError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", err.kind(), err))
}

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Validate a document and return it in canonical compact form
#[wasm_bindgen]
pub fn normalize_document(input: &str) -> Result<String, JsValue> {
    let document = deserialize(input).map_err(to_js)?;
    serialize(&document).map_err(to_js)
}

/// Change a document's theme and return the updated document
#[wasm_bindgen]
pub fn set_document_theme(input: &str, theme: &str) -> Result<String, JsValue> {
    let mut document = deserialize(input).map_err(to_js)?;
    document.set_theme(theme).map_err(to_js)?;
    serialize(&document).map_err(to_js)
}

/// Resolve a theme name to its palette as JSON
#[wasm_bindgen]
pub fn theme_palette(theme: &str) -> Result<String, JsValue> {
    let palette = resolve(theme).map_err(to_js)?;
    serde_json::to_string(palette).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Effective color of every node, as a JSON object keyed by node id
#[wasm_bindgen]
pub fn effective_colors(input: &str) -> Result<String, JsValue> {
    let document = deserialize(input).map_err(to_js)?;
    let colors: serde_json::Map<String, serde_json::Value> = document
        .styled_nodes()
        .into_iter()
        .map(|styled| {
            (
                styled.node.id.to_string(),
                serde_json::Value::String(styled.effective_color),
            )
        })
        .collect();
    Ok(serde_json::Value::Object(colors).to_string())
}

/// Export a document as Mermaid flowchart text
#[wasm_bindgen]
pub fn export_mermaid(input: &str) -> Result<String, JsValue> {
    let document = deserialize(input).map_err(to_js)?;
    Ok(to_mermaid(&document))
}
