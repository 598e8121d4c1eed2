//! WASM bindings for the figpress converter.
//!
//! Exposes `analyze()` and `transform()` to JavaScript via wasm-bindgen so a
//! browser page can preview a section before it is written to a theme.

use figpress_codegen::HeadingMap;
use wasm_bindgen::prelude::*;

/// List potential titles and button texts.
///
/// Returns a JS object `{ potential_titles: string[], button_texts: string[] }`.
#[wasm_bindgen]
pub fn analyze(markup: &str) -> Result<JsValue, JsError> {
    let analysis = figpress_codegen::analyze(markup);
    serde_wasm_bindgen::to_value(&analysis).map_err(|e| JsError::new(&e.to_string()))
}

/// Convert one section.
///
/// `headings` is a plain object mapping text to `"h1"`..`"h6"`, or
/// `undefined`. Returns a JS object `{ html: string, css: string }`.
#[wasm_bindgen]
pub fn transform(markup: &str, section: &str, headings: JsValue) -> Result<JsValue, JsError> {
    let headings: HeadingMap = if headings.is_undefined() || headings.is_null() {
        HeadingMap::new()
    } else {
        serde_wasm_bindgen::from_value(headings).map_err(|e| JsError::new(&e.to_string()))?
    };

    let output = figpress_codegen::compile(markup, section, &headings);

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"html".into(), &output.html.into())
        .map_err(|_| JsError::new("Failed to set html property"))?;
    js_sys::Reflect::set(&js_obj, &"css".into(), &output.css.into())
        .map_err(|_| JsError::new("Failed to set css property"))?;

    Ok(js_obj.into())
}

/// Get the converter version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
