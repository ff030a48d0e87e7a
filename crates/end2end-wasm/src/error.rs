//! Conversions at the JS boundary: crypto and codec failures become string
//! rejections, JWKs and decrypted objects become plain JS objects.

use serde::Serialize;
use wasm_bindgen::JsValue;

/// Reject with the error's message, e.g. `"Decryption failed: ..."`.
pub fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize a Rust value to a plain JS value.
///
/// Maps become plain objects rather than `Map`, so JWK members and decrypted
/// objects are reachable with property access.
pub fn to_js_value(value: &impl Serialize) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(to_js_error)
}
