//! WASM bindings for the base64 codec.

use crate::error::to_js_error;
use end2end::base64::{decode, encode};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = "base64Encode")]
pub fn wasm_base64_encode(data: &[u8]) -> String {
    encode(data)
}

#[wasm_bindgen(js_name = "base64Decode")]
pub fn wasm_base64_decode(encoded: &str) -> Result<Vec<u8>, JsValue> {
    decode(encoded).map_err(to_js_error)
}
