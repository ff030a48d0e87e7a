//! WASM bindings for end2end.
//!
//! Exposes key generation, public key publication and object
//! encryption/decryption to browser code. Crypto calls return Promises so the
//! JS surface matches a SubtleCrypto-based helper.

pub mod codec;
pub mod crypto;
mod error;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
