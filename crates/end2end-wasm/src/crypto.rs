//! WASM bindings for key management and object envelopes.
//!
//! Keys cross the boundary as plain JWK objects, so callers can persist them
//! with structured clone or JSON without extra glue.

use crate::error::{to_js_error, to_js_value};
use end2end::{
    compute_jwk_thumbprint, decrypt_object, encrypt_object, export_private_key_jwk,
    export_public_key_jwk, import_private_key_jwk, import_public_key_jwk, CryptoProvider,
    OaepPrivateKey, OaepPublicKey, RsaOaepProvider, RsaPrivateJwk, RsaPublicJwk,
};
use serde_json::Value;
use wasm_bindgen::prelude::*;

fn public_key_from_js(jwk: JsValue) -> Result<OaepPublicKey, JsValue> {
    let jwk: RsaPublicJwk = serde_wasm_bindgen::from_value(jwk).map_err(to_js_error)?;
    let (key, hash) = import_public_key_jwk(&jwk).map_err(to_js_error)?;
    Ok(OaepPublicKey { key, hash })
}

fn private_key_from_js(jwk: JsValue) -> Result<OaepPrivateKey, JsValue> {
    let jwk: RsaPrivateJwk = serde_wasm_bindgen::from_value(jwk).map_err(to_js_error)?;
    let (key, hash) = import_private_key_jwk(&jwk).map_err(to_js_error)?;
    Ok(OaepPrivateKey { key, hash })
}

/// Whether the host exposes `crypto.getRandomValues`, which key generation
/// and OAEP encryption draw on.
#[wasm_bindgen(js_name = "isAvailable")]
pub fn wasm_is_available() -> bool {
    let global = js_sys::global();
    let Ok(crypto) = js_sys::Reflect::get(&global, &"crypto".into()) else {
        return false;
    };
    if crypto.is_undefined() || crypto.is_null() {
        return false;
    }
    js_sys::Reflect::get(&crypto, &"getRandomValues".into())
        .map(|f| f.is_function())
        .unwrap_or(false)
}

/// Generate an RSA-OAEP (2048-bit, SHA-256) keypair.
///
/// Resolves to `{ publicKey, privateKey }`, both JWK objects.
#[wasm_bindgen(js_name = "generateKeys")]
pub async fn wasm_generate_keys() -> Result<JsValue, JsValue> {
    let (public_key, private_key) = RsaOaepProvider::default()
        .generate_keys()
        .await
        .map_err(to_js_error)?;

    let public_jwk = export_public_key_jwk(&public_key.key, public_key.hash);
    let private_jwk =
        export_private_key_jwk(&private_key.key, private_key.hash).map_err(to_js_error)?;

    let result = js_sys::Object::new();
    js_sys::Reflect::set(&result, &"publicKey".into(), &to_js_value(&public_jwk)?)?;
    js_sys::Reflect::set(&result, &"privateKey".into(), &to_js_value(&private_jwk)?)?;
    Ok(result.into())
}

/// Serialize a public key JWK to its publication text.
#[wasm_bindgen(js_name = "encodePublicKey")]
pub async fn wasm_encode_public_key(public_key_jwk: JsValue) -> Result<String, JsValue> {
    let public_key = public_key_from_js(public_key_jwk)?;
    RsaOaepProvider::default()
        .export_public_key(&public_key)
        .await
        .map_err(to_js_error)
}

/// Parse published key text back into a public key JWK.
#[wasm_bindgen(js_name = "decodeKey")]
pub async fn wasm_decode_key(encoded_public_key: String) -> Result<JsValue, JsValue> {
    let public_key = RsaOaepProvider::default()
        .import_public_key(&encoded_public_key)
        .await
        .map_err(to_js_error)?;
    to_js_value(&export_public_key_jwk(&public_key.key, public_key.hash))
}

/// Encrypt a JSON-serializable object; resolves to base64 text.
#[wasm_bindgen(js_name = "encrypt")]
pub async fn wasm_encrypt(object: JsValue, public_key_jwk: JsValue) -> Result<String, JsValue> {
    let value: Value = serde_wasm_bindgen::from_value(object).map_err(to_js_error)?;
    let public_key = public_key_from_js(public_key_jwk)?;
    encrypt_object(&RsaOaepProvider::default(), &value, &public_key)
        .await
        .map_err(to_js_error)
}

/// Decrypt base64 text produced by `encrypt`; resolves to the object.
#[wasm_bindgen(js_name = "decrypt")]
pub async fn wasm_decrypt(encrypted: String, private_key_jwk: JsValue) -> Result<JsValue, JsValue> {
    let private_key = private_key_from_js(private_key_jwk)?;
    let value: Value = decrypt_object(&RsaOaepProvider::default(), &encrypted, &private_key)
        .await
        .map_err(to_js_error)?;
    to_js_value(&value)
}

/// RFC 7638 thumbprint of a public key JWK.
#[wasm_bindgen(js_name = "keyThumbprint")]
pub fn wasm_key_thumbprint(public_key_jwk: JsValue) -> Result<String, JsValue> {
    let public_key = public_key_from_js(public_key_jwk)?;
    Ok(compute_jwk_thumbprint(&public_key.key))
}
