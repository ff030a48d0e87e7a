//! End-to-end encryption of JSON objects with RSA-OAEP.
//!
//! This crate provides:
//! - A strict standard base64 codec
//! - RSA-OAEP keypair generation and single-block encrypt/decrypt
//! - RSA public/private key interchange as JWK, plus RFC 7638 thumbprints
//! - A `CryptoProvider` seam with an in-process implementation
//! - Object envelopes: JSON → encrypt → base64, and back
//!
//! RSA, OAEP and SHA-2 come from the RustCrypto crates; nothing here
//! implements a primitive.

pub mod base64;
mod envelope;
mod error;
mod jwk;
mod provider;
mod rsa_oaep;
mod types;

pub use envelope::{decrypt_object, encrypt_object, open, seal};
pub use error::{Base64Error, CryptoError};
pub use jwk::{
    compute_jwk_thumbprint, decode_public_key, encode_public_key, export_private_key_jwk,
    export_public_key_jwk, import_private_key_jwk, import_public_key_jwk,
};
pub use provider::{CryptoProvider, OaepPrivateKey, OaepPublicKey, RsaOaepProvider};
pub use rsa_oaep::{decrypt, encrypt, generate_keypair, max_plaintext_len, validate_key_options};
pub use types::{
    KeyOptions, KeyPair, OaepHash, RsaPrivateJwk, RsaPublicJwk, DEFAULT_MODULUS_BITS,
    DEFAULT_PUBLIC_EXPONENT, MAX_MODULUS_BITS, MIN_MODULUS_BITS,
};

pub use rsa::{RsaPrivateKey, RsaPublicKey};
