use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

/// Default RSA modulus length in bits.
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// Default public exponent (F4).
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// Smallest accepted modulus length in bits.
pub const MIN_MODULUS_BITS: usize = 1024;

/// Largest accepted modulus length in bits. Matches the public key size
/// limit enforced on import, so every generated key can be re-imported.
pub const MAX_MODULUS_BITS: usize = 4096;

/// JWK key type for RSA keys.
pub const JWK_KTY_RSA: &str = "RSA";

/// Hash function used for both the OAEP label digest and MGF1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OaepHash {
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-384")]
    Sha384,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl OaepHash {
    /// Digest output length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            OaepHash::Sha256 => 32,
            OaepHash::Sha384 => 48,
            OaepHash::Sha512 => 64,
        }
    }

    /// WebCrypto hash name, e.g. `SHA-256`.
    pub fn name(self) -> &'static str {
        match self {
            OaepHash::Sha256 => "SHA-256",
            OaepHash::Sha384 => "SHA-384",
            OaepHash::Sha512 => "SHA-512",
        }
    }

    /// JWK `alg` value (RFC 7518 §4.3 and the WebCrypto registrations).
    pub fn jwk_alg(self) -> &'static str {
        match self {
            OaepHash::Sha256 => "RSA-OAEP-256",
            OaepHash::Sha384 => "RSA-OAEP-384",
            OaepHash::Sha512 => "RSA-OAEP-512",
        }
    }

    pub fn from_jwk_alg(alg: &str) -> Option<Self> {
        match alg {
            "RSA-OAEP-256" => Some(OaepHash::Sha256),
            "RSA-OAEP-384" => Some(OaepHash::Sha384),
            "RSA-OAEP-512" => Some(OaepHash::Sha512),
            _ => None,
        }
    }
}

/// Key generation parameters.
///
/// Deserializable so callers can carry it in their own configuration; every
/// field falls back to the default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyOptions {
    /// Modulus length in bits (default: 2048)
    pub modulus_bits: usize,
    /// Public exponent (default: 65537)
    pub public_exponent: u32,
    /// OAEP hash (default: SHA-256)
    pub hash: OaepHash,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            hash: OaepHash::default(),
        }
    }
}

/// A freshly generated RSA-OAEP keypair.
///
/// The private key zeroizes its limbs on drop.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub hash: OaepHash,
}

/// RSA public key as a JSON Web Key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublicJwk {
    pub kty: String,
    /// Modulus, base64url
    pub n: String,
    /// Public exponent, base64url
    pub e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
}

/// RSA private key as a JSON Web Key (RFC 7518 §6.3.2).
#[derive(Clone, Serialize, Deserialize, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct RsaPrivateJwk {
    pub kty: String,
    pub n: String,
    pub e: String,
    /// Private exponent
    pub d: String,
    /// First prime factor
    pub p: String,
    /// Second prime factor
    pub q: String,
    /// First factor CRT exponent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    /// Second factor CRT exponent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    /// First CRT coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
}

impl std::fmt::Debug for RsaPrivateJwk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPrivateJwk")
            .field("kty", &self.kty)
            .field("n", &self.n)
            .field("e", &self.e)
            .field("alg", &self.alg)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_options_fill_missing_fields_with_defaults() {
        let options: KeyOptions = serde_json::from_str(r#"{"modulusBits": 3072}"#).unwrap();
        assert_eq!(options.modulus_bits, 3072);
        assert_eq!(options.public_exponent, DEFAULT_PUBLIC_EXPONENT);
        assert_eq!(options.hash, OaepHash::Sha256);

        let options: KeyOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, KeyOptions::default());
    }

    #[test]
    fn hash_uses_webcrypto_names() {
        let options: KeyOptions = serde_json::from_str(r#"{"hash": "SHA-512"}"#).unwrap();
        assert_eq!(options.hash, OaepHash::Sha512);
        assert_eq!(
            serde_json::to_value(OaepHash::Sha384).unwrap(),
            serde_json::json!("SHA-384")
        );
        assert!(serde_json::from_str::<KeyOptions>(r#"{"hash": "SHA-1"}"#).is_err());
    }

    #[test]
    fn jwk_alg_round_trip() {
        for hash in [OaepHash::Sha256, OaepHash::Sha384, OaepHash::Sha512] {
            assert_eq!(OaepHash::from_jwk_alg(hash.jwk_alg()), Some(hash));
        }
        assert_eq!(OaepHash::from_jwk_alg("RSA-OAEP"), None);
    }
}
