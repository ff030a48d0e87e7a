//! RSA keys as JSON Web Keys (RFC 7517, RFC 7518 §6.3).
//!
//! Public keys are published as the JSON text of their JWK; nothing else is
//! layered on top. Integer members are unsigned big-endian, base64url
//! without padding.

use base64ct::{Base64UrlUnpadded, Encoding};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::types::{OaepHash, RsaPrivateJwk, RsaPublicJwk, JWK_KTY_RSA};

fn encode_uint(value: &BigUint) -> String {
    Base64UrlUnpadded::encode_string(&value.to_bytes_be())
}

fn decode_uint(field: &'static str, value: &str) -> Result<BigUint, CryptoError> {
    if value.is_empty() {
        return Err(CryptoError::MissingJwkField(field));
    }
    let mut bytes = Base64UrlUnpadded::decode_vec(value)
        .map_err(|e| CryptoError::InvalidJwk(format!("{}: {}", field, e)))?;
    let uint = BigUint::from_bytes_be(&bytes);
    bytes.zeroize();
    Ok(uint)
}

fn check_kty(kty: &str) -> Result<(), CryptoError> {
    if kty != JWK_KTY_RSA {
        return Err(CryptoError::UnsupportedKeyType(kty.to_string()));
    }
    Ok(())
}

/// Resolve the OAEP hash from `alg`. Keys without `alg` are taken as
/// `RSA-OAEP-256`.
fn resolve_hash(alg: Option<&str>) -> Result<OaepHash, CryptoError> {
    match alg {
        None => Ok(OaepHash::Sha256),
        Some(alg) => OaepHash::from_jwk_alg(alg)
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(alg.to_string())),
    }
}

fn check_key_ops(key_ops: Option<&[String]>, required: &str) -> Result<(), CryptoError> {
    match key_ops {
        Some(ops) if !ops.iter().any(|op| op == required) => Err(CryptoError::InvalidJwk(
            format!("key_ops does not permit \"{}\"", required),
        )),
        _ => Ok(()),
    }
}

/// Export an RSA public key as an extractable encryption JWK.
pub fn export_public_key_jwk(key: &RsaPublicKey, hash: OaepHash) -> RsaPublicJwk {
    RsaPublicJwk {
        kty: JWK_KTY_RSA.to_string(),
        n: encode_uint(key.n()),
        e: encode_uint(key.e()),
        alg: Some(hash.jwk_alg().to_string()),
        ext: Some(true),
        key_ops: Some(vec!["encrypt".to_string()]),
    }
}

/// Import an RSA public key from JWK form.
pub fn import_public_key_jwk(jwk: &RsaPublicJwk) -> Result<(RsaPublicKey, OaepHash), CryptoError> {
    check_kty(&jwk.kty)?;
    let hash = resolve_hash(jwk.alg.as_deref())?;
    check_key_ops(jwk.key_ops.as_deref(), "encrypt")?;

    let n = decode_uint("n", &jwk.n)?;
    let e = decode_uint("e", &jwk.e)?;
    let key = RsaPublicKey::new(n, e).map_err(|e| CryptoError::InvalidJwk(e.to_string()))?;
    Ok((key, hash))
}

/// Serialize a public key to its publication form: the JWK as JSON text.
pub fn encode_public_key(key: &RsaPublicKey, hash: OaepHash) -> Result<String, CryptoError> {
    Ok(serde_json::to_string(&export_public_key_jwk(key, hash))?)
}

/// Parse a published public key (JWK JSON text).
pub fn decode_public_key(encoded: &str) -> Result<(RsaPublicKey, OaepHash), CryptoError> {
    let jwk: RsaPublicJwk = serde_json::from_str(encoded)?;
    import_public_key_jwk(&jwk)
}

/// Export an RSA private key as a JWK including the CRT parameters.
pub fn export_private_key_jwk(
    key: &RsaPrivateKey,
    hash: OaepHash,
) -> Result<RsaPrivateJwk, CryptoError> {
    let [p, q] = key.primes() else {
        return Err(CryptoError::InvalidJwk(format!(
            "expected two prime factors, key has {}",
            key.primes().len()
        )));
    };

    Ok(RsaPrivateJwk {
        kty: JWK_KTY_RSA.to_string(),
        n: encode_uint(key.n()),
        e: encode_uint(key.e()),
        d: encode_uint(key.d()),
        p: encode_uint(p),
        q: encode_uint(q),
        dp: key.dp().map(encode_uint),
        dq: key.dq().map(encode_uint),
        qi: key.crt_coefficient().as_ref().map(encode_uint),
        alg: Some(hash.jwk_alg().to_string()),
        ext: Some(true),
        key_ops: Some(vec!["decrypt".to_string()]),
    })
}

/// Import an RSA private key from JWK form.
///
/// The CRT members are recomputed from `p` and `q` rather than trusted.
pub fn import_private_key_jwk(
    jwk: &RsaPrivateJwk,
) -> Result<(RsaPrivateKey, OaepHash), CryptoError> {
    check_kty(&jwk.kty)?;
    let hash = resolve_hash(jwk.alg.as_deref())?;
    check_key_ops(jwk.key_ops.as_deref(), "decrypt")?;

    let n = decode_uint("n", &jwk.n)?;
    let e = decode_uint("e", &jwk.e)?;
    let d = decode_uint("d", &jwk.d)?;
    let p = decode_uint("p", &jwk.p)?;
    let q = decode_uint("q", &jwk.q)?;

    let mut key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
        .map_err(|e| CryptoError::InvalidJwk(e.to_string()))?;
    key.validate()
        .map_err(|e| CryptoError::InvalidJwk(e.to_string()))?;
    key.precompute()
        .map_err(|e| CryptoError::InvalidJwk(e.to_string()))?;
    Ok((key, hash))
}

/// Compute the RFC 7638 JWK thumbprint of an RSA public key.
///
/// The input is `{"e","kty","n"}` in lexicographic order; the result is a
/// base64url SHA-256 digest (43 characters).
pub fn compute_jwk_thumbprint(key: &RsaPublicKey) -> String {
    let thumbprint_input = format!(
        r#"{{"e":"{}","kty":"{}","n":"{}"}}"#,
        encode_uint(key.e()),
        JWK_KTY_RSA,
        encode_uint(key.n())
    );
    let hash = Sha256::digest(thumbprint_input.as_bytes());
    Base64UrlUnpadded::encode_string(&hash)
}
