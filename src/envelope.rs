//! Object envelopes.
//!
//! Seal: object → JSON → UTF-8 bytes → encrypt → base64 text
//! Open: base64 text → decrypt → UTF-8 → JSON → object
//!
//! Base64 failures surface as [`CryptoError::Base64`], keeping transport
//! corruption distinct from a wrong key ([`CryptoError::Decryption`]).

use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::base64;
use crate::error::CryptoError;
use crate::provider::CryptoProvider;
use crate::rsa_oaep;
use crate::types::OaepHash;

fn to_plaintext<T: Serialize + ?Sized>(object: &T) -> Result<Vec<u8>, CryptoError> {
    Ok(serde_json::to_string(object)?.into_bytes())
}

fn from_plaintext<T: DeserializeOwned>(plaintext: Vec<u8>) -> Result<T, CryptoError> {
    let json = String::from_utf8(plaintext)?;
    Ok(serde_json::from_str(&json)?)
}

/// Encrypt an object for `public_key` and return transport-safe text.
pub async fn encrypt_object<P, T>(
    provider: &P,
    object: &T,
    public_key: &P::PublicKey,
) -> Result<String, CryptoError>
where
    P: CryptoProvider + ?Sized,
    T: Serialize + ?Sized,
{
    let plaintext = to_plaintext(object)?;
    let ciphertext = provider.encrypt(public_key, &plaintext).await?;
    Ok(base64::encode(&ciphertext))
}

/// Decrypt text produced by [`encrypt_object`] back into an object.
pub async fn decrypt_object<P, T>(
    provider: &P,
    encrypted: &str,
    private_key: &P::PrivateKey,
) -> Result<T, CryptoError>
where
    P: CryptoProvider + ?Sized,
    T: DeserializeOwned,
{
    let ciphertext = base64::decode(encrypted)?;
    let plaintext = provider.decrypt(private_key, &ciphertext).await?;
    from_plaintext(plaintext)
}

/// Synchronous [`encrypt_object`] over the RSA-OAEP primitives.
pub fn seal<T: Serialize + ?Sized>(
    object: &T,
    public_key: &RsaPublicKey,
    hash: OaepHash,
) -> Result<String, CryptoError> {
    let plaintext = to_plaintext(object)?;
    let ciphertext = rsa_oaep::encrypt(public_key, hash, &plaintext)?;
    Ok(base64::encode(&ciphertext))
}

/// Synchronous [`decrypt_object`] over the RSA-OAEP primitives.
pub fn open<T: DeserializeOwned>(
    encrypted: &str,
    private_key: &RsaPrivateKey,
    hash: OaepHash,
) -> Result<T, CryptoError> {
    let ciphertext = base64::decode(encrypted)?;
    let plaintext = rsa_oaep::decrypt(private_key, hash, &ciphertext)?;
    from_plaintext(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Base64Error;
    use crate::rsa_oaep::tests::shared_keypair;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Greeting {
        from: String,
        count: u32,
        tags: Vec<String>,
    }

    #[test]
    fn seal_open_round_trip() {
        let kp = shared_keypair();
        let value = json!({"a": 1, "b": [true, null, 2.5], "c": {"d": "e"}});
        let sealed = seal(&value, &kp.public_key, kp.hash).unwrap();
        let opened: Value = open(&sealed, &kp.private_key, kp.hash).unwrap();
        assert_eq!(opened, value);
    }

    #[test]
    fn sealed_text_is_padded_base64_of_one_block() {
        let kp = shared_keypair();
        let sealed = seal(&json!("x"), &kp.public_key, kp.hash).unwrap();
        // 256 bytes leave one trailing byte -> 344 characters ending in "=="
        assert_eq!(sealed.len(), 344);
        assert!(sealed.ends_with("=="));
        assert!(!sealed.ends_with("==="));
    }

    #[test]
    fn typed_round_trip() {
        let kp = shared_keypair();
        let greeting = Greeting {
            from: "Zoë".to_string(),
            count: 3,
            tags: vec!["héllo".to_string(), "日本".to_string()],
        };
        let sealed = seal(&greeting, &kp.public_key, kp.hash).unwrap();
        let opened: Greeting = open(&sealed, &kp.private_key, kp.hash).unwrap();
        assert_eq!(opened, greeting);
    }

    #[test]
    fn corrupted_text_is_base64_error() {
        let kp = shared_keypair();
        let mut sealed = seal(&json!(1), &kp.public_key, kp.hash).unwrap();
        sealed.replace_range(0..1, "*");
        let err = open::<Value>(&sealed, &kp.private_key, kp.hash).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::Base64(Base64Error::InvalidCharacter { ch: '*', position: 0 })
        ));
    }

    #[test]
    fn truncated_text_is_base64_error() {
        let kp = shared_keypair();
        let sealed = seal(&json!(1), &kp.public_key, kp.hash).unwrap();
        let err = open::<Value>(&sealed[..sealed.len() - 1], &kp.private_key, kp.hash).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::Base64(Base64Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn oversized_object_is_rejected() {
        let kp = shared_keypair();
        let big = "a".repeat(200);
        let err = seal(&big, &kp.public_key, kp.hash).unwrap_err();
        assert!(matches!(err, CryptoError::PlaintextTooLong { max: 190, .. }));
    }

    #[test]
    fn shape_mismatch_is_json_error() {
        let kp = shared_keypair();
        let sealed = seal(&json!([1, 2, 3]), &kp.public_key, kp.hash).unwrap();
        let err = open::<Greeting>(&sealed, &kp.private_key, kp.hash).unwrap_err();
        assert!(matches!(err, CryptoError::Json(_)));
    }

    #[test]
    fn non_utf8_plaintext_is_utf8_error() {
        let kp = shared_keypair();
        let ciphertext = rsa_oaep::encrypt(&kp.public_key, kp.hash, &[0xff, 0xfe]).unwrap();
        let err = open::<Value>(&base64::encode(&ciphertext), &kp.private_key, kp.hash).unwrap_err();
        assert!(matches!(err, CryptoError::Utf8(_)));
    }
}
