//! Integration tests for object envelopes through `RsaOaepProvider`.

use std::sync::{Arc, OnceLock};

use end2end::{
    base64, decrypt_object, encrypt_object, generate_keypair, Base64Error, CryptoError,
    CryptoProvider, KeyOptions, OaepPrivateKey, OaepPublicKey, RsaOaepProvider,
};
use serde_json::{json, Value};

// ============================================================================
// Helpers
// ============================================================================

/// One keypair shared by every test in this file.
fn keys() -> &'static (OaepPublicKey, OaepPrivateKey) {
    static KEYS: OnceLock<(OaepPublicKey, OaepPrivateKey)> = OnceLock::new();
    KEYS.get_or_init(|| {
        generate_keypair(&KeyOptions::default())
            .expect("generate keypair")
            .into()
    })
}

async fn round_trip(value: Value) -> Value {
    let provider = RsaOaepProvider::default();
    let (public_key, private_key) = keys();
    let encrypted = encrypt_object(&provider, &value, public_key).await.unwrap();
    decrypt_object(&provider, &encrypted, private_key).await.unwrap()
}

// ============================================================================
// Round trips
// ============================================================================

#[tokio::test]
async fn numbers_round_trip() {
    for value in [json!(0), json!(-17), json!(3.25), json!(9007199254740991u64)] {
        assert_eq!(round_trip(value.clone()).await, value);
    }
}

#[tokio::test]
async fn nested_mappings_round_trip() {
    let value = json!({"user": {"id": 7, "roles": {"admin": false, "editor": true}}});
    assert_eq!(round_trip(value.clone()).await, value);
}

#[tokio::test]
async fn ordered_sequences_round_trip() {
    let value = json!([3, 1, 2, [null, true], {"k": []}]);
    assert_eq!(round_trip(value.clone()).await, value);
}

#[tokio::test]
async fn non_ascii_strings_round_trip() {
    let value = json!({"greeting": "héllo wörld", "jp": "こんにちは", "emoji": "🔐"});
    assert_eq!(round_trip(value.clone()).await, value);
}

#[tokio::test]
async fn key_order_is_preserved() {
    let value = json!({"z": 1, "a": 2, "m": 3});
    let decrypted = round_trip(value.clone()).await;
    let order: Vec<&String> = decrypted.as_object().unwrap().keys().collect();
    assert_eq!(order, ["z", "a", "m"]);
}

// ============================================================================
// Published public keys
// ============================================================================

#[tokio::test]
async fn sender_uses_published_public_key() {
    let provider = RsaOaepProvider::default();
    let (public_key, private_key) = keys();

    let published = provider.export_public_key(public_key).await.unwrap();
    let sender_key = provider.import_public_key(&published).await.unwrap();

    let message = json!({"from": "sender", "body": "for your eyes only"});
    let encrypted = encrypt_object(&provider, &message, &sender_key).await.unwrap();
    let decrypted: Value = decrypt_object(&provider, &encrypted, private_key)
        .await
        .unwrap();
    assert_eq!(decrypted, message);
}

#[tokio::test]
async fn provider_works_as_shared_trait_object() {
    let provider: Arc<dyn CryptoProvider<PublicKey = OaepPublicKey, PrivateKey = OaepPrivateKey>> =
        Arc::new(RsaOaepProvider::default());
    let (public_key, private_key) = keys();

    let encrypted = encrypt_object(provider.as_ref(), &json!("dyn"), public_key)
        .await
        .unwrap();
    let decrypted: String = decrypt_object(provider.as_ref(), &encrypted, private_key)
        .await
        .unwrap();
    assert_eq!(decrypted, "dyn");
}

// ============================================================================
// Failure classification
// ============================================================================

#[tokio::test]
async fn wrong_private_key_is_decryption_error() {
    let provider = RsaOaepProvider::default();
    let (public_key, _) = keys();
    let (_, stranger) = provider.generate_keys().await.unwrap();

    let encrypted = encrypt_object(&provider, &json!({"a": 1}), public_key)
        .await
        .unwrap();
    let err = decrypt_object::<_, Value>(&provider, &encrypted, &stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, CryptoError::Decryption(_)));
}

#[tokio::test]
async fn transport_corruption_is_base64_error() {
    let provider = RsaOaepProvider::default();
    let (public_key, private_key) = keys();

    let encrypted = encrypt_object(&provider, &json!({"a": 1}), public_key)
        .await
        .unwrap();
    let corrupted = format!("{}!", &encrypted[..encrypted.len() - 1]);
    let err = decrypt_object::<_, Value>(&provider, &corrupted, private_key)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CryptoError::Base64(Base64Error::InvalidCharacter { ch: '!', .. })
    ));
}

#[tokio::test]
async fn flipped_ciphertext_bit_is_decryption_error() {
    let provider = RsaOaepProvider::default();
    let (public_key, private_key) = keys();

    let encrypted = encrypt_object(&provider, &json!({"a": 1}), public_key)
        .await
        .unwrap();
    let mut raw = base64::decode(&encrypted).unwrap();
    raw[10] ^= 0x01;
    let err = decrypt_object::<_, Value>(&provider, &base64::encode(&raw), private_key)
        .await
        .unwrap_err();
    assert!(matches!(err, CryptoError::Decryption(_)));
}

#[tokio::test]
async fn line_wrapped_ciphertext_still_decrypts() {
    let provider = RsaOaepProvider::default();
    let (public_key, private_key) = keys();

    let encrypted = encrypt_object(&provider, &json!([1, 2]), public_key)
        .await
        .unwrap();
    let wrapped: String = encrypted
        .as_bytes()
        .chunks(64)
        .map(|line| format!("{}\n", std::str::from_utf8(line).unwrap()))
        .collect();
    let decrypted: Value = decrypt_object(&provider, &wrapped, private_key)
        .await
        .unwrap();
    assert_eq!(decrypted, json!([1, 2]));
}
