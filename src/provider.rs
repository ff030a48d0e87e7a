//! Cryptographic provider seam.
//!
//! Callers depend on [`CryptoProvider`] rather than on a concrete RSA
//! implementation. Every capability is future-returning so providers backed
//! by an asynchronous engine (a browser's SubtleCrypto, a KMS, an HSM) fit
//! the same shape as the in-process [`RsaOaepProvider`].

use async_trait::async_trait;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::CryptoError;
use crate::jwk::{decode_public_key, encode_public_key};
use crate::rsa_oaep;
use crate::types::{KeyOptions, KeyPair, OaepHash};

/// Keypair generation, public key interchange, and single-message
/// encrypt/decrypt.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    type PublicKey: Send + Sync;
    type PrivateKey: Send + Sync;

    /// Generate a fresh encryption keypair.
    async fn generate_keys(&self) -> Result<(Self::PublicKey, Self::PrivateKey), CryptoError>;

    /// Serialize a public key to its text interchange form.
    async fn export_public_key(&self, public_key: &Self::PublicKey) -> Result<String, CryptoError>;

    /// Parse a public key from its text interchange form.
    async fn import_public_key(&self, encoded: &str) -> Result<Self::PublicKey, CryptoError>;

    async fn encrypt(
        &self,
        public_key: &Self::PublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    async fn decrypt(
        &self,
        private_key: &Self::PrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}

/// Public half of an RSA-OAEP keypair, bound to its OAEP hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OaepPublicKey {
    pub key: RsaPublicKey,
    pub hash: OaepHash,
}

/// Private half of an RSA-OAEP keypair, bound to its OAEP hash.
#[derive(Debug, Clone)]
pub struct OaepPrivateKey {
    pub key: RsaPrivateKey,
    pub hash: OaepHash,
}

impl From<KeyPair> for (OaepPublicKey, OaepPrivateKey) {
    fn from(pair: KeyPair) -> Self {
        (
            OaepPublicKey {
                key: pair.public_key,
                hash: pair.hash,
            },
            OaepPrivateKey {
                key: pair.private_key,
                hash: pair.hash,
            },
        )
    }
}

/// In-process provider over the RustCrypto `rsa` crate.
///
/// Holds only immutable options; share it behind an `Arc` freely.
#[derive(Debug, Clone, Default)]
pub struct RsaOaepProvider {
    options: KeyOptions,
}

impl RsaOaepProvider {
    /// Create a provider, rejecting unusable key options up front.
    pub fn new(options: KeyOptions) -> Result<Self, CryptoError> {
        rsa_oaep::validate_key_options(&options)?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &KeyOptions {
        &self.options
    }
}

#[async_trait]
impl CryptoProvider for RsaOaepProvider {
    type PublicKey = OaepPublicKey;
    type PrivateKey = OaepPrivateKey;

    async fn generate_keys(&self) -> Result<(OaepPublicKey, OaepPrivateKey), CryptoError> {
        tracing::debug!(
            modulus_bits = self.options.modulus_bits,
            hash = self.options.hash.name(),
            "generating RSA-OAEP keypair"
        );
        let pair = rsa_oaep::generate_keypair(&self.options)?;
        Ok(pair.into())
    }

    async fn export_public_key(&self, public_key: &OaepPublicKey) -> Result<String, CryptoError> {
        encode_public_key(&public_key.key, public_key.hash)
    }

    async fn import_public_key(&self, encoded: &str) -> Result<OaepPublicKey, CryptoError> {
        let (key, hash) = decode_public_key(encoded)?;
        tracing::debug!(hash = hash.name(), "imported RSA-OAEP public key");
        Ok(OaepPublicKey { key, hash })
    }

    async fn encrypt(
        &self,
        public_key: &OaepPublicKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        tracing::debug!(len = plaintext.len(), "encrypting");
        rsa_oaep::encrypt(&public_key.key, public_key.hash, plaintext)
    }

    async fn decrypt(
        &self,
        private_key: &OaepPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        rsa_oaep::decrypt(&private_key.key, private_key.hash, ciphertext).inspect_err(|e| {
            tracing::warn!(len = ciphertext.len(), error = %e, "decryption failed");
        })
    }
}
