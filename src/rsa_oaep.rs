//! RSA-OAEP key generation and single-block encrypt/decrypt.
//!
//! The hash selected in [`OaepHash`] drives both the label digest and MGF1,
//! matching WebCrypto's `RSA-OAEP` with `{ hash }`.

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::CryptoError;
use crate::types::{KeyOptions, KeyPair, OaepHash, MAX_MODULUS_BITS, MIN_MODULUS_BITS};

pub(crate) fn oaep_padding(hash: OaepHash) -> Oaep {
    match hash {
        OaepHash::Sha256 => Oaep::new::<Sha256>(),
        OaepHash::Sha384 => Oaep::new::<Sha384>(),
        OaepHash::Sha512 => Oaep::new::<Sha512>(),
    }
}

/// Largest plaintext that fits one OAEP block: `k - 2*hLen - 2`.
fn max_message_len(modulus_bytes: usize, hash: OaepHash) -> usize {
    modulus_bytes.saturating_sub(2 * hash.digest_len() + 2)
}

/// Largest plaintext `encrypt` accepts for this key and hash.
pub fn max_plaintext_len(public_key: &RsaPublicKey, hash: OaepHash) -> usize {
    max_message_len(public_key.size(), hash)
}

/// Check key options before spending time on prime generation.
pub fn validate_key_options(options: &KeyOptions) -> Result<(), CryptoError> {
    let bits = options.modulus_bits;
    if !(MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) || bits % 8 != 0 {
        return Err(CryptoError::InvalidKeyOptions(format!(
            "modulus must be a multiple of 8 between {} and {} bits, got {}",
            MIN_MODULUS_BITS, MAX_MODULUS_BITS, bits
        )));
    }
    if options.public_exponent < 3 || options.public_exponent % 2 == 0 {
        return Err(CryptoError::InvalidKeyOptions(format!(
            "public exponent must be odd and at least 3, got {}",
            options.public_exponent
        )));
    }
    if max_message_len(bits / 8, options.hash) == 0 {
        return Err(CryptoError::InvalidKeyOptions(format!(
            "{}-bit modulus is too small for OAEP with {}",
            bits,
            options.hash.name()
        )));
    }
    Ok(())
}

/// Generate a new RSA keypair for OAEP.
pub fn generate_keypair(options: &KeyOptions) -> Result<KeyPair, CryptoError> {
    validate_key_options(options)?;

    let exponent = BigUint::from(options.public_exponent);
    let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, options.modulus_bits, &exponent)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public_key = private_key.to_public_key();

    Ok(KeyPair {
        public_key,
        private_key,
        hash: options.hash,
    })
}

/// Encrypt one block with RSA-OAEP.
pub fn encrypt(
    public_key: &RsaPublicKey,
    hash: OaepHash,
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let max = max_plaintext_len(public_key, hash);
    if plaintext.len() > max {
        return Err(CryptoError::PlaintextTooLong {
            max,
            got: plaintext.len(),
        });
    }
    public_key
        .encrypt(&mut OsRng, oaep_padding(hash), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))
}

/// Decrypt one RSA-OAEP block.
///
/// Wrong key, wrong hash and corrupted ciphertext all surface as
/// [`CryptoError::Decryption`].
pub fn decrypt(
    private_key: &RsaPrivateKey,
    hash: OaepHash,
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    private_key
        .decrypt(oaep_padding(hash), ciphertext)
        .map_err(|e| CryptoError::Decryption(e.to_string()))
}
