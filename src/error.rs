use thiserror::Error;

/// Errors produced while decoding base64 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base64Error {
    #[error("Malformed base64 input: {len} significant characters is not a valid encoded length")]
    MalformedInput { len: usize },

    #[error("Invalid base64 character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Invalid base64 padding")]
    InvalidPadding,
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Invalid key options: {0}")]
    InvalidKeyOptions(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Plaintext too long: at most {max} bytes fit in one block, got {got}")]
    PlaintextTooLong { max: usize, got: usize },

    #[error("JWK missing {0}")]
    MissingJwkField(&'static str),

    #[error("Invalid JWK: {0}")]
    InvalidJwk(String),

    #[error("Unsupported key type: expected RSA, got {0}")]
    UnsupportedKeyType(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Base64 error: {0}")]
    Base64(#[from] Base64Error),

    #[error("Plaintext is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
