//! Unified SDK error types.

use thiserror::Error;

use crate::codec::WireType;
use crate::crypto::CurveType;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Keystore error: {0}")]
    Keystore(#[from] KeystoreError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Malformed or missing input, detected before any encoding happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field} must be greater than 0")]
    Zero { field: &'static str },

    #[error("memo too long: {len} bytes (max {max})")]
    MemoTooLong { len: usize, max: usize },
}

/// Wire-format errors. On encode these are always programming errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("field {id} declared as {expected:?} but got a {actual} value")]
    WireTypeMismatch {
        id: u32,
        expected: WireType,
        actual: &'static str,
    },

    #[error("field {id} length {len} exceeds the wire format limit")]
    LengthOverflow { id: u32, len: usize },

    #[error("field {id} value {value} does not fit in uint32")]
    Uint32Overflow { id: u32, value: u64 },

    #[error("field {0} appears more than once")]
    DuplicateField(u32),

    #[error("field {id} is not valid UTF-8")]
    InvalidUtf8 { id: u32 },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("invalid schema {schema}: {reason}")]
    InvalidSchema { schema: &'static str, reason: String },
}

impl From<prost::DecodeError> for EncodingError {
    fn from(e: prost::DecodeError) -> Self {
        EncodingError::Malformed(e.to_string())
    }
}

/// Curve identification, key handling and signing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("unknown curve for {len}-byte key")]
    UnknownCurve { len: usize },

    #[error("unknown curve name: {0}")]
    UnknownCurveName(String),

    #[error("invalid {curve} private key: {reason}")]
    InvalidPrivateKey { curve: CurveType, reason: String },

    #[error("invalid {curve} public key: {reason}")]
    InvalidPublicKey { curve: CurveType, reason: String },

    #[error("{curve} signing failed: {reason}")]
    Signing { curve: CurveType, reason: String },

    #[error("{curve} signature does not verify")]
    InvalidSignature { curve: CurveType },
}

/// Key provider errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeystoreError {
    #[error("no key for address {0}")]
    KeyNotFound(String),

    #[error("invalid key material: {0}")]
    InvalidKey(#[from] CryptoError),

    #[error("private key is not valid hex: {0}")]
    InvalidHex(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}
