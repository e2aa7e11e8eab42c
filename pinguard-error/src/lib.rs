//! Error types for the pinning engine.
//!
//! Evaluation itself is infallible — every handshake decision comes back as
//! a `TrustDecision`, never an `Err` — so this enum only covers the small
//! set of APIs that sit outside the live evaluation path: building a `Pin`,
//! computing an SPKI hash, and decoding policy JSON.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinGuardError {
    #[error("unsupported key type {key_type} ({key_size_bits} bits)")]
    UnsupportedKeyType { key_type: String, key_size_bits: u32 },

    #[error("invalid pin: {reason}")]
    InvalidPin { reason: String },

    #[error("invalid certificate: {reason}")]
    InvalidCertificate { reason: String },

    #[cfg(feature = "serde")]
    #[error("policy decode error: {0}")]
    PolicyDecode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
