//! SPKI and certificate SHA-256 pin hashing.
//!
//! A pin hash is always `base64(sha256(bytes))`, so it is always 44
//! characters long regardless of which algorithm produced the hashed bytes.
//! The two hash kinds differ only in what gets hashed:
//!
//! - an SPKI hash reassembles `SubjectPublicKeyInfo` from a bare public key
//!   and a [`KeyType`], using the fixed algorithm identifier table in
//!   [`key_type`], then hashes that;
//! - a certificate hash is computed directly over the certificate's raw DER
//!   bytes.

#![forbid(unsafe_code)]

pub mod key_type;

pub use key_type::KeyType;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use openssl::sha::sha256;
use pinguard_error::PinGuardError;

/// Hashes a bare public key into the pin format used for SPKI pins.
///
/// `key_bytes` is the key's native encoding (PKCS#1 for RSA, the
/// `ECPoint` octet string for EC curves) as handed to the pinning engine by
/// the host TLS stack. This function reassembles the full DER
/// `SubjectPublicKeyInfo` around it before hashing, so two certificates that
/// carry the same key under different SPKI wrappers still produce the same
/// pin.
pub fn spki_hash(key_type: KeyType, key_bytes: &[u8]) -> Result<String, PinGuardError> {
    if key_bytes.is_empty() {
        return Err(PinGuardError::UnsupportedKeyType {
            key_type: key_type.label().to_string(),
            key_size_bits: 0,
        });
    }
    let spki = pinguard_der::spki::assemble_subject_public_key_info(
        key_type.algorithm_identifier_der(),
        key_bytes,
    );
    Ok(STANDARD.encode(sha256(&spki)))
}

/// Hashes a full DER certificate into the pin format used for certificate
/// pins. Unlike [`spki_hash`], this never fails: any byte string is a valid
/// input, since the hash carries no assumption about what it represents.
pub fn certificate_hash(der: &[u8]) -> String {
    STANDARD.encode(sha256(der))
}
