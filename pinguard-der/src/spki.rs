//! Synthetic SubjectPublicKeyInfo assembly.
//!
//! The hasher never parses a certificate's real SPKI back out; it rebuilds
//! one from a pre-encoded `AlgorithmIdentifier` (a complete DER `SEQUENCE`
//! TLV, supplied by the caller as a literal byte table) and the platform's
//! external representation of the public key. This mirrors the approach the
//! original engine takes to keep its hash output independent of which ASN.1
//! library (if any) produced the certificate.

use crate::length::encode_length;
use crate::tlv::TAG_SEQUENCE;

const TAG_BIT_STRING: u8 = 0x03;

/// Wraps `key_bytes` in a BIT STRING with a zero "unused bits" octet:
/// `03 || length(len(key_bytes) + 1) || 00 || key_bytes`.
pub fn bit_string(key_bytes: &[u8]) -> Vec<u8> {
    let mut value = Vec::with_capacity(1 + key_bytes.len());
    value.push(0x00);
    value.extend_from_slice(key_bytes);

    let mut out = Vec::with_capacity(2 + value.len());
    out.push(TAG_BIT_STRING);
    out.extend(encode_length(value.len()));
    out.extend(value);
    out
}

/// Assembles `SEQUENCE { AlgorithmIdentifier, BIT STRING(key_bytes) }`.
///
/// `algorithm_identifier_der` must already be a complete, valid DER
/// `SEQUENCE` TLV (as given by the hard-coded algorithm identifier table in
/// `pinguard-hash`); this function does not validate it.
pub fn assemble_subject_public_key_info(
    algorithm_identifier_der: &[u8],
    key_bytes: &[u8],
) -> Vec<u8> {
    let bit_string = bit_string(key_bytes);

    let mut children = Vec::with_capacity(algorithm_identifier_der.len() + bit_string.len());
    children.extend_from_slice(algorithm_identifier_der);
    children.extend(bit_string);

    let mut out = Vec::with_capacity(2 + children.len());
    out.push(TAG_SEQUENCE);
    out.extend(encode_length(children.len()));
    out.extend(children);
    out
}
