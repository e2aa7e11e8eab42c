//! Signature verification for remote configuration blobs.
//!
//! This crate's only job is "does this blob's signature check out", as a
//! boolean. It never decodes `payload` into a policy set — that's the
//! caller's job, and only after a `true` verdict — and it never
//! distinguishes *why* a blob was rejected in its return value, so that
//! repeated verification attempts can't be used as an oracle to enumerate
//! valid key/secret ids.

#![forbid(unsafe_code)]

pub mod blob;
pub mod verify;

pub use blob::{RemoteConfigBlob, SignatureType};
pub use verify::{public_key_from_ec, verify, verify_hmac, verify_public_key, PublicKeyLookup, SecretLookup};
