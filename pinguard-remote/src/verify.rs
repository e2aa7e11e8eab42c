//! HMAC-SHA-256 and ECDSA-over-SHA-256 verification of [`RemoteConfigBlob`]s.
//!
//! Every function here returns a plain `bool` and never an error: missing
//! key material, a mismatched signature type, and a bad signature are all
//! indistinguishable rejections by design, so a caller can never turn
//! repeated verification attempts into an oracle for which failure mode
//! occurred. Diagnosis, when needed, goes to a `warn!` log line instead of
//! the return value.

use openssl::ec::EcKey;
use openssl::hash::MessageDigest;
use openssl::memcmp;
use openssl::pkey::{PKey, Public};
use openssl::sign::{Signer, Verifier};
use tracing::warn;

use crate::blob::{RemoteConfigBlob, SignatureType};

/// Resolves a shared secret by the identifier carried in an `HMAC_SHA256`
/// signature type. Returns `None` for an unknown id.
pub trait SecretLookup {
    fn secret_for(&self, secret_id: &str) -> Option<Vec<u8>>;
}

impl<F: Fn(&str) -> Option<Vec<u8>>> SecretLookup for F {
    fn secret_for(&self, secret_id: &str) -> Option<Vec<u8>> {
        self(secret_id)
    }
}

/// Resolves a public key by the identifier carried in a `PUBLIC_KEY`
/// signature type. Returns `None` for an unknown id.
pub trait PublicKeyLookup {
    fn key_for(&self, key_id: &str) -> Option<PKey<Public>>;
}

impl<F: Fn(&str) -> Option<PKey<Public>>> PublicKeyLookup for F {
    fn key_for(&self, key_id: &str) -> Option<PKey<Public>> {
        self(key_id)
    }
}

/// Verifies `blob` against both schemes, dispatching on its
/// `signature_type`. Equivalent to calling [`verify_hmac`] or
/// [`verify_public_key`] directly, for callers that don't want to match on
/// the signature type themselves.
pub fn verify(blob: &RemoteConfigBlob, secrets: &dyn SecretLookup, keys: &dyn PublicKeyLookup) -> bool {
    match &blob.signature_type {
        SignatureType::HmacSha256 { .. } => verify_hmac(blob, secrets),
        SignatureType::PublicKey { .. } => verify_public_key(blob, keys),
    }
}

/// Accepts `blob` iff it carries an `HMAC_SHA256` signature type, a secret
/// is known for its id, and `HMAC-SHA256(secret, payload) == signature`
/// under a constant-time comparison.
pub fn verify_hmac(blob: &RemoteConfigBlob, secrets: &dyn SecretLookup) -> bool {
    let secret_id = match &blob.signature_type {
        SignatureType::HmacSha256 { secret_id } => secret_id,
        SignatureType::PublicKey { .. } => {
            warn!("HMAC verifier rejected a PUBLIC_KEY-signed blob: signature type mismatch");
            return false;
        }
    };

    let Some(secret) = secrets.secret_for(secret_id) else {
        warn!(secret_id, "HMAC verifier rejected a blob: unknown secret id");
        return false;
    };

    let computed = match compute_hmac_sha256(&secret, &blob.payload) {
        Some(mac) => mac,
        None => {
            warn!("HMAC verifier rejected a blob: failed to compute HMAC");
            return false;
        }
    };

    if computed.len() != blob.signature.len() || !memcmp::eq(&computed, &blob.signature) {
        warn!(secret_id, "HMAC verifier rejected a blob: signature mismatch");
        return false;
    }
    true
}

fn compute_hmac_sha256(secret: &[u8], payload: &[u8]) -> Option<Vec<u8>> {
    let key = PKey::hmac(secret).ok()?;
    let mut signer = Signer::new(MessageDigest::sha256(), &key).ok()?;
    signer.update(payload).ok()?;
    signer.sign_to_vec().ok()
}

/// Accepts `blob` iff it carries a `PUBLIC_KEY` signature type, a key is
/// known for its id, and the ECDSA-over-SHA-256 signature (IEEE X9.62 DER
/// encoding) verifies against `payload`.
pub fn verify_public_key(blob: &RemoteConfigBlob, keys: &dyn PublicKeyLookup) -> bool {
    let key_id = match &blob.signature_type {
        SignatureType::PublicKey { key_id } => key_id,
        SignatureType::HmacSha256 { .. } => {
            warn!("public-key verifier rejected an HMAC_SHA256-signed blob: signature type mismatch");
            return false;
        }
    };

    let Some(key) = keys.key_for(key_id) else {
        warn!(key_id, "public-key verifier rejected a blob: unknown key id");
        return false;
    };

    if key.ec_key().is_err() {
        warn!(key_id, "public-key verifier rejected a blob: key is not an EC key");
        return false;
    }

    let verified = Verifier::new(MessageDigest::sha256(), &key)
        .and_then(|mut verifier| verifier.update(&blob.payload).map(|_| verifier))
        .and_then(|mut verifier| verifier.verify(&blob.signature));

    match verified {
        Ok(true) => true,
        Ok(false) => {
            warn!(key_id, "public-key verifier rejected a blob: signature mismatch");
            false
        }
        Err(_) => {
            warn!(key_id, "public-key verifier rejected a blob: verification error");
            false
        }
    }
}

/// Convenience constructor for tests and simple integrations: builds a
/// `PKey<Public>` from an EC key already parsed by the host.
pub fn public_key_from_ec(ec_key: EcKey<openssl::pkey::Public>) -> Option<PKey<Public>> {
    PKey::from_ec_key(ec_key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use openssl::ec::{EcGroup, EcKey};
    use openssl::nid::Nid;

    fn hmac_blob(secret: &[u8], payload: &[u8]) -> RemoteConfigBlob {
        RemoteConfigBlob {
            payload: payload.to_vec(),
            signature: compute_hmac_sha256(secret, payload).unwrap(),
            signature_type: SignatureType::HmacSha256 { secret_id: "primary".to_string() },
        }
    }

    #[test]
    fn hmac_round_trip_verifies() {
        let secret = b"demo-secret-key".to_vec();
        let payload = br#"{"v":1}"#.to_vec();
        let blob = hmac_blob(&secret, &payload);
        let lookup = move |id: &str| if id == "primary" { Some(secret.clone()) } else { None };
        assert!(verify_hmac(&blob, &lookup));
    }

    #[test]
    fn flipping_a_signature_byte_breaks_verification() {
        let secret = b"demo-secret-key".to_vec();
        let payload = br#"{"v":1}"#.to_vec();
        let mut blob = hmac_blob(&secret, &payload);
        blob.signature[0] ^= 0xff;
        let lookup = move |id: &str| if id == "primary" { Some(secret.clone()) } else { None };
        assert!(!verify_hmac(&blob, &lookup));
    }

    #[test]
    fn flipping_a_payload_byte_breaks_verification() {
        let secret = b"demo-secret-key".to_vec();
        let payload = br#"{"v":1}"#.to_vec();
        let mut blob = hmac_blob(&secret, &payload);
        blob.payload[0] ^= 0xff;
        let lookup = move |id: &str| if id == "primary" { Some(secret.clone()) } else { None };
        assert!(!verify_hmac(&blob, &lookup));
    }

    #[test]
    fn unknown_secret_id_is_rejected() {
        let secret = b"demo-secret-key".to_vec();
        let payload = br#"{"v":1}"#.to_vec();
        let blob = hmac_blob(&secret, &payload);
        let lookup = |_: &str| None;
        assert!(!verify_hmac(&blob, &lookup));
    }

    #[test]
    fn public_key_verifier_rejects_hmac_blob() {
        let secret = b"demo-secret-key".to_vec();
        let payload = br#"{"v":1}"#.to_vec();
        let blob = hmac_blob(&secret, &payload);
        let lookup = |_: &str| None;
        assert!(!verify_public_key(&blob, &lookup));
    }

    #[test]
    fn hmac_verifier_rejects_public_key_blob() {
        let blob = RemoteConfigBlob {
            payload: b"payload".to_vec(),
            signature: vec![0u8; 64],
            signature_type: SignatureType::PublicKey { key_id: "k1".to_string() },
        };
        let lookup = |_: &str| None;
        assert!(!verify_hmac(&blob, &lookup));
    }

    #[test]
    fn ecdsa_round_trip_verifies() {
        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
        let ec_key = EcKey::generate(&group).unwrap();
        let private = PKey::from_ec_key(ec_key.clone()).unwrap();
        let public_ec = EcKey::from_public_key(&group, ec_key.public_key()).unwrap();
        let public = public_key_from_ec(public_ec).unwrap();

        let payload = br#"{"v":1}"#.to_vec();
        let mut signer = Signer::new(MessageDigest::sha256(), &private).unwrap();
        signer.update(&payload).unwrap();
        let signature = signer.sign_to_vec().unwrap();

        let blob = RemoteConfigBlob {
            payload,
            signature,
            signature_type: SignatureType::PublicKey { key_id: "k1".to_string() },
        };
        let lookup = move |id: &str| if id == "k1" { Some(public.clone()) } else { None };
        assert!(verify_public_key(&blob, &lookup));
    }

    #[test]
    fn ecdsa_cross_scheme_forgery_is_rejected() {
        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
        let ec_key = EcKey::generate(&group).unwrap();
        let public_ec = EcKey::from_public_key(&group, ec_key.public_key()).unwrap();
        let public = public_key_from_ec(public_ec).unwrap();

        let blob = hmac_blob(b"demo-secret-key", br#"{"v":1}"#);
        let lookup = move |id: &str| if id == "k1" { Some(public.clone()) } else { None };
        assert!(!verify_public_key(&blob, &lookup));
    }
}
