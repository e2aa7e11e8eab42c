//! The hard-coded SubjectPublicKeyInfo `AlgorithmIdentifier` table.
//!
//! These are complete, pre-encoded DER `SEQUENCE` TLVs taken verbatim from
//! the CA/Browser Forum baseline requirements' permitted SPKI algorithms
//! (RSA, and EC on P-256/P-384/P-521). They are deliberately not built from
//! an OID + parameters pair at runtime: the whole point of a pinning hash is
//! that it's byte-for-byte reproducible across implementations, and a fixed
//! table removes any risk of two ASN.1 encoders disagreeing on an edge case.

/// The public key algorithm/curve a certificate's SPKI was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    EcP256,
    EcP384,
    EcP521,
}

impl KeyType {
    pub fn label(&self) -> &'static str {
        match self {
            KeyType::Rsa => "RSA",
            KeyType::EcP256 => "EC-P256",
            KeyType::EcP384 => "EC-P384",
            KeyType::EcP521 => "EC-P521",
        }
    }

    /// Returns the complete, pre-encoded `AlgorithmIdentifier` DER SEQUENCE
    /// for this key type.
    pub fn algorithm_identifier_der(&self) -> &'static [u8] {
        match self {
            KeyType::Rsa => &[
                0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01,
                0x05, 0x00,
            ],
            KeyType::EcP256 => &[
                0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08,
                0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07,
            ],
            KeyType::EcP384 => &[
                0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
                0x2b, 0x81, 0x04, 0x00, 0x22,
            ],
            KeyType::EcP521 => &[
                0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
                0x2b, 0x81, 0x04, 0x00, 0x23,
            ],
        }
    }
}
