//! `RemoteConfigBlob` and its signature-scheme tag.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which scheme signed a [`RemoteConfigBlob`], and the identifier the
/// verifier uses to look up the key or secret material.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SignatureType {
    HmacSha256 { secret_id: String },
    PublicKey { key_id: String },
}

/// A signed, not-yet-decoded policy payload. `payload` and `signature` are
/// opaque bytes until a verifier accepts the blob; only then is `payload`
/// decoded into a `PolicySet` by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RemoteConfigBlob {
    #[cfg_attr(feature = "serde", serde(with = "base64_bytes"))]
    pub payload: Vec<u8>,
    #[cfg_attr(feature = "serde", serde(with = "base64_bytes"))]
    pub signature: Vec<u8>,
    pub signature_type: SignatureType,
}

#[cfg(feature = "serde")]
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
