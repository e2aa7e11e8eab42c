//! `Pin`, `PinType`, `PinRole`, `PinScope` and the pinning policy container.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pinguard_error::PinGuardError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a pin's hash covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinType {
    Spki,
    Certificate,
    Ca,
}

/// Advisory role. Never consulted by matching; purely descriptive, e.g. for
/// rollover tooling that warns when only backup pins remain reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinRole {
    Primary,
    Backup,
}

/// Which chain position(s) a pin is eligible to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinScope {
    Leaf,
    Intermediate,
    Root,
    Any,
}

impl PinScope {
    /// `candidate.scope.contains(pin.scope)`: does a chain position with
    /// this scope satisfy a pin declared with `pin_scope`?
    pub fn contains(&self, pin_scope: PinScope) -> bool {
        if pin_scope == PinScope::Any {
            return true;
        }
        *self == pin_scope
    }

    pub fn is_ca(&self) -> bool {
        matches!(self, PinScope::Intermediate | PinScope::Root)
    }
}

/// An immutable pin record. Constructed only through [`Pin::new`], which
/// validates the hash eagerly: `INVALID_PIN` is a policy-ingest-time error,
/// never a silent no-match discovered only during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Pin {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub pin_type: PinType,
    pub hash: String,
    pub role: PinRole,
    pub scope: PinScope,
}

impl Pin {
    /// Validates `hash` as base64-encoded SHA-256 (32 decoded bytes, 44
    /// encoded characters with padding) before constructing the pin.
    pub fn new(pin_type: PinType, hash: impl Into<String>, role: PinRole, scope: PinScope) -> Result<Pin, PinGuardError> {
        let hash = hash.into();
        let decoded = STANDARD
            .decode(&hash)
            .map_err(|_| PinGuardError::InvalidPin {
                reason: format!("{hash} is not valid base64"),
            })?;
        if decoded.len() != 32 {
            return Err(PinGuardError::InvalidPin {
                reason: format!("decoded pin hash is {} bytes, expected 32", decoded.len()),
            });
        }
        Ok(Pin { pin_type, hash, role, scope })
    }

    /// Identity for the "two pins may share `(type, hash)` only if scopes
    /// differ" invariant.
    pub fn identity(&self) -> (PinType, &str) {
        (self.pin_type, &self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_hash() -> String {
        "Y7EKzelfzqmyMnNRDIX8cecAf6wj1nk7nT25ws/qnVo=".to_string()
    }

    #[test]
    fn accepts_valid_sha256_base64() {
        let pin = Pin::new(PinType::Spki, valid_hash(), PinRole::Primary, PinScope::Leaf).unwrap();
        assert_eq!(pin.hash.len(), 44);
    }

    #[test]
    fn rejects_non_base64() {
        let err = Pin::new(PinType::Spki, "not base64!!", PinRole::Primary, PinScope::Leaf).unwrap_err();
        assert!(matches!(err, PinGuardError::InvalidPin { .. }));
    }

    #[test]
    fn rejects_wrong_decoded_length() {
        let short = STANDARD.encode([0u8; 16]);
        let err = Pin::new(PinType::Spki, short, PinRole::Primary, PinScope::Leaf).unwrap_err();
        assert!(matches!(err, PinGuardError::InvalidPin { .. }));
    }

    #[test]
    fn any_scope_contains_everything() {
        assert!(PinScope::Leaf.contains(PinScope::Any));
        assert!(PinScope::Root.contains(PinScope::Any));
    }

    #[test]
    fn non_any_scope_requires_exact_match() {
        assert!(PinScope::Leaf.contains(PinScope::Leaf));
        assert!(!PinScope::Leaf.contains(PinScope::Root));
    }

    #[test]
    fn ca_scopes_are_intermediate_and_root() {
        assert!(PinScope::Intermediate.is_ca());
        assert!(PinScope::Root.is_ca());
        assert!(!PinScope::Leaf.is_ca());
    }
}
