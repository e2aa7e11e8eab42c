//! `PinningPolicy`, `HostPolicy`, and `PolicySet`.

use crate::host_pattern::HostPattern;
use crate::pin::Pin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do when a policy's pins don't match a presented chain but the
/// platform's own system-trust evaluator accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FailStrategy {
    Strict,
    Permissive,
}

/// An immutable pinning policy: the pin set to evaluate against, and the
/// rules governing how strictly to enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PinningPolicy {
    pub pins: Vec<Pin>,
    pub fail_strategy: FailStrategy,
    pub require_system_trust: bool,
    pub allow_system_trust_fallback: bool,
}

impl PinningPolicy {
    pub fn new(
        pins: Vec<Pin>,
        fail_strategy: FailStrategy,
        require_system_trust: bool,
        allow_system_trust_fallback: bool,
    ) -> PinningPolicy {
        PinningPolicy {
            pins,
            fail_strategy,
            require_system_trust,
            allow_system_trust_fallback,
        }
    }
}

/// One entry in a [`PolicySet`]: a host pattern and the policy to apply when
/// it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HostPolicy {
    pub pattern: HostPattern,
    pub policy: PinningPolicy,
}

/// The complete policy tree for one environment: an ordered list of
/// host-specific policies plus an optional fallback applied when nothing
/// else matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PolicySet {
    pub policies: Vec<HostPolicy>,
    pub default_policy: Option<PinningPolicy>,
}

impl PolicySet {
    pub fn new(policies: Vec<HostPolicy>, default_policy: Option<PinningPolicy>) -> PolicySet {
        PolicySet { policies, default_policy }
    }

    /// Decodes a `PolicySet` from the JSON form described in this module's
    /// serde derives. This is how a host loads a policy tree it received
    /// out of band, e.g. a verified [`RemoteConfigBlob`](https://docs.rs/pinguard-remote)
    /// payload.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<PolicySet, pinguard_error::PinGuardError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::{PinRole, PinScope, PinType};

    #[test]
    fn empty_pin_list_is_legal() {
        let policy = PinningPolicy::new(Vec::new(), FailStrategy::Strict, true, false);
        assert!(policy.pins.is_empty());
    }

    #[test]
    fn policy_set_default_is_optional() {
        let set = PolicySet::new(Vec::new(), None);
        assert!(set.default_policy.is_none());
    }

    #[test]
    fn pins_with_same_identity_but_different_scope_are_distinct() {
        let hash = "Y7EKzelfzqmyMnNRDIX8cecAf6wj1nk7nT25ws/qnVo=";
        let leaf_pin = Pin::new(PinType::Spki, hash, PinRole::Primary, PinScope::Leaf).unwrap();
        let root_pin = Pin::new(PinType::Spki, hash, PinRole::Backup, PinScope::Root).unwrap();
        assert_eq!(leaf_pin.identity(), root_pin.identity());
        assert_ne!(leaf_pin.scope, root_pin.scope);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn policy_set_round_trips_through_json() {
        use crate::host_pattern::HostPattern;

        let hash = "Y7EKzelfzqmyMnNRDIX8cecAf6wj1nk7nT25ws/qnVo=";
        let pin = Pin::new(PinType::Spki, hash, PinRole::Primary, PinScope::Leaf).unwrap();
        let policy = PinningPolicy::new(vec![pin], FailStrategy::Permissive, true, false);
        let set = PolicySet::new(
            vec![HostPolicy { pattern: HostPattern::parse("*.example.com"), policy: policy.clone() }],
            Some(policy),
        );

        let json = serde_json::to_string(&set).unwrap();
        // HostPattern serializes as its bare rawValue string, not a tagged object.
        assert!(json.contains("\"*.example.com\""));
        // Pin's `type` field is renamed from `pin_type`.
        assert!(json.contains("\"type\":\"Spki\""));

        let round_tripped: PolicySet = serde_json::from_str(&json).unwrap();
        assert_eq!(round_tripped, set);

        let decoded = PolicySet::from_json(&json).unwrap();
        assert_eq!(decoded, set);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_wraps_decode_failures_in_policy_decode() {
        let err = PolicySet::from_json("not json").unwrap_err();
        assert!(matches!(err, pinguard_error::PinGuardError::PolicyDecode(_)));
    }
}
