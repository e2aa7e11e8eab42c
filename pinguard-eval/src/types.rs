//! Inbound chain adaptor types, derived per-evaluation data, and the
//! outbound event/decision vocabulary.

use pinguard_hash::KeyType;
use pinguard_policy::{Pin, PinScope};

/// The chain position a derived [`CertificateCandidate`] occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPosition {
    Leaf,
    Intermediate,
    Root,
}

impl ChainPosition {
    /// Index 0 is always `Leaf`. The last index is `Root`, *unless* the
    /// chain has exactly one element, in which case that element stays
    /// `Leaf` (the LEAF branch is taken before the end-of-chain check).
    pub fn at(index: usize, chain_len: usize) -> ChainPosition {
        if index == 0 {
            ChainPosition::Leaf
        } else if index == chain_len - 1 {
            ChainPosition::Root
        } else {
            ChainPosition::Intermediate
        }
    }

    pub fn to_pin_scope(self) -> PinScope {
        match self {
            ChainPosition::Leaf => PinScope::Leaf,
            ChainPosition::Intermediate => PinScope::Intermediate,
            ChainPosition::Root => PinScope::Root,
        }
    }

    pub fn is_ca(self) -> bool {
        matches!(self, ChainPosition::Intermediate | ChainPosition::Root)
    }
}

/// A public key as the host's TLS stack presents it: an algorithm tag, a
/// size in bits (carried for diagnostics only), and the key's external byte
/// representation (PKCS#1 for RSA, the `ECPoint` octet string for EC).
#[derive(Debug, Clone)]
pub struct KeyInfo<'a> {
    pub key_type: KeyType,
    pub key_size_bits: u32,
    pub key_bytes: &'a [u8],
}

/// One certificate as the host's chain adaptor exposes it.
#[derive(Debug, Clone)]
pub struct ChainEntryInput<'a> {
    pub der: &'a [u8],
    pub key: Option<KeyInfo<'a>>,
    pub subject_summary: Option<&'a str>,
}

/// The outcome of the platform's own system-trust evaluator.
#[derive(Debug, Clone, Default)]
pub struct SystemTrustOutcome {
    pub is_trusted: bool,
    pub error_text: Option<String>,
}

/// Derived, per-evaluation hash data for one chain position. `spki_hash` is
/// empty when the candidate's public key could not be extracted or hashed;
/// an empty string can never equal a base64-of-SHA-256 pin hash, so this is
/// a safe way for a hashing failure to become "does not match" rather than
/// an error.
#[derive(Debug, Clone)]
pub struct CertificateCandidate {
    pub position: ChainPosition,
    pub spki_hash: String,
    pub certificate_hash: String,
}

impl CertificateCandidate {
    pub fn from_entry(entry: &ChainEntryInput<'_>, position: ChainPosition) -> CertificateCandidate {
        let spki_hash = entry
            .key
            .as_ref()
            .and_then(|k| pinguard_hash::spki_hash(k.key_type, k.key_bytes).ok())
            .unwrap_or_default();
        CertificateCandidate {
            position,
            spki_hash,
            certificate_hash: pinguard_hash::certificate_hash(entry.der),
        }
    }

    pub fn scope_contains(&self, pin_scope: PinScope) -> bool {
        self.position.to_pin_scope().contains(pin_scope)
    }
}

/// Redacted, telemetry-only summary of a presented chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    pub leaf_common_name: Option<String>,
    pub issuer_common_name: Option<String>,
    pub san_count: u32,
}

impl ChainSummary {
    pub fn from_chain(chain: &[ChainEntryInput<'_>]) -> ChainSummary {
        let Some(leaf) = chain.first() else {
            return ChainSummary { leaf_common_name: None, issuer_common_name: None, san_count: 0 };
        };
        let identities: Vec<pinguard_cert::CertIdentity<'_>> = chain
            .iter()
            .map(|c| pinguard_cert::CertIdentity { der: c.der, subject_summary: c.subject_summary })
            .collect();
        let leaf_identity = identities[0];
        ChainSummary {
            leaf_common_name: pinguard_cert::safe_common_name(leaf.subject_summary),
            issuer_common_name: pinguard_cert::safe_issuer_common_name(leaf_identity, &identities),
            san_count: pinguard_cert::subject_alternative_name_count(leaf.der),
        }
    }
}

/// The reason a [`TrustDecision`] landed where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    PinMatch,
    /// Reserved for a policy shape (system trust alone, no pinning
    /// requirement) that this evaluator's state machine never actually
    /// reaches; kept in the enum for exhaustive matching at every site that
    /// branches on `Reason`.
    SystemTrustAllowed,
    SystemTrustFailedPermissive,
    PinMismatchAllowedByFallback,
    PinMismatchPermissive,
    TrustFailed,
    PolicyMissing,
    PinningFailed,
}

impl Reason {
    pub fn is_trusted(self) -> bool {
        matches!(
            self,
            Reason::PinMatch
                | Reason::SystemTrustAllowed
                | Reason::SystemTrustFailedPermissive
                | Reason::PinMismatchAllowedByFallback
                | Reason::PinMismatchPermissive
        )
    }
}

/// One entry in the ordered event log, named after the condition it
/// records. Every variant carries the host it occurred for, since the log
/// from one evaluation never mixes hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinGuardEvent {
    PolicyMissing { host: String },
    SystemTrustEvaluated { host: String, is_trusted: bool },
    SystemTrustFailed { host: String, error_text: Option<String> },
    SystemTrustFailedPermissive { host: String },
    ChainSummaryRecorded { host: String, summary: ChainSummary },
    PinMatched { host: String, matched_pins: Vec<Pin> },
    PinMismatch { host: String },
    PinMismatchAllowedByFallback { host: String },
    PinMismatchPermissive { host: String },
    PinSetEmpty { host: String },
    MtlsIdentityUsed { host: String },
    MtlsIdentityMissing { host: String },
}

/// The outcome of one evaluation: whether to trust the connection, why, and
/// the full ordered log of events that led there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustDecision {
    pub is_trusted: bool,
    pub reason: Reason,
    pub events: Vec<PinGuardEvent>,
}
