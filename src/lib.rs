// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! A certificate-pinning trust-decision engine for TLS clients.
//!
//! This facade crate re-exports the pieces a host application actually
//! wires together: the policy data model and its host pattern matcher, the
//! pin hasher, the certificate summariser, the trust evaluator, the
//! remote-configuration verifier, and the configuration registry that ties
//! them to a running process.
//!
//! The crate never installs a `tracing` subscriber itself — that's a host
//! decision — and it never reads the filesystem, network, or any
//! environment variable beyond `tracing`'s own `RUST_LOG`-style filtering,
//! which the host configures when it installs its own subscriber.

#![forbid(unsafe_code)]

pub use pinguard_error::PinGuardError;

pub use pinguard_policy::{
    normalize, FailStrategy, HostPattern, HostPolicy, Pin, PinRole, PinScope, PinType,
    PinningPolicy, PolicySet,
};

pub use pinguard_hash::{certificate_hash, spki_hash, KeyType};

pub use pinguard_cert::{
    redact_common_name, safe_common_name, safe_issuer_common_name, subject_alternative_name_count,
    CertIdentity,
};

pub use pinguard_eval::{
    evaluate, log_and_forward, CertificateCandidate, ChainEntryInput, ChainPosition, ChainSummary,
    KeyInfo, PinGuardEvent, Reason, SystemTrustOutcome, TrustDecision,
};

pub use pinguard_remote::{
    public_key_from_ec, verify as verify_remote_config, verify_hmac, verify_public_key,
    PublicKeyLookup, RemoteConfigBlob, SecretLookup, SignatureType,
};

pub use pinguard_registry::{
    environment, Configuration, ConfigurationBuilder, ConfigurationRegistry, EnvironmentConfig,
    MtlsHook, MtlsIdentity, MtlsOutcome, RenewalCallback, SharedMtlsHook, TelemetrySink,
};
