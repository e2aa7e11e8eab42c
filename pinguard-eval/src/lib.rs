//! The trust-decision state machine.
//!
//! Given a presented certificate chain, a system-trust outcome, a target
//! host, and the policy set to evaluate against, [`evaluate`] produces
//! exactly one [`TrustDecision`] and never raises: every adverse condition
//! becomes one of eight [`Reason`] values, and every intermediate step is
//! recorded as a [`PinGuardEvent`] in the decision's log (and optionally
//! streamed to a sink as it happens).

#![forbid(unsafe_code)]

pub mod evaluator;
pub mod types;

pub use evaluator::{evaluate, log_and_forward};
pub use types::{
    CertificateCandidate, ChainEntryInput, ChainPosition, ChainSummary, KeyInfo, PinGuardEvent,
    Reason, SystemTrustOutcome, TrustDecision,
};
