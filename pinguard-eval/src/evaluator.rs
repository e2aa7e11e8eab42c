//! The trust-decision state machine: §4.5 of the pinning design, expressed
//! as a sequence of short-circuiting steps over one normalised host.

use tracing::{debug, trace, warn, Level};

use pinguard_policy::{Pin, PinScope, PinType, PolicySet};

use crate::types::{
    CertificateCandidate, ChainEntryInput, ChainPosition, ChainSummary, PinGuardEvent, Reason,
    SystemTrustOutcome, TrustDecision,
};

/// Logs `event` at the level §10 assigns its kind, and forwards it to
/// `sink` if one was supplied. Used both by [`evaluate`] (where events also
/// accumulate into the returned decision's log) and by callers emitting a
/// standalone mTLS event outside of an evaluation.
pub fn log_and_forward(event: &PinGuardEvent, sink: Option<&dyn Fn(&PinGuardEvent)>) {
    match event {
        PinGuardEvent::ChainSummaryRecorded { host, summary } => {
            trace!(host = %host, ?summary, "chain summary recorded");
        }
        PinGuardEvent::SystemTrustFailed { host, error_text } => {
            warn!(host = %host, error_text = ?error_text, "system trust evaluation failed");
        }
        PinGuardEvent::PinMismatch { host } => {
            warn!(host = %host, "no pin matched and no fallback applied");
        }
        PinGuardEvent::PolicyMissing { host } => {
            warn!(host = %host, "no pinning policy resolved for host");
        }
        PinGuardEvent::SystemTrustEvaluated { host, is_trusted } => {
            debug!(host = %host, is_trusted, "system trust evaluated");
        }
        PinGuardEvent::SystemTrustFailedPermissive { host } => {
            debug!(host = %host, "system trust failed, allowed by permissive strategy");
        }
        PinGuardEvent::PinMatched { host, matched_pins } => {
            debug!(host = %host, matched = matched_pins.len(), "pin matched");
        }
        PinGuardEvent::PinMismatchAllowedByFallback { host } => {
            debug!(host = %host, "pin mismatch allowed by system trust fallback");
        }
        PinGuardEvent::PinMismatchPermissive { host } => {
            debug!(host = %host, "pin mismatch allowed by permissive strategy");
        }
        PinGuardEvent::PinSetEmpty { host } => {
            debug!(host = %host, "policy has an empty pin set");
        }
        PinGuardEvent::MtlsIdentityUsed { host } => {
            debug!(host = %host, "mTLS identity provided to the peer");
        }
        PinGuardEvent::MtlsIdentityMissing { host } => {
            debug!(host = %host, "mTLS identity requested but unavailable");
        }
    }
    if let Some(sink) = sink {
        sink(event);
    }
}

fn emit(
    event: PinGuardEvent,
    events: &mut Vec<PinGuardEvent>,
    sink: Option<&dyn Fn(&PinGuardEvent)>,
) {
    log_and_forward(&event, sink);
    events.push(event);
}

fn pin_matches(pin: &Pin, candidate: &CertificateCandidate) -> bool {
    if !candidate.scope_contains(pin.scope) {
        return false;
    }
    match pin.pin_type {
        PinType::Spki => !candidate.spki_hash.is_empty() && candidate.spki_hash == pin.hash,
        PinType::Certificate => candidate.certificate_hash == pin.hash,
        PinType::Ca => candidate.position.is_ca() && candidate.certificate_hash == pin.hash,
    }
}

/// Evaluates a presented chain against the policy resolved for `host`,
/// producing exactly one [`TrustDecision`] and an ordered event log. Never
/// panics and never returns an error: every adverse condition is folded
/// into one of the eight [`Reason`] values.
pub fn evaluate(
    host: &str,
    chain: &[ChainEntryInput<'_>],
    system_trust: SystemTrustOutcome,
    policy_set: &PolicySet,
    sink: Option<&dyn Fn(&PinGuardEvent)>,
) -> TrustDecision {
    let host = pinguard_policy::normalize(host);
    let span = tracing::span!(Level::DEBUG, "pinguard_evaluate", host = %host);
    let _enter = span.enter();

    let mut events = Vec::new();

    let policy = match pinguard_policy::resolve(&host, policy_set) {
        Some(policy) => policy,
        None => {
            emit(PinGuardEvent::PolicyMissing { host: host.clone() }, &mut events, sink);
            return TrustDecision { is_trusted: false, reason: Reason::PolicyMissing, events };
        }
    };

    emit(
        PinGuardEvent::SystemTrustEvaluated { host: host.clone(), is_trusted: system_trust.is_trusted },
        &mut events,
        sink,
    );

    if policy.require_system_trust && !system_trust.is_trusted {
        return if policy.fail_strategy == pinguard_policy::FailStrategy::Permissive {
            emit(PinGuardEvent::SystemTrustFailedPermissive { host: host.clone() }, &mut events, sink);
            TrustDecision { is_trusted: true, reason: Reason::SystemTrustFailedPermissive, events }
        } else {
            emit(
                PinGuardEvent::SystemTrustFailed { host: host.clone(), error_text: system_trust.error_text.clone() },
                &mut events,
                sink,
            );
            TrustDecision { is_trusted: false, reason: Reason::TrustFailed, events }
        };
    }

    emit(
        PinGuardEvent::ChainSummaryRecorded { host: host.clone(), summary: ChainSummary::from_chain(chain) },
        &mut events,
        sink,
    );

    let candidates: Vec<CertificateCandidate> = chain
        .iter()
        .enumerate()
        .map(|(i, entry)| CertificateCandidate::from_entry(entry, ChainPosition::at(i, chain.len())))
        .collect();

    if policy.pins.is_empty() {
        emit(PinGuardEvent::PinSetEmpty { host: host.clone() }, &mut events, sink);
    } else {
        let matched_pins: Vec<Pin> = policy
            .pins
            .iter()
            .filter(|pin| candidates.iter().any(|c| pin_matches(pin, c)))
            .cloned()
            .collect();

        if !matched_pins.is_empty() {
            emit(PinGuardEvent::PinMatched { host: host.clone(), matched_pins }, &mut events, sink);
            return TrustDecision { is_trusted: true, reason: Reason::PinMatch, events };
        }
    }

    if policy.allow_system_trust_fallback && system_trust.is_trusted {
        emit(PinGuardEvent::PinMismatchAllowedByFallback { host: host.clone() }, &mut events, sink);
        TrustDecision { is_trusted: true, reason: Reason::PinMismatchAllowedByFallback, events }
    } else if policy.fail_strategy == pinguard_policy::FailStrategy::Permissive && system_trust.is_trusted {
        emit(PinGuardEvent::PinMismatchPermissive { host: host.clone() }, &mut events, sink);
        TrustDecision { is_trusted: true, reason: Reason::PinMismatchPermissive, events }
    } else {
        emit(PinGuardEvent::PinMismatch { host: host.clone() }, &mut events, sink);
        TrustDecision { is_trusted: false, reason: Reason::PinningFailed, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinguard_policy::{FailStrategy, HostPolicy, HostPattern, PinRole, PinningPolicy};

    fn pin(hash: &str, pin_type: PinType, scope: PinScope) -> Pin {
        Pin::new(pin_type, hash, PinRole::Primary, scope).unwrap()
    }

    fn policy_set_with(pattern: &str, policy: PinningPolicy) -> PolicySet {
        PolicySet::new(vec![HostPolicy { pattern: HostPattern::parse(pattern), policy }], None)
    }

    fn trusted() -> SystemTrustOutcome {
        SystemTrustOutcome { is_trusted: true, error_text: None }
    }

    fn untrusted() -> SystemTrustOutcome {
        SystemTrustOutcome { is_trusted: false, error_text: Some("untrusted root".to_string()) }
    }

    const H1: &str = "Y7EKzelfzqmyMnNRDIX8cecAf6wj1nk7nT25ws/qnVo=";

    #[test]
    fn policy_missing_yields_exactly_one_event() {
        let set = PolicySet::new(Vec::new(), None);
        let decision = evaluate("api.example.com", &[], untrusted(), &set, None);
        assert_eq!(decision.reason, Reason::PolicyMissing);
        assert!(!decision.is_trusted);
        assert_eq!(decision.events, vec![PinGuardEvent::PolicyMissing { host: "api.example.com".to_string() }]);
    }

    #[test]
    fn strict_requiring_trust_with_untrusted_system_fails() {
        let policy = PinningPolicy::new(
            vec![pin(H1, PinType::Spki, PinScope::Leaf)],
            FailStrategy::Strict,
            true,
            false,
        );
        let set = policy_set_with("api.example.com", policy);
        let decision = evaluate("api.example.com", &[], untrusted(), &set, None);
        assert!(!decision.is_trusted);
        assert_eq!(decision.reason, Reason::TrustFailed);
        assert_eq!(decision.events.len(), 2);
        assert!(matches!(decision.events[0], PinGuardEvent::SystemTrustEvaluated { .. }));
        assert!(matches!(decision.events[1], PinGuardEvent::SystemTrustFailed { .. }));
    }

    #[test]
    fn same_inputs_permissive_policy_succeeds_without_chain_summary() {
        let policy = PinningPolicy::new(
            vec![pin(H1, PinType::Spki, PinScope::Leaf)],
            FailStrategy::Permissive,
            true,
            false,
        );
        let set = policy_set_with("api.example.com", policy);
        let decision = evaluate("api.example.com", &[], untrusted(), &set, None);
        assert!(decision.is_trusted);
        assert_eq!(decision.reason, Reason::SystemTrustFailedPermissive);
        assert!(decision
            .events
            .iter()
            .any(|e| matches!(e, PinGuardEvent::SystemTrustFailedPermissive { .. })));
        assert!(!decision.events.iter().any(|e| matches!(e, PinGuardEvent::SystemTrustFailed { .. })));
        assert!(!decision.events.iter().any(|e| matches!(e, PinGuardEvent::ChainSummaryRecorded { .. })));
    }

    #[test]
    fn backup_pin_matches_when_primary_does_not() {
        // Pinning on the certificate hash (computed straight from DER)
        // avoids needing a real RSA/EC key just to exercise the backup-pin
        // fallback within the pin list.
        let leaf_der = b"leaf-certificate-bytes";
        let cert_hash = pinguard_hash::certificate_hash(leaf_der);
        let policy = PinningPolicy::new(
            vec![
                Pin::new(PinType::Certificate, H1, PinRole::Primary, PinScope::Leaf).unwrap(),
                Pin::new(PinType::Certificate, &cert_hash, PinRole::Backup, PinScope::Leaf).unwrap(),
            ],
            FailStrategy::Strict,
            false,
            false,
        );
        let set = policy_set_with("api.example.com", policy);
        let chain = [ChainEntryInput { der: leaf_der, key: None, subject_summary: None }];
        let decision = evaluate("api.example.com", &chain, trusted(), &set, None);
        assert!(decision.is_trusted);
        assert_eq!(decision.reason, Reason::PinMatch);
    }

    #[test]
    fn pin_mismatch_allowed_by_fallback_when_system_trusted() {
        let policy = PinningPolicy::new(
            vec![pin(H1, PinType::Certificate, PinScope::Leaf)],
            FailStrategy::Strict,
            false,
            true,
        );
        let set = policy_set_with("api.example.com", policy);
        let chain = [ChainEntryInput { der: b"does-not-match-h1", key: None, subject_summary: None }];
        let decision = evaluate("api.example.com", &chain, trusted(), &set, None);
        assert!(decision.is_trusted);
        assert_eq!(decision.reason, Reason::PinMismatchAllowedByFallback);
    }

    #[test]
    fn empty_pin_set_emits_event_and_proceeds() {
        let policy = PinningPolicy::new(Vec::new(), FailStrategy::Strict, false, false);
        let set = policy_set_with("api.example.com", policy);
        let decision = evaluate("api.example.com", &[], trusted(), &set, None);
        assert!(decision.events.iter().any(|e| matches!(e, PinGuardEvent::PinSetEmpty { .. })));
        assert_eq!(decision.reason, Reason::PinningFailed);
        assert!(!decision.is_trusted);
    }

    #[test]
    fn sink_receives_every_emitted_event() {
        use std::sync::{Arc, Mutex};
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let sink = move |event: &PinGuardEvent| seen_clone.lock().unwrap().push(event.clone());
        let set = PolicySet::new(Vec::new(), None);
        let decision = evaluate("api.example.com", &[], untrusted(), &set, Some(&sink));
        assert_eq!(*seen.lock().unwrap(), decision.events);
    }

    #[test]
    fn evaluate_runs_cleanly_under_a_tracing_subscriber() {
        // Exercises the `pinguard_evaluate` span and its debug/trace/warn
        // events end to end under a real subscriber, rather than just
        // trusting that the macro calls compile.
        use tracing_subscriber::{fmt, EnvFilter};

        let subscriber = fmt()
            .with_env_filter(EnvFilter::new("trace"))
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let policy = PinningPolicy::new(
                vec![pin(H1, PinType::Spki, PinScope::Leaf)],
                FailStrategy::Strict,
                true,
                false,
            );
            let set = policy_set_with("api.example.com", policy);
            let decision = evaluate("api.example.com", &[], untrusted(), &set, None);
            assert_eq!(decision.reason, Reason::TrustFailed);
        });
    }
}
