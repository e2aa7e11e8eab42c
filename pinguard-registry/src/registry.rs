//! [`ConfigurationRegistry`]: the process-wide, swap-only holder of the
//! active configuration.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use pinguard_eval::{log_and_forward, ChainEntryInput, PinGuardEvent, SystemTrustOutcome, TrustDecision};

use crate::config::{Configuration, ConfigurationBuilder};
use crate::mtls::MtlsOutcome;

/// Process-wide registry of the active pinning configuration.
///
/// Every read takes a cheap atomic snapshot (`ArcSwap::load_full`), so a
/// concurrent `evaluate` always sees one consistent `(policySet,
/// telemetrySink, mtlsHook)` triple for the whole decision, never a mix of
/// an old policy set with a new sink. Concurrent `update`s linearise into
/// whatever order the underlying atomic swap imposes; the final
/// configuration is simply the last one stored.
pub struct ConfigurationRegistry {
    inner: ArcSwap<Configuration>,
}

impl ConfigurationRegistry {
    /// A registry with no environments registered and an empty,
    /// default-less active policy set.
    pub fn new() -> ConfigurationRegistry {
        ConfigurationRegistry { inner: ArcSwap::from_pointee(Configuration::default()) }
    }

    /// Builds a new configuration via `f` and atomically installs it.
    pub fn configure(&self, f: impl FnOnce(ConfigurationBuilder) -> ConfigurationBuilder) {
        let configuration = f(ConfigurationBuilder::new()).build();
        self.update(configuration);
    }

    /// Atomically replaces the active configuration.
    pub fn update(&self, configuration: Configuration) {
        if !configuration.current.is_empty() && !configuration.environments.contains_key(&configuration.current) {
            warn!(
                environment = %configuration.current,
                "registry updated to an environment with no registered entry; its default-less, empty policy set will be used"
            );
        }
        info!(environment = %configuration.current, "configuration registry updated");
        self.inner.store(Arc::new(configuration));
    }

    /// A snapshot of the currently active configuration.
    pub fn current_configuration(&self) -> Arc<Configuration> {
        self.inner.load_full()
    }

    /// Runs one trust evaluation against the current snapshot's active
    /// policy set and telemetry sink.
    pub fn evaluate(&self, host: &str, chain: &[ChainEntryInput<'_>], system_trust: SystemTrustOutcome) -> TrustDecision {
        let configuration = self.current_configuration();
        let sink = configuration.telemetry_sink.as_deref().map(|f| f as &dyn Fn(&PinGuardEvent));
        pinguard_eval::evaluate(host, chain, system_trust, configuration.active_policy_set(), sink)
    }

    /// Requests a client identity from the current environment's mTLS hook,
    /// forwarding the resulting `MTLS_IDENTITY_USED`/`MTLS_IDENTITY_MISSING`
    /// event to the telemetry sink. Never owns the returned identity bytes
    /// beyond handing them back to the caller.
    pub fn request_mtls_identity(&self, host: &str) -> MtlsOutcome {
        let configuration = self.current_configuration();
        let sink = configuration.telemetry_sink.as_deref().map(|f| f as &dyn Fn(&PinGuardEvent));
        let host = pinguard_policy::normalize(host);

        let hook = configuration.environments.get(&configuration.current).and_then(|e| e.mtls_hook.as_ref());
        let Some(hook) = hook else {
            log_and_forward(&PinGuardEvent::MtlsIdentityMissing { host }, sink);
            return MtlsOutcome::Unavailable;
        };

        let outcome = hook.provide(&host);
        match &outcome {
            MtlsOutcome::Success(_) => {
                log_and_forward(&PinGuardEvent::MtlsIdentityUsed { host }, sink);
            }
            MtlsOutcome::RenewalRequired => {
                if let Some(callback) = &configuration.on_renewal_required {
                    callback(&host);
                }
                log_and_forward(&PinGuardEvent::MtlsIdentityMissing { host }, sink);
            }
            MtlsOutcome::Unavailable => {
                log_and_forward(&PinGuardEvent::MtlsIdentityMissing { host }, sink);
            }
        }
        outcome
    }
}

impl Default for ConfigurationRegistry {
    fn default() -> ConfigurationRegistry {
        ConfigurationRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinguard_policy::{FailStrategy, PinningPolicy, PolicySet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn initial_state_has_no_environments() {
        let registry = ConfigurationRegistry::new();
        let decision = registry.evaluate("example.com", &[], SystemTrustOutcome { is_trusted: true, error_text: None });
        assert_eq!(decision.reason, pinguard_eval::Reason::PolicyMissing);
    }

    #[test]
    fn update_is_visible_to_a_subsequent_evaluate() {
        let registry = ConfigurationRegistry::new();
        let policy = PinningPolicy::new(Vec::new(), FailStrategy::Permissive, false, true);
        registry.configure(|b| {
            b.environment(
                crate::environment::PROD,
                PolicySet::new(Vec::new(), Some(policy.clone())),
            )
            .current(crate::environment::PROD)
        });
        let decision = registry.evaluate("example.com", &[], SystemTrustOutcome { is_trusted: true, error_text: None });
        assert!(decision.is_trusted);
    }

    #[test]
    fn missing_mtls_hook_emits_identity_missing_and_returns_unavailable() {
        let registry = ConfigurationRegistry::new();
        let outcome = registry.request_mtls_identity("example.com");
        assert!(matches!(outcome, MtlsOutcome::Unavailable));
    }

    #[test]
    fn mtls_hook_success_is_forwarded_to_the_sink() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        let sink: crate::config::TelemetrySink = Arc::new(move |event: &PinGuardEvent| {
            if matches!(event, PinGuardEvent::MtlsIdentityUsed { .. }) {
                seen_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        let hook: crate::mtls::SharedMtlsHook = Arc::new(|_: &str| {
            MtlsOutcome::Success(crate::mtls::MtlsIdentity { identity: vec![1], chain: vec![] })
        });
        let registry = ConfigurationRegistry::new();
        registry.configure(|b| {
            b.environment_with_mtls_hook(crate::environment::PROD, PolicySet::new(Vec::new(), None), hook)
                .current(crate::environment::PROD)
                .telemetry_sink(sink)
        });
        registry.request_mtls_identity("example.com");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
