//! `Configuration`, its per-environment entries, and the builder used to
//! assemble one before handing it to [`crate::ConfigurationRegistry::update`].

use std::collections::HashMap;
use std::sync::Arc;

use pinguard_eval::PinGuardEvent;
use pinguard_policy::PolicySet;

use crate::mtls::SharedMtlsHook;

pub type TelemetrySink = Arc<dyn Fn(&PinGuardEvent) + Send + Sync>;
pub type RenewalCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// One environment's policy set and, optionally, its mTLS provider.
#[derive(Clone)]
pub struct EnvironmentConfig {
    pub policy_set: PolicySet,
    pub mtls_hook: Option<SharedMtlsHook>,
}

/// The whole process-wide configuration, as an immutable value swapped
/// atomically by [`crate::ConfigurationRegistry::update`].
#[derive(Clone, Default)]
pub struct Configuration {
    pub environments: HashMap<String, EnvironmentConfig>,
    pub current: String,
    pub telemetry_sink: Option<TelemetrySink>,
    pub on_renewal_required: Option<RenewalCallback>,
}

impl Configuration {
    /// The policy set for the current environment, or an empty, default-less
    /// set if the current environment has no registered entry.
    pub fn active_policy_set(&self) -> &PolicySet {
        static EMPTY: once_cell::sync::Lazy<PolicySet> =
            once_cell::sync::Lazy::new(|| PolicySet::new(Vec::new(), None));
        self.environments
            .get(&self.current)
            .map(|e| &e.policy_set)
            .unwrap_or(&EMPTY)
    }
}

/// Builds a [`Configuration`] one environment at a time.
#[derive(Default)]
pub struct ConfigurationBuilder {
    environments: HashMap<String, EnvironmentConfig>,
    current: String,
    telemetry_sink: Option<TelemetrySink>,
    on_renewal_required: Option<RenewalCallback>,
}

impl ConfigurationBuilder {
    pub fn new() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    pub fn environment(mut self, name: impl Into<String>, policy_set: PolicySet) -> ConfigurationBuilder {
        self.environments.insert(name.into(), EnvironmentConfig { policy_set, mtls_hook: None });
        self
    }

    pub fn environment_with_mtls_hook(
        mut self,
        name: impl Into<String>,
        policy_set: PolicySet,
        mtls_hook: SharedMtlsHook,
    ) -> ConfigurationBuilder {
        self.environments.insert(name.into(), EnvironmentConfig { policy_set, mtls_hook: Some(mtls_hook) });
        self
    }

    pub fn current(mut self, name: impl Into<String>) -> ConfigurationBuilder {
        self.current = name.into();
        self
    }

    pub fn telemetry_sink(mut self, sink: TelemetrySink) -> ConfigurationBuilder {
        self.telemetry_sink = Some(sink);
        self
    }

    pub fn on_renewal_required(mut self, callback: RenewalCallback) -> ConfigurationBuilder {
        self.on_renewal_required = Some(callback);
        self
    }

    pub fn build(self) -> Configuration {
        Configuration {
            environments: self.environments,
            current: self.current,
            telemetry_sink: self.telemetry_sink,
            on_renewal_required: self.on_renewal_required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_has_an_empty_default_less_policy_set() {
        let config = Configuration::default();
        let active = config.active_policy_set();
        assert!(active.policies.is_empty());
        assert!(active.default_policy.is_none());
    }

    #[test]
    fn unregistered_current_environment_falls_back_to_empty_set() {
        let config = ConfigurationBuilder::new().current("dev").build();
        assert!(config.active_policy_set().policies.is_empty());
    }

    #[test]
    fn builder_registers_the_named_environment() {
        let config = ConfigurationBuilder::new()
            .environment("prod", PolicySet::new(Vec::new(), None))
            .current("prod")
            .build();
        assert!(config.environments.contains_key("prod"));
    }
}
