//! The process-wide configuration registry: environments, the active one,
//! an optional mTLS hook per environment, and an optional telemetry sink,
//! all swapped atomically so concurrent evaluations never see a torn state.

#![forbid(unsafe_code)]

pub mod config;
pub mod environment;
pub mod mtls;
pub mod registry;

pub use config::{Configuration, ConfigurationBuilder, EnvironmentConfig, RenewalCallback, TelemetrySink};
pub use mtls::{MtlsHook, MtlsIdentity, MtlsOutcome, SharedMtlsHook};
pub use registry::ConfigurationRegistry;
