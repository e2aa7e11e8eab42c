//! The mTLS provider boundary: how an environment supplies a client
//! identity when the peer requests one. The registry never owns identity
//! bytes; it only forwards `MTLS_IDENTITY_USED` / `MTLS_IDENTITY_MISSING`
//! events to its sink and, on `RenewalRequired`, invokes an optional
//! callback.

use std::sync::Arc;

/// An opaque client identity plus the chain presented alongside it. The
/// registry never inspects either field.
#[derive(Debug, Clone)]
pub struct MtlsIdentity {
    pub identity: Vec<u8>,
    pub chain: Vec<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub enum MtlsOutcome {
    Success(MtlsIdentity),
    RenewalRequired,
    Unavailable,
}

pub trait MtlsHook: Send + Sync {
    fn provide(&self, host: &str) -> MtlsOutcome;
}

impl<F: Fn(&str) -> MtlsOutcome + Send + Sync> MtlsHook for F {
    fn provide(&self, host: &str) -> MtlsOutcome {
        self(host)
    }
}

pub type SharedMtlsHook = Arc<dyn MtlsHook>;
