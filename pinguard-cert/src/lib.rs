// This file is dual licensed under the terms of the Apache License, Version
// 2.0, and the BSD License. See the LICENSE file in the root of this repository
// for complete details.

//! Best-effort certificate summary fields used for telemetry only: a
//! redacted common name, a redacted issuer common name, and a SAN count.
//! None of this feeds a trust decision — see `pinguard-eval` for that.

#![forbid(unsafe_code)]

pub mod san;
pub mod summary;

pub use san::subject_alternative_name_count;
pub use summary::{redact_common_name, safe_common_name, safe_issuer_common_name, CertIdentity};
