//! Common-name redaction and issuer resolution.
//!
//! The core never looks at a raw subject string: everything that reaches
//! telemetry is redacted down to `"*." + last two labels`, which is specific
//! enough to group certificates by organisation without leaking a full
//! hostname.

/// One chain entry's identity as needed for summarisation: its raw DER (used
/// only to find the leaf's position in the chain) and, if the host adaptor
/// supplied one, its subject summary string.
#[derive(Debug, Clone, Copy)]
pub struct CertIdentity<'a> {
    pub der: &'a [u8],
    pub subject_summary: Option<&'a str>,
}

/// Redacts a subject summary string to `"*." + last-two-labels-lowercased`.
/// Returns `None` if the string has fewer than two dot-separated labels.
pub fn redact_common_name(summary: &str) -> Option<String> {
    let labels: Vec<&str> = summary.split('.').collect();
    if labels.len() < 2 {
        return None;
    }
    let last_two = &labels[labels.len() - 2..];
    Some(format!("*.{}", last_two.join(".").to_lowercase()))
}

/// `safeCommonName`: redacts a certificate's own subject summary, if one was
/// supplied by the host adaptor.
pub fn safe_common_name(subject_summary: Option<&str>) -> Option<String> {
    subject_summary.and_then(redact_common_name)
}

/// `safeIssuerCommonName`: finds the certificate immediately following the
/// leaf in `chain` (by byte-equal DER match), falling back to index 1 if the
/// leaf isn't found but the chain has at least two entries, and redacts that
/// certificate's subject summary. Falls back to the leaf's own subject
/// summary if no issuer candidate exists at all.
pub fn safe_issuer_common_name(leaf: CertIdentity<'_>, chain: &[CertIdentity<'_>]) -> Option<String> {
    match find_issuer(leaf.der, chain) {
        Some(issuer) => safe_common_name(issuer.subject_summary),
        None => safe_common_name(leaf.subject_summary),
    }
}

fn find_issuer<'a>(leaf_der: &[u8], chain: &'a [CertIdentity<'a>]) -> Option<&'a CertIdentity<'a>> {
    match chain.iter().position(|c| c.der == leaf_der) {
        Some(idx) => chain.get(idx + 1),
        None if chain.len() >= 2 => chain.get(1),
        None => None,
    }
}
