//! Crash-safe `subjectAlternativeName` counting.
//!
//! This is a best-effort scanner, not a certificate parser: it never
//! constructs a full DER tree, never validates that the input is actually a
//! certificate, and always terminates with a plain integer rather than an
//! error. It exists purely to feed telemetry (`ChainSummary.sanCount`), so a
//! wrong answer on malformed input is acceptable; a panic or an out-of-bounds
//! read is not.

use pinguard_der::tlv::{count_sibling_elements, read_tlv, TAG_BOOLEAN, TAG_OCTET_STRING};
use pinguard_der::{find_all, Tlv};

/// The DER encoding of the `id-ce-subjectAltName` OID, as it appears inside
/// an `X509v3 Extension`'s `extnID` field.
const SAN_OID: [u8; 5] = [0x06, 0x03, 0x55, 0x1d, 0x11];

/// Scans `der` for every occurrence of the SAN OID, attempts to parse each
/// one as an `Extension`, and returns the largest successfully-parsed SAN
/// element count. Returns 0 if no occurrence parses.
pub fn subject_alternative_name_count(der: &[u8]) -> u32 {
    find_all(der, &SAN_OID)
        .into_iter()
        .filter_map(|offset| parse_san_extension_at(&der[offset + SAN_OID.len()..]))
        .max()
        .unwrap_or(0)
}

/// `data` starts immediately after the OID. An `Extension` is
/// `SEQUENCE { extnID OID, critical BOOLEAN DEFAULT FALSE, extnValue OCTET STRING }`,
/// but we've already consumed the OID (and the caller found it via a raw
/// byte search rather than a SEQUENCE walk), so we just skip an optional
/// BOOLEAN and expect an OCTET STRING wrapping a SEQUENCE of GeneralNames.
fn parse_san_extension_at(data: &[u8]) -> Option<u32> {
    let after_critical = match read_tlv(data) {
        Ok(tlv) if tlv.tag == TAG_BOOLEAN => &data[tlv.consumed..],
        _ => data,
    };

    let octet_string = read_tlv(after_critical).ok()?;
    if octet_string.tag != TAG_OCTET_STRING {
        return None;
    }

    let san_sequence: Tlv<'_> = read_tlv(octet_string.value).ok()?;
    if san_sequence.tag != pinguard_der::tlv::TAG_SEQUENCE {
        return None;
    }

    Some(count_sibling_elements(san_sequence.value) as u32)
}
