//! A minimal tag-length-value reader, deliberately weaker than a full DER
//! parser: it reads exactly one element and hands back its tag and value
//! slice, leaving structural validation (is this really a certificate? does
//! this SEQUENCE nest correctly end-to-end?) to the caller. This is the
//! right amount of parsing for a best-effort scanner that must degrade
//! gracefully on malformed or truncated input rather than reject it outright.

use crate::length::{decode_length, DerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tlv<'a> {
    pub tag: u8,
    pub value: &'a [u8],
    /// Total bytes consumed from the start of the input, including the tag
    /// and length octets.
    pub consumed: usize,
}

/// Reads one DER element from the start of `data`.
pub fn read_tlv(data: &[u8]) -> Result<Tlv<'_>, DerError> {
    let tag = *data.first().ok_or(DerError::Truncated)?;
    let (len, len_octets) = decode_length(&data[1..])?;
    let start = 1 + len_octets;
    let end = start.checked_add(len).ok_or(DerError::Truncated)?;
    let value = data.get(start..end).ok_or(DerError::Truncated)?;
    Ok(Tlv {
        tag,
        value,
        consumed: end,
    })
}

pub const TAG_BOOLEAN: u8 = 0x01;
pub const TAG_OCTET_STRING: u8 = 0x04;
pub const TAG_SEQUENCE: u8 = 0x30;

/// Reads a sequence of sibling TLVs packed back-to-back inside `data`,
/// stopping at the first parse failure or at the end of the slice.
/// Used to count the top-level elements of a SEQUENCE's contents.
pub fn count_sibling_elements(mut data: &[u8]) -> usize {
    let mut count = 0usize;
    while !data.is_empty() {
        match read_tlv(data) {
            Ok(tlv) => {
                count += 1;
                data = &data[tlv.consumed..];
            }
            Err(_) => break,
        }
    }
    count
}

/// Returns every byte offset in `haystack` at which `needle` occurs.
/// A plain substring search is adequate here: the caller is hunting for an
/// OID's DER encoding, which is short and has no useful internal structure
/// to exploit for a faster search, and the inputs (single certificates) are
/// small enough that `O(n*m)` is not a concern.
pub fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return Vec::new();
    }
    (0..=haystack.len() - needle.len())
        .filter(|&i| &haystack[i..i + needle.len()] == needle)
        .collect()
}
