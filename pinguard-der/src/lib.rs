// This crate carries forward the licensing posture of the ASN.1 substrate
// it was generalized from: dual licensed under the terms of the Apache
// License, Version 2.0, and the BSD License.

#![forbid(unsafe_code)]

pub mod length;
pub mod spki;
pub mod tlv;

pub use length::{decode_length, encode_length, DerError};
pub use tlv::{count_sibling_elements, find_all, read_tlv, Tlv};
