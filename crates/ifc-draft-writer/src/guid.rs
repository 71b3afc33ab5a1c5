// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC GlobalId generation
//!
//! IFC compresses a 128-bit identifier into 22 characters over a 64-symbol
//! alphabet. Domain objects use [`stable_guid`] keyed on their persistent
//! shape id so that re-exporting the same drawing yields the same GlobalIds;
//! relationship entities have no natural identity and use [`random_guid`].
//!
//! Stable ids come from a seeded non-cryptographic hash. This is an
//! identifier scheme, not a security primitive.

use rustc_hash::FxHasher;
use std::hash::Hasher;
use uuid::Uuid;

/// The IFC GlobalId alphabet (base 64, not RFC 4648)
const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Compress a 128-bit value into the 22-character IFC encoding
///
/// The first character carries the top 2 bits, the remaining 21 characters
/// 6 bits each.
fn encode(value: u128) -> String {
    let mut chars = [0u8; 22];
    let mut v = value;
    for slot in chars.iter_mut().rev() {
        *slot = ALPHABET[(v & 0x3F) as usize];
        v >>= 6;
    }
    // 21 * 6 bits consume everything but the top 2 bits, so the first
    // character is always in '0'..='3'
    String::from_utf8(chars.to_vec()).expect("alphabet is ASCII")
}

/// Generate a random GlobalId
///
/// Used for entities with no natural stable key (relationships). Values are
/// not reproducible across runs.
pub fn random_guid() -> String {
    encode(Uuid::new_v4().as_u128())
}

/// Derive a deterministic GlobalId from a stable key
///
/// Equal `(key, suffix)` pairs always produce the same GlobalId; the suffix
/// distinguishes the several entities one shape expands into (element,
/// property sets, quantity sets).
pub fn stable_guid(key: &str, suffix: &str) -> String {
    let mut first = FxHasher::default();
    first.write(key.as_bytes());
    first.write_u8(0x1f);
    first.write(suffix.as_bytes());
    let high = first.finish();

    let mut second = FxHasher::default();
    second.write_u64(high);
    second.write(suffix.as_bytes());
    second.write_u8(0x1f);
    second.write(key.as_bytes());
    let low = second.finish();

    encode(((high as u128) << 64) | low as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(guid: &str) {
        assert_eq!(guid.len(), 22);
        assert!(guid.bytes().all(|b| ALPHABET.contains(&b)));
        assert!(('0'..='3').contains(&guid.chars().next().unwrap()));
    }

    #[test]
    fn test_random_guid_shape() {
        assert_valid(&random_guid());
    }

    #[test]
    fn test_random_guids_differ() {
        assert_ne!(random_guid(), random_guid());
    }

    #[test]
    fn test_stable_guid_deterministic() {
        let a = stable_guid("shape-42", "pset");
        let b = stable_guid("shape-42", "pset");
        assert_eq!(a, b);
        assert_valid(&a);
    }

    #[test]
    fn test_stable_guid_suffix_distinguishes() {
        assert_ne!(stable_guid("shape-42", "pset"), stable_guid("shape-42", "qto"));
    }

    #[test]
    fn test_stable_guid_key_distinguishes() {
        assert_ne!(stable_guid("shape-42", "pset"), stable_guid("shape-43", "pset"));
    }

    #[test]
    fn test_encode_zero() {
        let guid = encode(0);
        assert_eq!(guid, "0".repeat(22));
    }
}
