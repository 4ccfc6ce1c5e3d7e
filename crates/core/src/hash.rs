//! FNV-1a 64-bit hashing
//!
//! Used for daily-challenge seeds and for board change detection in snapshots.
//! The result must never change between releases: daily seeds are derived from it.

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01B3;

/// FNV-1a over a byte stream.
pub fn fnv1a64_bytes(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut h = OFFSET_BASIS;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(PRIME);
    }
    h
}

/// FNV-1a over the UTF-8 bytes of `s`.
pub fn fnv1a64_str(s: &str) -> u64 {
    fnv1a64_bytes(s.bytes())
}
