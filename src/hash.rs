use std::hash::{BuildHasher, BuildHasherDefault, Hasher};
use twox_hash::XxHash64;

/// Deterministic hasher family used when no other is supplied.
///
/// Every instance built from it uses the same seed, so two sketches fed the
/// same items end up in the same state.
pub type DefaultBuildHasher = BuildHasherDefault<XxHash64>;

const FIRST_SALT: &[u8] = b"probe-1:";
const SECOND_SALT: &[u8] = b"probe-2:";

/// 64-bit digest of `item`.
pub(crate) fn hash_str<H: BuildHasher>(item: &str, build_hasher: &H) -> u64 {
    let mut hasher = build_hasher.build_hasher();
    hasher.write(item.as_bytes());
    hasher.finish()
}

/// 64-bit digest of `item` prefixed with a domain separating `salt`.
pub(crate) fn salted_hash<H: BuildHasher>(salt: &[u8], item: &str, build_hasher: &H) -> u64 {
    let mut hasher = build_hasher.build_hasher();
    hasher.write(salt);
    hasher.write(item.as_bytes());
    hasher.finish()
}

/// The `k` bit indices probed for one item, generated by double hashing.
///
/// The `i`-th index is `(h1 + i * h2) mod m` where `h1` and `h2` are two
/// independently salted digests of the item. Only two digests are computed
/// regardless of `k`.
#[derive(Debug, Clone)]
pub struct Hashes {
    next: u64,
    step: u64,
    modulus: u64,
    remaining: usize,
}

impl Hashes {
    /// Derives `num_hashes` indices in `[0, num_bits)` for `item`.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` is 0.
    pub fn new<H: BuildHasher>(
        item: &str,
        num_bits: u64,
        num_hashes: usize,
        build_hasher: &H,
    ) -> Self {
        let h1 = salted_hash(FIRST_SALT, item, build_hasher);
        let h2 = salted_hash(SECOND_SALT, item, build_hasher);
        Self::from_digests(h1, h2, num_bits, num_hashes)
    }

    pub(crate) fn from_digests(h1: u64, h2: u64, num_bits: u64, num_hashes: usize) -> Self {
        assert!(num_bits > 0, "num_bits must be > 0");
        // (h1 + i*h2) mod m == (h1 mod m + i * (h2 mod m)) mod m
        Self {
            next: h1 % num_bits,
            step: h2 % num_bits,
            modulus: num_bits,
            remaining: num_hashes,
        }
    }
}

impl Iterator for Hashes {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let index = self.next;
        self.next = ((index as u128 + self.step as u128) % self.modulus as u128) as u64;
        Some(index as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Hashes {}
