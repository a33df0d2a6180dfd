use crate::error::{Error, Result};
use crate::hash::{DefaultBuildHasher, Hashes};
use crate::set_membership::SetMembership;
use fixedbitset::FixedBitSet;
use std::f64::consts::LN_2;
use std::fmt::{Debug, Formatter};
use std::hash::BuildHasher;

/// Bloom filter over string items.
///
/// Inserted items are always reported as present. Items never inserted are
/// reported as present with a probability that grows with the load factor,
/// roughly `(1 - e^(-kn/m))^k` after `n` insertions.
///
/// Bits are never cleared, so there is no removal.
#[derive(Clone, PartialEq, Eq)]
pub struct MembershipFilter<H = DefaultBuildHasher> {
    bits: FixedBitSet,
    num_hashes: usize,
    build_hasher: H,
}

impl MembershipFilter {
    /// Creates a filter with `num_bits` bits probed `num_hashes` times per item.
    pub fn new(num_bits: usize, num_hashes: usize) -> Result<Self> {
        Self::with_hasher(num_bits, num_hashes, DefaultBuildHasher::default())
    }

    /// Sizes a filter for `num_items` insertions at the given false positive
    /// rate.
    pub fn with_probability(num_items: usize, probability: f64) -> Result<Self> {
        if num_items == 0 {
            return Err(Error::invalid_parameter("num_items", "> 0", num_items));
        }
        if !(0. < probability && probability < 1.) {
            return Err(Error::invalid_parameter(
                "probability",
                "a value in the range (0, 1)",
                probability,
            ));
        }
        let bits = (-(num_items as f64) * probability.ln() / (LN_2 * LN_2)).ceil();
        let num_hashes = (bits / num_items as f64 * LN_2).ceil().max(1.);
        Self::new(bits as usize, num_hashes as usize)
    }
}

impl<H> MembershipFilter<H> {
    pub fn with_hasher(num_bits: usize, num_hashes: usize, build_hasher: H) -> Result<Self> {
        if num_bits == 0 {
            return Err(Error::invalid_parameter("num_bits", "> 0", num_bits));
        }
        if num_hashes == 0 {
            return Err(Error::invalid_parameter("num_hashes", "> 0", num_hashes));
        }
        tracing::debug!(num_bits, num_hashes, "created membership filter");
        Ok(Self {
            bits: FixedBitSet::with_capacity(num_bits),
            num_hashes,
            build_hasher,
        })
    }

    pub fn num_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Indices of the set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    /// Returns `true` while nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.bits_set() == 0
    }

    /// Approximate number of distinct items inserted, derived from the fill
    /// ratio. Infinite once every bit is set.
    pub fn estimated_len(&self) -> f64 {
        let m = self.num_bits() as f64;
        let k = self.num_hashes as f64;
        let ones = self.bits_set() as f64;
        if ones >= m {
            return f64::INFINITY;
        }
        -m / k * (1. - ones / m).ln()
    }

    /// Current false positive probability, `(X/m)^k` for `X` set bits.
    pub fn false_positive_rate(&self) -> f64 {
        let fill = self.bits_set() as f64 / self.num_bits() as f64;
        fill.powi(self.num_hashes as i32)
    }
}

impl<H: BuildHasher> MembershipFilter<H> {
    fn hashes(&self, item: &str) -> Hashes {
        Hashes::new(
            item,
            self.bits.len() as u64,
            self.num_hashes,
            &self.build_hasher,
        )
    }

    /// Inserts `item`. Empty strings are ignored.
    pub fn add(&mut self, item: &str) {
        if item.is_empty() {
            return;
        }
        for index in self.hashes(item) {
            self.bits.insert(index);
        }
    }

    /// Returns `true` if `item` may have been inserted, `false` if it
    /// definitely was not. Empty strings are never contained.
    pub fn contains(&self, item: &str) -> bool {
        if item.is_empty() {
            return false;
        }
        self.hashes(item).all(|index| self.bits.contains(index))
    }

    pub fn might_contain(&self, item: &str) -> bool {
        self.contains(item)
    }
}

impl<H: BuildHasher> SetMembership for MembershipFilter<H> {
    fn contains(&self, item: &str) -> bool {
        MembershipFilter::contains(self, item)
    }

    fn add(&mut self, item: &str) {
        MembershipFilter::add(self, item)
    }
}

impl<H> Debug for MembershipFilter<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MembershipFilter {{ num_bits: {}, num_hashes: {}, bits_set: {} }}",
            self.bits.len(),
            self.num_hashes,
            self.bits_set()
        )
    }
}
