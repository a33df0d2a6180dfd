//! HyperLogLog distinct-count estimation.
//!
//! Each item is hashed to 64 bits. The top `p` bits select one of `2^p`
//! registers and the remaining `64 - p` bits form a window whose leading zero
//! run determines the item's rank. A register keeps the highest rank it has
//! seen, and the estimate is a bias-corrected harmonic mean over all
//! registers, falling back to linear counting while registers are still
//! empty.
//!
//! The expected relative error is `1.04 / sqrt(2^p)`, about 0.81% for the
//! default precision of 14. No correction is applied near register
//! saturation, which is far beyond any practical cardinality at 64-bit hash
//! width.

use crate::cardinality::Cardinality;
use crate::error::{Error, Result};
use crate::hash::{hash_str, DefaultBuildHasher};
use crate::packed_vec::PackedVec;
use std::fmt::{Debug, Formatter};
use std::hash::BuildHasher;

pub const DEFAULT_PRECISION: usize = 14;
pub const MIN_PRECISION: usize = 4;
pub const MAX_PRECISION: usize = 18;

// Highest rank is 64 - MIN_PRECISION + 1 = 61.
const REGISTER_WIDTH: usize = 6;

type Registers = PackedVec<u64, REGISTER_WIDTH>;

#[derive(Clone, PartialEq, Eq)]
pub struct CardinalityEstimator<H = DefaultBuildHasher> {
    registers: Registers,
    precision: usize,
    build_hasher: H,
}

impl CardinalityEstimator {
    /// Creates an estimator with `2^precision` registers.
    pub fn new(precision: usize) -> Result<Self> {
        Self::with_hasher(precision, DefaultBuildHasher::default())
    }

    /// Creates the smallest estimator whose expected relative error does not
    /// exceed `epsilon`.
    pub fn with_error(epsilon: f64) -> Result<Self> {
        if !(0. < epsilon && epsilon < 1.) {
            return Err(Error::invalid_parameter(
                "epsilon",
                "a value in the range (0, 1)",
                epsilon,
            ));
        }
        let m = (1.04 / epsilon).powi(2);
        let precision = m.log2().ceil().max(0.) as usize;
        Self::new(precision)
    }
}

impl Default for CardinalityEstimator {
    fn default() -> Self {
        Self {
            registers: Registers::new(1 << DEFAULT_PRECISION),
            precision: DEFAULT_PRECISION,
            build_hasher: DefaultBuildHasher::default(),
        }
    }
}

impl<H> CardinalityEstimator<H> {
    pub fn with_hasher(precision: usize, build_hasher: H) -> Result<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(Error::invalid_parameter(
                "precision",
                "a value in the range [4, 18]",
                precision,
            ));
        }
        let num_registers = 1usize << precision;
        tracing::debug!(precision, num_registers, "created cardinality estimator");
        Ok(Self {
            registers: Registers::new(num_registers),
            precision,
            build_hasher,
        })
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Ranks held by each register, in index order.
    pub fn registers(&self) -> impl Iterator<Item = u8> + '_ {
        self.registers.iter().map(|rank| rank as u8)
    }

    /// Number of registers no item has hashed to yet.
    pub fn zero_registers(&self) -> usize {
        self.registers.iter().filter(|&rank| rank == 0).count()
    }

    /// Expected relative standard error of [`estimate`](Self::estimate).
    pub fn relative_error(&self) -> f64 {
        1.04 / (self.num_registers() as f64).sqrt()
    }

    fn alpha(&self) -> f64 {
        0.7213 / (1. + 1.079 / self.num_registers() as f64)
    }

    /// Bias-corrected harmonic mean estimate, without the small range
    /// correction.
    pub fn raw_estimate(&self) -> f64 {
        let m = self.num_registers() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|rank| (-(rank as f64)).exp2())
            .sum();
        self.alpha() * m * m / sum
    }

    /// Approximate number of distinct items added so far.
    pub fn estimate(&self) -> f64 {
        let m = self.num_registers() as f64;
        let raw = self.raw_estimate();
        let zeros = self.zero_registers();

        if raw <= 2.5 * m && zeros > 0 {
            tracing::trace!(raw, zeros, "estimate using linear counting");
            m * (m / zeros as f64).ln()
        } else {
            tracing::trace!(raw, zeros, "estimate using harmonic mean");
            raw
        }
    }
}

impl<H: BuildHasher> CardinalityEstimator<H> {
    pub fn add(&mut self, item: &str) {
        let hash = hash_str(item, &self.build_hasher);
        let window = 64 - self.precision as u32;
        let index = (hash >> window) as usize;
        let w = hash & ((1 << window) - 1);
        self.registers.update_max(index, rho(w, window) as u64);
    }
}

impl<H: BuildHasher> Cardinality for CardinalityEstimator<H> {
    fn estimate(&self) -> f64 {
        CardinalityEstimator::estimate(self)
    }

    fn add(&mut self, item: &str) {
        CardinalityEstimator::add(self, item)
    }
}

impl<H> Debug for CardinalityEstimator<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CardinalityEstimator {{ precision: {} }}",
            self.precision
        )
    }
}

/// 1-indexed position of the leftmost set bit of `w` within its low
/// `window` bits, or `window + 1` if none is set.
///
/// `w` must not have bits set above the window.
pub fn rho(w: u64, window: u32) -> u32 {
    debug_assert!(window <= 64);
    debug_assert!(window == 64 || w >> window == 0, "w exceeds the window");
    w.leading_zeros() + window + 1 - 64
}
