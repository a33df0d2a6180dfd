//! Memory-bounded probabilistic sketches over streams of string items.
//!
//! - [`MembershipFilter`]: a Bloom filter answering "have I seen this?" with
//!   no false negatives and a tunable false positive rate.
//! - [`CardinalityEstimator`]: a HyperLogLog estimating how many distinct
//!   items have been seen.
//!
//! ```
//! use stream_sketches::{CardinalityEstimator, MembershipFilter};
//!
//! let mut filter = MembershipFilter::new(1000, 3)?;
//! filter.add("password123");
//! assert!(filter.contains("password123"));
//!
//! let mut hll = CardinalityEstimator::new(14)?;
//! for ip in ["10.0.0.1", "10.0.0.2", "10.0.0.1"] {
//!     hll.add(ip);
//! }
//! assert_eq!(hll.estimate().round(), 2.);
//! # Ok::<(), stream_sketches::Error>(())
//! ```

pub mod cardinality;
pub mod error;
pub mod hash;
mod packed_vec;
pub mod set_membership;

pub use cardinality::hll::CardinalityEstimator;
pub use cardinality::Cardinality;
pub use error::{Error, Result};
pub use set_membership::bloom::MembershipFilter;
pub use set_membership::uniqueness::{check_uniqueness, Uniqueness};
pub use set_membership::SetMembership;
