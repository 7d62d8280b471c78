//! Similarity evaluators used for originality verification.
//!
//! Two independent metrics guard against near-verbatim rewrites:
//!
//! - [`shingle`] — k-word shingle sets compared by Jaccard similarity.
//!   Punishes vocabulary overlap regardless of word order.
//! - [`simhash`] — 64-bit similarity-preserving fingerprints compared by
//!   Hamming distance. Punishes structural sameness while tolerating local
//!   edits like word swaps.
//!
//! A rewrite must pass both bars to count as sufficiently original.

pub mod shingle;
pub mod simhash;

pub use shingle::{DEFAULT_SHINGLE_SIZE, ShingleSet, jaccard};
pub use simhash::{FINGERPRINT_BITS, Fingerprint, hamming_distance};

use std::hash::BuildHasher;

use ahash::RandomState;

/// Fixed seeds so token hashes are stable from run to run. Fingerprints
/// and shingle sets must be reproducible for identical input.
const HASH_SEEDS: (u64, u64, u64, u64) = (
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
);

/// Stable 64-bit hash of a token. Same token, same value, every run.
pub(crate) fn stable_hash64(token: &str) -> u64 {
    let state = RandomState::with_seeds(HASH_SEEDS.0, HASH_SEEDS.1, HASH_SEEDS.2, HASH_SEEDS.3);
    state.hash_one(token)
}
