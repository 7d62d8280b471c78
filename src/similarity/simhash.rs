//! SimHash fingerprints and Hamming distance.
//!
//! A [`Fingerprint`] is a 64-bit vector computed from per-token hash
//! vectors: each bit position accumulates `+1` when the token's hash bit is
//! set and `-1` when it is not, summed over every token occurrence (so term
//! frequency weights naturally), and the final bit is set when the sum is
//! positive. Textually similar documents yield fingerprints with small
//! Hamming distance; this is a similarity-preserving hash, not a
//! cryptographic one.
//!
//! # Examples
//!
//! ```
//! use falx::similarity::simhash::{Fingerprint, hamming_distance};
//!
//! let a = Fingerprint::from_tokens(&["мост", "открыли", "утром"]);
//! assert_eq!(hamming_distance(a, a), 0);
//! ```

use super::stable_hash64;

/// Fingerprint width in bits, a process-wide constant.
pub const FINGERPRINT_BITS: u32 = 64;

/// A fixed-width similarity-preserving document fingerprint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Compute the fingerprint of a normalized token sequence.
    ///
    /// An empty sequence yields the all-zero fingerprint.
    pub fn from_tokens(tokens: &[&str]) -> Self {
        let mut sums = [0i32; FINGERPRINT_BITS as usize];
        for token in tokens {
            let hash = stable_hash64(token);
            for (bit, sum) in sums.iter_mut().enumerate() {
                if (hash >> bit) & 1 == 1 {
                    *sum += 1;
                } else {
                    *sum -= 1;
                }
            }
        }
        let mut bits = 0u64;
        for (bit, sum) in sums.iter().enumerate() {
            if *sum > 0 {
                bits |= 1 << bit;
            }
        }
        Fingerprint(bits)
    }

    /// The raw 64-bit value.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Hamming distance to another fingerprint.
    pub fn distance(self, other: Fingerprint) -> u32 {
        hamming_distance(self, other)
    }
}

/// Count of differing bit positions between two fingerprints.
pub fn hamming_distance(a: Fingerprint, b: Fingerprint) -> u32 {
    (a.0 ^ b.0).count_ones()
}
