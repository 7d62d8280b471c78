//! Shingle sets and Jaccard similarity.
//!
//! A shingle is a contiguous run of `k` normalized tokens; a document's
//! shingle set is the set of unique shingles it contains. Shingles are
//! hashed to stable 64-bit values so the set stays compact for long texts.
//!
//! # Examples
//!
//! ```
//! use falx::similarity::shingle::{ShingleSet, jaccard};
//!
//! let tokens = ["мост", "через", "оку", "открыли"];
//! let a = ShingleSet::build(&tokens, 3);
//! assert_eq!(jaccard(&a, &a), 1.0);
//! ```

use ahash::AHashSet;

use super::stable_hash64;

/// Default shingle width. Both operands of one comparison must use the
/// same width.
pub const DEFAULT_SHINGLE_SIZE: usize = 3;

/// A set of hashed k-token shingles.
#[derive(Clone, Debug, Default)]
pub struct ShingleSet {
    shingles: AHashSet<u64>,
}

impl ShingleSet {
    /// Build the shingle set of a normalized token sequence.
    ///
    /// Yields an empty set when `k` is zero or the document has fewer than
    /// `k` tokens.
    pub fn build(tokens: &[&str], k: usize) -> Self {
        let mut shingles = AHashSet::new();
        if k == 0 || tokens.len() < k {
            return ShingleSet { shingles };
        }
        let mut buf = String::new();
        for window in tokens.windows(k) {
            buf.clear();
            for (i, token) in window.iter().enumerate() {
                if i > 0 {
                    // Unit separator keeps ("ab","c") distinct from ("a","bc").
                    buf.push('\u{1f}');
                }
                buf.push_str(token);
            }
            shingles.insert(stable_hash64(&buf));
        }
        ShingleSet { shingles }
    }

    /// Number of unique shingles.
    pub fn len(&self) -> usize {
        self.shingles.len()
    }

    /// Whether the set contains no shingles.
    pub fn is_empty(&self) -> bool {
        self.shingles.is_empty()
    }

    fn intersection_len(&self, other: &ShingleSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .shingles
            .iter()
            .filter(|s| large.shingles.contains(*s))
            .count()
    }
}

/// Jaccard similarity between two shingle sets: |A ∩ B| / |A ∪ B|.
///
/// Defined as `0.0` when both sets are empty, so a pair of degenerate
/// documents never reads as identical.
pub fn jaccard(a: &ShingleSet, b: &ShingleSet) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection_len(b);
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_similarity_is_one() {
        let tokens = ["в", "городе", "открыли", "новый", "мост"];
        let set = ShingleSet::build(&tokens, DEFAULT_SHINGLE_SIZE);
        assert_eq!(jaccard(&set, &set), 1.0);
    }

    #[test]
    fn test_empty_sets_similarity_is_zero() {
        let empty = ShingleSet::default();
        assert_eq!(jaccard(&empty, &empty), 0.0);
    }

    #[test]
    fn test_disjoint_sets_similarity_is_zero() {
        let a = ShingleSet::build(&["а", "б", "в", "г"], 3);
        let b = ShingleSet::build(&["д", "е", "ж", "з"], 3);
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn test_short_document_yields_empty_set() {
        let set = ShingleSet::build(&["мост", "открыт"], 3);
        assert!(set.is_empty());
    }

    #[test]
    fn test_separator_prevents_boundary_collisions() {
        let a = ShingleSet::build(&["аб", "в", "г"], 3);
        let b = ShingleSet::build(&["а", "бв", "г"], 3);
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn test_appending_shared_tail_does_not_decrease_similarity() {
        let base_a = ["мост", "открыли", "утром"];
        let base_b = ["мост", "закрыли", "утром"];
        let before = jaccard(
            &ShingleSet::build(&base_a, 3),
            &ShingleSet::build(&base_b, 3),
        );
        let ext_a = ["мост", "открыли", "утром", "после", "долгого", "ремонта"];
        let ext_b = ["мост", "закрыли", "утром", "после", "долгого", "ремонта"];
        let after = jaccard(&ShingleSet::build(&ext_a, 3), &ShingleSet::build(&ext_b, 3));
        assert!(after >= before);
    }
}
