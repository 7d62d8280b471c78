//! Integration tests for the similarity evaluators' documented properties.

use falx::similarity::shingle::{DEFAULT_SHINGLE_SIZE, ShingleSet, jaccard};
use falx::similarity::simhash::{FINGERPRINT_BITS, Fingerprint, hamming_distance};

fn tokens(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

#[test]
fn test_self_similarity() {
    let doc = tokens("в регионе стартовало возведение нового моста через реку");
    let set = ShingleSet::build(&doc, DEFAULT_SHINGLE_SIZE);
    let fp = Fingerprint::from_tokens(&doc);
    assert_eq!(jaccard(&set, &set), 1.0);
    assert_eq!(hamming_distance(fp, fp), 0);
}

#[test]
fn test_empty_set_jaccard_is_zero_not_nan() {
    let empty = ShingleSet::default();
    let similarity = jaccard(&empty, &empty);
    assert_eq!(similarity, 0.0);
    assert!(!similarity.is_nan());
}

#[test]
fn test_replacing_every_token_drops_overlap_to_zero() {
    let original = tokens("мост через реку открыли после ремонта");
    let replaced = tokens("переправу над водой запустили когда закончили");
    let a = ShingleSet::build(&original, DEFAULT_SHINGLE_SIZE);
    let b = ShingleSet::build(&replaced, DEFAULT_SHINGLE_SIZE);
    assert_eq!(jaccard(&a, &b), 0.0);
}

#[test]
fn test_jaccard_is_symmetric() {
    let a = ShingleSet::build(&tokens("мост через реку открыли утром"), 3);
    let b = ShingleSet::build(&tokens("мост через реку закрыли вечером"), 3);
    assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
}

#[test]
fn test_distance_never_exceeds_fingerprint_width() {
    let pairs = [
        ("мост открыли", "завод закрыли"),
        ("а б в г д", "е ж з и к"),
        ("одно слово", "одно слово"),
    ];
    for (left, right) in pairs {
        let a = Fingerprint::from_tokens(&tokens(left));
        let b = Fingerprint::from_tokens(&tokens(right));
        assert!(hamming_distance(a, b) <= FINGERPRINT_BITS);
    }
}

#[test]
fn test_fingerprints_are_stable_across_calls() {
    let doc = tokens("стабильный хэш не зависит от запуска");
    assert_eq!(
        Fingerprint::from_tokens(&doc).as_u64(),
        Fingerprint::from_tokens(&doc).as_u64()
    );
}

#[test]
fn test_word_swap_is_tolerated_better_than_rewrite() {
    let original = tokens("городская дума утвердила бюджет развития на следующий год");
    let mut swapped: Vec<&str> = original.clone();
    swapped.swap(1, 6);
    let unrelated = tokens("спортсмен выиграл турнир по плаванию в открытой воде");

    let base = Fingerprint::from_tokens(&original);
    let near = hamming_distance(base, Fingerprint::from_tokens(&swapped));
    let far = hamming_distance(base, Fingerprint::from_tokens(&unrelated));
    assert!(near < far, "near={near} far={far}");
}
