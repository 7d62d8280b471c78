//! Structural transform engine — the "compression" and "strengthened"
//! rewrite stages.
//!
//! Both stages recast sentences through the pattern rule table and the
//! aggressive lexical pass, join them with soft linkers, then drop
//! sentences from the end of the document (the lead sentence is always
//! kept, since news convention front-loads the essential fact) until the
//! escaped length fits the budget. A sentence is either fully included or
//! fully dropped, never cut mid-word.
//!
//! The compression stage only applies pattern rules whose confidence
//! clears a threshold; the strengthened stage applies template rewriting
//! and lexical substitution to every sentence unconditionally and always
//! returns a result, even when the originality thresholds cannot be met.

use crate::analysis::normalizer::NormalizedDocument;
use crate::rewrite::lexical::{self, AGGRESSIVE_CONFIDENCE};
use crate::rewrite::rules::RuleSet;
use crate::rewrite::{final_len, polish};

/// Minimum pattern confidence honored by the compression stage. The
/// strengthened stage ignores confidence entirely.
pub const PATTERN_CONFIDENCE: f32 = 0.5;

/// Linkers prefixed round-robin to follow-on sentences.
const SOFT_LINKERS: &[&str] = &["Кроме того,", "Также", "При этом", "Дополнительно,"];

/// Apply the compression stage: pattern templates where they match with
/// confidence, aggressive synonyms elsewhere, then elision to `budget`.
pub fn apply_compression(doc: &NormalizedDocument, rules: &RuleSet, budget: usize) -> String {
    let sentences = rewrite_sentences(doc, rules, Some(PATTERN_CONFIDENCE));
    compress_to_budget(add_linkers(sentences), rules, budget)
}

/// Apply the strengthened stage: templates and synonyms on every sentence
/// regardless of confidence, then elision to `budget`.
pub fn apply_strengthened(doc: &NormalizedDocument, rules: &RuleSet, budget: usize) -> String {
    let sentences = rewrite_sentences(doc, rules, None);
    compress_to_budget(add_linkers(sentences), rules, budget)
}

/// Rewrite each sentence. `min_pattern_confidence` of `None` means
/// "strengthened": patterns apply unconditionally and the lexical pass runs
/// on top of template output as well.
fn rewrite_sentences(
    doc: &NormalizedDocument,
    rules: &RuleSet,
    min_pattern_confidence: Option<f32>,
) -> Vec<String> {
    let strengthened = min_pattern_confidence.is_none();
    let mut position = 0;
    let mut out = Vec::with_capacity(doc.sentences().len());
    for (index, sentence) in doc.sentences().iter().enumerate() {
        let rendered = sentence.render();
        let matched = rules.patterns().iter().find(|rule| {
            min_pattern_confidence.is_none_or(|min| rule.confidence() >= min)
                && rule.is_match(&rendered)
        });
        let text = match matched {
            Some(rule) => {
                let templated = rule.apply(&rendered, index);
                if strengthened {
                    lexical::rewrite_text(&templated, rules, AGGRESSIVE_CONFIDENCE, &mut position)
                } else {
                    templated
                }
            }
            None => {
                let (text, _) = lexical::substitute_sentence(
                    sentence,
                    rules.synonyms(),
                    AGGRESSIVE_CONFIDENCE,
                    &mut position,
                );
                text
            }
        };
        out.push(text);
    }
    out
}

/// Prefix soft linkers to follow-on sentences that do not already start
/// with one.
fn add_linkers(sentences: Vec<String>) -> Vec<String> {
    if sentences.len() <= 1 {
        return sentences;
    }
    let mut out = Vec::with_capacity(sentences.len());
    let mut iter = sentences.into_iter();
    if let Some(first) = iter.next() {
        out.push(first);
    }
    let mut idx = 0;
    for sentence in iter {
        let lower = sentence.to_lowercase();
        let already_linked = SOFT_LINKERS
            .iter()
            .any(|linker| lower.starts_with(&linker.to_lowercase()));
        if already_linked {
            out.push(sentence);
        } else {
            out.push(format!("{} {}", SOFT_LINKERS[idx % SOFT_LINKERS.len()], sentence));
        }
        idx += 1;
    }
    out
}

/// Drop sentences from the end until the polished, escaped text fits
/// `budget`. The lead sentence is never dropped.
fn compress_to_budget(sentences: Vec<String>, rules: &RuleSet, budget: usize) -> String {
    let mut kept = sentences;
    loop {
        let joined = kept.join(" ");
        if final_len(&joined, rules) <= budget || kept.len() <= 1 {
            return polish(&joined, rules);
        }
        kept.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;
    use crate::rewrite::markdown;

    #[test]
    fn test_compression_drops_from_end_keeps_lead() {
        let doc = normalize(
            "Первая новость самая важная. Вторая новость содержит детали. Третья новость содержит мелочи.",
        );
        let rules = RuleSet::builtin();
        let text = apply_compression(&doc, rules, 40);
        assert!(text.starts_with("Первая новость самая важная."), "{text}");
        assert!(!text.contains("Третья"), "{text}");
    }

    #[test]
    fn test_lead_survives_even_when_over_budget() {
        let doc = normalize("Одно очень длинное вступительное предложение без конца и края.");
        let rules = RuleSet::builtin();
        let text = apply_compression(&doc, rules, 10);
        assert!(text.contains("вступительное"), "lead must never be dropped");
    }

    #[test]
    fn test_no_sentence_is_cut_mid_word() {
        let doc = normalize("Мост открыли после ремонта. Движение восстановили полностью.");
        let rules = RuleSet::builtin();
        let text = apply_compression(&doc, rules, 60);
        // Every emitted word must come from a fully included sentence.
        assert!(text.ends_with(['.', '!', '?', '…']), "{text}");
    }

    #[test]
    fn test_linkers_added_to_follow_on_sentences() {
        let sentences = vec![
            "Первое.".to_string(),
            "Второе.".to_string(),
            "Также третье.".to_string(),
        ];
        let linked = add_linkers(sentences);
        assert_eq!(linked[0], "Первое.");
        assert_eq!(linked[1], "Кроме того, Второе.");
        assert_eq!(linked[2], "Также третье.");
    }

    #[test]
    fn test_compression_honors_escaped_length() {
        let doc = normalize("Счет составил один-два. Подробности позже появятся на сайте.");
        let rules = RuleSet::builtin();
        let budget = 40;
        let text = apply_compression(&doc, rules, budget);
        assert!(
            markdown::escape(&text).chars().count() <= budget,
            "escaped form must fit the budget: {text}"
        );
    }

    #[test]
    fn test_strengthened_rewrites_attribution_shapes() {
        let doc = normalize("Мэрия сообщила, что строительство моста завершено.");
        let rules = RuleSet::builtin();
        let text = apply_strengthened(&doc, rules, 500);
        assert!(!text.contains("сообщила, что"), "{text}");
        assert!(text.contains("возведение") || text.contains("Возведение"), "{text}");
    }

    #[test]
    fn test_strengthened_always_returns_text() {
        let doc = normalize("Короткий текст.");
        let rules = RuleSet::builtin();
        let text = apply_strengthened(&doc, rules, 5);
        assert!(!text.is_empty());
    }
}
