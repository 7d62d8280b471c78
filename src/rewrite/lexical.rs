//! Lexical transform engine — the "soft" rewrite stage.
//!
//! Substitutes synonyms for words found in the [`SynonymTable`] and swaps
//! clause order around recognized coordinating conjunctions. Replacement
//! choice is a deterministic function of token position (round-robin over
//! the candidate list), never random, so repeated runs on identical input
//! are reproducible. The stage never truncates — its only goal is
//! lexical/structural divergence, not length control.

use crate::analysis::normalizer::{self, NormalizedDocument, Sentence};
use crate::rewrite::rules::{RuleSet, SynonymTable};

/// Minimum entry confidence accepted by the soft pass.
pub const SOFT_CONFIDENCE: f32 = 0.7;

/// Minimum entry confidence accepted by the aggressive pass used in the
/// structural stages.
pub const AGGRESSIVE_CONFIDENCE: f32 = 0.3;

/// Coordinating conjunctions that allow clause reordering.
const CONJUNCTIONS: &[&str] = &[", а ", ", но ", ", однако ", ", при этом "];

/// Apply the soft stage to a whole document.
///
/// Returns the rewritten text and the number of substitutions applied.
pub fn apply_soft(doc: &NormalizedDocument, rules: &RuleSet) -> (String, usize) {
    let mut position = 0;
    let mut applied = 0;
    let mut out = Vec::with_capacity(doc.sentences().len());
    for sentence in doc.sentences() {
        let (text, count) =
            substitute_sentence(sentence, rules.synonyms(), SOFT_CONFIDENCE, &mut position);
        applied += count;
        let text = reorder_clauses(&text).unwrap_or(text);
        out.push(text);
    }
    (out.join(" "), applied)
}

/// Substitute synonyms in one sentence, preserving capitalization pattern
/// and adjacent punctuation. `position` is the running token index within
/// the document; it drives the round-robin candidate choice.
pub(crate) fn substitute_sentence(
    sentence: &Sentence,
    table: &SynonymTable,
    min_confidence: f32,
    position: &mut usize,
) -> (String, usize) {
    let mut parts = Vec::with_capacity(sentence.tokens().len());
    let mut applied = 0;
    for token in sentence.tokens() {
        if !token.is_word() {
            parts.push(token.render());
            continue;
        }
        let rendered = match table.lookup(&token.normalized) {
            Some(entry) if entry.confidence >= min_confidence => {
                let choice = &entry.replacements[*position % entry.replacements.len()];
                applied += 1;
                token.render_with(&transfer_case(&token.surface, choice))
            }
            _ => token.render(),
        };
        parts.push(rendered);
        *position += 1;
    }
    (parts.join(" "), applied)
}

/// Rewrite free-form text through the lexical pass by re-deriving a
/// normalized view first. Used by the structural stages on template output.
pub(crate) fn rewrite_text(
    text: &str,
    rules: &RuleSet,
    min_confidence: f32,
    position: &mut usize,
) -> String {
    let doc = normalizer::normalize(text);
    let mut out = Vec::with_capacity(doc.sentences().len());
    for sentence in doc.sentences() {
        let (text, _) = substitute_sentence(sentence, rules.synonyms(), min_confidence, position);
        out.push(text);
    }
    out.join(" ")
}

/// Transfer the capitalization pattern of `src` onto `replacement`.
fn transfer_case(src: &str, replacement: &str) -> String {
    if src.chars().count() > 1 && src.chars().all(|c| !c.is_lowercase()) {
        return replacement.to_uppercase();
    }
    if src.chars().next().is_some_and(|c| c.is_uppercase()) {
        return capitalize_first(replacement);
    }
    replacement.to_string()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn decapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Swap clause order around the first recognized coordinating conjunction.
///
/// The swap is skipped whenever it could disturb word order relative to a
/// named entity: the trailing clause must carry no capitalized word, the
/// leading clause no capitalized word beyond its sentence-initial one, and
/// the sentence-initial word must not be an acronym.
pub(crate) fn reorder_clauses(sentence: &str) -> Option<String> {
    for conj in CONJUNCTIONS {
        let Some(pos) = sentence.find(conj) else {
            continue;
        };
        let head = &sentence[..pos];
        let tail = &sentence[pos + conj.len()..];
        let (tail_core, terminal) = split_terminal(tail);
        if head.is_empty() || tail_core.is_empty() {
            return None;
        }
        if tail_core.chars().any(|c| c.is_uppercase()) {
            return None;
        }
        let mut head_words = head.split(' ');
        let first_word = head_words.next().unwrap_or("");
        if first_word.chars().count() > 1 && first_word.chars().all(|c| !c.is_lowercase()) {
            return None;
        }
        if head_words.any(|w| w.chars().any(|c| c.is_uppercase())) {
            return None;
        }
        let connector = conj.trim_matches([',', ' ']);
        return Some(format!(
            "{}, {} {}{}",
            capitalize_first(tail_core),
            connector,
            decapitalize_first(head),
            terminal
        ));
    }
    None
}

/// Split trailing terminal punctuation off a clause.
fn split_terminal(clause: &str) -> (&str, &str) {
    let trimmed = clause.trim_end_matches(['.', '!', '?', '…']);
    (trimmed, &clause[trimmed.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;
    use crate::rewrite::rules::RuleSet;

    #[test]
    fn test_soft_substitutes_known_words() {
        let doc = normalize("Строительство моста началось весной.");
        let (text, applied) = apply_soft(&doc, RuleSet::builtin());
        assert_eq!(text, "Возведение моста стартовало весной.");
        assert_eq!(applied, 2);
    }

    #[test]
    fn test_soft_is_deterministic() {
        let doc = normalize("Застройщик сообщил о сроках. Застройщик сообщил о деньгах.");
        let rules = RuleSet::builtin();
        let (first, _) = apply_soft(&doc, rules);
        let (second, _) = apply_soft(&doc, rules);
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_robin_choice_varies_with_position() {
        // "сообщил" has two candidates; the pick depends on the running
        // token index, so two occurrences at different positions differ.
        let doc = normalize("Мэр сообщил о планах. Губернатор подробно сообщил о сроках.");
        let (text, _) = apply_soft(&doc, RuleSet::builtin());
        assert!(text.contains("заявил") && text.contains("рассказал"), "{text}");
    }

    #[test]
    fn test_case_transfer() {
        assert_eq!(transfer_case("Строительство", "возведение"), "Возведение");
        assert_eq!(transfer_case("РЕМОНТ", "ремонтные работы"), "РЕМОНТНЫЕ РАБОТЫ");
        assert_eq!(transfer_case("ремонт", "ремонтные работы"), "ремонтные работы");
    }

    #[test]
    fn test_punctuation_survives_substitution() {
        let doc = normalize("Началось «строительство», сообщили власти.");
        let (text, _) = apply_soft(&doc, RuleSet::builtin());
        assert!(text.starts_with("Стартовало «возведение»,"), "{text}");
    }

    #[test]
    fn test_low_confidence_entries_skipped_by_soft_pass() {
        // "работы" sits below the soft threshold.
        let doc = normalize("Дорожные работы продолжаются.");
        let (text, applied) = apply_soft(&doc, RuleSet::builtin());
        assert_eq!(text, "Дорожные работы продолжаются.");
        assert_eq!(applied, 0);
    }

    #[test]
    fn test_reorder_swaps_plain_clauses() {
        let reordered = reorder_clauses("Движение открыли утром, но ограничения сохраняются.");
        assert_eq!(
            reordered.as_deref(),
            Some("Ограничения сохраняются, но движение открыли утром.")
        );
    }

    #[test]
    fn test_reorder_skips_entities_in_tail() {
        assert_eq!(
            reorder_clauses("Движение открыли, но Волга разлилась."),
            None
        );
    }

    #[test]
    fn test_reorder_skips_entities_inside_head() {
        assert_eq!(
            reorder_clauses("Мэр Казани выступил, а движение открыли."),
            None
        );
    }

    #[test]
    fn test_reorder_without_conjunction() {
        assert_eq!(reorder_clauses("Движение открыли утром."), None);
    }
}
