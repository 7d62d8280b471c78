//! Rule tables driving the transform engines.
//!
//! A [`RuleSet`] bundles three read-only tables:
//!
//! - [`SynonymTable`] — normalized word → ordered replacement candidates,
//!   each entry carrying a confidence used by the soft/aggressive lexical
//!   thresholds;
//! - pattern rules — regex matchers with output templates that recast
//!   common news sentence shapes, tried in table order, first match wins;
//! - cleanup rules — typo and whitespace repair applied as a final polish.
//!
//! Tables are loaded once at process start and shared by reference; they
//! are data, not code, so rules stay user-extensible without recompilation.
//! A JSON file may override any of the three sections; sections it omits
//! fall back to the built-in defaults.
//!
//! ```json
//! {
//!   "synonyms": {
//!     "построят": { "replacements": ["возведут"], "confidence": 0.9 }
//!   },
//!   "patterns": [
//!     {
//!       "pattern": "(?i)^(.{3,80}?) сообщил(а|и)?, что (.+)$",
//!       "templates": ["По данным ${1}, ${3}"],
//!       "confidence": 0.8
//!     }
//!   ],
//!   "cleanups": [
//!     { "pattern": "\\s+([,.!?…;:])", "replacement": "${1}" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use ahash::AHashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FalxError, Result};

/// Default confidence for entries that do not state one.
const DEFAULT_CONFIDENCE: f32 = 0.9;

/// Built-in single-word synonyms: (word, replacements, confidence).
///
/// High-confidence entries are safe, common substitutions; low-confidence
/// ones are only used by the aggressive lexical pass.
const BUILTIN_SYNONYMS: &[(&str, &[&str], f32)] = &[
    ("построят", &["возведут"], 0.9),
    ("построить", &["возвести"], 0.9),
    ("построен", &["возведен"], 0.9),
    ("построена", &["возведена"], 0.9),
    ("строительство", &["возведение"], 0.9),
    ("строительства", &["возведения"], 0.9),
    ("застройщик", &["девелопер"], 0.9),
    ("началось", &["стартовало"], 0.9),
    ("начался", &["стартовал"], 0.9),
    ("началась", &["стартовала"], 0.9),
    ("начнется", &["стартует"], 0.9),
    ("сообщил", &["заявил", "рассказал"], 0.9),
    ("сообщила", &["заявила", "рассказала"], 0.9),
    ("сообщили", &["заявили", "рассказали"], 0.9),
    ("ремонт", &["ремонтные работы"], 0.8),
    ("реконструкция", &["модернизация"], 0.9),
    ("реконструкцию", &["модернизацию"], 0.9),
    ("завершили", &["закончили"], 0.8),
    ("завершено", &["закончено"], 0.8),
    ("завершить", &["закончить"], 0.8),
    ("планируют", &["намерены"], 0.6),
    ("около", &["порядка"], 0.6),
    ("примерно", &["порядка"], 0.5),
    ("жители", &["горожане"], 0.5),
    ("власти", &["администрация"], 0.5),
    ("открыли", &["запустили"], 0.5),
    ("открыт", &["запущен"], 0.5),
    ("открыта", &["запущена"], 0.5),
    ("создали", &["сформировали"], 0.4),
    ("работы", &["мероприятия"], 0.4),
    ("движение", &["проезд"], 0.5),
    ("дороги", &["трассы"], 0.5),
    ("дорог", &["трасс"], 0.5),
];

/// Built-in pattern rules: (regex, templates, confidence).
const BUILTIN_PATTERNS: &[(&str, &[&str], f32)] = &[
    (
        r"(?i)^(.{3,80}?) сообщил(а|и)?, что (.+)$",
        &["${1} заявил${2}: ${3}", "Как заявил${2} ${1}, ${3}"],
        0.8,
    ),
    (
        r"(?i)^как сообщает (.{3,80}?), (.+)$",
        &["${2} Об этом пишет ${1}.", "${2} Об этом сообщает ${1}."],
        0.8,
    ),
    (r"(?i)\bввели в эксплуатацию\b", &["запустили"], 0.9),
    (r"(?i)\bвведен в эксплуатацию\b", &["запущен в работу"], 0.9),
    (r"(?i)\bввод в эксплуатацию\b", &["запуск"], 0.9),
    (r"(?i)\bв рамках\b", &["по проекту"], 0.9),
    (r"(?i)\bв целях\b", &["чтобы"], 0.9),
    (r"(?i)\bв том числе\b", &["включая"], 0.9),
];

/// Built-in cleanup rules, applied in order during final polish.
const BUILTIN_CLEANUPS: &[(&str, &str)] = &[
    (r"\s+([,.!?…;:])", "${1}"),
    (r"\.{2,}", "."),
    (r#""{2,}"#, "\""),
    (r" {2,}", " "),
];

/// One synonym table entry: ordered replacement candidates plus the
/// confidence gating which lexical pass may use it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynonymEntry {
    /// Candidate replacements in preference order.
    pub replacements: Vec<String>,
    /// How safe the substitution is; the soft pass only accepts entries at
    /// or above its threshold.
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    DEFAULT_CONFIDENCE
}

/// Mapping from normalized word to its replacement candidates.
#[derive(Clone, Debug, Default)]
pub struct SynonymTable {
    entries: AHashMap<String, SynonymEntry>,
}

impl SynonymTable {
    /// Build a table from explicit entries. Keys are lowercased.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, SynonymEntry)>) -> Result<Self> {
        let mut table = AHashMap::new();
        for (word, entry) in entries {
            if entry.replacements.is_empty() {
                return Err(FalxError::rules(format!(
                    "synonym entry '{word}' has no replacements"
                )));
            }
            table.insert(word.to_lowercase(), entry);
        }
        Ok(SynonymTable { entries: table })
    }

    /// Look up the entry for a normalized word.
    pub fn lookup(&self, normalized: &str) -> Option<&SynonymEntry> {
        self.entries.get(normalized)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A sentence-shape rewriting rule: a matcher plus one or more output
/// templates with `${n}` slots bound to the matched groups.
#[derive(Clone, Debug)]
pub struct PatternRule {
    pattern: Regex,
    templates: Vec<String>,
    confidence: f32,
}

impl PatternRule {
    /// Compile a pattern rule.
    pub fn new(pattern: &str, templates: Vec<String>, confidence: f32) -> Result<Self> {
        if templates.is_empty() {
            return Err(FalxError::rules(format!(
                "pattern rule '{pattern}' has no templates"
            )));
        }
        let pattern = Regex::new(pattern)
            .map_err(|e| FalxError::rules(format!("invalid pattern '{pattern}': {e}")))?;
        Ok(PatternRule {
            pattern,
            templates,
            confidence,
        })
    }

    /// The rule's match confidence.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Whether the rule matches a sentence.
    pub fn is_match(&self, sentence: &str) -> bool {
        self.pattern.is_match(sentence)
    }

    /// Rewrite the first match in `sentence` using the template selected by
    /// `choice` (round-robin over the template list, so output varies
    /// deterministically with sentence position).
    pub fn apply(&self, sentence: &str, choice: usize) -> String {
        let template = &self.templates[choice % self.templates.len()];
        self.pattern.replacen(sentence, 1, template.as_str()).into_owned()
    }
}

/// A typo/whitespace repair rule.
#[derive(Clone, Debug)]
struct CleanupRule {
    pattern: Regex,
    replacement: String,
}

/// The complete, read-only rule bundle consulted by the transform engines.
#[derive(Clone, Debug)]
pub struct RuleSet {
    synonyms: SynonymTable,
    patterns: Vec<PatternRule>,
    cleanups: Vec<CleanupRule>,
}

/// On-disk representation of a rule file. Omitted sections keep the
/// built-in defaults.
#[derive(Debug, Serialize, Deserialize)]
struct RuleFile {
    #[serde(default)]
    synonyms: Option<HashMap<String, SynonymEntry>>,
    #[serde(default)]
    patterns: Option<Vec<PatternRuleSpec>>,
    #[serde(default)]
    cleanups: Option<Vec<CleanupRuleSpec>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PatternRuleSpec {
    pattern: String,
    templates: Vec<String>,
    #[serde(default = "default_confidence")]
    confidence: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct CleanupRuleSpec {
    pattern: String,
    replacement: String,
}

static BUILTIN: LazyLock<RuleSet> = LazyLock::new(|| {
    // The built-in tables are compiled in; failing to load them is a bug.
    RuleSet::from_builtin_tables()
        .unwrap_or_else(|e| panic!("built-in rule tables failed to load: {e}"))
});

impl RuleSet {
    /// The built-in default rules, loaded once per process.
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN
    }

    fn from_builtin_tables() -> Result<RuleSet> {
        let synonyms = SynonymTable::from_entries(BUILTIN_SYNONYMS.iter().map(|(w, r, c)| {
            (
                (*w).to_string(),
                SynonymEntry {
                    replacements: r.iter().map(|s| (*s).to_string()).collect(),
                    confidence: *c,
                },
            )
        }))?;
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(p, t, c)| PatternRule::new(p, t.iter().map(|s| (*s).to_string()).collect(), *c))
            .collect::<Result<Vec<_>>>()?;
        let cleanups = BUILTIN_CLEANUPS
            .iter()
            .map(|(p, r)| compile_cleanup(p, r))
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleSet {
            synonyms,
            patterns,
            cleanups,
        })
    }

    /// Assemble a rule set from explicit tables. The built-in cleanup
    /// rules are kept; they repair typos, not content.
    pub fn new(synonyms: SynonymTable, patterns: Vec<PatternRule>) -> RuleSet {
        RuleSet {
            synonyms,
            patterns,
            cleanups: RuleSet::builtin().cleanups.clone(),
        }
    }

    /// Load a rule set from a JSON file, falling back to the built-in
    /// defaults for any omitted section.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RuleSet> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FalxError::rules(format!("failed to read rule file '{}': {e}", path.display()))
        })?;
        let file: RuleFile = serde_json::from_str(&content).map_err(|e| {
            FalxError::rules(format!("failed to parse rule file '{}': {e}", path.display()))
        })?;
        let builtin = RuleSet::builtin();

        let synonyms = match file.synonyms {
            Some(entries) => SynonymTable::from_entries(entries)?,
            None => builtin.synonyms.clone(),
        };
        let patterns = match file.patterns {
            Some(specs) => specs
                .into_iter()
                .map(|s| PatternRule::new(&s.pattern, s.templates, s.confidence))
                .collect::<Result<Vec<_>>>()?,
            None => builtin.patterns.clone(),
        };
        let cleanups = match file.cleanups {
            Some(specs) => specs
                .iter()
                .map(|s| compile_cleanup(&s.pattern, &s.replacement))
                .collect::<Result<Vec<_>>>()?,
            None => builtin.cleanups.clone(),
        };
        Ok(RuleSet {
            synonyms,
            patterns,
            cleanups,
        })
    }

    /// The synonym table.
    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// The ordered pattern rule list.
    pub fn patterns(&self) -> &[PatternRule] {
        &self.patterns
    }

    /// Run all cleanup rules over `text`, in table order.
    pub fn apply_cleanups(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.cleanups {
            out = rule
                .pattern
                .replace_all(&out, rule.replacement.as_str())
                .into_owned();
        }
        out
    }
}

fn compile_cleanup(pattern: &str, replacement: &str) -> Result<CleanupRule> {
    let pattern = Regex::new(pattern)
        .map_err(|e| FalxError::rules(format!("invalid cleanup pattern '{pattern}': {e}")))?;
    Ok(CleanupRule {
        pattern,
        replacement: replacement.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_tables_load() {
        let rules = RuleSet::builtin();
        assert!(!rules.synonyms().is_empty());
        assert!(!rules.patterns().is_empty());
    }

    #[test]
    fn test_synonym_lookup() {
        let rules = RuleSet::builtin();
        let entry = rules.synonyms().lookup("строительство").unwrap();
        assert_eq!(entry.replacements[0], "возведение");
        assert!(rules.synonyms().lookup("неизвестное").is_none());
    }

    #[test]
    fn test_pattern_rule_recasts_attribution() {
        let rules = RuleSet::builtin();
        let sentence = "Мэрия сообщила, что мост откроют в июне.";
        let rule = rules
            .patterns()
            .iter()
            .find(|r| r.is_match(sentence))
            .unwrap();
        assert_eq!(rule.apply(sentence, 0), "Мэрия заявила: мост откроют в июне.");
        assert_eq!(
            rule.apply(sentence, 1),
            "Как заявила Мэрия, мост откроют в июне."
        );
    }

    #[test]
    fn test_phrase_pattern_replaces_first_occurrence() {
        let rules = RuleSet::builtin();
        let sentence = "Работы идут в рамках федеральной программы.";
        let rule = rules
            .patterns()
            .iter()
            .find(|r| r.is_match(sentence))
            .unwrap();
        assert_eq!(rule.apply(sentence, 0), "Работы идут по проекту федеральной программы.");
    }

    #[test]
    fn test_cleanups_repair_typos() {
        let rules = RuleSet::builtin();
        assert_eq!(rules.apply_cleanups("Мост открыт ."), "Мост открыт.");
        assert_eq!(rules.apply_cleanups("Готово.. Почти"), "Готово. Почти");
    }

    #[test]
    fn test_empty_replacements_rejected() {
        let result = SynonymTable::from_entries([(
            "слово".to_string(),
            SynonymEntry {
                replacements: vec![],
                confidence: 0.9,
            },
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_overrides_synonyms_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"synonyms": {{"тест": {{"replacements": ["проверка"]}}}}}}"#
        )
        .unwrap();
        let rules = RuleSet::load_from_file(file.path()).unwrap();
        assert_eq!(rules.synonyms().len(), 1);
        assert!(rules.synonyms().lookup("тест").is_some());
        // Patterns fall back to the built-in table.
        assert_eq!(rules.patterns().len(), RuleSet::builtin().patterns().len());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        assert!(RuleSet::load_from_file("/nonexistent/rules.json").is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(PatternRule::new("(unclosed", vec!["x".to_string()], 0.5).is_err());
    }
}
