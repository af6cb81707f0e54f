use serde::Serialize;
use tracing::debug;

use crate::config::{Mode, Thresholds};
use crate::knowledge::{KnowledgeSet, normalize};

use super::similarity::best_match;

/// Reply given while the knowledge set is still empty
pub const NO_KNOWLEDGE_ANSWER: &str =
    "I don't know anything yet. Start me with --learn and you can teach me!";

/// How a query was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    NoMatch,
    EmptyKnowledge,
}

impl MatchKind {
    /// Whether a stored answer was found
    pub fn is_match(&self) -> bool {
        matches!(self, MatchKind::Exact | MatchKind::Fuzzy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub answer: Option<String>,
    pub score: f64,
    pub kind: MatchKind,
    /// Position of the matched entry in the knowledge set
    pub index: Option<usize>,
}

impl MatchResult {
    fn exact(index: usize, answer: &str, score: f64) -> Self {
        Self { answer: Some(answer.to_string()), score, kind: MatchKind::Exact, index: Some(index) }
    }

    fn fuzzy(index: usize, answer: &str, score: f64) -> Self {
        Self { answer: Some(answer.to_string()), score, kind: MatchKind::Fuzzy, index: Some(index) }
    }

    fn no_match() -> Self {
        Self { answer: None, score: 0.0, kind: MatchKind::NoMatch, index: None }
    }

    fn empty_knowledge() -> Self {
        Self {
            answer: Some(NO_KNOWLEDGE_ANSWER.to_string()),
            score: 0.0,
            kind: MatchKind::EmptyKnowledge,
            index: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.kind.is_match()
    }
}

/// Resolves questions against a knowledge set. Holds no state besides the
/// thresholds chosen for the process mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEngine {
    exact_score: f64,
    fuzzy_threshold: f64,
}

impl MatchEngine {
    pub fn new(mode: Mode, thresholds: &Thresholds) -> Self {
        Self { exact_score: thresholds.exact_match, fuzzy_threshold: thresholds.fuzzy_for(mode) }
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    pub fn find_answer(&self, knowledge: &KnowledgeSet, query: &str) -> MatchResult {
        if knowledge.is_empty() {
            return MatchResult::empty_knowledge();
        }

        let q = normalize(query);

        if let Some(index) = knowledge.cache().position(&q) {
            if let Some(entry) = knowledge.get(index) {
                debug!("Exact match for '{}' at {}", query, index);
                return MatchResult::exact(index, &entry.answer, self.exact_score);
            }
        }

        let Some(candidate) = best_match(&q, knowledge.cache().iter(), self.fuzzy_threshold) else {
            debug!("No candidate for '{}' above {:.2}", query, self.fuzzy_threshold);
            return MatchResult::no_match();
        };

        // Duplicated questions resolve to their first occurrence
        let index = knowledge
            .cache()
            .get(candidate.index)
            .and_then(|question| knowledge.cache().position(question))
            .unwrap_or(candidate.index);

        match knowledge.get(index) {
            Some(entry) => {
                debug!("Fuzzy match for '{}' at {} (ratio {:.3})", query, index, candidate.ratio);
                MatchResult::fuzzy(index, &entry.answer, candidate.ratio)
            }
            None => MatchResult::no_match(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::QaEntry;
    use proptest::prelude::*;

    fn knowledge() -> KnowledgeSet {
        KnowledgeSet::from_entries(vec![
            QaEntry::bare("what is your name", "Lux"),
            QaEntry::bare("where do you live", "In your terminal"),
            QaEntry::bare("how old are you", "Brand new"),
        ])
    }

    fn engine(mode: Mode) -> MatchEngine {
        MatchEngine::new(mode, &Thresholds::default())
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let result = engine(Mode::Normal).find_answer(&knowledge(), "WHERE DO YOU LIVE");
        assert_eq!(result.answer.as_deref(), Some("In your terminal"));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.kind, MatchKind::Exact);
        assert_eq!(result.index, Some(1));
    }

    #[test]
    fn test_example_queries() {
        let kb = KnowledgeSet::from_entries(vec![QaEntry::bare("what is your name", "Lux")]);
        let engine = engine(Mode::Normal);

        let punctuated = engine.find_answer(&kb, "What Is Your Name?");
        assert_eq!(punctuated.answer.as_deref(), Some("Lux"));
        assert!(punctuated.score > 0.9);

        let contracted = engine.find_answer(&kb, "what's your name");
        assert_eq!(contracted.answer.as_deref(), Some("Lux"));
        assert_eq!(contracted.kind, MatchKind::Fuzzy);
        assert!(contracted.score >= 0.7 && contracted.score < 1.0);

        let joke = engine.find_answer(&kb, "tell me a joke");
        assert_eq!(joke, MatchResult::no_match());
    }

    #[test]
    fn test_empty_knowledge_returns_sentinel() {
        let result = engine(Mode::Learning).find_answer(&KnowledgeSet::new(), "anything");
        assert_eq!(result.kind, MatchKind::EmptyKnowledge);
        assert_eq!(result.answer.as_deref(), Some(NO_KNOWLEDGE_ANSWER));
        assert_eq!(result.score, 0.0);
        assert!(!result.is_match());
    }

    #[test]
    fn test_learning_mode_is_more_permissive() {
        let kb = knowledge();
        let query = "where r u";

        assert!(!engine(Mode::Normal).find_answer(&kb, query).is_match());
        assert!(engine(Mode::Learning).find_answer(&kb, query).is_match());
    }

    #[test]
    fn test_exact_match_wins_over_duplicates() {
        let kb = KnowledgeSet::from_entries(vec![
            QaEntry::bare("Hello", "first"),
            QaEntry::bare("hello", "second"),
        ]);
        let result = engine(Mode::Normal).find_answer(&kb, "HELLO");
        assert_eq!(result.answer.as_deref(), Some("first"));
    }

    #[test]
    fn test_fuzzy_match_resolves_first_duplicate() {
        let kb = KnowledgeSet::from_entries(vec![
            QaEntry::bare("unrelated entry", "nope"),
            QaEntry::bare("good morning", "first"),
            QaEntry::bare("Good Morning", "second"),
        ]);
        let result = engine(Mode::Normal).find_answer(&kb, "good mornin");
        assert_eq!(result.answer.as_deref(), Some("first"));
        assert_eq!(result.index, Some(1));
    }

    proptest! {
        #[test]
        fn prop_learning_matches_superset_of_normal(query in "[a-z' ]{0,24}") {
            let kb = knowledge();
            let normal = engine(Mode::Normal).find_answer(&kb, &query);
            let learning = engine(Mode::Learning).find_answer(&kb, &query);

            if normal.is_match() {
                prop_assert!(learning.is_match());
                prop_assert_eq!(normal.answer, learning.answer);
            }
            prop_assert!((0.0..=1.0).contains(&normal.score));
        }
    }
}
