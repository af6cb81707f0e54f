use super::{QaEntry, normalize};

/// Lowercase projection of every stored question, aligned by position with
/// the knowledge set that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationCache {
    questions: Vec<String>,
}

impl NormalizationCache {
    pub fn from_entries(entries: &[QaEntry]) -> Self {
        let mut cache = Self::default();
        cache.rebuild(entries);
        cache
    }

    /// Recompute the whole projection
    pub fn rebuild(&mut self, entries: &[QaEntry]) {
        self.questions = entries.iter().map(QaEntry::normalized_question).collect();
        tracing::trace!("Rebuilt normalization cache with {} questions", self.questions.len());
    }

    pub(crate) fn push(&mut self, question: &str) {
        self.questions.push(normalize(question));
    }

    pub(crate) fn set(&mut self, index: usize, question: &str) {
        if let Some(slot) = self.questions.get_mut(index) {
            *slot = normalize(question);
        }
    }

    /// First position holding `normalized`
    pub fn position(&self, normalized: &str) -> Option<usize> {
        self.questions.iter().position(|q| q == normalized)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_lowercases_in_order() {
        let entries = vec![QaEntry::bare("Hello", "hi"), QaEntry::bare("What TIME is it", "late")];
        let cache = NormalizationCache::from_entries(&entries);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.iter().collect::<Vec<_>>(), vec!["hello", "what time is it"]);
    }

    #[test]
    fn test_position_returns_first_duplicate() {
        let entries = vec![QaEntry::bare("a", "1"), QaEntry::bare("B", "2"), QaEntry::bare("b", "3")];
        let cache = NormalizationCache::from_entries(&entries);

        assert_eq!(cache.position("b"), Some(1));
        assert_eq!(cache.position("c"), None);
    }

    #[test]
    fn test_incremental_updates() {
        let mut cache = NormalizationCache::default();
        assert!(cache.is_empty());

        cache.push("First Question");
        cache.push("Second");
        cache.set(1, "SECOND, revised");
        cache.set(7, "ignored");

        assert_eq!(cache.get(0), Some("first question"));
        assert_eq!(cache.get(1), Some("second, revised"));
        assert_eq!(cache.len(), 2);
    }
}
