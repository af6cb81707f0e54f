use super::{NormalizationCache, Origin, QaEntry, normalize};

/// Ordered question/answer pairs plus their normalization cache.
///
/// Insertion order is significant: lookups return the first matching entry.
/// Mutation is crate-private so the cache can never drift out of step with
/// the entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeSet {
    entries: Vec<QaEntry>,
    cache: NormalizationCache,
}

impl KnowledgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<QaEntry>) -> Self {
        let cache = NormalizationCache::from_entries(&entries);
        Self { entries, cache }
    }

    pub fn entries(&self) -> &[QaEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&QaEntry> {
        self.entries.get(index)
    }

    pub fn cache(&self) -> &NormalizationCache {
        &self.cache
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first entry whose question equals `question` once normalized
    pub fn find(&self, question: &str) -> Option<usize> {
        self.cache.position(&normalize(question))
    }

    /// Entries written back to the primary knowledge file: those loaded from
    /// it plus everything learned this session, whatever their `source` says
    pub fn primary_entries(&self) -> impl Iterator<Item = &QaEntry> {
        self.entries.iter().filter(|e| e.origin.is_primary())
    }

    /// Number of entries the knowledge file at `file` accounts for. The
    /// primary file also counts what was learned this session.
    pub fn count_in_file(&self, file: usize) -> usize {
        if file == 0 {
            self.primary_entries().count()
        } else {
            self.entries.iter().filter(|e| e.origin == Origin::File(file)).count()
        }
    }

    pub(crate) fn push(&mut self, entry: QaEntry) -> usize {
        self.cache.push(&entry.question);
        self.entries.push(entry);
        debug_assert_eq!(self.entries.len(), self.cache.len());
        self.entries.len() - 1
    }

    /// Swap the entry at `index` in place, returning the previous one
    pub(crate) fn replace(&mut self, index: usize, entry: QaEntry) -> Option<QaEntry> {
        let slot = self.entries.get_mut(index)?;
        self.cache.set(index, &entry.question);
        let previous = std::mem::replace(slot, entry);
        debug_assert_eq!(self.entries.len(), self.cache.len());
        Some(previous)
    }
}
