use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::LuxResult;
use crate::knowledge::{KnowledgeSet, QaEntry};
use crate::stats::Stats;

use super::Persistence;

/// Store that keeps everything in memory and counts writes. Useful for
/// embedding the engine without a filesystem, and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub files: HashMap<PathBuf, Vec<QaEntry>>,
    pub stats: Option<Stats>,
    pub knowledge_saves: usize,
    pub stats_saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, entries: Vec<QaEntry>) -> Self {
        self.files.insert(path.into(), entries);
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl Persistence for MemoryStore {
    fn load_knowledge(&mut self, files: &[PathBuf]) -> LuxResult<Vec<QaEntry>> {
        let mut all = Vec::new();
        for (index, file) in files.iter().enumerate() {
            let entries = self.files.entry(file.clone()).or_default();
            all.extend(entries.iter().cloned().map(|e| e.loaded_from(index)));
        }
        Ok(all)
    }

    fn save_knowledge(&mut self, primary: &Path, knowledge: &KnowledgeSet) -> LuxResult<()> {
        let entries = knowledge.primary_entries().cloned().collect();
        self.files.insert(primary.to_path_buf(), entries);
        self.knowledge_saves += 1;
        Ok(())
    }

    fn load_stats(&mut self, _path: &Path) -> LuxResult<Stats> {
        Ok(self.stats.get_or_insert_with(Stats::default).clone())
    }

    fn save_stats(&mut self, _path: &Path, stats: &Stats) -> LuxResult<()> {
        self.stats = Some(stats.clone());
        self.stats_saves += 1;
        Ok(())
    }
}
