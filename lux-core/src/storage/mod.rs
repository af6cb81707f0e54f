//! Persistence for knowledge files and stats
//!
//! The engine never touches the filesystem itself. It hands the knowledge set
//! and stats to a [`Persistence`] implementation whenever they must be durable.

pub mod json;
pub mod memory;

use std::path::{Path, PathBuf};

use crate::error::LuxResult;
use crate::knowledge::{KnowledgeSet, QaEntry};
use crate::stats::Stats;

pub use json::JsonStore;
pub use memory::MemoryStore;

pub trait Persistence {
    /// Load and merge the given knowledge files in order. Every entry records
    /// the position of its file through [`QaEntry::loaded_from`].
    fn load_knowledge(&mut self, files: &[PathBuf]) -> LuxResult<Vec<QaEntry>>;

    /// Write [`KnowledgeSet::primary_entries`] to `primary`
    fn save_knowledge(&mut self, primary: &Path, knowledge: &KnowledgeSet) -> LuxResult<()>;

    /// Load stats, creating them with zero counters when absent
    fn load_stats(&mut self, path: &Path) -> LuxResult<Stats>;

    fn save_stats(&mut self, path: &Path, stats: &Stats) -> LuxResult<()>;
}

/// Label recorded in `QaEntry::source` for a knowledge file
pub fn source_id(path: &Path) -> String {
    path.display().to_string()
}
