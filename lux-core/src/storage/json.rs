use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{LuxError, LuxResult};
use crate::knowledge::{KnowledgeSet, QaEntry};
use crate::stats::Stats;

use super::Persistence;

#[derive(Serialize)]
struct KnowledgeDocument<T> {
    qa_pairs: Vec<T>,
}

/// Knowledge and stats stored as pretty-printed JSON files.
///
/// Knowledge files hold `{"qa_pairs": [...]}`; a bare array is read as well.
/// Missing files are created empty. Files that cannot be decoded are skipped
/// with a warning so one damaged file does not hide the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStore;

impl JsonStore {
    pub fn new() -> Self {
        Self
    }
}

impl Persistence for JsonStore {
    fn load_knowledge(&mut self, files: &[PathBuf]) -> LuxResult<Vec<QaEntry>> {
        let mut all = Vec::new();

        for (index, file) in files.iter().enumerate() {
            let content = match fs::read_to_string(file) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!("Knowledge file {} not found, creating it", file.display());
                    write_json(file, &KnowledgeDocument::<QaEntry> { qa_pairs: Vec::new() })?;
                    continue;
                }
                Err(e) => return Err(LuxError::io(file, e)),
            };

            match decode_knowledge(&content) {
                Ok(Some(entries)) => {
                    debug!("Read {} entries from {}", entries.len(), file.display());
                    all.extend(entries.into_iter().map(|e| e.loaded_from(index)));
                }
                Ok(None) => warn!("Unknown knowledge format in {}, skipping", file.display()),
                Err(e) => warn!("Could not decode {}: {}, skipping", file.display(), e),
            }
        }

        info!("Loaded {} entries from {} file(s)", all.len(), files.len());
        Ok(all)
    }

    fn save_knowledge(&mut self, primary: &Path, knowledge: &KnowledgeSet) -> LuxResult<()> {
        let qa_pairs: Vec<&QaEntry> = knowledge.primary_entries().collect();

        write_json(primary, &KnowledgeDocument { qa_pairs })?;
        debug!("Saved knowledge to {}", primary.display());
        Ok(())
    }

    fn load_stats(&mut self, path: &Path) -> LuxResult<Stats> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| LuxError::json(path, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Creating stats file {}", path.display());
                let stats = Stats::default();
                write_json(path, &stats)?;
                Ok(stats)
            }
            Err(e) => Err(LuxError::io(path, e)),
        }
    }

    fn save_stats(&mut self, path: &Path, stats: &Stats) -> LuxResult<()> {
        write_json(path, stats)?;
        debug!("Saved stats to {}", path.display());
        Ok(())
    }
}

/// `Ok(None)` when the JSON is valid but not a knowledge document
fn decode_knowledge(content: &str) -> serde_json::Result<Option<Vec<QaEntry>>> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(mut map) => match map.remove("qa_pairs") {
            Some(pairs) => serde_json::from_value(pairs).map(Some),
            None => Ok(None),
        },
        value @ Value::Array(_) => serde_json::from_value(value).map(Some),
        _ => Ok(None),
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> LuxResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LuxError::io(parent, e))?;
    }

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).map_err(|e| LuxError::json(path, e))?;
    buf.push(b'\n');

    fs::write(path, buf).map_err(|e| LuxError::io(path, e))
}
