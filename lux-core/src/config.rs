//! Runtime configuration for lux
//!
//! Every path and threshold the engine needs lives here and is handed to the
//! components at construction. A TOML file may override any subset of the
//! defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LuxError, LuxResult};

/// Operating mode, fixed for the lifetime of a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Normal,
    Learning,
}

impl Mode {
    pub fn from_flag(learn: bool) -> Self {
        if learn { Mode::Learning } else { Mode::Normal }
    }

    pub fn is_learning(&self) -> bool {
        matches!(self, Mode::Learning)
    }
}

/// Scores and ratings that drive matching and feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Score reported for an exact question match
    pub exact_match: f64,

    /// Fuzzy cutoff in learning mode
    pub fuzzy_learning: f64,

    /// Fuzzy cutoff in normal mode
    pub fuzzy_normal: f64,

    /// Below this score, learning mode asks for a rating
    pub feedback_score: f64,

    /// Ratings above this mark the answer relevant
    pub rating_good: i32,

    /// Ratings below this ask for a correction
    pub rating_bad: i32,

    /// Ratings above this keep an existing answer without asking
    pub keep_existing_rating: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            exact_match: 1.0,
            fuzzy_learning: 0.5,
            fuzzy_normal: 0.7,
            feedback_score: 0.8,
            rating_good: 8,
            rating_bad: 5,
            keep_existing_rating: 7,
        }
    }
}

impl Thresholds {
    /// Fuzzy cutoff for the given mode
    pub fn fuzzy_for(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Learning => self.fuzzy_learning,
            Mode::Normal => self.fuzzy_normal,
        }
    }
}

/// Configuration structure for lux
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where counters and feedback history are stored
    pub stats_path: PathBuf,

    /// Knowledge files, merged in order. The first one is the only one written.
    pub knowledge_files: Vec<PathBuf>,

    /// Save knowledge and stats every N processed questions
    pub auto_save_interval: u64,

    /// Print a line on the console when an auto-save fires
    pub auto_save_messages: bool,

    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_path: PathBuf::from("stats_file.json"),
            knowledge_files: [
                "knowledge_base.json",
                "personality.json",
                "facts.json",
                "faq.json",
                "general_knowledge.json",
                "python_tips.json",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            auto_save_interval: 5,
            auto_save_messages: true,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> LuxResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| LuxError::io(path, e))?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> LuxResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// The writable knowledge file
    pub fn primary_file(&self) -> Option<&Path> {
        self.knowledge_files.first().map(PathBuf::as_path)
    }

    pub fn validate(&self) -> LuxResult<()> {
        if self.knowledge_files.is_empty() {
            return Err(LuxError::config("at least one knowledge file is required"));
        }

        if self.auto_save_interval == 0 {
            return Err(LuxError::config("auto_save_interval must be at least 1"));
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("exact_match", t.exact_match),
            ("fuzzy_learning", t.fuzzy_learning),
            ("fuzzy_normal", t.fuzzy_normal),
            ("feedback_score", t.feedback_score),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LuxError::config(format!("{name} must be within 0.0..=1.0, got {value}")));
            }
        }

        Ok(())
    }
}
