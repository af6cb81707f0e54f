//! Core functionality for lux
//!
//! This crate answers free-text questions from a store of question/answer
//! pairs and learns new pairs as it goes. It contains the matching engine,
//! the learning controller, the stats tracker and the JSON persistence they
//! write through. Interactive decisions are never taken here: whenever the
//! user must be asked something, a pending value is returned instead.

pub mod chatbot;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod learning;
pub mod matching;
pub mod stats;
pub mod storage;

pub use chatbot::{Answered, Chatbot, SourceSummary};
pub use config::{Config, Mode, Thresholds};
pub use error::{LuxError, LuxResult};
pub use knowledge::{KnowledgeSet, NormalizationCache, Origin, QaEntry};
pub use learning::{LearnOutcome, LearnRequest, LearningController, PendingReplace, RejectReason};
pub use matching::{MatchEngine, MatchKind, MatchResult, NO_KNOWLEDGE_ANSWER};
pub use stats::{
    CorrectionRequest, FeedbackAction, FeedbackRequest, HistoryRecord, Stats, StatsSnapshot, StatsTracker,
};
pub use storage::{JsonStore, MemoryStore, Persistence};
