//! Question matching: exact lookup first, then a single-candidate fuzzy search

pub mod engine;
pub mod similarity;

pub use engine::{MatchEngine, MatchKind, MatchResult, NO_KNOWLEDGE_ANSWER};
pub use similarity::{Candidate, best_match, ratio};
