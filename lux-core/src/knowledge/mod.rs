//! Question/answer storage
//!
//! The knowledge set owns its normalization cache; both only change through
//! the set's own mutation methods, which the learning controller drives.

pub mod cache;
pub mod entry;
pub mod set;

pub use cache::NormalizationCache;
pub use entry::{Origin, QaEntry};
pub use set::KnowledgeSet;

/// Projection used for every question comparison
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}
