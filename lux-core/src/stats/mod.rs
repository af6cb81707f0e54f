//! Outcome counters, feedback history and the auto-save schedule

pub mod record;
pub mod tracker;

pub use record::{HistoryRecord, Stats};
pub use tracker::{CorrectionRequest, FeedbackAction, FeedbackRequest, StatsSnapshot, StatsTracker};
