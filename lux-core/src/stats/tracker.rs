use serde::Serialize;
use tracing::debug;

use crate::config::{Config, Mode};

use super::record::{HistoryRecord, Stats};

/// Ask for a 1-10 rating of an answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub found_answer: String,
    pub score: f64,
}

/// Ask for the right answer after a poor rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionRequest {
    pub question: String,
    pub previous_answer: String,
    pub rating: i32,
}

/// What a submitted rating led to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum FeedbackAction {
    NeedsCorrection(CorrectionRequest),
    Approved { rating: i32 },
    /// Middle-band rating or unreadable input
    Ignored { rating: Option<i32> },
}

/// Read-only view of the counters for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub total_questions: u64,
    pub relevant_answers: u64,
    pub irrelevant_answers: u64,
    pub new_learnings: u64,
    pub history_records: usize,
    pub knowledge_entries: usize,
    pub questions_this_session: u64,
}

impl StatsSnapshot {
    /// Percentage of questions that found an answer
    pub fn relevance_rate(&self) -> Option<f64> {
        if self.total_questions == 0 {
            None
        } else {
            Some(self.relevant_answers as f64 / self.total_questions as f64 * 100.0)
        }
    }
}

/// Counts outcomes, keeps the feedback history and decides when feedback is
/// requested and when an auto-save is due.
#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Stats,
    mode: Mode,
    feedback_score: f64,
    rating_good: i32,
    rating_bad: i32,
    auto_save_interval: u64,
    question_counter: u64,
}

impl StatsTracker {
    pub fn new(stats: Stats, mode: Mode, config: &Config) -> Self {
        Self {
            stats,
            mode,
            feedback_score: config.thresholds.feedback_score,
            rating_good: config.thresholds.rating_good,
            rating_bad: config.thresholds.rating_bad,
            // Trackers can be built from a config that never went through `Config::validate`
            auto_save_interval: config.auto_save_interval.max(1),
            question_counter: 0,
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn question_counter(&self) -> u64 {
        self.question_counter
    }

    pub fn record_query(&mut self, matched: bool) {
        self.stats.total_questions += 1;
        if matched {
            self.stats.relevant_answers += 1;
        } else {
            self.stats.irrelevant_answers += 1;
        }
    }

    pub fn record_learning(&mut self) {
        self.stats.new_learnings += 1;
    }

    /// Count one processed question; true when an auto-save is due
    pub fn tick(&mut self) -> bool {
        self.question_counter += 1;
        self.question_counter % self.auto_save_interval == 0
    }

    /// Feedback is only requested in learning mode for answers scoring under
    /// the feedback threshold.
    pub fn evaluate_relevance(&self, question: &str, found_answer: &str, score: f64) -> Option<FeedbackRequest> {
        if !self.mode.is_learning() || score >= self.feedback_score {
            return None;
        }
        Some(FeedbackRequest { question: question.to_string(), found_answer: found_answer.to_string(), score })
    }

    /// Apply raw console input as a rating. Non-numeric input is ignored.
    pub fn submit_rating(&mut self, request: &FeedbackRequest, raw: &str) -> FeedbackAction {
        match raw.trim().parse::<i32>() {
            Ok(rating) => self.apply_rating(request, rating),
            Err(_) => {
                debug!("Ignoring non-numeric rating '{}'", raw.trim());
                FeedbackAction::Ignored { rating: None }
            }
        }
    }

    pub fn apply_rating(&mut self, request: &FeedbackRequest, rating: i32) -> FeedbackAction {
        if rating < self.rating_bad {
            FeedbackAction::NeedsCorrection(CorrectionRequest {
                question: request.question.clone(),
                previous_answer: request.found_answer.clone(),
                rating,
            })
        } else if rating > self.rating_good {
            self.stats.history.push(HistoryRecord::relevant(&request.question, rating));
            FeedbackAction::Approved { rating }
        } else {
            FeedbackAction::Ignored { rating: Some(rating) }
        }
    }

    /// Log that a poorly rated answer received a correction
    pub fn record_improvement(&mut self, correction: &CorrectionRequest) {
        self.stats.history.push(HistoryRecord::improved(
            &correction.question,
            &correction.previous_answer,
            correction.rating,
        ));
    }

    pub fn snapshot(&self, knowledge_entries: usize) -> StatsSnapshot {
        StatsSnapshot {
            total_questions: self.stats.total_questions,
            relevant_answers: self.stats.relevant_answers,
            irrelevant_answers: self.stats.irrelevant_answers,
            new_learnings: self.stats.new_learnings,
            history_records: self.stats.history.len(),
            knowledge_entries,
            questions_this_session: self.question_counter,
        }
    }
}
