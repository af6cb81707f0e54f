use serde::Serialize;
use tracing::{debug, info};

use crate::config::Thresholds;
use crate::knowledge::{KnowledgeSet, QaEntry, normalize};

/// A question/answer pair offered for learning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnRequest {
    pub question: String,
    pub answer: String,
    /// Rating the current answer received, when learning from feedback
    pub rating: Option<i32>,
    /// Knowledge file to attribute the entry to; the primary file when absent
    pub source: Option<String>,
}

impl LearnRequest {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into(), rating: None, source: None }
    }

    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The stored answer was rated well enough to keep
    AlreadyGood,
    /// The caller declined to overwrite the stored answer
    Declined,
}

/// Overwrite waiting for the caller's approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReplace {
    pub index: usize,
    pub existing_answer: String,
    pub request: LearnRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LearnOutcome {
    Inserted { index: usize },
    Replaced { index: usize, previous: QaEntry },
    Rejected(RejectReason),
    NeedsConfirmation(PendingReplace),
}

impl LearnOutcome {
    /// Whether the knowledge set changed
    pub fn is_learned(&self) -> bool {
        matches!(self, LearnOutcome::Inserted { .. } | LearnOutcome::Replaced { .. })
    }
}

/// Decides whether a pair is appended, overwrites an existing entry, or is
/// turned away. Never prompts: overwrites come back as
/// [`LearnOutcome::NeedsConfirmation`] and are settled through [`confirm`].
///
/// [`confirm`]: LearningController::confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningController {
    keep_existing_rating: i32,
    default_source: String,
}

impl LearningController {
    pub fn new(thresholds: &Thresholds, default_source: impl Into<String>) -> Self {
        Self { keep_existing_rating: thresholds.keep_existing_rating, default_source: default_source.into() }
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    pub fn learn(&self, knowledge: &mut KnowledgeSet, request: LearnRequest) -> LearnOutcome {
        let Some(index) = knowledge.find(&request.question) else {
            return self.insert(knowledge, request);
        };

        if request.rating.is_some_and(|rating| rating > self.keep_existing_rating) {
            debug!("Keeping well-rated answer for '{}'", request.question);
            return LearnOutcome::Rejected(RejectReason::AlreadyGood);
        }

        let existing_answer = knowledge.get(index).map(|e| e.answer.clone()).unwrap_or_default();
        LearnOutcome::NeedsConfirmation(PendingReplace { index, existing_answer, request })
    }

    /// Settle a pending overwrite
    pub fn confirm(&self, knowledge: &mut KnowledgeSet, pending: PendingReplace, accept: bool) -> LearnOutcome {
        if !accept {
            return LearnOutcome::Rejected(RejectReason::Declined);
        }

        let PendingReplace { index, request, .. } = pending;

        let still_there = knowledge
            .get(index)
            .is_some_and(|e| e.normalized_question() == normalize(&request.question));
        let index = if still_there { Some(index) } else { knowledge.find(&request.question) };

        match index {
            Some(index) => self.replace(knowledge, index, request),
            None => self.insert(knowledge, request),
        }
    }

    fn insert(&self, knowledge: &mut KnowledgeSet, request: LearnRequest) -> LearnOutcome {
        let entry = self.entry_for(request);
        info!("Learned new answer for '{}'", entry.question);
        let index = knowledge.push(entry);
        LearnOutcome::Inserted { index }
    }

    fn replace(&self, knowledge: &mut KnowledgeSet, index: usize, request: LearnRequest) -> LearnOutcome {
        let entry = self.entry_for(request);
        info!("Replaced answer for '{}'", entry.question);
        match knowledge.replace(index, entry) {
            Some(previous) => LearnOutcome::Replaced { index, previous },
            None => LearnOutcome::Rejected(RejectReason::Declined),
        }
    }

    fn entry_for(&self, request: LearnRequest) -> QaEntry {
        let source = request.source.unwrap_or_else(|| self.default_source.clone());
        QaEntry::learned(request.question, request.answer, source)
    }
}
