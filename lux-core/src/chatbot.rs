//! Entry point tying the engine, the learning controller and the stats
//! tracker to one knowledge set and one store.

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::{Config, Mode};
use crate::error::{LuxError, LuxResult};
use crate::knowledge::KnowledgeSet;
use crate::learning::{LearnOutcome, LearnRequest, LearningController, PendingReplace};
use crate::matching::{MatchEngine, MatchResult};
use crate::stats::{CorrectionRequest, FeedbackAction, FeedbackRequest, Stats, StatsSnapshot, StatsTracker};
use crate::storage::{Persistence, source_id};

/// Result of a counted question
#[derive(Debug, Clone, PartialEq)]
pub struct Answered {
    pub result: MatchResult,
    /// Knowledge and stats were written because the auto-save interval was reached
    pub auto_saved: bool,
}

/// Entries contributed by one knowledge file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub entries: usize,
    pub primary: bool,
}

pub struct Chatbot<P: Persistence> {
    config: Config,
    mode: Mode,
    knowledge: KnowledgeSet,
    engine: MatchEngine,
    learner: LearningController,
    tracker: StatsTracker,
    store: P,
}

impl<P: Persistence> Chatbot<P> {
    /// Load knowledge and stats through `store`
    pub fn open(config: Config, mode: Mode, mut store: P) -> LuxResult<Self> {
        config.validate()?;
        let primary = config
            .primary_file()
            .map(source_id)
            .ok_or_else(|| LuxError::config("at least one knowledge file is required"))?;

        let entries = store.load_knowledge(&config.knowledge_files)?;
        let stats = store.load_stats(&config.stats_path)?;
        info!("Chatbot ready in {:?} mode with {} entries", mode, entries.len());

        Ok(Self {
            engine: MatchEngine::new(mode, &config.thresholds),
            learner: LearningController::new(&config.thresholds, primary),
            tracker: StatsTracker::new(stats, mode, &config),
            knowledge: KnowledgeSet::from_entries(entries),
            config,
            mode,
            store,
        })
    }

    /// Answer a question, counting it and auto-saving when due
    pub fn ask(&mut self, question: &str) -> LuxResult<Answered> {
        let result = self.engine.find_answer(&self.knowledge, question);
        self.tracker.record_query(result.is_match());

        let auto_saved = self.tracker.tick();
        if auto_saved {
            self.save()?;
            info!("Auto-save after {} questions", self.tracker.question_counter());
        }

        Ok(Answered { result, auto_saved })
    }

    pub fn find_answer(&mut self, question: &str) -> LuxResult<MatchResult> {
        self.ask(question).map(|answered| answered.result)
    }

    /// Match without touching counters
    pub fn peek(&self, question: &str) -> MatchResult {
        self.engine.find_answer(&self.knowledge, question)
    }

    pub fn learn(&mut self, request: LearnRequest) -> LuxResult<LearnOutcome> {
        let outcome = self.learner.learn(&mut self.knowledge, request);
        self.commit(&outcome)?;
        Ok(outcome)
    }

    pub fn teach(&mut self, question: &str, answer: &str) -> LuxResult<LearnOutcome> {
        self.learn(LearnRequest::new(question, answer))
    }

    /// Settle an overwrite returned as [`LearnOutcome::NeedsConfirmation`]
    pub fn confirm(&mut self, pending: PendingReplace, accept: bool) -> LuxResult<LearnOutcome> {
        let outcome = self.learner.confirm(&mut self.knowledge, pending, accept);
        self.commit(&outcome)?;
        Ok(outcome)
    }

    pub fn evaluate_relevance(&self, question: &str, found_answer: &str, score: f64) -> Option<FeedbackRequest> {
        self.tracker.evaluate_relevance(question, found_answer, score)
    }

    /// Apply a rating typed by the user. Stats are saved unless a correction
    /// is still expected.
    pub fn submit_rating(&mut self, request: &FeedbackRequest, raw: &str) -> LuxResult<FeedbackAction> {
        let action = self.tracker.submit_rating(request, raw);
        if !matches!(action, FeedbackAction::NeedsCorrection(_)) {
            self.save_stats()?;
        }
        Ok(action)
    }

    /// Learn the corrected answer for a poorly rated reply. A blank answer
    /// means the user gave none.
    pub fn submit_correction(
        &mut self,
        correction: &CorrectionRequest,
        answer: &str,
    ) -> LuxResult<Option<LearnOutcome>> {
        let outcome = if answer.trim().is_empty() {
            None
        } else {
            let request = LearnRequest::new(correction.question.as_str(), answer).with_rating(correction.rating);
            let outcome = self.learn(request)?;
            self.tracker.record_improvement(correction);
            Some(outcome)
        };

        self.save_stats()?;
        Ok(outcome)
    }

    /// Write knowledge and stats
    pub fn save(&mut self) -> LuxResult<()> {
        self.save_knowledge()?;
        self.save_stats()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.tracker.snapshot(self.knowledge.len())
    }

    pub fn raw_stats(&self) -> &Stats {
        self.tracker.stats()
    }

    pub fn sources(&self) -> Vec<SourceSummary> {
        self.config
            .knowledge_files
            .iter()
            .enumerate()
            .map(|(i, path)| SourceSummary {
                path: path.clone(),
                entries: self.knowledge.count_in_file(i),
                primary: i == 0,
            })
            .collect()
    }

    pub fn knowledge(&self) -> &KnowledgeSet {
        &self.knowledge
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn question_counter(&self) -> u64 {
        self.tracker.question_counter()
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    fn commit(&mut self, outcome: &LearnOutcome) -> LuxResult<()> {
        match outcome {
            LearnOutcome::Inserted { .. } => {
                self.tracker.record_learning();
                self.save_knowledge()
            }
            LearnOutcome::Replaced { .. } => self.save_knowledge(),
            LearnOutcome::Rejected(_) | LearnOutcome::NeedsConfirmation(_) => Ok(()),
        }
    }

    fn save_knowledge(&mut self) -> LuxResult<()> {
        let Some(primary) = self.config.knowledge_files.first() else {
            return Ok(());
        };
        self.store.save_knowledge(primary, &self.knowledge)
    }

    fn save_stats(&mut self) -> LuxResult<()> {
        self.store.save_stats(&self.config.stats_path, self.tracker.stats())
    }
}
