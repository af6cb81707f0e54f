use serde::{Deserialize, Serialize};

/// Persistent counters and feedback history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_questions: u64,
    pub relevant_answers: u64,
    pub irrelevant_answers: u64,
    pub new_learnings: u64,
    pub history: Vec<HistoryRecord>,
}

/// One feedback event. Older stats files used French keys for the improvement
/// variant; both spellings are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryRecord {
    Improved {
        #[serde(rename = "q")]
        question: String,
        #[serde(alias = "ancienne_reponse")]
        previous_answer: String,
        rating: i32,
        #[serde(alias = "amelioration")]
        improved: bool,
    },
    Relevant {
        #[serde(rename = "q")]
        question: String,
        rating: i32,
        relevant: bool,
    },
}

impl HistoryRecord {
    pub fn improved(question: impl Into<String>, previous_answer: impl Into<String>, rating: i32) -> Self {
        Self::Improved { question: question.into(), previous_answer: previous_answer.into(), rating, improved: true }
    }

    pub fn relevant(question: impl Into<String>, rating: i32) -> Self {
        Self::Relevant { question: question.into(), rating, relevant: true }
    }

    pub fn question(&self) -> &str {
        match self {
            Self::Improved { question, .. } | Self::Relevant { question, .. } => question,
        }
    }

    pub fn rating(&self) -> i32 {
        match self {
            Self::Improved { rating, .. } | Self::Relevant { rating, .. } => *rating,
        }
    }
}
