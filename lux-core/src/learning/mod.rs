pub mod controller;

pub use controller::{LearnOutcome, LearnRequest, LearningController, PendingReplace, RejectReason};
