//! Interactive session: question loop, feedback and teaching prompts

use anyhow::{Context, Result};
use lux_core::{Chatbot, FeedbackAction, LearnOutcome, MatchKind, Persistence};
use lux_text::command::{self, SlashCommand};
use lux_text::reply;
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::cli::console::Console;
use crate::cli::display;

/// Run the session until `/quit` or end of input
pub fn run<P, R, W>(bot: &mut Chatbot<P>, console: &mut Console<R, W>) -> Result<()>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    display::banner(console.output(), bot.mode())?;

    loop {
        let Some(line) = console.prompt("\nYou: ")? else {
            debug!("End of input, closing session");
            console.say("")?;
            display::stats(console.output(), &bot.stats())?;
            break;
        };

        let question = line.trim();
        if let Some(slash) = command::parse(question) {
            if !run_command(bot, console, slash)? {
                break;
            }
            continue;
        }
        if question.is_empty() {
            continue;
        }

        handle_question(bot, console, question)?;
    }

    Ok(())
}

/// Returns false when the session should end
fn run_command<P, R, W>(bot: &mut Chatbot<P>, console: &mut Console<R, W>, slash: SlashCommand) -> Result<bool>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    debug!("Session command {}", slash.name());
    match slash {
        SlashCommand::Quit => {
            console.say("\nLux: Goodbye!")?;
            display::stats(console.output(), &bot.stats())?;
            return Ok(false);
        }
        SlashCommand::Stats => display::stats(console.output(), &bot.stats())?,
        SlashCommand::Save => {
            bot.save().context("Failed to save knowledge")?;
            console.say("Knowledge saved!")?;
        }
        SlashCommand::Count => console.say(format!("Questions processed: {}", bot.question_counter()))?,
        SlashCommand::Sources => {
            console.say("")?;
            display::sources(console.output(), &bot.sources())?;
        }
        SlashCommand::Help => display::help(console.output())?,
    }
    Ok(true)
}

fn handle_question<P, R, W>(bot: &mut Chatbot<P>, console: &mut Console<R, W>, question: &str) -> Result<()>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    let answered = bot.ask(question)?;
    if answered.auto_saved && bot.config().auto_save_messages {
        console.say(format!("Auto-save: {} questions processed", bot.question_counter()))?;
    }

    let result = answered.result;
    match result.kind {
        MatchKind::Exact | MatchKind::Fuzzy => {
            let answer = result.answer.unwrap_or_default();
            console.say(format!("Lux: {answer}"))?;
            console.say(format!("\nRelevance score: {:.2}%", result.score * 100.0))?;
            ask_feedback(bot, console, question, &answer, result.score)?;
        }
        MatchKind::EmptyKnowledge => {
            console.say(format!("Lux: {}", result.answer.unwrap_or_default()))?;
            if bot.mode().is_learning() {
                teach(bot, console, question)?;
            }
        }
        MatchKind::NoMatch => {
            console.say("Lux: I don't know how to answer that.")?;
            if bot.mode().is_learning() {
                teach(bot, console, question)?;
            }
        }
    }

    Ok(())
}

fn ask_feedback<P, R, W>(
    bot: &mut Chatbot<P>,
    console: &mut Console<R, W>,
    question: &str,
    answer: &str,
    score: f64,
) -> Result<()>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    let Some(request) = bot.evaluate_relevance(question, answer, score) else {
        return Ok(());
    };

    console.say("\nLearning mode: help me improve!")?;
    let raw = console.prompt("   Rate the relevance of this answer (1-10): ")?.unwrap_or_default();

    match bot.submit_rating(&request, &raw)? {
        FeedbackAction::NeedsCorrection(correction) => {
            console.say("   Sorry! Could you give me the right answer?")?;
            let good_answer = console.prompt("   The right answer is: ")?.unwrap_or_default();
            if let Some(outcome) = bot.submit_correction(&correction, good_answer.trim())? {
                let outcome = settle(bot, console, outcome)?;
                if outcome.is_learned() {
                    console.say("   Thanks, I updated my answer.")?;
                }
            }
        }
        FeedbackAction::Approved { .. } => console.say("   Great! I'll remember this answer is relevant.")?,
        FeedbackAction::Ignored { rating } => debug!("Rating {:?} left the answer as it is", rating),
    }

    Ok(())
}

fn teach<P, R, W>(bot: &mut Chatbot<P>, console: &mut Console<R, W>, question: &str) -> Result<()>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    console.say("   Learning mode: teach me the answer!")?;
    let Some(answer) = console.prompt("   What should the answer be? (or 'skip' to pass): ")? else {
        return Ok(());
    };
    if reply::is_skip(&answer) {
        return Ok(());
    }

    let outcome = bot.teach(question, answer.trim())?;
    let outcome = settle(bot, console, outcome)?;

    if outcome.is_learned() {
        info!("Learned an answer for {:?}", question);
        console.say("   Got it, I learned something new!")?;
        if let Some(now) = bot.peek(question).answer {
            console.say(format!("   Now I would answer: {now}"))?;
        }
    } else {
        console.say("   That question is already in my knowledge base.")?;
    }

    Ok(())
}

/// Ask before overwriting an existing answer
fn settle<P, R, W>(bot: &mut Chatbot<P>, console: &mut Console<R, W>, outcome: LearnOutcome) -> Result<LearnOutcome>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    let LearnOutcome::NeedsConfirmation(pending) = outcome else {
        return Ok(outcome);
    };

    console.say(format!("\n   This question already exists (current answer: {})", pending.existing_answer))?;
    let accept = console.prompt("   Replace it? (y/n): ")?.is_some_and(|choice| reply::is_yes(&choice));

    Ok(bot.confirm(pending, accept)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Config, HistoryRecord, JsonStore, MemoryStore, Mode, QaEntry};
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config() -> Config {
        Config {
            knowledge_files: vec![PathBuf::from("kb.json"), PathBuf::from("facts.json")],
            ..Config::default()
        }
    }

    fn chatbot(mode: Mode) -> Chatbot<MemoryStore> {
        let store = MemoryStore::new()
            .with_file("kb.json", vec![QaEntry::bare("what is your name", "Lux")])
            .with_file(
                "facts.json",
                vec![QaEntry::bare("what is the capital of france", "Paris"), QaEntry::bare("sky colour", "Blue")],
            );
        Chatbot::open(config(), mode, store).unwrap()
    }

    fn session<P: Persistence>(bot: &mut Chatbot<P>, input: &str) -> String {
        let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
        run(bot, &mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_answers_and_quits_with_stats() {
        let mut bot = chatbot(Mode::Normal);
        let out = session(&mut bot, "What is your name\n/quit\nnever read\n");

        assert!(out.contains("Lux: Lux"));
        assert!(out.contains("Relevance score: 100.00%"));
        assert!(out.contains("Goodbye!"));
        assert!(out.contains("Total questions:    1"));
        assert_eq!(bot.stats().total_questions, 1);
    }

    #[test]
    fn test_eof_ends_session_with_stats() {
        let mut bot = chatbot(Mode::Normal);
        let out = session(&mut bot, "tell me a joke\n");

        assert!(out.contains("I don't know how to answer that."));
        assert!(!out.contains("teach me"), "normal mode never asks to be taught");
        assert!(out.contains("LEARNING STATISTICS"));
        assert_eq!(bot.stats().irrelevant_answers, 1);
    }

    #[test]
    fn test_slash_commands_are_not_questions() {
        let mut bot = chatbot(Mode::Normal);
        let out = session(&mut bot, "/COUNT\n/sources\n/help\n\n/save\n/quit\n");

        assert!(out.contains("Questions processed: 0"));
        assert!(out.contains("1. kb.json : 1 entries (learns here)"));
        assert!(out.contains("Knowledge saved!"));
        assert_eq!(bot.stats().total_questions, 0);
        assert_eq!(bot.store().knowledge_saves, 1);
    }

    #[test]
    fn test_teaching_an_unknown_question() {
        let mut bot = chatbot(Mode::Learning);
        let out = session(&mut bot, "who wrote dune\nFrank Herbert\nwho wrote dune\n/quit\n");

        assert!(out.contains("Got it, I learned something new!"));
        assert!(out.contains("Now I would answer: Frank Herbert"));
        assert!(out.contains("Lux: Frank Herbert"));
        assert_eq!(bot.stats().new_learnings, 1);
        assert_eq!(bot.stats().total_questions, 2, "the follow-up display is not counted");
    }

    #[test]
    fn test_skip_teaches_nothing() {
        let mut bot = chatbot(Mode::Learning);
        session(&mut bot, "who wrote dune\n SKIP \n");

        assert_eq!(bot.knowledge().len(), 3);
        assert_eq!(bot.store().knowledge_saves, 0);
    }

    #[test]
    fn test_poor_rating_collects_correction() {
        let mut bot = chatbot(Mode::Learning);
        let out = session(&mut bot, "the capital of spain\n2\nMadrid\n/quit\n");

        assert!(out.contains("Lux: Paris"));
        assert!(out.contains("Rate the relevance"));
        assert!(out.contains("Thanks, I updated my answer."));
        assert_eq!(bot.peek("the capital of spain").answer.as_deref(), Some("Madrid"));
        assert_eq!(bot.raw_stats().history, vec![HistoryRecord::improved("the capital of spain", "Paris", 2)]);
    }

    #[test]
    fn test_good_rating_is_recorded() {
        let mut bot = chatbot(Mode::Learning);
        let out = session(&mut bot, "the capital of spain\n9\n");

        assert!(out.contains("I'll remember this answer is relevant."));
        assert_eq!(bot.raw_stats().history, vec![HistoryRecord::relevant("the capital of spain", 9)]);
    }

    #[test]
    fn test_exact_matches_skip_feedback() {
        let mut bot = chatbot(Mode::Learning);
        let out = session(&mut bot, "sky colour\n/quit\n");

        assert!(!out.contains("Rate the relevance"));
    }

    #[test]
    fn test_auto_save_message() {
        let mut bot = chatbot(Mode::Normal);
        let out = session(&mut bot, &"what is your name\n".repeat(5));

        assert!(out.contains("Auto-save: 5 questions processed"));
        assert_eq!(bot.store().stats_saves, 1);
    }

    #[test]
    fn test_empty_knowledge_in_learning_mode_persists_to_disk() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            knowledge_files: vec![dir.path().join("kb.json")],
            stats_path: dir.path().join("stats_file.json"),
            ..Config::default()
        };
        let mut bot = Chatbot::open(config.clone(), Mode::Learning, JsonStore::new()).unwrap();

        let out = session(&mut bot, "hello\nHi there!\n");
        assert!(out.contains("I don't know anything yet."));
        assert!(out.contains("Now I would answer: Hi there!"));

        let reopened = Chatbot::open(config, Mode::Normal, JsonStore::new()).unwrap();
        assert_eq!(reopened.peek("HELLO").answer.as_deref(), Some("Hi there!"));
    }
}
