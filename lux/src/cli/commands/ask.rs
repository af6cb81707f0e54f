//! One-shot question

use anyhow::{Context, Result};
use lux_core::{Chatbot, Persistence};
use std::io::Write;
use tracing::info;

use crate::cli::app::AskArgs;

pub fn execute<P: Persistence>(bot: &mut Chatbot<P>, args: &AskArgs, out: &mut impl Write) -> Result<()> {
    let question = args.text();
    info!("Answering {:?}", question);

    let result = bot.ask(question.trim())?.result;
    match &result.answer {
        Some(answer) => {
            writeln!(out, "{answer}")?;
            if result.is_match() {
                writeln!(out, "(relevance {:.2}%)", result.score * 100.0)?;
            }
        }
        None => writeln!(out, "I don't know how to answer that.")?,
    }

    // keep the counters of one-shot runs
    bot.save().context("Failed to save statistics")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::{Config, JsonStore, Mode, QaEntry};
    use std::fs;
    use tempfile::TempDir;

    fn ask(bot: &mut Chatbot<JsonStore>, words: &[&str]) -> String {
        let args = AskArgs { question: words.iter().map(|w| w.to_string()).collect() };
        let mut out = Vec::new();
        execute(bot, &args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_one_shot_answers_persist_counters() {
        let dir = TempDir::new().unwrap();
        let kb = dir.path().join("kb.json");
        let entries = vec![QaEntry::bare("what is your name", "Lux")];
        fs::write(&kb, serde_json::to_string(&serde_json::json!({ "qa_pairs": entries })).unwrap()).unwrap();

        let config =
            Config { knowledge_files: vec![kb], stats_path: dir.path().join("stats.json"), ..Config::default() };

        let mut bot = Chatbot::open(config.clone(), Mode::Normal, JsonStore::new()).unwrap();
        let out = ask(&mut bot, &["What", "is", "your", "name"]);
        assert_eq!(out, "Lux\n(relevance 100.00%)\n");

        let out = ask(&mut bot, &["recipe", "for", "bread"]);
        assert_eq!(out, "I don't know how to answer that.\n");

        let reopened = Chatbot::open(config, Mode::Normal, JsonStore::new()).unwrap();
        assert_eq!(reopened.stats().total_questions, 2);
        assert_eq!(reopened.stats().relevant_answers, 1);
        assert_eq!(reopened.knowledge().len(), 1);
    }
}
