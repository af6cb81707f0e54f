//! Text blocks shared by the interactive session and the one-shot commands

use lux_core::{Mode, SourceSummary, StatsSnapshot};
use lux_text::command::SlashCommand;
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn banner(out: &mut impl Write, mode: Mode) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "LUX CHATBOT")?;
    rule(out)?;
    match mode {
        Mode::Learning => {
            writeln!(out, "Learning mode is on")?;
            writeln!(out, "   I will learn from our conversation!")?;
        }
        Mode::Normal => {
            writeln!(out, "Normal mode")?;
            writeln!(out, "   Start with --learn to let me learn from you")?;
        }
    }
    rule(out)?;
    help(out)?;
    rule(out)
}

pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Special commands:")?;
    for command in SlashCommand::all() {
        writeln!(out, "  {:<10} - {}", command.name(), command.description())?;
    }
    Ok(())
}

pub fn stats(out: &mut impl Write, snapshot: &StatsSnapshot) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "LEARNING STATISTICS")?;
    rule(out)?;
    writeln!(out, "Total questions:    {}", snapshot.total_questions)?;
    writeln!(out, "Relevant answers:   {}", snapshot.relevant_answers)?;
    writeln!(out, "Irrelevant answers: {}", snapshot.irrelevant_answers)?;
    if let Some(rate) = snapshot.relevance_rate() {
        writeln!(out, "Relevance rate:     {rate:.1}%")?;
    }
    writeln!(out, "New learnings:      {}", snapshot.new_learnings)?;
    writeln!(out, "Feedback records:   {}", snapshot.history_records)?;
    writeln!(out, "Knowledge base:     {} entries", snapshot.knowledge_entries)?;
    rule(out)
}

pub fn sources(out: &mut impl Write, sources: &[SourceSummary]) -> io::Result<()> {
    writeln!(out, "Loaded knowledge files:")?;
    for (i, source) in sources.iter().enumerate() {
        let marker = if source.primary { " (learns here)" } else { "" };
        writeln!(out, "  {}. {} : {} entries{}", i + 1, source.path.display(), source.entries, marker)?;
    }
    Ok(())
}
