//! Read-only reports: statistics and knowledge sources

use anyhow::Result;
use lux_core::{Chatbot, Persistence};
use std::io::Write;

use crate::cli::display;

pub fn stats<P: Persistence>(bot: &Chatbot<P>, json: bool, out: &mut impl Write) -> Result<()> {
    let snapshot = bot.stats();
    if json {
        serde_json::to_writer_pretty(&mut *out, &snapshot)?;
        writeln!(out)?;
    } else {
        display::stats(out, &snapshot)?;
    }
    Ok(())
}

pub fn sources<P: Persistence>(bot: &Chatbot<P>, out: &mut impl Write) -> Result<()> {
    display::sources(out, &bot.sources())?;
    Ok(())
}
