use anyhow::{Context, Result};
use clap::Parser;
use lux_core::{Chatbot, Config, JsonStore};
use std::io;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands, Console};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    // Console chat shares the terminal, so only warnings by default
    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let mut config = Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    let mode = cli.mode();

    let mut bot = Chatbot::open(config, mode, JsonStore::new()).context("Failed to open knowledge base")?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            info!("Starting interactive session in {:?} mode", mode);
            let mut console = Console::stdio();
            cli::commands::chat::run(&mut bot, &mut console)?;
        }
        Commands::Ask(args) => {
            info!("Ask command: {:?}", args);
            cli::commands::ask::execute(&mut bot, &args, &mut io::stdout())?;
        }
        Commands::Stats(args) => {
            cli::commands::report::stats(&bot, args.json, &mut io::stdout())?;
        }
        Commands::Sources => {
            cli::commands::report::sources(&bot, &mut io::stdout())?;
        }
    }

    Ok(())
}
