use clap::{Parser, Subcommand};
use lux_core::{Config, Mode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lux",
    version,
    about = "Lux - a chatbot that learns the answers it does not know",
    long_about = "Lux answers questions from a set of JSON knowledge files. In learning mode it asks you to rate \
                  uncertain answers and to teach it the ones it does not know, then saves what it learned."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable learning mode
    #[arg(long, global = true, help = "Ask for feedback and learn unknown answers")]
    pub learn: bool,

    /// Knowledge files to load, the first one receives what is learned
    #[arg(short = 'k', long = "knowledge", value_name = "FILE", global = true)]
    pub knowledge_files: Vec<PathBuf>,

    /// Where to keep the statistics
    #[arg(long, value_name = "PATH", global = true)]
    pub stats_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive session (default)
    #[command(about = "Chat interactively, type /help for the special commands")]
    Chat,

    /// Ask a single question
    #[command(about = "Answer one question and exit")]
    Ask(AskArgs),

    /// Show learning statistics
    #[command(about = "Print the learning statistics")]
    Stats(StatsArgs),

    /// List knowledge files
    #[command(about = "List the knowledge files and how many entries each provides")]
    Sources,
}

#[derive(Parser, Debug, PartialEq, Eq)]
pub struct AskArgs {
    /// The question, quoted or as separate words
    #[arg(required = true, num_args = 1.., help = "Question to answer")]
    pub question: Vec<String>,
}

impl AskArgs {
    pub fn text(&self) -> String {
        self.question.join(" ")
    }
}

#[derive(Parser, Debug, PartialEq, Eq)]
pub struct StatsArgs {
    /// Print raw JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        Mode::from_flag(self.learn)
    }

    /// Command-line values take precedence over the configuration file
    pub fn apply_overrides(&self, config: &mut Config) {
        if !self.knowledge_files.is_empty() {
            config.knowledge_files = self.knowledge_files.clone();
        }
        if let Some(stats_file) = &self.stats_file {
            config.stats_path = stats_file.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_chat_in_normal_mode() {
        let cli = Cli::try_parse_from(["lux"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.mode(), Mode::Normal);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_learn_flag_and_overrides() {
        let cli = Cli::try_parse_from([
            "lux", "--learn", "-k", "mine.json", "-k", "shared.json", "--stats-file", "s.json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.mode(), Mode::Learning);
        assert_eq!(cli.verbose, 2);

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.knowledge_files, vec![PathBuf::from("mine.json"), PathBuf::from("shared.json")]);
        assert_eq!(config.stats_path, PathBuf::from("s.json"));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = Cli::try_parse_from(["lux", "stats", "--json"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Stats(StatsArgs { json: true })));

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["lux", "ask", "what", "is", "your", "name"]).unwrap();
        let Some(Commands::Ask(args)) = cli.command else {
            panic!("expected ask command");
        };
        assert_eq!(args.text(), "what is your name");

        assert!(Cli::try_parse_from(["lux", "ask"]).is_err());
    }
}
