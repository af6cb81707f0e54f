//! Console input patterns for lux
//! Kept in a separate crate so the regexes compile once and stay out of the core

use once_cell::sync::Lazy;
use regex::Regex;

/// Slash commands understood by the interactive session
pub mod command {
    use super::*;

    pub static COMMAND_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^\s*/([A-Za-z]+)\s*$").expect("Invalid regex pattern")
    });

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SlashCommand {
        Quit,
        Stats,
        Save,
        Count,
        Sources,
        Help,
    }

    impl SlashCommand {
        pub fn name(&self) -> &'static str {
            match self {
                SlashCommand::Quit => "/quit",
                SlashCommand::Stats => "/stats",
                SlashCommand::Save => "/save",
                SlashCommand::Count => "/count",
                SlashCommand::Sources => "/sources",
                SlashCommand::Help => "/help",
            }
        }

        pub fn description(&self) -> &'static str {
            match self {
                SlashCommand::Quit => "Quit the session",
                SlashCommand::Stats => "Show learning statistics",
                SlashCommand::Save => "Save the knowledge base now",
                SlashCommand::Count => "Show how many questions were processed",
                SlashCommand::Sources => "List the knowledge files and their entries",
                SlashCommand::Help => "Show this list",
            }
        }

        pub fn all() -> [SlashCommand; 6] {
            [
                SlashCommand::Sources,
                SlashCommand::Count,
                SlashCommand::Stats,
                SlashCommand::Save,
                SlashCommand::Help,
                SlashCommand::Quit,
            ]
        }
    }

    /// Parse a console line as a slash command. Unknown commands return `None`
    /// so the line is treated as an ordinary question.
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let caps = COMMAND_PATTERN.captures(text)?;
        let word = caps.get(1)?.as_str().to_lowercase();

        match word.as_str() {
            "quit" | "exit" => Some(SlashCommand::Quit),
            "stats" => Some(SlashCommand::Stats),
            "save" => Some(SlashCommand::Save),
            "count" => Some(SlashCommand::Count),
            "sources" => Some(SlashCommand::Sources),
            "help" => Some(SlashCommand::Help),
            _ => None,
        }
    }
}

/// Yes/no and skip answers
pub mod reply {
    use super::*;

    pub static YES_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^\s*(o|oui|y|yes)\s*$").expect("Invalid regex pattern")
    });

    pub static SKIP_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^\s*skip\s*$").expect("Invalid regex pattern")
    });

    pub fn is_yes(text: &str) -> bool {
        YES_PATTERN.is_match(text)
    }

    pub fn is_skip(text: &str) -> bool {
        SKIP_PATTERN.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use command::SlashCommand;

    #[test]
    fn test_command_parsing() {
        assert_eq!(command::parse("/quit"), Some(SlashCommand::Quit));
        assert_eq!(command::parse("  /STATS "), Some(SlashCommand::Stats));
        assert_eq!(command::parse("/Sources"), Some(SlashCommand::Sources));
        assert_eq!(command::parse("/exit"), Some(SlashCommand::Quit));

        assert_eq!(command::parse("/unknown"), None);
        assert_eq!(command::parse("what is /quit"), None);
        assert_eq!(command::parse("quit"), None);
    }

    #[test]
    fn test_replies() {
        assert!(reply::is_yes("o"));
        assert!(reply::is_yes("Yes"));
        assert!(reply::is_yes(" y\n"));
        assert!(!reply::is_yes("n"));
        assert!(!reply::is_yes("yes please"));

        assert!(reply::is_skip("skip"));
        assert!(reply::is_skip("SKIP "));
        assert!(!reply::is_skip("skipping"));
    }
}
