use std::path::PathBuf;

use chartmind_client::Outcome;

pub const HELP: &str = "\
Commands:
  analyze <chart> [<chart> ...]   upload chart image(s) for analysis
  win | loss                      report the outcome of the current signal
  news                            show the latest news panel
  help                            show this help
  quit                            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// May be empty; the dashboard rejects an empty selection itself.
    Analyze(Vec<PathBuf>),
    Feedback(Outcome),
    News,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Command::Empty;
        };

        match head.to_ascii_lowercase().as_str() {
            "analyze" | "upload" => Command::Analyze(words.map(PathBuf::from).collect()),
            "win" => Command::Feedback(Outcome::Win),
            "loss" => Command::Feedback(Outcome::Loss),
            "news" => Command::News,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("analyze a.png  b.jpg"),
            Command::Analyze(vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")])
        );
        assert_eq!(Command::parse("analyze"), Command::Analyze(vec![]));
        assert_eq!(Command::parse("WIN"), Command::Feedback(Outcome::Win));
        assert_eq!(Command::parse(" loss "), Command::Feedback(Outcome::Loss));
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("buy"), Command::Unknown("buy".to_string()));
    }
}
