//! Input handling for the terminal front end.
//!
//! Each line typed at the prompt becomes one [`Command`]. Commands are the events
//! the presentation layer feeds into the game: answers, purchases, invasion
//! choices and pure view toggles.

use std::str::FromStr;

/// One player action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Answer the current quiz question. Kept raw; the quiz decides what counts as correct.
    Answer(String),
    /// Conquer a planet by paying its cost.
    Buy(String),
    /// Claim a free starting planet.
    Start(String),
    /// Leave the start screen.
    Begin,
    /// Open the planet selection screen.
    Expand,
    /// Close the planet selection screen.
    Back,
    /// Answer the invasion challenge.
    Defend(String),
    Tribute,
    Surrender,
    /// Show a planet's info card.
    Inspect(String),
    Status,
    ResetView,
    Help,
    Quit,
}

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("nothing entered")]
    Empty,
    #[error("unknown command `{0}` (type `help` for a list)")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument { command: &'static str, what: &'static str },
}

impl Command {
    /// Parse one input line. A line starting with a number is shorthand for `answer <line>`.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return Err(ParseError::Empty);
        }

        let arg = |command: &'static str, what: &'static str| -> Result<String, ParseError> {
            if rest.is_empty() {
                Err(ParseError::MissingArgument { command, what })
            } else {
                Ok(rest.to_string())
            }
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "answer" | "a" => Command::Answer(arg("answer", "a number")?),
            "buy" | "conquer" => Command::Buy(arg("buy", "a planet name")?),
            "start" => {
                if rest.is_empty() {
                    Command::Begin
                } else {
                    Command::Start(rest.to_string())
                }
            }
            "expand" => Command::Expand,
            "back" => Command::Back,
            "defend" | "d" => Command::Defend(arg("defend", "an answer")?),
            "tribute" => Command::Tribute,
            "surrender" => Command::Surrender,
            "inspect" | "info" => Command::Inspect(arg("inspect", "a planet name")?),
            "status" | "s" => Command::Status,
            "reset-view" | "reset" => Command::ResetView,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ if looks_numeric(word) => Command::Answer(line.to_string()),
            _ => return Err(ParseError::Unknown(word.to_string())),
        };
        log::trace!("parsed {:?}", cmd);
        Ok(cmd)
    }

    /// Commands that only change what is on screen.
    pub fn is_view_toggle(&self) -> bool {
        matches!(
            self,
            Command::Begin | Command::Expand | Command::Back | Command::Status | Command::ResetView | Command::Help
        )
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

/// Sign, then an optional point, then a digit.
fn looks_numeric(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let s = s.strip_prefix('.').unwrap_or(s);
    s.starts_with(|c: char| c.is_ascii_digit())
}

/// One line per command for the `help` screen.
pub const HELP_LINES: &[(&str, &str)] = &[
    ("<number> | answer <n>", "answer the current question"),
    ("expand", "open the planet selection screen"),
    ("buy <planet>", "conquer a planet with coins"),
    ("start <planet>", "claim a free starting planet"),
    ("back", "return to the quiz"),
    ("defend <x>", "answer the invasion challenge"),
    ("tribute", "pay part of your coins to the invader"),
    ("surrender", "give up the targeted planet"),
    ("inspect <planet>", "show a planet's info card"),
    ("status", "show coins, difficulty and empire"),
    ("reset-view", "fly the camera back to the sun"),
    ("quit", "leave the game"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_is_an_answer() {
        assert_eq!(Command::parse("42"), Ok(Command::Answer("42".into())));
        assert_eq!(Command::parse("  -3 "), Ok(Command::Answer("-3".into())));
        assert_eq!(Command::parse("1.25"), Ok(Command::Answer("1.25".into())));
        assert_eq!(Command::parse("7 coins"), Ok(Command::Answer("7 coins".into())));
        assert_eq!(Command::parse("7abc"), Ok(Command::Answer("7abc".into())));
        assert_eq!(Command::parse(".75 cups"), Ok(Command::Answer(".75 cups".into())));
        assert_eq!(Command::parse("+7"), Ok(Command::Answer("+7".into())));
        assert_eq!(Command::parse("- 7"), Err(ParseError::Unknown("-".into())));
        assert_eq!(Command::parse("."), Err(ParseError::Unknown(".".into())));
    }

    #[test]
    fn planet_names_keep_their_spacing() {
        assert_eq!(Command::parse("buy  Mars "), Ok(Command::Buy("Mars".into())));
        assert_eq!(
            Command::parse("inspect Planet X"),
            Ok(Command::Inspect("Planet X".into()))
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(Command::parse("TRIBUTE"), Ok(Command::Tribute));
        assert_eq!(Command::parse("Surrender"), Ok(Command::Surrender));
    }

    #[test]
    fn start_without_planet_leaves_the_start_screen() {
        assert_eq!(Command::parse("start"), Ok(Command::Begin));
        assert_eq!(Command::parse("start Earth"), Ok(Command::Start("Earth".into())));
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(
            Command::parse("buy"),
            Err(ParseError::MissingArgument { command: "buy", what: "a planet name" })
        );
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(Command::parse("fly home"), Err(ParseError::Unknown("fly".into())));
    }

    #[test]
    fn view_toggles_are_flagged() {
        assert!(Command::Back.is_view_toggle());
        assert!(!Command::Tribute.is_view_toggle());
    }
}
