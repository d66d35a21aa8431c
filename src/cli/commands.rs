use crate::error::{AppError, Result};

/// One parsed command line.
///
/// Id-taking commands keep their raw argument; handlers run it through `validate_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show(Option<String>),
    Add,
    Delete(Option<String>),
    Edit(Option<String>),
    Test(Option<String>),
    Play,
    Credits,
    Quit,
}

impl Command {
    /// Parses `<command> [argument]`.
    ///
    /// Returns `Ok(None)` for a blank line. The command name is case-insensitive; everything
    /// after the first whitespace run is the trimmed argument.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownCommand` carrying the name as typed.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match name.to_lowercase().as_str() {
            "h" | "help" => Command::Help,
            "list" => Command::List,
            "show" => Command::Show(arg),
            "add" => Command::Add,
            "delete" => Command::Delete(arg),
            "edit" => Command::Edit(arg),
            "test" => Command::Test(arg),
            "p" | "play" => Command::Play,
            "credits" => Command::Credits,
            "q" | "quit" => Command::Quit,
            _ => return Err(AppError::UnknownCommand(name.to_string())),
        };
        Ok(Some(command))
    }
}

/// Extracts a quiz id from a raw command argument.
///
/// Reads the leading integer (optional sign, then digits) and ignores whatever follows,
/// so `"3.7"` yields `3`.
///
/// # Errors
///
/// * `AppError::MissingArgument` if `raw` is absent or blank.
/// * `AppError::InvalidArgument` if no integer can be read from its start.
pub fn validate_id(raw: Option<&str>) -> Result<i64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingArgument)?;

    let sign_len = usize::from(raw.starts_with(|c: char| c == '+' || c == '-'));
    let end = raw[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(raw.len(), |i| i + sign_len);

    raw[..end]
        .parse::<i64>()
        .map_err(|_| AppError::InvalidArgument(raw.to_string()))
}

/// Static command reference printed by `help`.
pub const HELP: [&str; 10] = [
    "  h|help - Show this help.",
    "  list - List the existing quizzes.",
    "  show <id> - Show the question and answer of the given quiz.",
    "  add - Add a new quiz interactively.",
    "  delete <id> - Delete the given quiz.",
    "  edit <id> - Edit the given quiz.",
    "  test <id> - Try to answer the given quiz.",
    "  p|play - Play: answer every quiz in random order.",
    "  credits - Credits.",
    "  q|quit - Quit the program.",
];

/// Authors shown by `credits`.
pub const AUTHORS: [&str; 2] = ["Alexander de la Torre Astanin", "Daniel Fuertes Coiras"];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("h", Command::Help)]
    #[case("HELP", Command::Help)]
    #[case("list", Command::List)]
    #[case("  List  ", Command::List)]
    #[case("add", Command::Add)]
    #[case("p", Command::Play)]
    #[case("Play", Command::Play)]
    #[case("credits", Command::Credits)]
    #[case("q", Command::Quit)]
    #[case("QUIT", Command::Quit)]
    fn test_parse_plain_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("show 3", Command::Show(Some("3".to_string())))]
    #[case("SHOW", Command::Show(None))]
    #[case("delete   12  ", Command::Delete(Some("12".to_string())))]
    #[case("edit\t4", Command::Edit(Some("4".to_string())))]
    #[case("test 1 2", Command::Test(Some("1 2".to_string())))]
    fn test_parse_commands_with_argument(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("    ")]
    #[case("\t\n")]
    fn test_parse_blank_line(#[case] line: &str) {
        assert_eq!(Command::parse(line).unwrap(), None);
    }

    #[test]
    fn test_parse_unknown_command_names_the_input() {
        match Command::parse("Jump 3") {
            Err(AppError::UnknownCommand(name)) => assert_eq!(name, "Jump"),
            other => panic!("Expected UnknownCommand, got {:?}", other),
        }
    }

    #[rstest]
    #[case("3", 3)]
    #[case("3.7", 3)]
    #[case(" 12 ", 12)]
    #[case("7abc", 7)]
    #[case("-2", -2)]
    #[case("+5", 5)]
    #[case("0", 0)]
    fn test_validate_id_accepts_leading_integer(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(validate_id(Some(raw)).unwrap(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_validate_id_missing(#[case] raw: Option<&str>) {
        assert!(matches!(validate_id(raw), Err(AppError::MissingArgument)));
    }

    #[rstest]
    #[case("abc")]
    #[case("-")]
    #[case(".5")]
    #[case("x3")]
    #[case("99999999999999999999")]
    fn test_validate_id_invalid(#[case] raw: &str) {
        match validate_id(Some(raw)) {
            Err(AppError::InvalidArgument(got)) => assert_eq!(got, raw),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }
}
