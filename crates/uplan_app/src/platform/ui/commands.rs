use uplan_core::Locale;

pub const HELP_TEXT: &str = "\
Commands:
  courses <ids>     set the course IDs (comma-separated)
  semester <code>   set the semester, e.g. 2024W (empty for the current one)
  lang [de|en]      switch language; without argument toggles
  submit            create the ICS feed
  show              print the form again
  help              print this help
  quit              leave (waits for an outstanding request)";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Courses(String),
    Semester(String),
    Lang(Option<Locale>),
    Submit,
    Show,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Field values are kept exactly as typed; whitespace is stripped by the
/// core when the form is submitted.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    match word.to_ascii_lowercase().as_str() {
        "courses" | "c" => Command::Courses(rest.to_string()),
        "semester" | "s" => Command::Semester(rest.to_string()),
        "lang" | "language" => match rest.trim() {
            "" => Command::Lang(None),
            code => match code.parse::<Locale>() {
                Ok(locale) => Command::Lang(Some(locale)),
                Err(message) => Command::Invalid(message),
            },
        },
        "submit" => Command::Submit,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command '{other}', try 'help'")),
    }
}
