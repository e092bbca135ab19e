//! Command parsing for the command line

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Unlock the next hint: :hint
    Hint,
    /// Ask the mentor: :ask <question>
    Ask(String),
    /// Use the "Ask Coding Mentor" menu entry on some text: :select <text>
    Select(String),
    /// Mark the problem solved: :solved
    Solved,
    /// Minimize or restore the widget: :toggle
    Toggle,
    /// Show the popup: :popup
    Popup,
    /// Show help: :help or :h
    Help,
    /// Quit the application: :q or :quit
    Quit,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    let with_arg = |name: &str, build: fn(String) -> Command| {
        if args.is_empty() {
            ParseResult::MissingArgument(name.to_string())
        } else {
            ParseResult::Ok(build(args.to_string()))
        }
    };

    match cmd.to_lowercase().as_str() {
        "hint" | "n" | "next" => ParseResult::Ok(Command::Hint),
        "ask" => with_arg("ask", Command::Ask),
        "select" | "sel" => with_arg("select", Command::Select),
        "solved" | "done" => ParseResult::Ok(Command::Solved),
        "toggle" | "t" => ParseResult::Ok(Command::Toggle),
        "popup" | "p" | "stats" => ParseResult::Ok(Command::Popup),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}
