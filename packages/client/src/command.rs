//! Parsing of prompt input into commands.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Stop,
    Status,
    Users,
    Log,
    Help,
    Quit,
    /// Any other line
    Chat(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// Unknown slash words are sent as chat like any other text.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let command = match line {
            "/start" => Command::Start,
            "/pause" => Command::Pause,
            "/stop" => Command::Stop,
            "/status" => Command::Status,
            "/users" => Command::Users,
            "/log" => Command::Log,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            text => Command::Chat(text.to_string()),
        };
        Some(command)
    }
}
