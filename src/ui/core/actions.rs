use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Composer editing
    Input(char),
    Backspace,
    ClearInput,
    Submit,
    /// Submitted text to deliver to the active channel
    Send(String),

    // Layout
    ToggleChannels,
    /// A channel entry was clicked
    SelectChannel(String),

    // App control
    Quit,
    None,
}

impl Action {
    /// Map a terminal key event to an action. Key releases are ignored.
    pub fn from_key(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return Action::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('x') => Action::Quit,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Action::Input(c),
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Esc => Action::ClearInput,
            KeyCode::Enter => Action::Submit,
            KeyCode::Tab => Action::ToggleChannels,
            _ => Action::None,
        }
    }
}

/// A command typed into the composer after the command prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Clear the message log
    Clear,
    /// Toggle the channel list
    Channels,
    /// Load and apply a theme by name
    Theme(String),
    /// Show the current window title
    Title,
    /// Toggle highlighting of a word in incoming messages
    Pin(String),
    Unknown(String),
}

impl Command {
    /// Parse `input` as a command if it starts with `prefix`.
    ///
    /// Returns `None` for ordinary messages.
    pub fn parse(input: &str, prefix: &str) -> Option<Self> {
        let body = input.trim().strip_prefix(prefix)?;
        let mut parts = body.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.collect::<Vec<_>>().join(" ");

        let command = match name.as_str() {
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "clear" => Command::Clear,
            "channels" => Command::Channels,
            "theme" => Command::Theme(argument),
            "title" => Command::Title,
            "pin" => Command::Pin(argument),
            _ => Command::Unknown(name),
        };
        Some(command)
    }

    /// Usage lines shown by `help`, with `prefix` in front of each command.
    pub fn usage(prefix: &str) -> Vec<String> {
        [
            ("help", "show this list"),
            ("clear", "clear the message log"),
            ("channels", "toggle the channel list"),
            ("theme <name>", "load and apply a theme"),
            ("title", "show the window title"),
            ("pin <word>", "highlight a word in messages, again to stop"),
            ("quit", "exit"),
        ]
        .iter()
        .map(|(command, description)| format!("{{bold}}{prefix}{command}{{/bold}} {description}"))
        .collect()
    }
}
