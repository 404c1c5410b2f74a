//! Application state: routes key presses, commands and chat client events to
//! the atoms owned by the UI manager.

use std::rc::Rc;

use crossterm::event::KeyEvent;
use log::{error, info, warn};

use crate::config::Config;
use crate::constants::{
    DEFAULT_THEME, MSG_CLIENT_ERROR, MSG_CONNECTED, MSG_NO_ACTIVE_CHANNEL, MSG_PINNED, MSG_THEME_APPLIED, MSG_THEME_FAILED,
    MSG_UNKNOWN_COMMAND, MSG_UNPINNED, MSG_WELCOME, TIP_STARTUP,
};
use crate::theme::Theme;
use crate::ui::components::{default_blueprints, Channels, Composer, Header, Messages};
use crate::ui::core::{Action, Atom, Command, NavigationContext, Surface, TextAtom, UiError, UiManager};

/// Events produced by a chat client connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// The client is connected and authenticated as `user`.
    Ready { user: String },
    GroupSelected { name: String, channels: Vec<String> },
    ChannelSelected { name: String },
    Message { author: String, content: String, own: bool },
    GroupJoined { name: String },
    GroupLeft { name: String },
    Error(String),
}

pub struct App {
    manager: Rc<UiManager>,
    config: Config,
    user: Option<String>,
    should_quit: bool,
}

impl App {
    /// Build the UI manager and attach the built-in atoms to `surface`.
    pub fn new(config: Config, surface: impl Surface + 'static) -> Result<Self, UiError> {
        let blueprints = default_blueprints()?;
        let manager = UiManager::new(&blueprints, surface, config.ui.clone())?;
        Ok(Self {
            manager,
            config,
            user: None,
            should_quit: false,
        })
    }

    /// Initialize the atoms, apply the configured theme and greet the user.
    ///
    /// Must run inside [`crate::ui::core::local::run_until`]: the startup tip auto-hides.
    pub async fn start(&self) -> Result<(), UiError> {
        self.manager.init().await?;

        if self.config.theme.name != DEFAULT_THEME {
            self.load_theme(&self.config.theme.name)?;
        }
        self.manager.update_title();
        self.messages()?.system(MSG_WELCOME)?;
        self.header()?.display(TIP_STARTUP, true)?;
        self.manager.render(true);
        info!("Application started");
        Ok(())
    }

    pub fn manager(&self) -> &Rc<UiManager> {
        &self.manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn channels(&self) -> Result<Rc<Channels>, UiError> {
        self.manager.require::<Channels>()
    }

    pub fn composer(&self) -> Result<Rc<Composer>, UiError> {
        self.manager.require::<Composer>()
    }

    pub fn header(&self) -> Result<Rc<Header>, UiError> {
        self.manager.require::<Header>()
    }

    pub fn messages(&self) -> Result<Rc<Messages>, UiError> {
        self.manager.require::<Messages>()
    }

    /// Apply a key press. Returns the action left for the caller to perform.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Action, UiError> {
        match Action::from_key(key) {
            Action::Input(c) => {
                let mut buffer = [0; 4];
                self.composer()?.append_text(c.encode_utf8(&mut buffer))?;
                Ok(Action::None)
            }
            Action::Backspace => {
                self.composer()?.backspace()?;
                Ok(Action::None)
            }
            Action::ClearInput => {
                self.reset_input()?;
                Ok(Action::None)
            }
            Action::Submit => {
                let input = self.composer()?.take_text()?;
                self.submit(&input)
            }
            Action::ToggleChannels => {
                self.channels()?.toggle_visibility()?;
                Ok(Action::None)
            }
            Action::Quit => {
                self.should_quit = true;
                Ok(Action::Quit)
            }
            other => Ok(other),
        }
    }

    /// Apply a left click. Clicking a channel other than the active one asks the
    /// caller to select it.
    pub fn handle_click(&self, column: u16, row: u16) -> Result<Action, UiError> {
        let channels = self.channels()?;
        match channels.channel_at(column, row) {
            Some(name) if channels.active().as_deref() != Some(name.as_str()) => {
                Ok(Action::SelectChannel(name))
            }
            _ => Ok(Action::None),
        }
    }

    /// Keep a typed command prefix, otherwise clear the input.
    fn reset_input(&self) -> Result<(), UiError> {
        let composer = self.composer()?;
        let prefix = self.config.ui.command_prefix.as_str();
        let text = composer.text();
        if text.starts_with(prefix) && text != prefix {
            composer.set_text(prefix)
        } else {
            composer.clear_text()
        }
    }

    /// Interpret submitted composer input.
    pub fn submit(&mut self, input: &str) -> Result<Action, UiError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Action::None);
        }

        if let Some(command) = Command::parse(input, &self.config.ui.command_prefix) {
            return self.run_command(command);
        }

        if !self.manager.navigation().has_channel() {
            self.messages()?.system(MSG_NO_ACTIVE_CHANNEL)?;
            return Ok(Action::None);
        }
        Ok(Action::Send(input.to_string()))
    }

    fn run_command(&mut self, command: Command) -> Result<Action, UiError> {
        let messages = self.messages()?;
        match command {
            Command::Help => {
                for line in Command::usage(&self.config.ui.command_prefix) {
                    messages.system(&line)?;
                }
            }
            Command::Quit => {
                self.should_quit = true;
                return Ok(Action::Quit);
            }
            Command::Clear => messages.clear_messages()?,
            Command::Channels => self.channels()?.toggle_visibility()?,
            Command::Theme(name) if name.is_empty() => {
                let prefix = &self.config.ui.command_prefix;
                messages.system(&format!("Usage: {{bold}}{prefix}theme <name>{{/bold}}"))?;
            }
            Command::Theme(name) => {
                self.load_theme(&name)?;
            }
            Command::Title => messages.system(&format!("Title: {}", self.manager.title()))?,
            Command::Pin(word) if word.is_empty() || word.contains(char::is_whitespace) => {
                let prefix = &self.config.ui.command_prefix;
                messages.system(&format!("Usage: {{bold}}{prefix}pin <word>{{/bold}}"))?;
            }
            Command::Pin(word) => {
                let status = if messages.toggle_pin(&word) { MSG_PINNED } else { MSG_UNPINNED };
                messages.system(&format!("{status} {{bold}}{word}{{/bold}}"))?;
            }
            Command::Unknown(name) => messages.system(&format!("{MSG_UNKNOWN_COMMAND}: {name}"))?,
        }
        Ok(Action::None)
    }

    /// Load the theme `name` and apply it. Load failures are reported in the
    /// message log and return `false`.
    pub fn load_theme(&self, name: &str) -> Result<bool, UiError> {
        let messages = self.messages()?;
        match Theme::load(&self.config.theme.directory, name) {
            Ok(theme) => {
                self.manager.apply_theme(theme);
                messages.system(&format!("{MSG_THEME_APPLIED} '{name}'"))?;
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to load theme '{}': {:#}", name, e);
                messages.system(&format!("{MSG_THEME_FAILED} '{name}': {e:#}"))?;
                Ok(false)
            }
        }
    }

    /// Deliver `text` to the active channel. Without a chat client attached the
    /// text is echoed as an own message.
    pub fn send(&self, text: &str) -> Result<(), UiError> {
        let sender = self.user.as_deref().unwrap_or("you");
        self.messages()?.own(sender, text)
    }

    pub fn handle_client_event(&mut self, event: ClientEvent) -> Result<(), UiError> {
        let messages = self.messages()?;
        match event {
            ClientEvent::Ready { user } => {
                let header = self.header()?;
                header.cancel_auto_hide();
                header.hide()?;
                messages.system(&format!("{MSG_CONNECTED} {{bold}}{user}{{/bold}}"))?;
                self.channels()?.show()?;
                self.user = Some(user);
            }
            ClientEvent::GroupSelected { name, channels } => {
                self.manager.set_navigation(NavigationContext::new(Some(name), None));
                self.channels()?.set_channels(&channels, None)?;
            }
            ClientEvent::ChannelSelected { name } => {
                let group = self.manager.navigation().group;
                self.manager
                    .set_navigation(NavigationContext::new(group, Some(name.clone())));
                self.channels()?.set_active(Some(&name))?;
            }
            ClientEvent::Message { author, content, own } => {
                if own {
                    messages.own(&author, &content)?;
                } else {
                    messages.user(&author, &content, &[])?;
                }
            }
            ClientEvent::GroupJoined { name } => messages.system(&format!("Joined {{bold}}{name}{{/bold}}"))?,
            ClientEvent::GroupLeft { name } => messages.system(&format!("Left {{bold}}{name}{{/bold}}"))?,
            ClientEvent::Error(e) => {
                error!("Client error: {}", e);
                messages.system(&format!("{MSG_CLIENT_ERROR}: {e}"))?;
            }
        }
        Ok(())
    }
}
