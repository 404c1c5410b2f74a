//! Terminal setup and the main event loop

use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use log::{debug, error};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::time::Duration;

use super::core::{local, Action, EventHandler, EventType, Redraw, Screen, UiError, UiManager};
use crate::app::{App, ClientEvent};
use crate::config::Config;

/// Run the TUI until the user quits.
///
/// Atoms are single-threaded, so the whole UI runs in [`local::run_until`].
pub async fn run_app(config: Config) -> Result<()> {
    local::run_until(run_local(config)).await
}

async fn run_local(config: Config) -> Result<()> {
    let mouse_enabled = config.ui.mouse_enabled;
    let tick_rate = Duration::from_millis(config.screen.tick_rate_ms);
    let screen = Screen::new(config.ui.title.clone());
    let mut app = App::new(config, screen).context("Failed to build the UI")?;

    let mut terminal = setup_terminal(mouse_enabled).context("Failed to set up the terminal")?;

    let res = async {
        app.start().await.context("Failed to start the UI")?;
        run_ui(&mut terminal, &mut app, &mut EventHandler::new(tick_rate)).await
    }
    .await;

    restore_terminal(&mut terminal, mouse_enabled).context("Failed to restore the terminal")?;
    res
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode, alternate screen and optional mouse capture.
fn setup_terminal(mouse_enabled: bool) -> Result<Tui, UiError> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui, mouse_enabled: bool) -> Result<(), UiError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;
    Ok(())
}

/// Main UI loop
async fn run_ui(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        if let Some(title) = app.manager().take_title() {
            execute!(terminal.backend_mut(), SetTitle(title))?;
        }
        draw(terminal, app.manager())?;

        match events.next_event().await? {
            EventType::Key(key) => match app.handle_key(key) {
                Ok(Action::Send(text)) => {
                    if let Err(e) = app.send(&text) {
                        error!("Failed to send message: {}", e);
                    }
                }
                Ok(_) => {}
                Err(e) => error!("Failed to handle key {:?}: {}", key.code, e),
            },
            EventType::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved => app.manager().hover(mouse.column, mouse.row),
                MouseEventKind::Down(MouseButton::Left) => match app.handle_click(mouse.column, mouse.row) {
                    Ok(Action::SelectChannel(name)) => {
                        debug!("Selecting channel '{}'", name);
                        if let Err(e) = app.handle_client_event(ClientEvent::ChannelSelected { name }) {
                            error!("Failed to select channel: {}", e);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => error!("Failed to handle click: {}", e),
                },
                _ => {}
            },
            EventType::Resize(w, h) => {
                debug!("Terminal resized to {}x{}", w, h);
                app.manager().render(true);
            }
            EventType::Tick | EventType::Other => {}
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Paint the manager's surface if it asked for a redraw.
///
/// Returns whether a frame was drawn. A full redraw clears the terminal first.
pub fn draw<B: Backend>(terminal: &mut Terminal<B>, manager: &UiManager) -> Result<bool> {
    let Some(redraw) = manager.take_redraw() else {
        return Ok(false);
    };
    if redraw == Redraw::Full {
        terminal.clear()?;
    }
    terminal.draw(|frame| manager.paint(frame))?;
    Ok(true)
}
