use std::path::PathBuf;

use chatdeck::app::{App, ClientEvent};
use chatdeck::config::Config;
use chatdeck::constants::{MSG_NO_ACTIVE_CHANNEL, MSG_PINNED, MSG_THEME_APPLIED, MSG_THEME_FAILED, TIP_STARTUP};
use chatdeck::ui::draw;
use chatdeck::ui::core::{local, Action, Atom, Screen, TextAtom};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

async fn started_app(config: Config) -> App {
    let app = App::new(config, Screen::new("test")).unwrap();
    app.start().await.unwrap();
    app
}

fn last_message(app: &App) -> String {
    app.messages().unwrap().messages().last().cloned().unwrap_or_default()
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert_eq!(app.handle_key(KeyEvent::from(KeyCode::Char(c))).unwrap(), Action::None);
    }
}

fn in_channel(app: &mut App) {
    app.handle_client_event(ClientEvent::GroupSelected {
        name: "rustaceans".into(),
        channels: vec!["general".into(), "help".into()],
    })
    .unwrap();
    app.handle_client_event(ClientEvent::ChannelSelected { name: "general".into() })
        .unwrap();
}

#[tokio::test]
async fn test_start_greets_user() {
    local::run_until(async {
        let app = started_app(Config::default()).await;
        let header = app.header().unwrap();
        assert!(header.is_visible());
        assert_eq!(header.text(), TIP_STARTUP);
        assert_eq!(app.messages().unwrap().messages().len(), 1);
        assert_eq!(app.manager().title(), "Chatdeck");
    })
    .await;
}

#[tokio::test]
async fn test_message_without_channel_is_refused() {
    local::run_until(async {
        let mut app = started_app(Config::default()).await;
        type_text(&mut app, "hello");
        let action = app.handle_key(KeyEvent::from(KeyCode::Enter)).unwrap();

        assert_eq!(action, Action::None);
        assert!(last_message(&app).ends_with(MSG_NO_ACTIVE_CHANNEL));
        assert_eq!(app.composer().unwrap().text(), "");
    })
    .await;
}

#[tokio::test]
async fn test_message_in_channel_is_sent() {
    local::run_until(async {
        let mut app = started_app(Config::default()).await;
        in_channel(&mut app);
        assert_eq!(app.manager().title(), "Chatdeck @ rustaceans # general");

        type_text(&mut app, "hi all");
        let action = app.handle_key(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(action, Action::Send("hi all".into()));

        app.send("hi all").unwrap();
        assert_eq!(last_message(&app), "@{bold}you{/bold}: hi all");
    })
    .await;
}

#[tokio::test]
async fn test_commands() {
    local::run_until(async {
        let mut app = started_app(Config::default()).await;

        assert_eq!(app.submit("/bogus").unwrap(), Action::None);
        assert!(last_message(&app).ends_with("Unknown command: bogus"));

        app.submit("/channels").unwrap();
        assert!(app.channels().unwrap().is_visible());

        app.submit("/clear").unwrap();
        assert!(app.messages().unwrap().messages().is_empty());

        app.submit("/help").unwrap();
        assert!(app.messages().unwrap().messages().len() > 3);

        assert_eq!(app.submit("   ").unwrap(), Action::None);
        assert_eq!(app.submit("/quit").unwrap(), Action::Quit);
        assert!(app.should_quit());
    })
    .await;
}

#[tokio::test]
async fn test_theme_command_reports_missing_file() {
    local::run_until(async {
        let mut config = Config::default();
        config.theme.directory = PathBuf::from("/nonexistent/chatdeck-themes");
        let mut app = started_app(config).await;

        app.submit("/theme midnight").unwrap();
        assert!(last_message(&app).contains(MSG_THEME_FAILED));
        assert_eq!(app.manager().theme().name, "default");

        app.submit("/theme default").unwrap();
        assert!(last_message(&app).contains(MSG_THEME_APPLIED));
    })
    .await;
}

#[tokio::test]
async fn test_keys() {
    local::run_until(async {
        let mut app = started_app(Config::default()).await;
        let composer = app.composer().unwrap();

        type_text(&mut app, "/thme");
        app.handle_key(KeyEvent::from(KeyCode::Backspace)).unwrap();
        assert_eq!(composer.text(), "/thm");

        app.handle_key(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(composer.text(), "/");
        app.handle_key(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(composer.text(), "");

        app.handle_key(KeyEvent::from(KeyCode::Tab)).unwrap();
        assert!(app.channels().unwrap().is_visible());
        app.handle_key(KeyEvent::from(KeyCode::Tab)).unwrap();
        assert!(!app.channels().unwrap().is_visible());

        let quit = app
            .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(quit, Action::Quit);
        assert!(app.should_quit());
    })
    .await;
}

#[tokio::test]
async fn test_client_events() {
    local::run_until(async {
        let mut app = started_app(Config::default()).await;

        app.handle_client_event(ClientEvent::Ready { user: "ferris".into() })
            .unwrap();
        assert!(!app.header().unwrap().is_visible());
        assert!(app.channels().unwrap().is_visible());
        assert_eq!(app.user(), Some("ferris"));

        in_channel(&mut app);
        assert_eq!(app.channels().unwrap().labels(), vec!["#general", "#help"]);
        assert_eq!(app.channels().unwrap().active().as_deref(), Some("general"));

        app.handle_client_event(ClientEvent::Message {
            author: "crab".into(),
            content: "hey".into(),
            own: false,
        })
        .unwrap();
        assert_eq!(last_message(&app), "@crab: hey");

        app.handle_client_event(ClientEvent::Error("socket closed".into()))
            .unwrap();
        assert!(last_message(&app).ends_with("socket closed"));
    })
    .await;
}

#[tokio::test]
async fn test_clicking_a_channel_selects_it() {
    local::run_until(async {
        let mut app = started_app(Config::default()).await;
        in_channel(&mut app);
        app.channels().unwrap().show().unwrap();

        // Nothing painted yet
        assert_eq!(app.handle_click(2, 2).unwrap(), Action::None);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        draw(&mut terminal, app.manager()).unwrap();

        // Entries start inside the list's padding: #general on row 1, #help on row 2
        assert_eq!(app.handle_click(2, 1).unwrap(), Action::None);
        assert_eq!(app.handle_click(40, 2).unwrap(), Action::None);
        let action = app.handle_click(2, 2).unwrap();
        assert_eq!(action, Action::SelectChannel("help".into()));

        app.handle_client_event(ClientEvent::ChannelSelected { name: "help".into() })
            .unwrap();
        assert_eq!(app.channels().unwrap().active().as_deref(), Some("help"));
        assert_eq!(app.manager().title(), "Chatdeck @ rustaceans # help");
    })
    .await;
}

#[tokio::test]
async fn test_pinned_words_are_highlighted() {
    local::run_until(async {
        let mut app = started_app(Config::default()).await;

        app.submit("/pin").unwrap();
        assert!(last_message(&app).contains("Usage"));

        app.submit("/pin rust").unwrap();
        assert!(last_message(&app).contains(MSG_PINNED));

        app.handle_client_event(ClientEvent::Message {
            author: "crab".into(),
            content: "rust rocks".into(),
            own: false,
        })
        .unwrap();
        assert_eq!(last_message(&app), "@crab: {pin}rust{/pin} rocks");

        app.submit("/pin rust").unwrap();
        app.handle_client_event(ClientEvent::Message {
            author: "crab".into(),
            content: "rust again".into(),
            own: false,
        })
        .unwrap();
        assert_eq!(last_message(&app), "@crab: rust again");
    })
    .await;
}
