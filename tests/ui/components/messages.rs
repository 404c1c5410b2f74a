use chatdeck::config::UiConfig;
use chatdeck::ui::components::{default_blueprints, Messages};
use chatdeck::ui::core::{Atom, Screen, Topic, UiManager};

use crate::support::{counter, initialized_dashboard};

#[tokio::test]
async fn test_log_keeps_newest_lines() {
    let config = UiConfig {
        max_messages: 3,
        ..UiConfig::default()
    };
    let manager = UiManager::new(&default_blueprints().unwrap(), Screen::new("test"), config).unwrap();
    manager.init().await.unwrap();
    let messages = manager.require::<Messages>().unwrap();

    for n in 1..=5 {
        messages.add_message(&format!("line {n}")).unwrap();
    }

    assert_eq!(messages.capacity(), 3);
    assert_eq!(messages.messages(), vec!["line 3", "line 4", "line 5"]);
}

#[tokio::test]
async fn test_each_message_renders() {
    let manager = initialized_dashboard().await;
    let messages = manager.require::<Messages>().unwrap();
    let renders = counter(messages.events(), Topic::Render);

    messages.system("ready").unwrap();
    messages.user("ferris", "hi", &[]).unwrap();
    messages.own("me", "hello").unwrap();

    assert_eq!(renders.get(), 3);
    assert_eq!(
        messages.messages(),
        vec!["{bold}System{/bold}: ready", "@ferris: hi", "@{bold}me{/bold}: hello"]
    );
}

#[tokio::test]
async fn test_clear_messages() {
    let manager = initialized_dashboard().await;
    let messages = manager.require::<Messages>().unwrap();
    messages.add_message("one").unwrap();

    messages.clear_messages().unwrap();
    assert!(messages.messages().is_empty());
}

#[tokio::test]
async fn test_custom_format() {
    let config = UiConfig {
        message_format: "[{sender}] {message}".to_string(),
        ..UiConfig::default()
    };
    let manager = UiManager::new(&default_blueprints().unwrap(), Screen::new("test"), config).unwrap();
    manager.init().await.unwrap();
    let messages = manager.require::<Messages>().unwrap();

    messages.special("bot", "relay", "beep").unwrap();
    assert_eq!(messages.messages(), vec!["[bot ~> @{bold}relay{/bold}] beep"]);
}
