use std::time::Duration;

use chatdeck::ui::components::Header;
use chatdeck::ui::core::{local, Atom, Topic, UiError};

use crate::support::{counter, initialized_dashboard};

#[tokio::test(start_paused = true)]
async fn test_newer_text_restarts_auto_hide() {
    local::run_until(async {
        let manager = initialized_dashboard().await;
        let header = manager.require::<Header>().unwrap();
        let hidden = counter(header.events(), Topic::Hidden);

        // 5 chars at 100ms each: hide due at t=500
        header.display("hello", true).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        // 6 chars from t=100: hide due at t=700
        header.display("abcdef", true).unwrap();
        assert_eq!(header.text(), "abcdef");

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(header.is_visible());
        assert_eq!(hidden.get(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!header.is_visible());
        assert_eq!(hidden.get(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_markup_does_not_count_towards_delay() {
    local::run_until(async {
        let manager = initialized_dashboard().await;
        let header = manager.require::<Header>().unwrap();

        header.display("{bold}hi{/bold}", true).unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(!header.is_visible());
    })
    .await;
}

#[tokio::test]
async fn test_display_without_auto_hide_stays() {
    let manager = initialized_dashboard().await;
    let header = manager.require::<Header>().unwrap();
    let shown = counter(header.events(), Topic::Shown);

    header.display("sticky", false).unwrap();
    header.display("still sticky", false).unwrap();

    assert!(header.is_visible());
    assert_eq!(shown.get(), 1);
    assert!(!header.cancel_auto_hide());
}

#[tokio::test]
async fn test_empty_text_is_rejected() {
    let manager = initialized_dashboard().await;
    let header = manager.require::<Header>().unwrap();

    assert!(matches!(header.display("   ", true), Err(UiError::Precondition(_))));
    assert!(!header.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_destroy_cancels_pending_hide() {
    local::run_until(async {
        let manager = initialized_dashboard().await;
        let header = manager.require::<Header>().unwrap();
        let hidden = counter(header.events(), Topic::Hidden);

        header.display("bye", true).unwrap();
        header.destroy().unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(hidden.get(), 0);
        assert!(manager.find::<Header>().is_none());
    })
    .await;
}

#[tokio::test]
async fn test_auto_hide_outside_task_context_is_refused() {
    let manager = initialized_dashboard().await;
    let header = manager.require::<Header>().unwrap();

    assert!(matches!(header.display("hello", true), Err(UiError::Precondition(_))));
    assert!(!header.is_visible());
    assert!(!header.cancel_auto_hide());

    header.display("hello", false).unwrap();
    assert!(header.is_visible());
}
