use std::rc::Rc;

use chatdeck::theme::Theme;
use chatdeck::ui::core::{
    Atom, Dimension, Event, EventEmitter, Lifecycle, ManagerRef, Property, StyleBag, Topic, UiError,
};
use ratatui::style::Color;

use crate::support::{counter, probe_manager, Probe};

#[test]
fn test_unattached_atom_rejects_operations() {
    let probe = Probe::new(ManagerRef::detached());
    assert_eq!(probe.lifecycle(), Lifecycle::Unattached);
    assert!(probe.show().unwrap_err().is_invalid_state());
    assert!(probe.render().unwrap_err().is_invalid_state());
    assert!(probe
        .update_on(&EventEmitter::new(), Topic::Shown, Vec::new())
        .unwrap_err()
        .is_invalid_state());
}

#[test]
fn test_show_is_idempotent() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    let shown = counter(probe.events(), Topic::Shown);
    let changed = counter(probe.events(), Topic::VisibilityChanged);

    probe.show().unwrap();
    probe.show().unwrap();
    assert!(probe.is_visible());
    assert_eq!(shown.get(), 0, "elements start visible");
    assert_eq!(changed.get(), 0);

    probe.hide().unwrap();
    probe.hide().unwrap();
    probe.toggle_visibility().unwrap();
    assert!(probe.is_visible());
    assert_eq!(changed.get(), 2);
    assert_eq!(shown.get(), 1);
}

#[test]
fn test_lock_batches_renders() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    let updates = counter(probe.events(), Topic::PropertyUpdate);
    let renders = counter(probe.events(), Topic::Render);
    let before = probe.render_count();

    probe.lock().unwrap();
    probe.update(&[Property::Width(Dimension::percent(50))]).unwrap();
    probe.update(&[Property::Left(Dimension::percent(10))]).unwrap();
    probe.update(&[Property::Height(Dimension::Fixed(4))]).unwrap();
    assert_eq!(probe.render_count(), before);
    probe.unlock().unwrap();

    assert_eq!(updates.get(), 3);
    assert_eq!(renders.get(), 1);
    assert_eq!(probe.render_count(), before + 1);
}

#[test]
fn test_unlock_without_pending_render_does_not_render() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    let locks = counter(probe.events(), Topic::LockChanged);
    let before = probe.render_count();

    probe.lock().unwrap();
    probe.lock().unwrap();
    probe.unlock().unwrap();

    assert_eq!(locks.get(), 2);
    assert_eq!(probe.render_count(), before);
}

#[tokio::test]
async fn test_lock_until_releases_on_error() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    let before = probe.render_count();

    let target = Rc::clone(&probe);
    let result: Result<(), UiError> = probe
        .core()
        .lock_until(move || async move {
            assert!(target.is_locked());
            target.update(&[Property::Width(Dimension::percent(30))]).unwrap();
            Err::<(), UiError>(UiError::Precondition("stop".into()))
        })
        .await;

    assert!(matches!(result, Err(UiError::Precondition(_))));
    assert!(!probe.is_locked());
    assert_eq!(probe.render_count(), before + 1);
}

#[tokio::test]
async fn test_lock_until_keeps_outer_lock() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();

    probe.lock().unwrap();
    let value = probe.core().lock_until(|| async { Ok::<_, UiError>(7) }).await.unwrap();
    assert_eq!(value, 7);
    assert!(probe.is_locked());
}

#[test]
fn test_update_on_applies_properties_per_emission() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    let source = EventEmitter::new();
    let updates = counter(probe.events(), Topic::PropertyUpdate);

    let binding = probe
        .update_on(&source, Topic::Shown, vec![Property::Left(Dimension::percent(25))])
        .unwrap();
    source.emit(Event::Shown);
    source.emit(Event::Shown);

    assert_eq!(updates.get(), 2);
    assert_eq!(probe.core().with_widget(|w| w.layout().left), Dimension::percent(25));

    binding.cancel();
    source.emit(Event::Shown);
    assert_eq!(updates.get(), 2);
}

#[test]
fn test_destroy_releases_everything() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    let source = EventEmitter::new();
    probe.update_on(&source, Topic::Hidden, Vec::new()).unwrap();
    let destroyed = counter(probe.events(), Topic::Destroy);
    let nodes = manager.node_count();

    probe.destroy().unwrap();

    assert_eq!(destroyed.get(), 1);
    assert_eq!(probe.lifecycle(), Lifecycle::Destroyed);
    assert_eq!(source.listener_count(Topic::Hidden), 0);
    assert_eq!(probe.events().listener_count(Topic::Destroy), 0);
    assert!(manager.find::<Probe>().is_none());
    assert_eq!(manager.node_count(), nodes - 1);

    assert!(probe.show().unwrap_err().is_invalid_state());
    assert!(probe.destroy().unwrap_err().is_invalid_state());
    assert!(probe.lock().unwrap_err().is_invalid_state());
}

#[test]
fn test_bindings_survive_only_while_target_lives() {
    let manager = probe_manager();
    let source = EventEmitter::new();
    {
        let probe = manager.require::<Probe>().unwrap();
        probe.update_on(&source, Topic::Shown, Vec::new()).unwrap();
        assert_eq!(probe.core().binding_count(), 1);
        probe.destroy().unwrap();
    }
    assert_eq!(Rc::strong_count(&manager), 1);
    assert_eq!(source.emit(Event::Shown), 0);
}

#[test]
fn test_theme_binding_restyles_with_one_render() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    let source = EventEmitter::new();
    let red = StyleBag::default().with_fg(Color::Red);
    probe
        .update_on(&source, Topic::ThemeChanged, vec![Property::Style(red)])
        .unwrap();
    let before = probe.render_count();

    source.emit(Event::ThemeChanged(Rc::new(Theme::default())));

    assert_eq!(probe.core().with_widget(|w| w.style()), red);
    assert_eq!(probe.render_count(), before + 1);
}

#[test]
fn test_destroyed_atom_rejects_render_and_update() {
    let manager = probe_manager();
    let probe = manager.require::<Probe>().unwrap();
    probe.destroy().unwrap();

    assert!(probe.render().unwrap_err().is_invalid_state());
    assert!(probe
        .update(&[Property::Top(Dimension::Fixed(1))])
        .unwrap_err()
        .is_invalid_state());
}
