use chatdeck::ui::core::{Atom, TextAtom, Topic};

use crate::support::{counter, probe_manager, TextProbe};

#[test]
fn test_set_text_emits_and_renders_once() {
    let manager = probe_manager();
    let text = manager.require::<TextProbe>().unwrap();
    let changed = counter(text.events(), Topic::TextChanged);
    let before = text.render_count();

    text.set_text("hello").unwrap();
    text.set_text("hello").unwrap();

    assert_eq!(text.text(), "hello");
    assert_eq!(changed.get(), 1);
    assert_eq!(text.render_count(), before + 1);
}

#[test]
fn test_append_and_clear() {
    let manager = probe_manager();
    let text = manager.require::<TextProbe>().unwrap();
    let cleared = counter(text.events(), Topic::TextCleared);

    text.append_text("foo").unwrap();
    text.append_text("bar").unwrap();
    assert_eq!(text.text(), "foobar");

    text.clear_text().unwrap();
    assert_eq!(text.text(), "");
    assert_eq!(cleared.get(), 1);
}

#[test]
fn test_multiline_text_round_trips() {
    let manager = probe_manager();
    let text = manager.require::<TextProbe>().unwrap();
    text.set_text("one\ntwo").unwrap();
    assert_eq!(text.core().with_widget(|widget| widget.content().len()), 2);
    assert_eq!(text.text(), "one\ntwo");
}

#[test]
fn test_destroyed_text_atom_rejects_edits() {
    let manager = probe_manager();
    let text = manager.require::<TextProbe>().unwrap();
    text.destroy().unwrap();
    assert!(text.set_text("late").unwrap_err().is_invalid_state());
}
