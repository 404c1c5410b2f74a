use chatdeck::config::UiConfig;
use chatdeck::ui::core::{Atom, Blueprint, BlueprintSet, Contract, ManagerRef, Screen, UiError, UiManager};

use crate::support::{Probe, TextProbe};

/// A product that is not an atom.
struct Plain;

fn plain(_: ManagerRef) -> Plain {
    Plain
}

#[test]
fn test_activate_builds_fresh_instances() {
    let blueprint = Blueprint::new(Probe::new);
    let first = blueprint.activate(ManagerRef::detached());
    let second = blueprint.activate(ManagerRef::detached());

    assert_ne!(first.id(), second.id());
    assert!(blueprint.instance_of(&first));
    assert!(!blueprint.instance_of(&Plain));
    assert!(blueprint.is::<Probe>());
    assert!(!blueprint.is::<TextProbe>());
}

#[test]
fn test_set_conformance() {
    let atoms = BlueprintSet::new(vec![
        Blueprint::new(Probe::new).atom(),
        Blueprint::new(TextProbe::new).text_atom(),
    ])
    .unwrap();
    assert!(atoms.instance_of(Contract::Atom));
    assert!(!atoms.instance_of(Contract::TextAtom));
    assert_eq!(atoms.nonconforming(Contract::TextAtom).len(), 1);

    let texts = BlueprintSet::new(vec![Blueprint::new(TextProbe::new).text_atom()]).unwrap();
    assert!(texts.instance_of(Contract::TextAtom));
    assert!(texts.instance_of(Contract::Atom));
}

#[test]
fn test_empty_set_is_rejected() {
    assert!(matches!(BlueprintSet::new(Vec::new()), Err(UiError::Configuration(_))));
}

#[test]
fn test_manager_rejects_non_atom_blueprints() {
    let mixed = BlueprintSet::new(vec![Blueprint::new(Probe::new).atom(), Blueprint::new(plain).opaque()]).unwrap();
    assert!(!mixed.instance_of(Contract::Atom));
    assert!(mixed.nonconforming(Contract::Atom)[0].ends_with("Plain"));

    match UiManager::new(&mixed, Screen::new("test"), UiConfig::default()) {
        Err(UiError::Configuration(message)) => assert!(message.contains("Plain")),
        other => panic!("expected a configuration error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_entries_keep_type_identity() {
    let set = BlueprintSet::new(vec![Blueprint::new(Probe::new).atom(), Blueprint::new(plain).opaque()]).unwrap();
    let entries: Vec<_> = set.iter().collect();
    assert!(entries[0].is::<Probe>());
    assert!(entries[1].is::<Plain>());
    assert!(entries[1].instance_of(&Plain));
    assert!(!entries[1].conforms_to(Contract::Atom));
}
