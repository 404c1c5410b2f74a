//! Deferred, validated construction of atoms.
//!
//! Atoms need a manager reference and the manager needs its atoms. A [`Blueprint`]
//! captures how to build an atom without building it, so the manager can be created
//! first and activate the blueprints afterwards.
//!
//! Where the set of atom types is known statically, `Blueprint<T>` keeps the type in
//! the signature. A [`BlueprintSet`] erases the types into tagged
//! [`BlueprintEntry`] values; each entry records which [`Contract`]s its product
//! fulfils, so a mixed set can be checked once, up front.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::rc::Rc;

use super::atom::Atom;
use super::error::UiError;
use super::manager::ManagerRef;
use super::text_atom::TextAtom;

/// Base contracts a blueprint's product can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    Atom,
    TextAtom,
}

/// Factory descriptor for one constructible type.
pub struct Blueprint<T: 'static, A = ManagerRef> {
    constructor: fn(A) -> T,
}

impl<T: 'static, A> Blueprint<T, A> {
    pub const fn new(constructor: fn(A) -> T) -> Self {
        Self { constructor }
    }

    /// Whether `value` is a product of this blueprint's type.
    pub fn instance_of(&self, value: &dyn Any) -> bool {
        value.is::<T>()
    }

    /// Whether the wrapped type is `U` itself.
    pub fn is<U: ?Sized + 'static>(&self) -> bool {
        TypeId::of::<U>() == TypeId::of::<T>()
    }

    /// Build a new instance. Every call constructs a fresh value.
    pub fn activate(&self, args: A) -> T {
        (self.constructor)(args)
    }

    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

impl<T: 'static, A> Clone for Blueprint<T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static, A> Copy for Blueprint<T, A> {}

impl<T: 'static, A> fmt::Debug for Blueprint<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Blueprint").field(&self.type_name()).finish()
    }
}

impl<T: Atom> Blueprint<T> {
    /// Erase into an entry tagged with the atom contract.
    pub fn atom(self) -> BlueprintEntry {
        BlueprintEntry::tagged::<T>(&[Contract::Atom], move |manager| {
            Activated::Atom(Rc::new(self.activate(manager.clone())))
        })
    }
}

impl<T: TextAtom> Blueprint<T> {
    /// Erase into an entry tagged with the atom and text atom contracts.
    pub fn text_atom(self) -> BlueprintEntry {
        BlueprintEntry::tagged::<T>(&[Contract::Atom, Contract::TextAtom], move |manager| {
            Activated::Atom(Rc::new(self.activate(manager.clone())))
        })
    }
}

impl<T: Any> Blueprint<T> {
    /// Erase into an entry that fulfils no contract.
    pub fn opaque(self) -> BlueprintEntry {
        BlueprintEntry::tagged::<T>(&[], move |manager| Activated::Opaque(Rc::new(self.activate(manager.clone()))))
    }
}

/// Product of an erased blueprint.
pub enum Activated {
    Atom(Rc<dyn Atom>),
    Opaque(Rc<dyn Any>),
}

/// Type-erased blueprint with its contract tags.
pub struct BlueprintEntry {
    type_id: TypeId,
    type_name: &'static str,
    contracts: &'static [Contract],
    factory: Box<dyn Fn(&ManagerRef) -> Activated>,
}

impl BlueprintEntry {
    fn tagged<T: 'static>(contracts: &'static [Contract], factory: impl Fn(&ManagerRef) -> Activated + 'static) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            contracts,
            factory: Box::new(factory),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<U: ?Sized + 'static>(&self) -> bool {
        TypeId::of::<U>() == self.type_id
    }

    pub fn instance_of(&self, value: &dyn Any) -> bool {
        Any::type_id(value) == self.type_id
    }

    pub fn conforms_to(&self, contract: Contract) -> bool {
        self.contracts.contains(&contract)
    }

    pub fn activate(&self, manager: &ManagerRef) -> Activated {
        (self.factory)(manager)
    }
}

impl fmt::Debug for BlueprintEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlueprintEntry")
            .field("type", &self.type_name)
            .field("contracts", &self.contracts)
            .finish()
    }
}

/// Ordered, non-empty collection of blueprints.
#[derive(Debug)]
pub struct BlueprintSet {
    items: Vec<BlueprintEntry>,
}

impl BlueprintSet {
    pub fn new(items: Vec<BlueprintEntry>) -> Result<Self, UiError> {
        if items.is_empty() {
            return Err(UiError::Configuration("a blueprint set needs at least one blueprint".to_string()));
        }
        Ok(Self { items })
    }

    /// True iff every blueprint's product fulfils `contract`.
    pub fn instance_of(&self, contract: Contract) -> bool {
        self.items.iter().all(|item| item.conforms_to(contract))
    }

    /// Type names of the blueprints that do not fulfil `contract`.
    pub fn nonconforming(&self, contract: Contract) -> Vec<&'static str> {
        self.items
            .iter()
            .filter(|item| !item.conforms_to(contract))
            .map(BlueprintEntry::type_name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlueprintEntry> {
        self.items.iter()
    }

    /// Build one atom per blueprint, in order.
    pub fn activate_atoms(&self, manager: &ManagerRef) -> Result<Vec<Rc<dyn Atom>>, UiError> {
        self.items
            .iter()
            .map(|item| match item.activate(manager) {
                Activated::Atom(atom) => Ok(atom),
                Activated::Opaque(_) => Err(UiError::Configuration(format!(
                    "blueprint '{}' does not produce an atom",
                    item.type_name()
                ))),
            })
            .collect()
    }
}
