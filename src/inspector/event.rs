//! Event records.

use crate::{
    inspector::{
        accessor::Accessor,
        attribute::AttributeRecord,
        docid::{self, DocIdKind},
        generics::SubstitutionMap,
        method::MethodRecord,
        quicktype::QuickTypeRecord,
    },
    metadata::definitions::{EventDef, TypeDef},
};

/// An inspected event
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event name
    pub name: String,
    /// Handler type, after generic substitution
    pub type_info: QuickTypeRecord,
    /// Access modifier of the `add` accessor
    pub accessor: Accessor,
    /// Modifier of the `add` accessor
    pub modifier: String,
    /// Whether the event is static
    pub is_static: bool,
    /// The `add` accessor
    pub adder: Option<MethodRecord>,
    /// The `remove` accessor
    pub remover: Option<MethodRecord>,
    /// The `raise` accessor, rarely emitted by compilers
    pub raiser: Option<MethodRecord>,
    /// Attributes applied to the event
    pub attributes: Vec<AttributeRecord>,
    /// The type declaring the event
    pub implemented_type: QuickTypeRecord,
    /// Declaration (`public event EventHandler Died`)
    pub declaration: String,
    /// Whether the event is hidden by the inspection options or lacks an accessor
    pub should_ignore: bool,
}

impl EventRecord {
    /// Inspects an event declared on `owner`
    #[must_use]
    pub fn new(
        event: &EventDef,
        owner: &TypeDef,
        implemented_type: &QuickTypeRecord,
        map: &SubstitutionMap,
        ignore_private: bool,
    ) -> Self {
        let accessor_record = |index: Option<usize>| {
            owner.method(index).map(|method| {
                MethodRecord::new(
                    method,
                    implemented_type,
                    owner.is_interface(),
                    map,
                    ignore_private,
                )
            })
        };
        let adder = accessor_record(event.adder);
        let remover = accessor_record(event.remover);
        let raiser = accessor_record(event.raiser);

        let accessor = adder.as_ref().map_or(Accessor::Private, |add| add.accessor);
        let modifier = adder
            .as_ref()
            .map_or_else(String::new, |add| add.modifier.clone());
        let should_ignore = match (&adder, &remover) {
            (Some(add), Some(_)) => add.should_ignore,
            _ => {
                log::debug!(
                    "Dropping event {}.{} without add/remove accessors",
                    implemented_type.unlocalized_name,
                    event.name
                );
                true
            }
        };

        let type_info = QuickTypeRecord::from_sig(&event.sig).substitute(map);
        let mut declaration = format!("{accessor} ");
        if !modifier.is_empty() {
            declaration.push_str(&modifier);
            declaration.push(' ');
        }
        declaration.push_str(&format!("event {} {}", type_info.name, event.name));

        EventRecord {
            name: event.name.clone(),
            type_info,
            accessor,
            modifier,
            is_static: adder.as_ref().is_some_and(|add| add.is_static),
            adder,
            remover,
            raiser,
            attributes: AttributeRecord::from_list(&event.custom_attributes),
            implemented_type: implemented_type.clone(),
            declaration,
            should_ignore,
        }
    }

    /// Key under which an inherited event is hidden by a more derived declaration
    #[must_use]
    pub fn identity_key(&self) -> String {
        self.name.clone()
    }

    /// Documentation identifier (`E:Game.Player.Died`)
    #[must_use]
    pub fn doc_id(&self) -> String {
        docid::compose(DocIdKind::Event, &self.implemented_type, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        builder::{EventDefBuilder, MethodDefBuilder, TypeDefBuilder},
        flags::{MethodAccessFlags, MethodModifiers},
        signature::TypeSig,
    };

    fn inspect(owner: &TypeDef) -> EventRecord {
        EventRecord::new(
            &owner.events[0],
            owner,
            &QuickTypeRecord::from_definition(owner),
            &SubstitutionMap::default(),
            true,
        )
    }

    #[test]
    fn test_declaration() {
        let owner = TypeDefBuilder::class("Game", "Player")
            .event(EventDefBuilder::new("Died", TypeSig::named("System", "EventHandler")).accessors())
            .build()
            .unwrap();
        let record = inspect(&owner);

        assert_eq!(record.declaration, "public event EventHandler Died");
        assert_eq!(record.doc_id(), "E:Game.Player.Died");
        assert!(!record.should_ignore);
        assert!(record.raiser.is_none());
    }

    #[test]
    fn test_static_virtual_event() {
        let owner = TypeDefBuilder::class("Game", "World")
            .event(
                EventDefBuilder::new("Ticked", TypeSig::named("System", "Action"))
                    .adder(MethodDefBuilder::new("").modifiers(MethodModifiers::STATIC))
                    .remover(MethodDefBuilder::new("").modifiers(MethodModifiers::STATIC)),
            )
            .build()
            .unwrap();
        let record = inspect(&owner);

        assert!(record.is_static);
        assert_eq!(record.declaration, "public static event Action Ticked");
    }

    #[test]
    fn test_incomplete_or_hidden() {
        let missing_remover = TypeDefBuilder::class("Game", "Player")
            .event(
                EventDefBuilder::new("Died", TypeSig::named("System", "EventHandler"))
                    .adder(MethodDefBuilder::new("")),
            )
            .build()
            .unwrap();
        assert!(inspect(&missing_remover).should_ignore);

        let internal = TypeDefBuilder::class("Game", "Player")
            .event(
                EventDefBuilder::new("Died", TypeSig::named("System", "EventHandler"))
                    .adder(MethodDefBuilder::new("").access(MethodAccessFlags::ASSEM))
                    .remover(MethodDefBuilder::new("").access(MethodAccessFlags::ASSEM)),
            )
            .build()
            .unwrap();
        assert!(inspect(&internal).should_ignore);
    }
}
