//! The tagged member record shared by every member kind.
//!
//! The walker, the type record and the linker handle fields, properties, events and methods
//! uniformly through [`MemberRecord`]. Each variant keeps its kind-specific payload; the
//! shared questions (name, visibility, identity, documentation identifier) dispatch on the
//! tag.

use strum::{AsRefStr, Display, EnumIter};

use crate::inspector::{
    accessor::Accessor, event::EventRecord, field::FieldRecord, method::MethodRecord,
    property::PropertyRecord, quicktype::QuickTypeRecord,
};

/// The member collections the walker can gather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum MemberKind {
    /// Fields, constants included
    #[strum(to_string = "field")]
    Field,
    /// Properties and indexers
    #[strum(to_string = "property")]
    Property,
    /// Events
    #[strum(to_string = "event")]
    Event,
    /// Ordinary methods, without constructors and operators
    #[strum(to_string = "method")]
    Method,
    /// Instance constructors of the inspected type itself
    #[strum(to_string = "constructor")]
    Constructor,
    /// User-defined and conversion operators
    #[strum(to_string = "operator")]
    Operator,
}

impl MemberKind {
    /// Returns true if members of this kind are gathered from base types too
    #[must_use]
    pub fn is_inherited(self) -> bool {
        self != MemberKind::Constructor
    }
}

/// An inspected member of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum MemberRecord {
    /// A field
    Field(FieldRecord),
    /// A property or indexer
    Property(PropertyRecord),
    /// An event
    Event(EventRecord),
    /// A method, constructor or operator
    Method(MethodRecord),
}

impl MemberRecord {
    /// Member name (display name for methods)
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MemberRecord::Field(field) => &field.name,
            MemberRecord::Property(property) => &property.name,
            MemberRecord::Event(event) => &event.name,
            MemberRecord::Method(method) => &method.name,
        }
    }

    /// The collection this member belongs to
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberRecord::Field(_) => MemberKind::Field,
            MemberRecord::Property(_) => MemberKind::Property,
            MemberRecord::Event(_) => MemberKind::Event,
            MemberRecord::Method(method) if method.is_constructor => MemberKind::Constructor,
            MemberRecord::Method(method) if method.is_operator => MemberKind::Operator,
            MemberRecord::Method(_) => MemberKind::Method,
        }
    }

    /// Access modifier
    #[must_use]
    pub fn accessor(&self) -> Accessor {
        match self {
            MemberRecord::Field(field) => field.accessor,
            MemberRecord::Property(property) => property.accessor,
            MemberRecord::Event(event) => event.accessor,
            MemberRecord::Method(method) => method.accessor,
        }
    }

    /// Source modifier (`static`, `override`, `const`, ...)
    #[must_use]
    pub fn modifier(&self) -> &str {
        match self {
            MemberRecord::Field(field) => &field.modifier,
            MemberRecord::Property(property) => &property.modifier,
            MemberRecord::Event(event) => &event.modifier,
            MemberRecord::Method(method) => &method.modifier,
        }
    }

    /// Whether the member is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        match self {
            MemberRecord::Field(field) => field.is_static,
            MemberRecord::Property(property) => property.is_static,
            MemberRecord::Event(event) => event.is_static,
            MemberRecord::Method(method) => method.is_static,
        }
    }

    /// The type declaring the member
    #[must_use]
    pub fn implemented_type(&self) -> &QuickTypeRecord {
        match self {
            MemberRecord::Field(field) => &field.implemented_type,
            MemberRecord::Property(property) => &property.implemented_type,
            MemberRecord::Event(event) => &event.implemented_type,
            MemberRecord::Method(method) => &method.implemented_type,
        }
    }

    /// Complete source-level declaration
    #[must_use]
    pub fn declaration(&self) -> &str {
        match self {
            MemberRecord::Field(field) => &field.declaration,
            MemberRecord::Property(property) => &property.full_declaration,
            MemberRecord::Event(event) => &event.declaration,
            MemberRecord::Method(method) => &method.full_declaration,
        }
    }

    /// Whether the member is hidden by the inspection options or structurally incomplete
    #[must_use]
    pub fn should_ignore(&self) -> bool {
        match self {
            MemberRecord::Field(field) => field.should_ignore,
            MemberRecord::Property(property) => property.should_ignore,
            MemberRecord::Event(event) => event.should_ignore,
            MemberRecord::Method(method) => method.should_ignore,
        }
    }

    /// Whether the member never appears in a member collection: generated fields, type
    /// initializers and property/event accessors
    #[must_use]
    pub fn is_unkeepable(&self) -> bool {
        match self {
            MemberRecord::Field(field) => field.is_generated,
            MemberRecord::Method(method) => method.is_unkeepable(),
            MemberRecord::Property(_) | MemberRecord::Event(_) => false,
        }
    }

    /// Key under which an inherited member is hidden by a more derived declaration
    #[must_use]
    pub fn identity_key(&self) -> String {
        match self {
            MemberRecord::Field(field) => field.identity_key(),
            MemberRecord::Property(property) => property.identity_key(),
            MemberRecord::Event(event) => event.identity_key(),
            MemberRecord::Method(method) => method.identity_key(),
        }
    }

    /// Documentation identifier
    #[must_use]
    pub fn doc_id(&self) -> String {
        match self {
            MemberRecord::Field(field) => field.doc_id(),
            MemberRecord::Property(property) => property.doc_id(),
            MemberRecord::Event(event) => event.doc_id(),
            MemberRecord::Method(method) => method.doc_id(),
        }
    }

    /// The field payload, if this is a field
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldRecord> {
        match self {
            MemberRecord::Field(field) => Some(field),
            _ => None,
        }
    }

    /// The property payload, if this is a property
    #[must_use]
    pub fn as_property(&self) -> Option<&PropertyRecord> {
        match self {
            MemberRecord::Property(property) => Some(property),
            _ => None,
        }
    }

    /// The event payload, if this is an event
    #[must_use]
    pub fn as_event(&self) -> Option<&EventRecord> {
        match self {
            MemberRecord::Event(event) => Some(event),
            _ => None,
        }
    }

    /// The method payload, if this is a method, constructor or operator
    #[must_use]
    pub fn as_method(&self) -> Option<&MethodRecord> {
        match self {
            MemberRecord::Method(method) => Some(method),
            _ => None,
        }
    }
}
