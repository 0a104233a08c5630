//! Type records: the complete inspection result for one type.

use strum::{AsRefStr, Display, EnumIter};

use crate::{
    inspector::{
        accessor::Accessor,
        attribute::AttributeRecord,
        docid,
        field::ENUM_VALUE_FIELD,
        generics::{self, SubstitutionMap},
        member::{MemberKind, MemberRecord},
        parameter::{self, ParameterRecord},
        quicktype::QuickTypeRecord,
        walker::InheritanceWalker,
        InspectionOptions,
    },
    metadata::{
        definitions::TypeDef,
        flags::TypeAttributes,
        signature::{PrimitiveKind, TypeSig},
        source::MetadataSource,
    },
    Result,
};

const MULTICAST_DELEGATE: &str = "System.MulticastDelegate";
const ENUM: &str = "System.Enum";
const VALUE_TYPE: &str = "System.ValueType";
const OBJECT: &str = "System.Object";
const INVOKE: &str = "Invoke";

/// The kind of declaration a type is written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum ObjectKind {
    /// `class`
    #[strum(to_string = "class")]
    Class,
    /// `struct`
    #[strum(to_string = "struct")]
    Struct,
    /// `interface`
    #[strum(to_string = "interface")]
    Interface,
    /// `enum`
    #[strum(to_string = "enum")]
    Enum,
    /// `delegate`
    #[strum(to_string = "delegate")]
    Delegate,
}

impl ObjectKind {
    /// Detects the kind of a definition from its base type and flags
    #[must_use]
    pub fn of(definition: &TypeDef) -> Self {
        if definition.extends(MULTICAST_DELEGATE) {
            ObjectKind::Delegate
        } else if definition.extends(ENUM) {
            ObjectKind::Enum
        } else if definition.extends(VALUE_TYPE) {
            ObjectKind::Struct
        } else if definition.is_interface() {
            ObjectKind::Interface
        } else {
            ObjectKind::Class
        }
    }
}

/// An inspected type with all of its member collections.
///
/// Collections hold only members that survived the walker's filters. A type hidden by the
/// inspection options keeps its descriptive fields but has empty collections.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRecord {
    /// Names and generic parameters of the type
    pub info: QuickTypeRecord,
    /// Assembly defining the type
    pub assembly: String,
    /// Declaration kind
    pub kind: ObjectKind,
    /// Access modifier
    pub accessor: Accessor,
    /// `static`, `sealed`, `abstract` or empty; always empty for structs, interfaces, enums
    /// and delegates
    pub modifier: String,
    /// Whether the type is nested in another type
    pub is_nested: bool,
    /// The enclosing type of a nested type
    pub declaring_type: Option<QuickTypeRecord>,
    /// Base type; `None` for the roots `object`, `ValueType` and `Enum`
    pub base_type: Option<QuickTypeRecord>,
    /// Implemented interfaces
    pub interfaces: Vec<QuickTypeRecord>,
    /// Attributes applied to the type
    pub attributes: Vec<AttributeRecord>,
    /// Declaration head (`public sealed class Knight`)
    pub declaration: String,
    /// Complete declaration with generic parameters, base list and constraints
    pub full_declaration: String,
    /// Instance constructors
    pub constructors: Vec<MemberRecord>,
    /// Instance fields
    pub fields: Vec<MemberRecord>,
    /// Static fields and constants
    pub static_fields: Vec<MemberRecord>,
    /// Instance properties
    pub properties: Vec<MemberRecord>,
    /// Static properties
    pub static_properties: Vec<MemberRecord>,
    /// Instance events
    pub events: Vec<MemberRecord>,
    /// Static events
    pub static_events: Vec<MemberRecord>,
    /// Instance methods
    pub methods: Vec<MemberRecord>,
    /// Static methods
    pub static_methods: Vec<MemberRecord>,
    /// Operators
    pub operators: Vec<MemberRecord>,
    /// Whether the type is hidden by the inspection options
    pub should_ignore: bool,
}

impl TypeRecord {
    /// Inspects `definition`, resolving its ancestors through `source`.
    ///
    /// # Errors
    /// Returns [`crate::Error::RecursionLimit`] if the inheritance chain is longer than
    /// [`InspectionOptions::max_inheritance_depth`]
    pub fn new<S>(source: &S, definition: &TypeDef, options: &InspectionOptions) -> Result<Self>
    where
        S: MetadataSource + ?Sized,
    {
        let info = QuickTypeRecord::from_definition(definition);
        let kind = ObjectKind::of(definition);
        let accessor = Accessor::from_type(definition.visibility());
        let should_ignore = accessor.is_hidden(options.ignore_private);

        let attributes = definition.attributes();
        let modifier = match kind {
            ObjectKind::Class => {
                let is_sealed = attributes.contains(TypeAttributes::SEALED);
                let is_abstract = attributes.contains(TypeAttributes::ABSTRACT);
                if is_sealed && is_abstract {
                    "static"
                } else if is_sealed {
                    "sealed"
                } else if is_abstract {
                    "abstract"
                } else {
                    ""
                }
            }
            _ => "",
        };

        let base_type = definition
            .base
            .as_ref()
            .filter(|base| ![OBJECT, VALUE_TYPE, ENUM].iter().any(|root| base.is(root)))
            .map(QuickTypeRecord::from_sig);

        let interfaces: Vec<QuickTypeRecord> = definition
            .interfaces
            .iter()
            .filter(|interface| {
                !options.ignore_private || is_visible_interface(source, interface)
            })
            .map(QuickTypeRecord::from_sig)
            .collect();

        let declaring_type = definition
            .name
            .declaring
            .as_deref()
            .map(|declaring| QuickTypeRecord::from_sig(&TypeSig::Named(declaring.clone())));

        let invoke = (kind == ObjectKind::Delegate)
            .then(|| definition.methods.iter().find(|method| method.name == INVOKE))
            .flatten();

        let mut declaration = format!("{accessor} ");
        if !modifier.is_empty() {
            declaration.push_str(modifier);
            declaration.push(' ');
        }
        declaration.push_str(kind.as_ref());
        declaration.push(' ');
        if let Some(invoke) = invoke {
            declaration.push_str(&QuickTypeRecord::from_sig(&invoke.return_type).name);
            declaration.push(' ');
        }
        declaration.push_str(&info.name);

        let mut record = TypeRecord {
            assembly: definition.assembly.clone(),
            kind,
            accessor,
            modifier: modifier.to_string(),
            is_nested: definition.is_nested(),
            declaring_type,
            base_type,
            interfaces,
            attributes: AttributeRecord::from_list(&definition.custom_attributes),
            full_declaration: String::new(),
            declaration,
            constructors: Vec::new(),
            fields: Vec::new(),
            static_fields: Vec::new(),
            properties: Vec::new(),
            static_properties: Vec::new(),
            events: Vec::new(),
            static_events: Vec::new(),
            methods: Vec::new(),
            static_methods: Vec::new(),
            operators: Vec::new(),
            should_ignore,
            info,
        };
        record.full_declaration = record.compose_full_declaration(definition);

        if should_ignore {
            log::debug!("Skipping members of hidden type {}", definition.full_name());
            return Ok(record);
        }

        let walker = InheritanceWalker::new(source, definition, options)?;
        record.constructors = walker.collect(MemberKind::Constructor, false);
        record.fields = walker.collect(MemberKind::Field, false);
        record.static_fields = walker.collect(MemberKind::Field, true);
        record.properties = walker.collect(MemberKind::Property, false);
        record.static_properties = walker.collect(MemberKind::Property, true);
        record.events = walker.collect(MemberKind::Event, false);
        record.static_events = walker.collect(MemberKind::Event, true);
        record.methods = walker.collect(MemberKind::Method, false);
        record.static_methods = walker.collect(MemberKind::Method, true);
        record.operators = walker.collect(MemberKind::Operator, true);

        Ok(record)
    }

    /// Documentation identifier (`T:Game.Container`1`)
    #[must_use]
    pub fn doc_id(&self) -> String {
        docid::for_type(&self.info)
    }

    /// Every member collection with its kind and static-ness, in documentation order
    #[must_use]
    pub fn collections(&self) -> [(MemberKind, bool, &[MemberRecord]); 10] {
        [
            (MemberKind::Constructor, false, self.constructors.as_slice()),
            (MemberKind::Field, false, self.fields.as_slice()),
            (MemberKind::Field, true, self.static_fields.as_slice()),
            (MemberKind::Property, false, self.properties.as_slice()),
            (MemberKind::Property, true, self.static_properties.as_slice()),
            (MemberKind::Event, false, self.events.as_slice()),
            (MemberKind::Event, true, self.static_events.as_slice()),
            (MemberKind::Method, false, self.methods.as_slice()),
            (MemberKind::Method, true, self.static_methods.as_slice()),
            (MemberKind::Operator, true, self.operators.as_slice()),
        ]
    }

    /// Total number of members over all collections
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.collections()
            .iter()
            .map(|(_, _, members)| members.len())
            .sum()
    }

    fn compose_full_declaration(&self, definition: &TypeDef) -> String {
        let generic_parameters = &self.info.generic_parameters;
        let constraints = generics::constraint_clause(generic_parameters);

        if self.kind == ObjectKind::Delegate {
            if let Some(invoke) = definition.methods.iter().find(|method| method.name == INVOKE) {
                let params = ParameterRecord::from_list(&invoke.params, &SubstitutionMap::default());
                return format!(
                    "{}({}){constraints}",
                    self.with_variance(definition),
                    parameter::declaration_list(&params)
                );
            }
        }

        let mut declaration = match self.kind {
            ObjectKind::Interface | ObjectKind::Delegate => self.with_variance(definition),
            _ => self.declaration.clone(),
        };

        let mut inherits: Vec<String> = Vec::new();
        if let Some(base) = &self.base_type {
            inherits.push(base.name.clone());
        }
        if self.kind == ObjectKind::Enum {
            if let Some(underlying) = enum_underlying_type(definition) {
                inherits.push(underlying);
            }
        }
        inherits.extend(self.interfaces.iter().map(|interface| interface.name.clone()));

        if !inherits.is_empty() {
            declaration.push_str(" : ");
            declaration.push_str(&inherits.join(", "));
        }
        declaration.push_str(&constraints);
        declaration
    }

    /// The declaration head with variance markers on the type's own generic parameters
    fn with_variance(&self, definition: &TypeDef) -> String {
        let params = &self.info.generic_parameters;
        let own_arity = definition.name.own_arity().min(params.len());
        let has_variance = params.iter().any(|param| !param.variance().is_empty());

        match self.declaration.rfind('<') {
            Some(open) if has_variance && own_arity > 0 && self.declaration.ends_with('>') => {
                format!(
                    "{}{}",
                    &self.declaration[..open],
                    generics::declaration(&params[params.len() - own_arity..], true)
                )
            }
            _ => self.declaration.clone(),
        }
    }
}

/// The underlying type of an enum when it is not `int`
fn enum_underlying_type(definition: &TypeDef) -> Option<String> {
    definition
        .fields
        .iter()
        .find(|field| field.name == ENUM_VALUE_FIELD)
        .filter(|field| field.sig != TypeSig::Primitive(PrimitiveKind::I4))
        .map(|field| QuickTypeRecord::from_sig(&field.sig).name)
}

fn is_visible_interface<S>(source: &S, interface: &TypeSig) -> bool
where
    S: MetadataSource + ?Sized,
{
    let Some(name) = interface.type_name() else {
        return true;
    };
    match source.is_type_public(name) {
        Some(public) => public,
        None => {
            log::warn!(
                "Could not resolve interface {}, treating it as public",
                interface.raw_name()
            );
            true
        }
    }
}
