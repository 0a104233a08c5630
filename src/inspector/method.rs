//! Method, constructor and operator records.

use crate::{
    inspector::{
        accessor::Accessor,
        attribute::AttributeRecord,
        docid::{self, DocIdKind},
        generics::{self, GenericParameterRecord, SubstitutionMap},
        parameter::{self, ParameterRecord},
        quicktype::QuickTypeRecord,
    },
    metadata::{
        definitions::{MethodDef, EXTENSION_ATTRIBUTE},
        flags::{MethodModifiers, MethodVtableFlags},
    },
};

/// Metadata name of the implicit conversion operator
pub const IMPLICIT_OPERATOR: &str = "op_Implicit";
/// Metadata name of the explicit conversion operator
pub const EXPLICIT_OPERATOR: &str = "op_Explicit";

const OPERATOR_PREFIX: &str = "op_";

/// An inspected method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRecord {
    /// Display name: the type name for constructors, the target type for conversion
    /// operators, the operator name without `op_` for other operators
    pub name: String,
    /// Name as found in metadata (`.ctor`, `op_Addition`, `get_Item`)
    pub metadata_name: String,
    /// Access modifier
    pub accessor: Accessor,
    /// Source modifier (`static`, `abstract`, `virtual`, `override`, `sealed override`,
    /// `static operator`, `static implicit operator`, ...)
    pub modifier: String,
    /// Whether the method is static
    pub is_static: bool,
    /// Whether the method is abstract
    pub is_abstract: bool,
    /// Whether the method is virtual
    pub is_virtual: bool,
    /// Whether the method overrides an inherited slot
    pub is_override: bool,
    /// Whether the method is an instance or type initializer
    pub is_constructor: bool,
    /// Whether the method is a user-defined operator
    pub is_operator: bool,
    /// Whether the method is an implicit or explicit conversion operator
    pub is_conversion_operator: bool,
    /// Whether the method is an extension method
    pub is_extension: bool,
    /// Whether the method backs a property or an event
    pub is_property_or_event_accessor: bool,
    /// Return type, after generic substitution
    pub return_type: QuickTypeRecord,
    /// Parameters
    pub parameters: Vec<ParameterRecord>,
    /// Generic parameters declared by the method
    pub generic_parameters: Vec<GenericParameterRecord>,
    /// Attributes applied to the method
    pub attributes: Vec<AttributeRecord>,
    /// The type declaring the method
    pub implemented_type: QuickTypeRecord,
    /// Declaration head (`public static int Parse`)
    pub declaration: String,
    /// Generic parameter list (`<T, U>`)
    pub generic_declaration: String,
    /// Parameter list as written inside the parentheses
    pub parameter_declaration: String,
    /// Complete declaration (`public T Find<T>(int index) where T : class`)
    pub full_declaration: String,
    /// Whether the method is hidden by the inspection options
    pub should_ignore: bool,
}

impl MethodRecord {
    /// Inspects a method declared on `implemented_type`.
    ///
    /// Members of interfaces carry no `abstract`/`virtual` modifier.
    #[must_use]
    pub fn new(
        method: &MethodDef,
        implemented_type: &QuickTypeRecord,
        is_interface_member: bool,
        map: &SubstitutionMap,
        ignore_private: bool,
    ) -> Self {
        let accessor = Accessor::from_method(method.access());
        let modifiers = method.modifiers();
        let is_static = modifiers.contains(MethodModifiers::STATIC);
        let is_abstract = modifiers.contains(MethodModifiers::ABSTRACT);
        let is_virtual = modifiers.contains(MethodModifiers::VIRTUAL);
        let is_final = modifiers.contains(MethodModifiers::FINAL);
        let is_override = is_virtual && method.vtable() == MethodVtableFlags::REUSE_SLOT;

        let is_constructor = method.is_constructor();
        let is_conversion_operator =
            method.name == IMPLICIT_OPERATOR || method.name == EXPLICIT_OPERATOR;
        let is_operator = method.name.starts_with(OPERATOR_PREFIX);

        let modifier = if is_conversion_operator {
            if method.name == IMPLICIT_OPERATOR {
                "static implicit operator"
            } else {
                "static explicit operator"
            }
        } else if is_operator {
            "static operator"
        } else if is_static {
            "static"
        } else if is_interface_member {
            ""
        } else if is_abstract {
            "abstract"
        } else if is_override && is_final {
            "sealed override"
        } else if is_override {
            "override"
        } else if is_virtual && is_final {
            // implicit interface implementation
            ""
        } else if is_virtual {
            "virtual"
        } else {
            ""
        };

        let return_type = QuickTypeRecord::from_sig(&method.return_type).substitute(map);
        let parameters = ParameterRecord::from_list(&method.params, map);
        let generic_parameters: Vec<GenericParameterRecord> = method
            .generic_params
            .iter()
            .map(GenericParameterRecord::from_definition)
            .collect();

        let name = if is_constructor {
            constructor_name(implemented_type)
        } else if is_conversion_operator {
            return_type.name.clone()
        } else if let Some(operator) = method.name.strip_prefix(OPERATOR_PREFIX) {
            operator.to_string()
        } else {
            method.name.clone()
        };

        let mut declaration = format!("{accessor} ");
        if !modifier.is_empty() {
            declaration.push_str(modifier);
            declaration.push(' ');
        }
        if !is_constructor && !is_conversion_operator {
            declaration.push_str(&return_type.name);
            declaration.push(' ');
        }
        declaration.push_str(&name);

        let is_extension = method.has_attribute(EXTENSION_ATTRIBUTE);
        let mut parameter_declaration = parameter::declaration_list(&parameters);
        if is_extension && !parameters.is_empty() {
            parameter_declaration.insert_str(0, "this ");
        }

        let generic_declaration = generics::declaration(&generic_parameters, false);
        let full_declaration = format!(
            "{declaration}{generic_declaration}({parameter_declaration}){}",
            generics::constraint_clause(&generic_parameters)
        );

        MethodRecord {
            name,
            metadata_name: method.name.clone(),
            accessor,
            modifier: modifier.to_string(),
            is_static,
            is_abstract,
            is_virtual,
            is_override,
            is_constructor,
            is_operator,
            is_conversion_operator,
            is_extension,
            is_property_or_event_accessor: method.semantics.is_property_accessor()
                || method.semantics.is_event_accessor(),
            return_type,
            parameters,
            generic_parameters,
            attributes: AttributeRecord::from_list(&method.custom_attributes),
            implemented_type: implemented_type.clone(),
            declaration,
            generic_declaration,
            parameter_declaration,
            full_declaration,
            should_ignore: accessor.is_hidden(ignore_private),
        }
    }

    /// Returns true if the method never appears as a member of its own: type initializers
    /// and the accessors of properties and events
    #[must_use]
    pub fn is_unkeepable(&self) -> bool {
        self.metadata_name == ".cctor" || self.is_property_or_event_accessor
    }

    /// Key under which an inherited method is hidden by a more derived declaration: the
    /// metadata name, generic arity, substituted parameter types and, for conversion
    /// operators, the target type
    #[must_use]
    pub fn identity_key(&self) -> String {
        let mut key = self.metadata_name.clone();
        if !self.generic_parameters.is_empty() {
            key.push_str(&format!("``{}", self.generic_parameters.len()));
        }
        key.push_str(&docid::resolved_parameter_list(&self.parameters));
        if self.is_conversion_operator {
            key.push('~');
            key.push_str(&docid::type_reference(&self.return_type.sig));
        }
        key
    }

    /// Documentation identifier (`M:Game.Container`1.Set(`0)`)
    #[must_use]
    pub fn doc_id(&self) -> String {
        let mut member = if self.metadata_name == ".ctor" {
            "#ctor".to_string()
        } else {
            self.metadata_name
                .replace('.', "#")
                .replace('<', "{")
                .replace('>', "}")
        };
        if !self.generic_parameters.is_empty() {
            member.push_str(&format!("``{}", self.generic_parameters.len()));
        }

        let mut id = docid::compose(DocIdKind::Method, &self.implemented_type, &member);
        id.push_str(&docid::parameter_list(&self.parameters));
        if self.is_conversion_operator {
            id.push('~');
            id.push_str(&docid::type_reference(&self.return_type.declared_sig));
        }
        id
    }
}

/// Simple name of the declaring type, as constructors are written
fn constructor_name(implemented_type: &QuickTypeRecord) -> String {
    let name = implemented_type
        .name
        .split('<')
        .next()
        .unwrap_or(&implemented_type.name);
    name.rsplit('.').next().unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        builder::{GenericParamBuilder, MethodDefBuilder, ParamDefBuilder, TypeDefBuilder},
        definitions::TypeDef,
        flags::{GenericParamAttributes, MethodAccessFlags},
        signature::{PrimitiveKind, TypeName, TypeSig},
    };

    fn container() -> TypeDef {
        TypeDefBuilder::class("Game", "Container`1")
            .generic_param(GenericParamBuilder::new("T"))
            .build()
            .unwrap()
    }

    fn record(method: MethodDefBuilder, owner: &TypeDef) -> MethodRecord {
        MethodRecord::new(
            &method.build().unwrap(),
            &QuickTypeRecord::from_definition(owner),
            owner.is_interface(),
            &SubstitutionMap::default(),
            true,
        )
    }

    #[test]
    fn test_plain_method() {
        let owner = TypeDefBuilder::class("Foo", "Foo").build().unwrap();
        let method = record(
            MethodDefBuilder::new("Bar")
                .param(ParamDefBuilder::new("a", PrimitiveKind::I4.into()))
                .param(ParamDefBuilder::new("b", PrimitiveKind::String.into())),
            &owner,
        );

        assert_eq!(method.full_declaration, "public void Bar(int a, string b)");
        assert_eq!(method.doc_id(), "M:Foo.Foo.Bar(System.Int32,System.String)");
        assert_eq!(method.identity_key(), "Bar(System.Int32,System.String)");
    }

    #[test]
    fn test_generic_container_member() {
        let owner = container();
        let get = record(
            MethodDefBuilder::new("Get")
                .returns(TypeSig::type_param(0, "T"))
                .param(ParamDefBuilder::new("index", PrimitiveKind::I4.into())),
            &owner,
        );
        assert_eq!(get.full_declaration, "public T Get(int index)");
        assert_eq!(get.doc_id(), "M:Game.Container`1.Get(System.Int32)");

        let set = record(
            MethodDefBuilder::new("Set").param(ParamDefBuilder::new("item", TypeSig::type_param(0, "T"))),
            &owner,
        );
        assert_eq!(set.doc_id(), "M:Game.Container`1.Set(`0)");

        let closed = MethodRecord::new(
            &MethodDefBuilder::new("Get")
                .returns(TypeSig::type_param(0, "T"))
                .param(ParamDefBuilder::new("index", PrimitiveKind::I4.into()))
                .build()
                .unwrap(),
            &QuickTypeRecord::from_definition(&owner),
            false,
            &SubstitutionMap::new(vec![PrimitiveKind::I4.into()]),
            true,
        );
        assert_eq!(closed.full_declaration, "public int Get(int index)");
        assert_eq!(closed.doc_id(), "M:Game.Container`1.Get(System.Int32)");
    }

    #[test]
    fn test_generic_method() {
        let owner = TypeDefBuilder::class("Game", "Registry").build().unwrap();
        let method = record(
            MethodDefBuilder::new("Find")
                .generic_param(
                    GenericParamBuilder::new("TItem")
                        .flags(GenericParamAttributes::REFERENCE_TYPE_CONSTRAINT),
                )
                .returns(TypeSig::method_param(0, "TItem"))
                .param(ParamDefBuilder::new("key", TypeSig::method_param(0, "TItem"))),
            &owner,
        );

        assert_eq!(
            method.full_declaration,
            "public TItem Find<TItem>(TItem key) where TItem : class"
        );
        assert_eq!(method.doc_id(), "M:Game.Registry.Find``1(``0)");
        assert_eq!(method.identity_key(), "Find``1(``0)");
    }

    #[test]
    fn test_virtual_modifiers() {
        let owner = TypeDefBuilder::class("Game", "Knight").build().unwrap();
        let virtual_slot = MethodModifiers::VIRTUAL | MethodModifiers::HIDE_BY_SIG;

        let overriding = record(
            MethodDefBuilder::new("Attack").modifiers(virtual_slot),
            &owner,
        );
        assert_eq!(overriding.modifier, "override");
        assert!(overriding.is_override);

        let sealed = record(
            MethodDefBuilder::new("Attack").modifiers(virtual_slot | MethodModifiers::FINAL),
            &owner,
        );
        assert_eq!(sealed.modifier, "sealed override");

        let introduced = record(
            MethodDefBuilder::new("Defend")
                .modifiers(virtual_slot)
                .vtable(MethodVtableFlags::NEW_SLOT),
            &owner,
        );
        assert_eq!(introduced.modifier, "virtual");
        assert_eq!(introduced.full_declaration, "public virtual void Defend()");

        let implemented = record(
            MethodDefBuilder::new("Dispose")
                .modifiers(virtual_slot | MethodModifiers::FINAL)
                .vtable(MethodVtableFlags::NEW_SLOT),
            &owner,
        );
        assert_eq!(implemented.modifier, "");

        let abstract_method = record(
            MethodDefBuilder::new("Move")
                .modifiers(virtual_slot | MethodModifiers::ABSTRACT)
                .vtable(MethodVtableFlags::NEW_SLOT),
            &owner,
        );
        assert_eq!(abstract_method.modifier, "abstract");

        let interface = TypeDefBuilder::interface("Game", "IMovable").build().unwrap();
        let member = record(
            MethodDefBuilder::new("Move")
                .modifiers(virtual_slot | MethodModifiers::ABSTRACT)
                .vtable(MethodVtableFlags::NEW_SLOT),
            &interface,
        );
        assert_eq!(member.full_declaration, "public void Move()");
    }

    #[test]
    fn test_constructors() {
        let owner = container();
        let ctor = record(
            MethodDefBuilder::constructor()
                .param(ParamDefBuilder::new("capacity", PrimitiveKind::I4.into())),
            &owner,
        );
        assert_eq!(ctor.full_declaration, "public Container(int capacity)");
        assert_eq!(ctor.doc_id(), "M:Game.Container`1.#ctor(System.Int32)");
        assert!(!ctor.is_unkeepable());

        let cctor = record(MethodDefBuilder::static_constructor(), &owner);
        assert!(cctor.is_unkeepable());
        assert!(cctor.should_ignore);

        let nested = TypeDefBuilder::class("Game", "Slot")
            .nested_in(TypeName::new("Game", "Inventory"))
            .build()
            .unwrap();
        assert_eq!(
            record(MethodDefBuilder::constructor(), &nested).full_declaration,
            "public Slot()"
        );
    }

    #[test]
    fn test_operators() {
        let owner = TypeDefBuilder::structure("Game", "Vector").build().unwrap();
        let vector = TypeSig::named("Game", "Vector");

        let addition = record(
            MethodDefBuilder::operator("op_Addition")
                .returns(vector.clone())
                .param(ParamDefBuilder::new("a", vector.clone()))
                .param(ParamDefBuilder::new("b", vector.clone())),
            &owner,
        );
        assert_eq!(
            addition.full_declaration,
            "public static operator Vector Addition(Vector a, Vector b)"
        );
        assert!(addition.is_operator);

        let conversion = record(
            MethodDefBuilder::operator(IMPLICIT_OPERATOR)
                .returns(PrimitiveKind::R8.into())
                .param(ParamDefBuilder::new("value", vector.clone())),
            &owner,
        );
        assert_eq!(
            conversion.full_declaration,
            "public static implicit operator double(Vector value)"
        );
        assert_eq!(
            conversion.doc_id(),
            "M:Game.Vector.op_Implicit(Game.Vector)~System.Double"
        );
        assert_eq!(conversion.identity_key(), "op_Implicit(Game.Vector)~System.Double");
    }

    #[test]
    fn test_extension_and_by_ref() {
        let owner = TypeDefBuilder::class("Game", "Extensions")
            .modifiers(
                crate::metadata::flags::TypeAttributes::ABSTRACT
                    | crate::metadata::flags::TypeAttributes::SEALED,
            )
            .build()
            .unwrap();
        let method = record(
            MethodDefBuilder::new("TryHeal")
                .modifiers(MethodModifiers::STATIC | MethodModifiers::HIDE_BY_SIG)
                .extension()
                .returns(PrimitiveKind::Boolean.into())
                .param(ParamDefBuilder::new("player", TypeSig::named("Game", "Player")))
                .param(ParamDefBuilder::new("amount", PrimitiveKind::I4.into()).out()),
            &owner,
        );

        assert_eq!(
            method.full_declaration,
            "public static bool TryHeal(this Player player, out int amount)"
        );
        assert_eq!(
            method.doc_id(),
            "M:Game.Extensions.TryHeal(Game.Player,System.Int32@)"
        );
    }

    #[test]
    fn test_hidden_method() {
        let owner = TypeDefBuilder::class("Game", "Knight").build().unwrap();
        let method = MethodDefBuilder::new("Think").access(MethodAccessFlags::PRIVATE);
        assert!(record(method.clone(), &owner).should_ignore);

        let visible = MethodRecord::new(
            &method.build().unwrap(),
            &QuickTypeRecord::from_definition(&owner),
            false,
            &SubstitutionMap::default(),
            false,
        );
        assert_eq!(visible.full_declaration, "private void Think()");
    }

    #[test]
    fn test_explicit_generic_interface_implementation() {
        let owner = TypeDefBuilder::class("Game", "Bag").build().unwrap();
        let method = MethodDefBuilder::new(
            "System.Collections.Generic.IEnumerable<System.Int32>.GetEnumerator",
        )
        .access(MethodAccessFlags::PRIVATE);

        assert_eq!(
            record(method, &owner).doc_id(),
            "M:Game.Bag.System#Collections#Generic#IEnumerable{System#Int32}#GetEnumerator"
        );
    }
}
