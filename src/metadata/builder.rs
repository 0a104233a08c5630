//! Fluent builders for type definitions.
//!
//! Loaders that translate a binary reader's output, and tests that need a small class library,
//! assemble [`TypeDef`]s through these builders instead of filling the structures by hand. The
//! builders take care of the bookkeeping a compiler would do:
//!
//! - generic parameters receive their positional index and owner
//! - property and event accessors are named (`get_X`, `set_X`, `add_X`, `remove_X`), typed from
//!   the property or event, flagged `specialname`, appended to the method list and linked
//!   through [`MethodSemantics`]
//! - nested types get the `nested` flavour of their visibility
//! - enums receive their `value__` field and delegates their `.ctor`/`Invoke` pair
//!
//! # Examples
//!
//! ```rust
//! use docscope::metadata::{
//!     builder::{MethodDefBuilder, ParamDefBuilder, PropertyDefBuilder, TypeDefBuilder},
//!     signature::{PrimitiveKind, TypeSig},
//! };
//!
//! let player = TypeDefBuilder::class("Game", "Player")
//!     .method(
//!         MethodDefBuilder::new("Heal")
//!             .param(ParamDefBuilder::new("amount", PrimitiveKind::I4.into())),
//!     )
//!     .property(PropertyDefBuilder::new("Health", PrimitiveKind::I4.into()).get().set())
//!     .build()?;
//!
//! assert_eq!(player.methods.len(), 3);
//! assert_eq!(player.methods[1].name, "get_Health");
//! # Ok::<(), docscope::Error>(())
//! ```

use crate::{
    metadata::{
        definitions::{
            ConstantValue, CustomAttribute, CustomAttributeArgument, CustomAttributeNamedArgument,
            EventDef, FieldDef, GenericParamDef, MethodDef, ParamDef, PropertyDef, TypeDef,
            COMPILER_GENERATED_ATTRIBUTE, PARAM_ARRAY_ATTRIBUTE,
        },
        flags::{
            FieldAccessFlags, FieldModifiers, GenericParamAttributes, MethodAccessFlags,
            MethodModifiers, MethodSemantics, MethodVtableFlags, ParamAttributes, TypeAttributes,
            TypeVisibility, FIELD_ACCESS_MASK, METHOD_ACCESS_MASK, TYPE_VISIBILITY_MASK,
        },
        signature::{GenericOwner, PrimitiveKind, TypeName, TypeSig},
    },
    Result,
};

/// Builder for [`CustomAttribute`]s
#[derive(Debug, Clone)]
pub struct CustomAttributeBuilder {
    attribute_type: TypeSig,
    constructor_params: Vec<String>,
    fixed_args: Vec<CustomAttributeArgument>,
    named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttributeBuilder {
    /// Creates a builder for an attribute of the given class
    #[must_use]
    pub fn new(attribute_type: TypeSig) -> Self {
        CustomAttributeBuilder {
            attribute_type,
            constructor_params: Vec::new(),
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Creates a builder for an attribute class given by its metadata full name
    #[must_use]
    pub fn named(full_name: &str) -> Self {
        Self::new(TypeSig::parse_named(full_name))
    }

    /// Appends a positional constructor argument
    ///
    /// # Arguments
    ///
    /// * `param` - The name of the matching constructor parameter
    /// * `value` - The argument value
    #[must_use]
    pub fn arg(mut self, param: impl Into<String>, value: CustomAttributeArgument) -> Self {
        self.constructor_params.push(param.into());
        self.fixed_args.push(value);
        self
    }

    /// Appends a named field assignment
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: CustomAttributeArgument) -> Self {
        self.named_args.push(CustomAttributeNamedArgument {
            is_field: true,
            name: name.into(),
            value,
        });
        self
    }

    /// Appends a named property assignment
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: CustomAttributeArgument) -> Self {
        self.named_args.push(CustomAttributeNamedArgument {
            is_field: false,
            name: name.into(),
            value,
        });
        self
    }

    /// Produces the attribute
    #[must_use]
    pub fn build(self) -> CustomAttribute {
        CustomAttribute {
            attribute_type: self.attribute_type,
            constructor_params: self.constructor_params,
            fixed_args: self.fixed_args,
            named_args: self.named_args,
        }
    }
}

/// Builder for [`GenericParamDef`]s; index and owner are assigned by the declaring builder
#[derive(Debug, Clone)]
pub struct GenericParamBuilder {
    name: String,
    flags: GenericParamAttributes,
    constraints: Vec<TypeSig>,
}

impl GenericParamBuilder {
    /// Creates an unconstrained generic parameter
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        GenericParamBuilder {
            name: name.into(),
            flags: GenericParamAttributes::empty(),
            constraints: Vec::new(),
        }
    }

    /// Adds variance or special constraint flags (`class`, `struct`, `new()`)
    #[must_use]
    pub fn flags(mut self, flags: GenericParamAttributes) -> Self {
        self.flags |= flags;
        self
    }

    /// Adds a constraint type
    #[must_use]
    pub fn constraint(mut self, constraint: TypeSig) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn build(self, index: usize, owner: GenericOwner) -> Result<GenericParamDef> {
        if self.name.is_empty() {
            return Err(malformed_error!("Generic parameter {} has no name", index));
        }

        Ok(GenericParamDef {
            index: u32::try_from(index)
                .map_err(|_| malformed_error!("Generic parameter index out of range - {}", index))?,
            name: self.name,
            flags: self.flags.bits(),
            owner,
            constraints: self.constraints,
        })
    }
}

/// Builder for [`ParamDef`]s
#[derive(Debug, Clone)]
pub struct ParamDefBuilder {
    name: String,
    flags: ParamAttributes,
    sig: TypeSig,
    default: Option<ConstantValue>,
    custom_attributes: Vec<CustomAttribute>,
}

impl ParamDefBuilder {
    /// Creates a parameter of the given type
    #[must_use]
    pub fn new(name: impl Into<String>, sig: TypeSig) -> Self {
        ParamDefBuilder {
            name: name.into(),
            flags: ParamAttributes::empty(),
            sig,
            default: None,
            custom_attributes: Vec::new(),
        }
    }

    /// Adds parameter flags
    #[must_use]
    pub fn flags(mut self, flags: ParamAttributes) -> Self {
        self.flags |= flags;
        self
    }

    /// Turns the parameter into a `ref` parameter
    #[must_use]
    pub fn by_ref(mut self) -> Self {
        if !self.sig.is_by_ref() {
            self.sig = TypeSig::by_ref(self.sig);
        }
        self
    }

    /// Turns the parameter into an `out` parameter
    #[must_use]
    pub fn out(self) -> Self {
        self.by_ref().flags(ParamAttributes::OUT)
    }

    /// Turns the parameter into an `in` parameter
    #[must_use]
    pub fn in_ref(self) -> Self {
        self.by_ref().flags(ParamAttributes::IN)
    }

    /// Marks the parameter as a `params` array
    #[must_use]
    pub fn param_array(self) -> Self {
        self.attribute(CustomAttributeBuilder::named(PARAM_ARRAY_ATTRIBUTE))
    }

    /// Sets the default value and marks the parameter optional
    #[must_use]
    pub fn default_value(mut self, value: ConstantValue) -> Self {
        self.default = Some(value);
        self.flags |= ParamAttributes::OPTIONAL | ParamAttributes::HAS_DEFAULT;
        self
    }

    /// Applies a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.custom_attributes.push(attribute.build());
        self
    }

    fn build(self) -> Result<ParamDef> {
        if self.name.is_empty() {
            return Err(malformed_error!("Parameter of type {} has no name", self.sig));
        }

        Ok(ParamDef {
            name: self.name,
            flags: self.flags.bits(),
            sig: self.sig,
            default: self.default,
            custom_attributes: self.custom_attributes,
        })
    }
}

/// Builder for [`MethodDef`]s
///
/// New methods are `public hidebysig` instance methods returning `void`.
#[derive(Debug, Clone)]
pub struct MethodDefBuilder {
    name: String,
    flags: u32,
    semantics: MethodSemantics,
    return_type: TypeSig,
    params: Vec<ParamDefBuilder>,
    generic_params: Vec<GenericParamBuilder>,
    custom_attributes: Vec<CustomAttribute>,
}

impl MethodDefBuilder {
    /// Creates a public instance method
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        MethodDefBuilder {
            name: name.into(),
            flags: MethodAccessFlags::PUBLIC.bits() | MethodModifiers::HIDE_BY_SIG.bits(),
            semantics: MethodSemantics::empty(),
            return_type: PrimitiveKind::Void.into(),
            params: Vec::new(),
            generic_params: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    /// Creates a public instance constructor
    #[must_use]
    pub fn constructor() -> Self {
        Self::new(".ctor")
            .modifiers(MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME)
    }

    /// Creates the type initializer
    #[must_use]
    pub fn static_constructor() -> Self {
        Self::new(".cctor")
            .access(MethodAccessFlags::PRIVATE)
            .modifiers(
                MethodModifiers::STATIC
                    | MethodModifiers::SPECIAL_NAME
                    | MethodModifiers::RTSPECIAL_NAME,
            )
    }

    /// Creates a user-defined operator; `name` is the metadata name (`op_Addition`)
    #[must_use]
    pub fn operator(name: impl Into<String>) -> Self {
        Self::new(name).modifiers(MethodModifiers::STATIC | MethodModifiers::SPECIAL_NAME)
    }

    /// Replaces the whole `MethodAttributes` word
    #[must_use]
    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Replaces the member access
    #[must_use]
    pub fn access(mut self, access: MethodAccessFlags) -> Self {
        self.flags = (self.flags & !METHOD_ACCESS_MASK) | access.bits();
        self
    }

    /// Adds method modifiers (`static`, `virtual`, `abstract`, `final`, ...)
    #[must_use]
    pub fn modifiers(mut self, modifiers: MethodModifiers) -> Self {
        self.flags |= modifiers.bits();
        self
    }

    /// Sets the vtable layout (`newslot` or `reuseslot`)
    #[must_use]
    pub fn vtable(mut self, vtable: MethodVtableFlags) -> Self {
        self.flags = (self.flags & !MethodVtableFlags::NEW_SLOT.bits()) | vtable.bits();
        self
    }

    /// Sets the return type
    #[must_use]
    pub fn returns(mut self, return_type: TypeSig) -> Self {
        self.return_type = return_type;
        self
    }

    /// Appends a parameter
    #[must_use]
    pub fn param(mut self, param: ParamDefBuilder) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a generic parameter declared by the method
    #[must_use]
    pub fn generic_param(mut self, param: GenericParamBuilder) -> Self {
        self.generic_params.push(param);
        self
    }

    /// Applies a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.custom_attributes.push(attribute.build());
        self
    }

    /// Marks the method as an extension method
    #[must_use]
    pub fn extension(self) -> Self {
        self.attribute(CustomAttributeBuilder::named(
            crate::metadata::definitions::EXTENSION_ATTRIBUTE,
        ))
    }

    fn accessor(
        mut self,
        name: String,
        semantics: MethodSemantics,
        return_type: TypeSig,
        params: Vec<ParamDefBuilder>,
    ) -> Self {
        self.name = name;
        self.semantics = semantics;
        self.return_type = return_type;
        self.params = params;
        self.flags |= MethodModifiers::SPECIAL_NAME.bits();
        self
    }

    /// Produces the method definition
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the method, a parameter or a generic parameter has
    /// no name
    pub fn build(self) -> Result<MethodDef> {
        if self.name.is_empty() {
            return Err(malformed_error!("Method without a name"));
        }

        Ok(MethodDef {
            name: self.name,
            flags: self.flags,
            semantics: self.semantics,
            return_type: self.return_type,
            params: self
                .params
                .into_iter()
                .map(ParamDefBuilder::build)
                .collect::<Result<Vec<_>>>()?,
            generic_params: self
                .generic_params
                .into_iter()
                .enumerate()
                .map(|(index, param)| param.build(index, GenericOwner::Method))
                .collect::<Result<Vec<_>>>()?,
            custom_attributes: self.custom_attributes,
        })
    }
}

/// Builder for [`FieldDef`]s
///
/// New fields are public instance fields.
#[derive(Debug, Clone)]
pub struct FieldDefBuilder {
    name: String,
    flags: u32,
    sig: TypeSig,
    constant: Option<ConstantValue>,
    initial_value: Vec<u8>,
    custom_attributes: Vec<CustomAttribute>,
}

impl FieldDefBuilder {
    /// Creates a public instance field
    #[must_use]
    pub fn new(name: impl Into<String>, sig: TypeSig) -> Self {
        FieldDefBuilder {
            name: name.into(),
            flags: FieldAccessFlags::PUBLIC.bits(),
            sig,
            constant: None,
            initial_value: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    /// Replaces the field access
    #[must_use]
    pub fn access(mut self, access: FieldAccessFlags) -> Self {
        self.flags = (self.flags & !FIELD_ACCESS_MASK) | access.bits();
        self
    }

    /// Adds field modifiers (`static`, `initonly`, ...)
    #[must_use]
    pub fn modifiers(mut self, modifiers: FieldModifiers) -> Self {
        self.flags |= modifiers.bits();
        self
    }

    /// Turns the field into a `const` with the given value
    #[must_use]
    pub fn constant(mut self, value: ConstantValue) -> Self {
        self.constant = Some(value);
        self.modifiers(FieldModifiers::STATIC | FieldModifiers::LITERAL | FieldModifiers::HAS_DEFAULT)
    }

    /// Attaches raw initial data (`FieldRVA`)
    #[must_use]
    pub fn initial_value(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.initial_value = data.into();
        self.modifiers(FieldModifiers::HAS_FIELD_RVA)
    }

    /// Marks the field as compiler generated (auto-property backing fields)
    #[must_use]
    pub fn compiler_generated(self) -> Self {
        self.attribute(CustomAttributeBuilder::named(COMPILER_GENERATED_ATTRIBUTE))
    }

    /// Applies a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.custom_attributes.push(attribute.build());
        self
    }

    /// Produces the field definition
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the field has no name
    pub fn build(self) -> Result<FieldDef> {
        if self.name.is_empty() {
            return Err(malformed_error!("Field of type {} has no name", self.sig));
        }

        Ok(FieldDef {
            name: self.name,
            flags: self.flags,
            sig: self.sig,
            constant: self.constant,
            initial_value: self.initial_value,
            custom_attributes: self.custom_attributes,
        })
    }
}

/// Builder for [`PropertyDef`]s and their accessor methods
#[derive(Debug, Clone)]
pub struct PropertyDefBuilder {
    name: String,
    sig: TypeSig,
    params: Vec<ParamDefBuilder>,
    getter: Option<MethodDefBuilder>,
    setter: Option<MethodDefBuilder>,
    custom_attributes: Vec<CustomAttribute>,
}

impl PropertyDefBuilder {
    /// Creates a property without accessors
    #[must_use]
    pub fn new(name: impl Into<String>, sig: TypeSig) -> Self {
        PropertyDefBuilder {
            name: name.into(),
            sig,
            params: Vec::new(),
            getter: None,
            setter: None,
            custom_attributes: Vec::new(),
        }
    }

    /// Adds a public instance getter
    #[must_use]
    pub fn get(self) -> Self {
        self.getter(MethodDefBuilder::new(String::new()))
    }

    /// Adds a public instance setter
    #[must_use]
    pub fn set(self) -> Self {
        self.setter(MethodDefBuilder::new(String::new()))
    }

    /// Adds a getter; name, return type and parameters are derived from the property
    #[must_use]
    pub fn getter(mut self, method: MethodDefBuilder) -> Self {
        self.getter = Some(method);
        self
    }

    /// Adds a setter; name, return type and parameters are derived from the property
    #[must_use]
    pub fn setter(mut self, method: MethodDefBuilder) -> Self {
        self.setter = Some(method);
        self
    }

    /// Appends an index parameter, turning the property into an indexer
    #[must_use]
    pub fn index_param(mut self, param: ParamDefBuilder) -> Self {
        self.params.push(param);
        self
    }

    /// Applies a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.custom_attributes.push(attribute.build());
        self
    }

    fn build(self, methods: &mut Vec<MethodDef>) -> Result<PropertyDef> {
        if self.name.is_empty() {
            return Err(malformed_error!("Property of type {} has no name", self.sig));
        }

        let getter = match self.getter {
            Some(getter) => {
                let method = getter
                    .accessor(
                        format!("get_{}", self.name),
                        MethodSemantics::GETTER,
                        self.sig.clone(),
                        self.params.clone(),
                    )
                    .build()?;
                methods.push(method);
                Some(methods.len() - 1)
            }
            None => None,
        };

        let setter = match self.setter {
            Some(setter) => {
                let mut params = self.params.clone();
                params.push(ParamDefBuilder::new("value", self.sig.clone()));

                let method = setter
                    .accessor(
                        format!("set_{}", self.name),
                        MethodSemantics::SETTER,
                        PrimitiveKind::Void.into(),
                        params,
                    )
                    .build()?;
                methods.push(method);
                Some(methods.len() - 1)
            }
            None => None,
        };

        Ok(PropertyDef {
            name: self.name,
            sig: self.sig,
            params: self
                .params
                .into_iter()
                .map(ParamDefBuilder::build)
                .collect::<Result<Vec<_>>>()?,
            getter,
            setter,
            custom_attributes: self.custom_attributes,
        })
    }
}

/// Builder for [`EventDef`]s and their accessor methods
#[derive(Debug, Clone)]
pub struct EventDefBuilder {
    name: String,
    sig: TypeSig,
    adder: Option<MethodDefBuilder>,
    remover: Option<MethodDefBuilder>,
    raiser: Option<MethodDefBuilder>,
    custom_attributes: Vec<CustomAttribute>,
}

impl EventDefBuilder {
    /// Creates an event without accessors
    #[must_use]
    pub fn new(name: impl Into<String>, sig: TypeSig) -> Self {
        EventDefBuilder {
            name: name.into(),
            sig,
            adder: None,
            remover: None,
            raiser: None,
            custom_attributes: Vec::new(),
        }
    }

    /// Adds public instance `add_` and `remove_` accessors
    #[must_use]
    pub fn accessors(self) -> Self {
        self.adder(MethodDefBuilder::new(String::new()))
            .remover(MethodDefBuilder::new(String::new()))
    }

    /// Adds the `add_` accessor; name and parameter are derived from the event
    #[must_use]
    pub fn adder(mut self, method: MethodDefBuilder) -> Self {
        self.adder = Some(method);
        self
    }

    /// Adds the `remove_` accessor; name and parameter are derived from the event
    #[must_use]
    pub fn remover(mut self, method: MethodDefBuilder) -> Self {
        self.remover = Some(method);
        self
    }

    /// Adds the `raise_` accessor
    #[must_use]
    pub fn raiser(mut self, method: MethodDefBuilder) -> Self {
        self.raiser = Some(method);
        self
    }

    /// Applies a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.custom_attributes.push(attribute.build());
        self
    }

    fn build(self, methods: &mut Vec<MethodDef>) -> Result<EventDef> {
        if self.name.is_empty() {
            return Err(malformed_error!("Event of type {} has no name", self.sig));
        }

        let mut link = |method: Option<MethodDefBuilder>,
                        prefix: &str,
                        semantics: MethodSemantics|
         -> Result<Option<usize>> {
            let Some(method) = method else {
                return Ok(None);
            };
            let method = method
                .accessor(
                    format!("{prefix}_{}", self.name),
                    semantics,
                    PrimitiveKind::Void.into(),
                    vec![ParamDefBuilder::new("value", self.sig.clone())],
                )
                .build()?;
            methods.push(method);
            Ok(Some(methods.len() - 1))
        };

        let adder = link(self.adder, "add", MethodSemantics::ADD_ON)?;
        let remover = link(self.remover, "remove", MethodSemantics::REMOVE_ON)?;
        let raiser = link(self.raiser, "raise", MethodSemantics::FIRE)?;

        Ok(EventDef {
            name: self.name,
            sig: self.sig,
            adder,
            remover,
            raiser,
            custom_attributes: self.custom_attributes,
        })
    }
}

/// Builder for [`TypeDef`]s
///
/// Use one of the kind constructors ([`TypeDefBuilder::class`], [`TypeDefBuilder::interface`],
/// [`TypeDefBuilder::structure`], [`TypeDefBuilder::enumeration`], [`TypeDefBuilder::delegate`])
/// to get the flags and base type a compiler would emit for that kind. All of them start out
/// `public`.
#[derive(Debug, Clone)]
pub struct TypeDefBuilder {
    namespace: String,
    name: String,
    declaring: Option<TypeName>,
    visibility: TypeVisibility,
    attributes: TypeAttributes,
    base: Option<TypeSig>,
    interfaces: Vec<TypeSig>,
    generic_params: Vec<GenericParamBuilder>,
    fields: Vec<FieldDefBuilder>,
    methods: Vec<MethodDefBuilder>,
    properties: Vec<PropertyDefBuilder>,
    events: Vec<EventDefBuilder>,
    custom_attributes: Vec<CustomAttribute>,
    assembly: String,
}

impl TypeDefBuilder {
    fn new(namespace: impl Into<String>, name: impl Into<String>, base: Option<TypeSig>) -> Self {
        TypeDefBuilder {
            namespace: namespace.into(),
            name: name.into(),
            declaring: None,
            visibility: TypeVisibility::PUBLIC,
            attributes: TypeAttributes::BEFORE_FIELD_INIT,
            base,
            interfaces: Vec::new(),
            generic_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
            custom_attributes: Vec::new(),
            assembly: String::new(),
        }
    }

    /// Creates a class deriving from `System.Object`
    ///
    /// # Arguments
    ///
    /// * `namespace` - The namespace, empty for nested types
    /// * `name` - The simple name including the arity suffix (`` Container`1 ``)
    #[must_use]
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, Some(PrimitiveKind::Object.into()))
    }

    /// Creates an interface
    #[must_use]
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, None)
            .modifiers(TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT)
    }

    /// Creates a value type deriving from `System.ValueType`
    #[must_use]
    pub fn structure(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, Some(TypeSig::named("System", "ValueType")))
            .modifiers(TypeAttributes::SEALED)
    }

    /// Creates an enum with the given underlying type and its `value__` field
    #[must_use]
    pub fn enumeration(
        namespace: impl Into<String>,
        name: impl Into<String>,
        underlying: PrimitiveKind,
    ) -> Self {
        Self::new(namespace, name, Some(TypeSig::named("System", "Enum")))
            .modifiers(TypeAttributes::SEALED)
            .field(
                FieldDefBuilder::new("value__", underlying.into())
                    .modifiers(FieldModifiers::SPECIAL_NAME | FieldModifiers::RT_SPECIAL_NAME),
            )
    }

    /// Creates a delegate with the runtime-provided `.ctor` and `Invoke` methods
    #[must_use]
    pub fn delegate(
        namespace: impl Into<String>,
        name: impl Into<String>,
        return_type: TypeSig,
        params: Vec<ParamDefBuilder>,
    ) -> Self {
        let invoke = params.into_iter().fold(
            MethodDefBuilder::new("Invoke")
                .returns(return_type)
                .modifiers(MethodModifiers::VIRTUAL)
                .vtable(MethodVtableFlags::NEW_SLOT),
            MethodDefBuilder::param,
        );

        Self::new(namespace, name, Some(TypeSig::named("System", "MulticastDelegate")))
            .modifiers(TypeAttributes::SEALED)
            .method(
                MethodDefBuilder::constructor()
                    .param(ParamDefBuilder::new("object", PrimitiveKind::Object.into()))
                    .param(ParamDefBuilder::new("method", PrimitiveKind::I.into())),
            )
            .method(invoke)
    }

    /// Nests the type inside `declaring`
    #[must_use]
    pub fn nested_in(mut self, declaring: TypeName) -> Self {
        self.declaring = Some(declaring);
        self
    }

    /// Sets the visibility; `PUBLIC` and `NOT_PUBLIC` are mapped to their nested forms for
    /// nested types
    #[must_use]
    pub fn visibility(mut self, visibility: TypeVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Makes the type `internal`
    #[must_use]
    pub fn internal(self) -> Self {
        self.visibility(TypeVisibility::NOT_PUBLIC)
    }

    /// Adds semantic attributes (`sealed`, `abstract`, `interface`, ...)
    #[must_use]
    pub fn modifiers(mut self, attributes: TypeAttributes) -> Self {
        self.attributes |= attributes;
        self
    }

    /// Replaces the base type
    #[must_use]
    pub fn extends(mut self, base: TypeSig) -> Self {
        self.base = Some(base);
        self
    }

    /// Appends an implemented interface
    #[must_use]
    pub fn implements(mut self, interface: TypeSig) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Appends a generic parameter
    #[must_use]
    pub fn generic_param(mut self, param: GenericParamBuilder) -> Self {
        self.generic_params.push(param);
        self
    }

    /// Appends a field
    #[must_use]
    pub fn field(mut self, field: FieldDefBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a method
    #[must_use]
    pub fn method(mut self, method: MethodDefBuilder) -> Self {
        self.methods.push(method);
        self
    }

    /// Appends a property; its accessors are appended to the methods on build
    #[must_use]
    pub fn property(mut self, property: PropertyDefBuilder) -> Self {
        self.properties.push(property);
        self
    }

    /// Appends an event; its accessors are appended to the methods on build
    #[must_use]
    pub fn event(mut self, event: EventDefBuilder) -> Self {
        self.events.push(event);
        self
    }

    /// Applies a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttributeBuilder) -> Self {
        self.custom_attributes.push(attribute.build());
        self
    }

    /// Sets the defining assembly, which also becomes the resolution scope of the type name
    #[must_use]
    pub fn assembly(mut self, assembly: impl Into<String>) -> Self {
        self.assembly = assembly.into();
        self
    }

    /// Produces the type definition
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the type or one of its members has no name, or if
    /// a top-level type was given a nested visibility
    pub fn build(self) -> Result<TypeDef> {
        if self.name.is_empty() {
            return Err(malformed_error!("Type in namespace '{}' has no name", self.namespace));
        }

        let visibility = match (&self.declaring, self.visibility) {
            (Some(_), TypeVisibility::PUBLIC) => TypeVisibility::NESTED_PUBLIC,
            (Some(_), TypeVisibility::NOT_PUBLIC) => TypeVisibility::NESTED_ASSEMBLY,
            (Some(_), visibility) => visibility,
            (None, visibility)
                if visibility == TypeVisibility::PUBLIC
                    || visibility == TypeVisibility::NOT_PUBLIC =>
            {
                visibility
            }
            (None, visibility) => {
                return Err(malformed_error!(
                    "Top-level type {} cannot have nested visibility {:?}",
                    self.name,
                    visibility
                ))
            }
        };

        let mut name = match self.declaring {
            Some(declaring) => TypeName::nested(declaring, self.name),
            None => TypeName::new(self.namespace, self.name),
        };
        if !self.assembly.is_empty() {
            name = name.with_scope(self.assembly.clone());
        }

        let mut methods = self
            .methods
            .into_iter()
            .map(MethodDefBuilder::build)
            .collect::<Result<Vec<_>>>()?;
        let properties = self
            .properties
            .into_iter()
            .map(|property| property.build(&mut methods))
            .collect::<Result<Vec<_>>>()?;
        let events = self
            .events
            .into_iter()
            .map(|event| event.build(&mut methods))
            .collect::<Result<Vec<_>>>()?;

        Ok(TypeDef {
            name,
            flags: (self.attributes.bits() & !TYPE_VISIBILITY_MASK) | visibility.bits(),
            base: self.base,
            interfaces: self.interfaces,
            generic_params: self
                .generic_params
                .into_iter()
                .enumerate()
                .map(|(index, param)| param.build(index, GenericOwner::Type))
                .collect::<Result<Vec<_>>>()?,
            fields: self
                .fields
                .into_iter()
                .map(FieldDefBuilder::build)
                .collect::<Result<Vec<_>>>()?,
            methods,
            properties,
            events,
            custom_attributes: self.custom_attributes,
            assembly: self.assembly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_accessors_linked() {
        let def = TypeDefBuilder::class("Game", "Grid")
            .property(
                PropertyDefBuilder::new("Item", PrimitiveKind::I4.into())
                    .index_param(ParamDefBuilder::new("x", PrimitiveKind::I4.into()))
                    .get()
                    .setter(MethodDefBuilder::new("").access(MethodAccessFlags::PRIVATE)),
            )
            .build()
            .unwrap();

        let property = &def.properties[0];
        let getter = def.method(property.getter).unwrap();
        let setter = def.method(property.setter).unwrap();

        assert_eq!(getter.name, "get_Item");
        assert_eq!(getter.params.len(), 1);
        assert!(getter.semantics.is_property_accessor());
        assert_eq!(setter.name, "set_Item");
        assert_eq!(setter.params.len(), 2);
        assert_eq!(setter.params[1].name, "value");
        assert_eq!(setter.access(), MethodAccessFlags::PRIVATE);
        assert!(setter.modifiers().contains(MethodModifiers::SPECIAL_NAME));
    }

    #[test]
    fn test_event_accessors_linked() {
        let def = TypeDefBuilder::class("Game", "Door")
            .event(EventDefBuilder::new("Opened", TypeSig::named("System", "EventHandler")).accessors())
            .build()
            .unwrap();

        let event = &def.events[0];
        assert_eq!(def.method(event.adder).unwrap().name, "add_Opened");
        assert_eq!(def.method(event.remover).unwrap().name, "remove_Opened");
        assert!(event.raiser.is_none());
        assert!(def.methods.iter().all(|m| m.semantics.is_event_accessor()));
    }

    #[test]
    fn test_nested_visibility() {
        let def = TypeDefBuilder::class("", "Inner")
            .nested_in(TypeName::new("Game", "Outer"))
            .build()
            .unwrap();
        assert_eq!(def.visibility(), TypeVisibility::NESTED_PUBLIC);
        assert_eq!(def.full_name(), "Game.Outer/Inner");

        let hidden = TypeDefBuilder::class("", "Inner")
            .nested_in(TypeName::new("Game", "Outer"))
            .internal()
            .build()
            .unwrap();
        assert_eq!(hidden.visibility(), TypeVisibility::NESTED_ASSEMBLY);

        let invalid = TypeDefBuilder::class("Game", "Loose")
            .visibility(TypeVisibility::NESTED_PRIVATE)
            .build();
        assert!(matches!(invalid, Err(crate::Error::Malformed { .. })));
    }

    #[test]
    fn test_generic_params_indexed() {
        let def = TypeDefBuilder::class("Game", "Pair`2")
            .generic_param(GenericParamBuilder::new("TKey"))
            .generic_param(GenericParamBuilder::new("TValue"))
            .method(
                MethodDefBuilder::new("Map")
                    .generic_param(GenericParamBuilder::new("TResult")),
            )
            .build()
            .unwrap();

        assert_eq!(def.generic_params[1].index, 1);
        assert_eq!(def.generic_params[1].owner, GenericOwner::Type);
        assert_eq!(def.methods[0].generic_params[0].owner, GenericOwner::Method);
        assert_eq!(def.self_sig().raw_name(), "Game.Pair`2<TKey,TValue>");
    }

    #[test]
    fn test_kinds() {
        let color = TypeDefBuilder::enumeration("Game", "Color", PrimitiveKind::U1)
            .build()
            .unwrap();
        assert!(color.extends("System.Enum"));
        assert_eq!(color.fields[0].name, "value__");

        let handler = TypeDefBuilder::delegate(
            "Game",
            "Handler",
            PrimitiveKind::Void.into(),
            vec![ParamDefBuilder::new("sender", PrimitiveKind::Object.into())],
        )
        .build()
        .unwrap();
        assert!(handler.extends("System.MulticastDelegate"));
        assert_eq!(handler.methods[1].name, "Invoke");

        let shape = TypeDefBuilder::interface("Game", "IShape").build().unwrap();
        assert!(shape.is_interface());
        assert!(shape.base.is_none());

        assert!(TypeDefBuilder::class("Game", "").build().is_err());
    }
}
