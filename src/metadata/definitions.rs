//! Raw member definitions as provided by a metadata source.
//!
//! These structures mirror the rows a .NET metadata reader produces for `TypeDef`, `MethodDef`,
//! `Field`, `Param`, `Property`, `Event`, `GenericParam` and `CustomAttribute`, already joined
//! together and with their signatures decoded into [`TypeSig`] trees. They are plain data:
//! produced once (by a loader or the builders in [`crate::metadata::builder`]) and then shared
//! read-only behind an [`Arc`](std::sync::Arc).
//!
//! Attribute words are kept as the raw `u32` values found in the tables; the typed views are
//! obtained through the masked extractors in [`crate::metadata::flags`].

use std::fmt;

use crate::metadata::{
    flags::{
        FieldAccessFlags, FieldModifiers, GenericParamAttributes, MethodAccessFlags,
        MethodModifiers, MethodSemantics, MethodVtableFlags, ParamAttributes, TypeAttributes,
        TypeVisibility,
    },
    signature::{GenericOwner, PrimitiveKind, TypeName, TypeSig},
};

/// Full name of the attribute marking `params` arrays
pub const PARAM_ARRAY_ATTRIBUTE: &str = "System.ParamArrayAttribute";
/// Full name of the attribute marking extension methods
pub const EXTENSION_ATTRIBUTE: &str = "System.Runtime.CompilerServices.ExtensionAttribute";
/// Full name of the attribute the compiler puts on generated members
pub const COMPILER_GENERATED_ATTRIBUTE: &str =
    "System.Runtime.CompilerServices.CompilerGeneratedAttribute";

/// A literal stored in the `Constant` table (field and parameter defaults)
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    /// A null reference (`ELEMENT_TYPE_CLASS` constant)
    Null,
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// UTF-16 string, stored decoded
    String(String),
}

impl fmt::Display for ConstantValue {
    /// Writes the bare value, without any source-level quoting
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => Ok(()),
            ConstantValue::Bool(value) => write!(f, "{value}"),
            ConstantValue::Char(value) => write!(f, "{value}"),
            ConstantValue::I1(value) => write!(f, "{value}"),
            ConstantValue::U1(value) => write!(f, "{value}"),
            ConstantValue::I2(value) => write!(f, "{value}"),
            ConstantValue::U2(value) => write!(f, "{value}"),
            ConstantValue::I4(value) => write!(f, "{value}"),
            ConstantValue::U4(value) => write!(f, "{value}"),
            ConstantValue::I8(value) => write!(f, "{value}"),
            ConstantValue::U8(value) => write!(f, "{value}"),
            ConstantValue::R4(value) => write!(f, "{value}"),
            ConstantValue::R8(value) => write!(f, "{value}"),
            ConstantValue::String(value) => f.write_str(value),
        }
    }
}

/// A fixed or named argument of a custom attribute blob
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// A null string, type or array
    Null,
    /// Boolean value
    Bool(bool),
    /// Character value (16-bit Unicode)
    Char(char),
    /// Signed 8-bit integer
    I1(i8),
    /// Unsigned 8-bit integer
    U1(u8),
    /// Signed 16-bit integer
    I2(i16),
    /// Unsigned 16-bit integer
    U2(u16),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// Unsigned 64-bit integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// UTF-8 string
    String(String),
    /// `System.Type` argument
    Type(TypeSig),
    /// Enum value (enum type + underlying value)
    Enum(TypeSig, Box<CustomAttributeArgument>),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
}

impl CustomAttributeArgument {
    /// The type this argument is serialized as
    #[must_use]
    pub fn type_sig(&self) -> TypeSig {
        match self {
            CustomAttributeArgument::Null => PrimitiveKind::Object.into(),
            CustomAttributeArgument::Bool(_) => PrimitiveKind::Boolean.into(),
            CustomAttributeArgument::Char(_) => PrimitiveKind::Char.into(),
            CustomAttributeArgument::I1(_) => PrimitiveKind::I1.into(),
            CustomAttributeArgument::U1(_) => PrimitiveKind::U1.into(),
            CustomAttributeArgument::I2(_) => PrimitiveKind::I2.into(),
            CustomAttributeArgument::U2(_) => PrimitiveKind::U2.into(),
            CustomAttributeArgument::I4(_) => PrimitiveKind::I4.into(),
            CustomAttributeArgument::U4(_) => PrimitiveKind::U4.into(),
            CustomAttributeArgument::I8(_) => PrimitiveKind::I8.into(),
            CustomAttributeArgument::U8(_) => PrimitiveKind::U8.into(),
            CustomAttributeArgument::R4(_) => PrimitiveKind::R4.into(),
            CustomAttributeArgument::R8(_) => PrimitiveKind::R8.into(),
            CustomAttributeArgument::String(_) => PrimitiveKind::String.into(),
            CustomAttributeArgument::Type(_) => TypeSig::named("System", "Type"),
            CustomAttributeArgument::Enum(ty, _) => ty.clone(),
            CustomAttributeArgument::Array(items) => TypeSig::sz_array(
                items
                    .first()
                    .map_or(PrimitiveKind::Object.into(), CustomAttributeArgument::type_sig),
            ),
        }
    }
}

/// A named field or property argument of a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}

/// A decoded custom attribute applied to a type, member or parameter
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttribute {
    /// The attribute class
    pub attribute_type: TypeSig,
    /// Parameter names of the attribute constructor, positionally matching `fixed_args`
    pub constructor_params: Vec<String>,
    /// Positional constructor arguments
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Field and property assignments
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttribute {
    /// Returns true if the attribute class has the given full name
    #[must_use]
    pub fn is(&self, full_name: &str) -> bool {
        self.attribute_type.is(full_name)
    }
}

/// A parameter of a method, property indexer or delegate
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    /// Parameter name
    pub name: String,
    /// Raw `ParamAttributes` word
    pub flags: u32,
    /// Declared type, by-ref parameters are wrapped in [`TypeSig::ByRef`]
    pub sig: TypeSig,
    /// Default value from the `Constant` table
    pub default: Option<ConstantValue>,
    /// Attributes applied to the parameter
    pub custom_attributes: Vec<CustomAttribute>,
}

impl ParamDef {
    /// Typed view of the parameter flags
    #[must_use]
    pub fn attributes(&self) -> ParamAttributes {
        ParamAttributes::from_bits_truncate(self.flags)
    }

    /// Returns true if this is a `params` array
    #[must_use]
    pub fn is_param_array(&self) -> bool {
        self.custom_attributes
            .iter()
            .any(|attr| attr.is(PARAM_ARRAY_ATTRIBUTE))
    }
}

/// A generic parameter declared on a type or method
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParamDef {
    /// Position in the owner's list
    pub index: u32,
    /// Declared name
    pub name: String,
    /// Raw `GenericParamAttributes` word
    pub flags: u32,
    /// Declaring entity
    pub owner: GenericOwner,
    /// Constraint types from the `GenericParamConstraint` table
    pub constraints: Vec<TypeSig>,
}

impl GenericParamDef {
    /// Typed view of the parameter flags
    #[must_use]
    pub fn attributes(&self) -> GenericParamAttributes {
        GenericParamAttributes::from_bits_truncate(self.flags)
    }

    /// The open reference to this parameter
    #[must_use]
    pub fn as_sig(&self) -> TypeSig {
        TypeSig::GenericParam {
            owner: self.owner,
            index: self.index,
            name: self.name.clone(),
        }
    }
}

/// A method definition
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// Metadata name (`.ctor`, `op_Addition`, `get_Item`, ...)
    pub name: String,
    /// Raw `MethodAttributes` word
    pub flags: u32,
    /// Semantic role when the method backs a property or event
    pub semantics: MethodSemantics,
    /// Return type
    pub return_type: TypeSig,
    /// Parameters in declaration order
    pub params: Vec<ParamDef>,
    /// Generic parameters declared by the method itself
    pub generic_params: Vec<GenericParamDef>,
    /// Attributes applied to the method
    pub custom_attributes: Vec<CustomAttribute>,
}

impl MethodDef {
    /// Member access extracted from the flags
    #[must_use]
    pub fn access(&self) -> MethodAccessFlags {
        MethodAccessFlags::from_method_flags(self.flags)
    }

    /// Vtable layout extracted from the flags
    #[must_use]
    pub fn vtable(&self) -> MethodVtableFlags {
        MethodVtableFlags::from_method_flags(self.flags)
    }

    /// Remaining method modifiers
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// Returns true for `static` methods
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// Returns true for instance and type initializers
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == ".ctor" || self.name == ".cctor"
    }

    /// Returns true for the type initializer
    #[must_use]
    pub fn is_static_constructor(&self) -> bool {
        self.name == ".cctor"
    }

    /// Returns true if the method carries the given attribute
    #[must_use]
    pub fn has_attribute(&self, full_name: &str) -> bool {
        self.custom_attributes.iter().any(|attr| attr.is(full_name))
    }
}

/// A field definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Raw `FieldAttributes` word
    pub flags: u32,
    /// Field type
    pub sig: TypeSig,
    /// Value from the `Constant` table (`const` fields)
    pub constant: Option<ConstantValue>,
    /// Raw bytes from the `FieldRVA` table
    pub initial_value: Vec<u8>,
    /// Attributes applied to the field
    pub custom_attributes: Vec<CustomAttribute>,
}

impl FieldDef {
    /// Field access extracted from the flags
    #[must_use]
    pub fn access(&self) -> FieldAccessFlags {
        FieldAccessFlags::from_field_flags(self.flags)
    }

    /// Remaining field modifiers
    #[must_use]
    pub fn modifiers(&self) -> FieldModifiers {
        FieldModifiers::from_field_flags(self.flags)
    }

    /// Returns true if the field carries the given attribute
    #[must_use]
    pub fn has_attribute(&self, full_name: &str) -> bool {
        self.custom_attributes.iter().any(|attr| attr.is(full_name))
    }
}

/// A property definition; accessors are indices into the owning type's methods
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    /// Property name (`Item` for the default indexer)
    pub name: String,
    /// Property type
    pub sig: TypeSig,
    /// Index parameters, empty for plain properties
    pub params: Vec<ParamDef>,
    /// Index of the getter in [`TypeDef::methods`]
    pub getter: Option<usize>,
    /// Index of the setter in [`TypeDef::methods`]
    pub setter: Option<usize>,
    /// Attributes applied to the property
    pub custom_attributes: Vec<CustomAttribute>,
}

/// An event definition; accessors are indices into the owning type's methods
#[derive(Debug, Clone, PartialEq)]
pub struct EventDef {
    /// Event name
    pub name: String,
    /// Delegate type of the event
    pub sig: TypeSig,
    /// Index of the `add_` method in [`TypeDef::methods`]
    pub adder: Option<usize>,
    /// Index of the `remove_` method in [`TypeDef::methods`]
    pub remover: Option<usize>,
    /// Index of the `raise_` method in [`TypeDef::methods`]
    pub raiser: Option<usize>,
    /// Attributes applied to the event
    pub custom_attributes: Vec<CustomAttribute>,
}

/// A type definition and everything declared on it
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// Name, including the declaring type for nested types
    pub name: TypeName,
    /// Raw `TypeAttributes` word
    pub flags: u32,
    /// Base type, `None` for `System.Object` and interfaces
    pub base: Option<TypeSig>,
    /// Implemented interfaces
    pub interfaces: Vec<TypeSig>,
    /// Generic parameters (nested types repeat those of their declaring types)
    pub generic_params: Vec<GenericParamDef>,
    /// Fields
    pub fields: Vec<FieldDef>,
    /// Methods, including property and event accessors
    pub methods: Vec<MethodDef>,
    /// Properties
    pub properties: Vec<PropertyDef>,
    /// Events
    pub events: Vec<EventDef>,
    /// Attributes applied to the type
    pub custom_attributes: Vec<CustomAttribute>,
    /// Name of the defining assembly
    pub assembly: String,
}

impl TypeDef {
    /// Metadata-style full name (`Namespace.Outer/Inner`)
    #[must_use]
    pub fn full_name(&self) -> String {
        self.name.full_name()
    }

    /// Visibility extracted from the flags
    #[must_use]
    pub fn visibility(&self) -> TypeVisibility {
        TypeVisibility::from_type_flags(self.flags)
    }

    /// Semantic attributes extracted from the flags
    #[must_use]
    pub fn attributes(&self) -> TypeAttributes {
        TypeAttributes::from_type_flags(self.flags)
    }

    /// Returns true for interfaces
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.attributes().contains(TypeAttributes::INTERFACE)
    }

    /// Returns true for nested types
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.name.declaring.is_some()
    }

    /// Returns true if the type can be named from outside its assembly
    #[must_use]
    pub fn is_public(&self) -> bool {
        let visibility = self.visibility();
        visibility == TypeVisibility::PUBLIC || visibility == TypeVisibility::NESTED_PUBLIC
    }

    /// Returns true if the base type is the given full name
    #[must_use]
    pub fn extends(&self, full_name: &str) -> bool {
        self.base.as_ref().is_some_and(|base| base.is(full_name))
    }

    /// Returns true if the type carries the given attribute
    #[must_use]
    pub fn has_attribute(&self, full_name: &str) -> bool {
        self.custom_attributes.iter().any(|attr| attr.is(full_name))
    }

    /// Returns the method at `index`, if it exists
    #[must_use]
    pub fn method(&self, index: Option<usize>) -> Option<&MethodDef> {
        index.and_then(|index| self.methods.get(index))
    }

    /// The reference a member of this type would use to name it (`Container`1<T>`)
    #[must_use]
    pub fn self_sig(&self) -> TypeSig {
        let named = TypeSig::Named(self.name.clone());
        if self.generic_params.is_empty() {
            named
        } else {
            TypeSig::generic_inst(
                named,
                self.generic_params.iter().map(GenericParamDef::as_sig).collect(),
            )
        }
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
