//! Attribute words for types, members, parameters and generic parameters.
//!
//! The values follow ECMA-335 §II.23.1. Several of these words mix a small enumeration (the
//! visibility or access level, stored in the low bits) with independent flag bits. As in the
//! rest of the crate, the enumeration part is extracted through a mask into its own flags type
//! and compared with `==`, while the remaining bits are tested with `contains`.
//!
//! # Key Types
//! - [`TypeVisibility`], [`TypeAttributes`]: `TypeDef` flags
//! - [`MethodAccessFlags`], [`MethodVtableFlags`], [`MethodModifiers`]: `MethodDef` flags
//! - [`FieldAccessFlags`], [`FieldModifiers`]: `Field` flags
//! - [`ParamAttributes`]: `Param` flags
//! - [`GenericParamAttributes`]: `GenericParam` flags
//! - [`MethodSemantics`]: accessor role of a method (getter, setter, adder, ...)

use bitflags::bitflags;

/// Bitmask for `VISIBILITY` extraction from type flags
pub const TYPE_VISIBILITY_MASK: u32 = 0x0007;
/// Bitmask for `ACCESS` state extraction from method flags
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for `VTABLE_LAYOUT` information extraction
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;
/// Bitmask for `ACCESS` state extraction from field flags
pub const FIELD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for the variance part of generic parameter flags
pub const GENERIC_VARIANCE_MASK: u32 = 0x0003;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Type visibility (the masked low bits of `TypeAttributes`)
    pub struct TypeVisibility: u32 {
        /// Class has no public scope
        const NOT_PUBLIC = 0x0000;
        /// Class has public scope
        const PUBLIC = 0x0001;
        /// Class is nested with public visibility
        const NESTED_PUBLIC = 0x0002;
        /// Class is nested with private visibility
        const NESTED_PRIVATE = 0x0003;
        /// Class is nested with family visibility
        const NESTED_FAMILY = 0x0004;
        /// Class is nested with assembly visibility
        const NESTED_ASSEMBLY = 0x0005;
        /// Class is nested with family and assembly visibility
        const NESTED_FAM_AND_ASSEM = 0x0006;
        /// Class is nested with family or assembly visibility
        const NESTED_FAM_OR_ASSEM = 0x0007;
    }
}

impl TypeVisibility {
    /// Extract visibility from raw type flags
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & TYPE_VISIBILITY_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Type semantics and modifiers (everything but the visibility bits)
    pub struct TypeAttributes: u32 {
        /// Type is an interface
        const INTERFACE = 0x0020;
        /// Class is abstract
        const ABSTRACT = 0x0080;
        /// Class cannot be extended
        const SEALED = 0x0100;
        /// Class name is special
        const SPECIAL_NAME = 0x0400;
        /// Runtime should check name encoding
        const RT_SPECIAL_NAME = 0x0800;
        /// Class/Interface is imported
        const IMPORT = 0x1000;
        /// Class is serializable
        const SERIALIZABLE = 0x2000;
        /// Initialize the class before first static field access
        const BEFORE_FIELD_INIT = 0x0010_0000;
    }
}

impl TypeAttributes {
    /// Extract the non-visibility attributes from raw type flags
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !TYPE_VISIBILITY_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Method vtable layout flags
    pub struct MethodVtableFlags: u32 {
        /// Method reuses existing slot in vtable
        const REUSE_SLOT = 0x0000;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
    }
}

impl MethodVtableFlags {
    /// Extract vtable layout flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overriden if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, dpending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Field access flags
    pub struct FieldAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEMBLY = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl FieldAccessFlags {
    /// Extract access flags from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & FIELD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Field modifiers
    pub struct FieldModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is compile time constant
        const LITERAL = 0x0040;
        /// Reserved (to indicate this field should not be serialized when type is remoted)
        const NOT_SERIALIZED = 0x0080;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
        /// CLI provides 'special' behavior, depending upon the name of the field
        const RT_SPECIAL_NAME = 0x0400;
        /// Field has marshalling information
        const HAS_FIELD_MARSHAL = 0x1000;
        /// Field has default
        const HAS_DEFAULT = 0x8000;
        /// Field has RVA
        const HAS_FIELD_RVA = 0x0100;
    }
}

impl FieldModifiers {
    /// Extract field modifiers from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !FIELD_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Parameter attributes
    pub struct ParamAttributes: u32 {
        /// Param is `[In]`
        const IN = 0x0001;
        /// Param is `[out]`
        const OUT = 0x0002;
        /// Param is optional
        const OPTIONAL = 0x0010;
        /// Param has default value
        const HAS_DEFAULT = 0x1000;
        /// Param has `FieldMarshal`
        const HAS_FIELD_MARSHAL = 0x2000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Generic parameter variance and special constraints
    pub struct GenericParamAttributes: u32 {
        /// The generic parameter is covariant (`out T`)
        const COVARIANT = 0x0001;
        /// The generic parameter is contravariant (`in T`)
        const CONTRAVARIANT = 0x0002;
        /// The generic parameter has the class special constraint
        const REFERENCE_TYPE_CONSTRAINT = 0x0004;
        /// The generic parameter has the valuetype special constraint
        const NOT_NULLABLE_VALUE_TYPE_CONSTRAINT = 0x0008;
        /// The generic parameter has the .ctor special constraint
        const DEFAULT_CONSTRUCTOR_CONSTRAINT = 0x0010;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Role of a method inside a property or event (ECMA-335 §II.23.1.12)
    pub struct MethodSemantics: u32 {
        /// Setter for property
        const SETTER = 0x0001;
        /// Getter for property
        const GETTER = 0x0002;
        /// Other method for property or event
        const OTHER = 0x0004;
        /// `AddOn` method for event
        const ADD_ON = 0x0008;
        /// `RemoveOn` method for event
        const REMOVE_ON = 0x0010;
        /// Fire method for event
        const FIRE = 0x0020;
    }
}

impl MethodSemantics {
    /// Returns true if the method is a property accessor
    #[must_use]
    pub fn is_property_accessor(self) -> bool {
        self.intersects(Self::GETTER | Self::SETTER)
    }

    /// Returns true if the method is an event accessor
    #[must_use]
    pub fn is_event_accessor(self) -> bool {
        self.intersects(Self::ADD_ON | Self::REMOVE_ON | Self::FIRE)
    }
}
