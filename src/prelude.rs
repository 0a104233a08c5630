//! # docscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the docscope library. Import this module to get quick access to everything needed to
//! describe a class library and inspect it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all docscope operations
pub use crate::Error;

/// The result type used throughout docscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Inspection engine and its configuration
pub use crate::inspector::{InspectionOptions, Inspector};

/// Metadata sources
pub use crate::metadata::source::{AssemblyLoader, MetadataSource, MetadataStore};

// ================================================================================================
// Metadata Model
// ================================================================================================

/// Type references
pub use crate::metadata::signature::{GenericOwner, PrimitiveKind, TypeName, TypeSig};

/// Definitions
pub use crate::metadata::definitions::{
    ConstantValue, CustomAttribute, CustomAttributeArgument, EventDef, FieldDef, GenericParamDef,
    MethodDef, ParamDef, PropertyDef, TypeDef,
};

/// Attribute flags
pub use crate::metadata::flags::{
    FieldAccessFlags, FieldModifiers, GenericParamAttributes, MethodAccessFlags, MethodModifiers,
    MethodSemantics, MethodVtableFlags, ParamAttributes, TypeAttributes, TypeVisibility,
};

/// Fluent builders
pub use crate::metadata::builder::{
    CustomAttributeBuilder, EventDefBuilder, FieldDefBuilder, GenericParamBuilder,
    MethodDefBuilder, ParamDefBuilder, PropertyDefBuilder, TypeDefBuilder,
};

// ================================================================================================
// Inspection Records
// ================================================================================================

/// The complete result for one type
pub use crate::inspector::{MemberKind, MemberRecord, ObjectKind, TypeRecord};

/// Member records
pub use crate::inspector::{
    accessor::Accessor, attribute::AttributeRecord, event::EventRecord, field::FieldRecord,
    generics::GenericParameterRecord, method::MethodRecord, parameter::ParameterRecord,
    property::PropertyRecord, quicktype::QuickTypeRecord,
};

// ================================================================================================
// Documentation Linking
// ================================================================================================

/// Documentation files and the linker
pub use crate::linking::{DocumentationEntry, DocumentationIndex, LinkedMember, Linker};
