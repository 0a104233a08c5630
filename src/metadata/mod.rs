//! The metadata model consumed by the inspection engine.
//!
//! This module describes .NET types the way a metadata reader hands them over: type definitions
//! with their fields, methods, properties, events, generic parameters and custom attributes,
//! each carrying its raw ECMA-335 attribute word and fully decoded signatures.
//!
//! # Key Components
//!
//! - [`flags`] - Typed views of the `TypeAttributes`, `MethodAttributes`, `FieldAttributes`,
//!   `ParamAttributes`, `GenericParamAttributes` and `MethodSemantics` words
//! - [`signature`] - [`TypeSig`](signature::TypeSig) trees for every type reference
//! - [`definitions`] - The joined definition rows ([`TypeDef`](definitions::TypeDef) and friends)
//! - [`builder`] - Fluent construction of definitions
//! - [`source`] - The [`MetadataSource`](source::MetadataSource) oracle and the concurrent
//!   [`MetadataStore`](source::MetadataStore)
//!
//! # Examples
//!
//! ```rust
//! use docscope::metadata::{builder::TypeDefBuilder, source::MetadataStore};
//!
//! let store = MetadataStore::new();
//! store.insert(TypeDefBuilder::class("Game", "Player").build()?);
//! assert_eq!(store.len(), 1);
//! # Ok::<(), docscope::Error>(())
//! ```

/// Fluent builders for type and member definitions
pub mod builder;
/// Raw type and member definitions
pub mod definitions;
/// ECMA-335 attribute flags and their masked extractors
pub mod flags;
/// Structured type references and generic substitution
pub mod signature;
/// Metadata sources and the concurrent definition store
pub mod source;
