//! Declaration reconstruction for .NET types.
//!
//! The inspector turns raw [`crate::metadata`] definitions into display-ready records: every
//! visible member of a type, inherited ones included, with generic parameters bound the way
//! the inspected type sees them, a source-level declaration and a documentation identifier.
//!
//! # Architecture
//!
//! - [`names`] - the name algebra (arity notation, keyword aliases, namespace stripping)
//! - [`quicktype`] - compact views of type references
//! - [`generics`] - generic parameter records, constraints and substitution maps
//! - [`attribute`], [`parameter`], [`field`], [`property`], [`event`], [`method`] - the member
//!   inspectors, one per kind
//! - [`member`] - the tagged record every collection holds
//! - [`walker`] - the inheritance walk with visibility filtering and override suppression
//! - [`docid`] - documentation-comment identifiers
//! - [`type_record`] - the complete result for one type
//!
//! # Examples
//!
//! ```rust
//! use docscope::{
//!     metadata::{
//!         builder::{MethodDefBuilder, ParamDefBuilder, TypeDefBuilder},
//!         signature::PrimitiveKind,
//!     },
//!     Inspector, InspectionOptions, MetadataStore,
//! };
//!
//! let store = MetadataStore::new();
//! store.insert(
//!     TypeDefBuilder::class("Foo", "Foo")
//!         .method(
//!             MethodDefBuilder::new("Bar")
//!                 .param(ParamDefBuilder::new("count", PrimitiveKind::I4.into()))
//!                 .param(ParamDefBuilder::new("label", PrimitiveKind::String.into())),
//!         )
//!         .build()?,
//! );
//!
//! let inspector = Inspector::new(&store, InspectionOptions::default());
//! let record = inspector.inspect("Foo.Foo")?;
//!
//! let bar = &record.methods[0];
//! assert_eq!(bar.declaration(), "public void Bar(int count, string label)");
//! assert_eq!(bar.doc_id(), "M:Foo.Foo.Bar(System.Int32,System.String)");
//! # Ok::<(), docscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! Inspection only reads the metadata source. Records are plain values owned by the caller,
//! and [`Inspector::inspect_all`] inspects independent types in parallel.

use rayon::prelude::*;

use crate::{
    metadata::{
        definitions::TypeDef,
        source::MetadataSource,
    },
    Error, Result,
};

pub mod accessor;
pub mod attribute;
pub mod docid;
pub mod event;
pub mod field;
pub mod generics;
pub mod member;
pub mod method;
pub mod names;
mod options;
pub mod parameter;
pub mod property;
pub mod quicktype;
pub mod type_record;
pub mod walker;

pub use member::{MemberKind, MemberRecord};
pub use options::InspectionOptions;
pub use type_record::{ObjectKind, TypeRecord};

/// Entry point of the engine: inspects types of a metadata source with fixed options
pub struct Inspector<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    options: InspectionOptions,
}

impl<'a, S: MetadataSource + ?Sized> Inspector<'a, S> {
    /// Creates an inspector over `source`
    #[must_use]
    pub fn new(source: &'a S, options: InspectionOptions) -> Self {
        Inspector { source, options }
    }

    /// The options every inspection uses
    #[must_use]
    pub fn options(&self) -> &InspectionOptions {
        &self.options
    }

    /// Inspects the type with the given metadata full name (`Namespace.Outer/Inner`)
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the source does not know the type, or
    /// [`Error::RecursionLimit`] if its inheritance chain is too deep
    pub fn inspect(&self, full_name: &str) -> Result<TypeRecord> {
        let definition = self
            .source
            .find(full_name)
            .ok_or_else(|| Error::TypeNotFound(full_name.to_string()))?;
        self.inspect_definition(&definition)
    }

    /// Inspects a definition obtained elsewhere; base types are still resolved through the
    /// source
    ///
    /// # Errors
    /// Returns [`Error::RecursionLimit`] if the inheritance chain is too deep
    pub fn inspect_definition(&self, definition: &TypeDef) -> Result<TypeRecord> {
        TypeRecord::new(self.source, definition, &self.options)
    }

    /// Inspects many types in parallel, one result per requested name in request order.
    ///
    /// A failing type never affects its siblings.
    pub fn inspect_all<N>(&self, names: &[N]) -> Vec<Result<TypeRecord>>
    where
        N: AsRef<str> + Sync,
    {
        names
            .par_iter()
            .map(|name| self.inspect(name.as_ref()))
            .collect()
    }

    /// Gathers one member collection of a type without building the whole record
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the source does not know the type, or
    /// [`Error::RecursionLimit`] if its inheritance chain is too deep
    pub fn collect(
        &self,
        full_name: &str,
        kind: MemberKind,
        want_static: bool,
    ) -> Result<Vec<MemberRecord>> {
        let definition = self
            .source
            .find(full_name)
            .ok_or_else(|| Error::TypeNotFound(full_name.to_string()))?;
        walker::collect(self.source, &definition, kind, want_static, &self.options)
    }
}
