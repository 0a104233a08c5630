// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]

//! # docscope
//!
//! Reconstructs the source-level shape of .NET libraries from their metadata: the full,
//! human-readable declaration of every visible type, method, property, field and event,
//! together with the documentation identifier that joins it to the prose of the compiler's
//! XML documentation file.
//!
//! ## Features
//!
//! - **Inheritance aware** - members of base types are collected level by level, overridden
//!   and shadowed members are suppressed, and private members of base types are dropped
//! - **Generic substitution** - members inherited through `Container<int>` are shown with `int`
//!   in place of `T`, by rewriting a structured type-expression tree
//! - **Faithful declarations** - access modifiers, `static`/`abstract`/`override`, operators,
//!   conversion operators, extension methods, indexers, constraints and default values
//! - **Documentation identifiers** - bit-exact `T:`/`M:`/`F:`/`P:`/`E:` identifiers with
//!   positional back-references for generic parameters
//! - **Concurrent** - metadata sources load assemblies lazily and at most once, and types can
//!   be inspected in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use docscope::prelude::*;
//!
//! let store = MetadataStore::new();
//! store.insert(
//!     TypeDefBuilder::class("Game", "Container`1")
//!         .generic_param(GenericParamBuilder::new("T"))
//!         .method(
//!             MethodDefBuilder::new("Get")
//!                 .returns(TypeSig::type_param(0, "T"))
//!                 .param(ParamDefBuilder::new("index", PrimitiveKind::I4.into())),
//!         )
//!         .build()?,
//! );
//! store.insert(
//!     TypeDefBuilder::class("Game", "IntContainer")
//!         .extends(TypeSig::generic_inst(
//!             TypeSig::named("Game", "Container`1"),
//!             vec![PrimitiveKind::I4.into()],
//!         ))
//!         .build()?,
//! );
//!
//! let inspector = Inspector::new(&store, InspectionOptions::default());
//! let record = inspector.inspect("Game.IntContainer")?;
//!
//! assert_eq!(record.full_declaration, "public class IntContainer : Container<int>");
//! assert_eq!(record.methods[0].declaration(), "public int Get(int index)");
//! assert_eq!(record.methods[0].doc_id(), "M:Game.Container`1.Get(System.Int32)");
//! # Ok::<(), docscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - the read-only metadata source: definitions, type expressions, the
//!   concurrent [`MetadataStore`] and fluent builders
//! - [`inspector`] - the engine: name normalization, generic substitution, member inspection,
//!   the inheritance walk, declarations and documentation identifiers
//! - [`linking`] - joins inspected records with documentation XML files
//! - [`prelude`] - convenient re-exports
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Error Handling
//!
//! Inspection is forgiving. Unresolvable references are treated as public, malformed generic
//! names fall back to their raw form and degenerate members are dropped; all of these are
//! logged through the `log` facade. Only lookups of unknown types, cyclic inheritance chains,
//! failing assembly loaders and unreadable documentation files produce an [`Error`].

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use docscope::prelude::*;
///
/// let store = MetadataStore::new();
/// let inspector = Inspector::new(&store, InspectionOptions::public_api());
/// assert!(matches!(inspector.inspect("Game.Player"), Err(Error::TypeNotFound(_))));
/// ```
pub mod prelude;

pub mod inspector;

pub mod linking;

pub mod metadata;

/// `docscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `docscope` Error type
///
/// See [`error::Error`](Error) for the conditions that stop an operation.
pub use error::Error;

/// Entry point of the inspection engine and its configuration.
pub use inspector::{InspectionOptions, Inspector};

/// The bundled metadata source.
pub use metadata::source::{MetadataSource, MetadataStore};
