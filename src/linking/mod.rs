//! Linking inspected records with externally authored documentation.
//!
//! Compilers write `///` comments to a separate XML file keyed by documentation identifiers.
//! [`DocumentationIndex`] reads such a file and [`Linker`] pairs every record of an inspected
//! type with its entry by exact identifier match. Rendering the prose is left to the caller.

pub mod documentation;
pub mod linker;

pub use documentation::{DocumentationEntry, DocumentationIndex};
pub use linker::{LinkTarget, LinkedMember, Linker};
