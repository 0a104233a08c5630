//! Joining type records with their documentation entries.

use crate::{
    inspector::{MemberKind, MemberRecord, TypeRecord},
    linking::documentation::{DocumentationEntry, DocumentationIndex},
};

/// What a linked identifier documents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkTarget<'a> {
    /// The inspected type itself
    Type(&'a TypeRecord),
    /// One of its members
    Member(&'a MemberRecord),
}

/// A type or member together with its documentation, if any was written
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedMember<'a> {
    /// Collection the member came from; `None` for the type itself
    pub kind: Option<MemberKind>,
    /// Whether the member came from a static collection
    pub is_static: bool,
    /// The documentation identifier used for the lookup
    pub doc_id: String,
    /// The linked record
    pub target: LinkTarget<'a>,
    /// The matching entry
    pub documentation: Option<&'a DocumentationEntry>,
}

impl LinkedMember<'_> {
    /// Declaration of the linked record
    #[must_use]
    pub fn declaration(&self) -> &str {
        match self.target {
            LinkTarget::Type(record) => &record.full_declaration,
            LinkTarget::Member(member) => member.declaration(),
        }
    }
}

/// Links one inspected type against a documentation index.
///
/// Identifiers are matched exactly. Members inherited from a base type carry the identifier
/// of their declaring type, so they find the prose written for the base.
///
/// # Examples
///
/// ```rust
/// use docscope::{
///     linking::{DocumentationIndex, Linker},
///     metadata::builder::TypeDefBuilder,
///     Inspector, InspectionOptions, MetadataStore,
/// };
///
/// let store = MetadataStore::new();
/// store.insert(TypeDefBuilder::class("Game", "Player").build()?);
/// let record = Inspector::new(&store, InspectionOptions::default()).inspect("Game.Player")?;
///
/// let index = DocumentationIndex::parse(
///     r#"<doc><members><member name="T:Game.Player"><summary>Hero</summary></member></members></doc>"#,
/// )?;
/// let linked: Vec<_> = Linker::new(&record, &index).iter().collect();
///
/// assert_eq!(linked[0].documentation.unwrap().summary, "Hero");
/// # Ok::<(), docscope::Error>(())
/// ```
pub struct Linker<'a> {
    record: &'a TypeRecord,
    index: &'a DocumentationIndex,
}

impl<'a> Linker<'a> {
    /// Creates a linker for `record`
    #[must_use]
    pub fn new(record: &'a TypeRecord, index: &'a DocumentationIndex) -> Self {
        Linker { record, index }
    }

    /// The type followed by every member, in documentation order: constructors, fields,
    /// properties, events, methods (instance before static within each kind), then operators.
    ///
    /// A type hidden by the inspection options yields nothing.
    pub fn iter(&self) -> impl Iterator<Item = LinkedMember<'a>> + '_ {
        let record = self.record;
        let index = self.index;

        let type_entry = (!record.should_ignore).then(|| {
            let doc_id = record.doc_id();
            LinkedMember {
                kind: None,
                is_static: false,
                documentation: index.get(&doc_id),
                doc_id,
                target: LinkTarget::Type(record),
            }
        });

        let members = record
            .collections()
            .into_iter()
            .filter(move |_| !record.should_ignore)
            .flat_map(move |(kind, is_static, members)| {
                members.iter().map(move |member| {
                    let doc_id = member.doc_id();
                    LinkedMember {
                        kind: Some(kind),
                        is_static,
                        documentation: index.get(&doc_id),
                        doc_id,
                        target: LinkTarget::Member(member),
                    }
                })
            });

        type_entry.into_iter().chain(members)
    }

    /// The linked records that have no documentation entry
    pub fn undocumented(&self) -> impl Iterator<Item = LinkedMember<'a>> + '_ {
        self.iter().filter(|linked| linked.documentation.is_none())
    }
}
