//! Parsing of compiler-generated documentation XML files.
//!
//! The file layout is the one every .NET compiler writes for `///` comments:
//!
//! ```xml
//! <doc>
//!     <assembly><name>Game</name></assembly>
//!     <members>
//!         <member name="T:Game.Player">
//!             <summary>A player character.</summary>
//!         </member>
//!     </members>
//! </doc>
//! ```
//!
//! Entries are indexed by the `name` attribute, which holds the documentation identifier.

use std::{collections::HashMap, path::Path};

use quick_xml::{events::Event, Reader};

use crate::{Error, Result};

/// The prose documenting one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationEntry {
    /// The documentation identifier (`M:Game.Player.Heal(System.Int32)`)
    pub id: String,
    /// Everything between `<member>` and `</member>`, unmodified
    pub xml: String,
    /// Text of the `<summary>` element with whitespace collapsed, empty if there is none
    pub summary: String,
}

/// All entries of one documentation file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentationIndex {
    assembly: String,
    entries: HashMap<String, DocumentationEntry>,
}

impl DocumentationIndex {
    /// Parses the contents of a documentation file.
    ///
    /// A later entry with an identifier seen before replaces the earlier one.
    ///
    /// # Errors
    /// Returns [`Error::Documentation`] if the XML is malformed
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut index = DocumentationIndex::default();
        let mut in_assembly = false;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(element) => match element.name().as_ref() {
                    b"assembly" => in_assembly = true,
                    b"name" if in_assembly => {
                        index.assembly = reader
                            .read_text(element.name())
                            .map_err(xml_error)?
                            .trim()
                            .to_string();
                    }
                    b"member" => {
                        let id = member_id(&element)?;
                        let inner = reader.read_text(element.name()).map_err(xml_error)?;
                        let entry = DocumentationEntry {
                            summary: summary_of(&inner)?,
                            xml: inner.trim().to_string(),
                            id: id.clone(),
                        };
                        index.entries.insert(id, entry);
                    }
                    _ => {}
                },
                Event::Empty(element) if element.name().as_ref() == b"member" => {
                    let id = member_id(&element)?;
                    index.entries.insert(
                        id.clone(),
                        DocumentationEntry {
                            id,
                            xml: String::new(),
                            summary: String::new(),
                        },
                    );
                }
                Event::End(element) if element.name().as_ref() == b"assembly" => {
                    in_assembly = false;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        log::debug!(
            "Parsed {} documentation entries for assembly '{}'",
            index.entries.len(),
            index.assembly
        );
        Ok(index)
    }

    /// Reads and parses a documentation file
    ///
    /// # Errors
    /// Returns [`Error::Documentation`] if the file cannot be read or is malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)
            .map_err(|error| Error::Documentation(format!("{}: {error}", path.display())))?;
        Self::parse(&xml)
    }

    /// Name of the documented assembly, empty if the file does not state it
    #[must_use]
    pub fn assembly(&self) -> &str {
        &self.assembly
    }

    /// The entry for a documentation identifier, matched exactly
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DocumentationEntry> {
        self.entries.get(id)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the file documents nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in no particular order
    pub fn entries(&self) -> impl Iterator<Item = &DocumentationEntry> {
        self.entries.values()
    }
}

fn xml_error(error: quick_xml::Error) -> Error {
    Error::Documentation(error.to_string())
}

fn member_id(element: &quick_xml::events::BytesStart<'_>) -> Result<String> {
    let attribute = element
        .try_get_attribute("name")
        .map_err(|error| Error::Documentation(error.to_string()))?
        .ok_or_else(|| Error::Documentation("<member> without a name attribute".to_string()))?;
    Ok(attribute.unescape_value().map_err(xml_error)?.into_owned())
}

/// Collapsed text of the first `<summary>` element in a member body
fn summary_of(inner: &str) -> Result<String> {
    let mut reader = Reader::from_str(inner);
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(element) if element.name().as_ref() == b"summary" => {
                let text = reader.read_text(element.name()).map_err(xml_error)?;
                return Ok(text.split_whitespace().collect::<Vec<_>>().join(" "));
            }
            Event::Eof => return Ok(String::new()),
            _ => {}
        }
    }
}
