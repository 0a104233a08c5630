//! The inheritance walker.
//!
//! Members are gathered level by level, starting at the inspected type (level 0) and climbing
//! through its base types until the chain ends or a base cannot be resolved. Every level is
//! inspected through the [`SubstitutionMap`] of the base reference that reached it, so a
//! member declared on `Container<T>` shows up on `IntContainer : Container<int>` with `int`
//! in its signature.
//!
//! Per level the walker drops members that:
//! - are hidden by the inspection options or structurally incomplete
//! - never appear as members (generated fields, accessors, type initializers)
//! - do not match the requested static-ness
//! - are `private` and declared on a base type (level > 0)
//! - share an identity key with a member kept from a more derived level
//!
//! The result is ordered most-derived first.

use std::{collections::HashSet, sync::Arc};

use crate::{
    inspector::{
        accessor::Accessor,
        event::EventRecord,
        field::FieldRecord,
        generics::SubstitutionMap,
        member::{MemberKind, MemberRecord},
        method::MethodRecord,
        property::PropertyRecord,
        quicktype::QuickTypeRecord,
        InspectionOptions,
    },
    metadata::{definitions::TypeDef, signature::TypeSig, source::MetadataSource},
    Error, Result,
};

/// Base types every chain ends in; failing to resolve them is expected
const ROOT_TYPES: [&str; 3] = ["System.Object", "System.ValueType", "System.Enum"];

/// One resolved ancestor and the substitution map binding its generic parameters
#[derive(Debug, Clone)]
pub struct AncestorLevel {
    /// The ancestor's definition
    pub definition: Arc<TypeDef>,
    /// Binding of the ancestor's generic parameters to the arguments seen from level 0
    pub map: SubstitutionMap,
}

/// Walks the inheritance chain of one type.
///
/// The chain is resolved once on construction, so gathering all member collections of a type
/// resolves each base only once.
pub struct InheritanceWalker<'a> {
    root: &'a TypeDef,
    ancestors: Vec<AncestorLevel>,
    options: &'a InspectionOptions,
}

impl<'a> InheritanceWalker<'a> {
    /// Resolves the base-type chain of `root` through `source`.
    ///
    /// # Errors
    /// Returns [`Error::RecursionLimit`] if the chain is longer than
    /// [`InspectionOptions::max_inheritance_depth`]
    pub fn new<S>(source: &S, root: &'a TypeDef, options: &'a InspectionOptions) -> Result<Self>
    where
        S: MetadataSource + ?Sized,
    {
        let ancestors = if options.include_inherited {
            resolve_ancestors(source, root, options.max_inheritance_depth)?
        } else {
            Vec::new()
        };

        Ok(InheritanceWalker {
            root,
            ancestors,
            options,
        })
    }

    /// The resolved ancestors, nearest first
    #[must_use]
    pub fn ancestors(&self) -> &[AncestorLevel] {
        &self.ancestors
    }

    /// Gathers the members of `kind` whose static-ness matches `want_static`
    #[must_use]
    pub fn collect(&self, kind: MemberKind, want_static: bool) -> Vec<MemberRecord> {
        let root_map = SubstitutionMap::default();
        let mut levels = vec![(self.root, &root_map)];
        if kind.is_inherited() {
            levels.extend(
                self.ancestors
                    .iter()
                    .map(|level| (level.definition.as_ref(), &level.map)),
            );
        }

        let mut result: Vec<MemberRecord> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (depth, (definition, map)) in levels.into_iter().enumerate() {
            let mut level_keys = Vec::new();
            let candidates = inspect_level(definition, map, kind, self.options.ignore_private);
            log::debug!(
                "Inspecting {} {kind} candidates of {} at level {depth}",
                candidates.len(),
                definition.full_name()
            );

            for member in candidates {
                if member.should_ignore()
                    || member.is_unkeepable()
                    || member.is_static() != want_static
                {
                    continue;
                }

                if depth > 0 {
                    if member.accessor() == Accessor::Private {
                        continue;
                    }
                    if seen.contains(&member.identity_key()) {
                        continue;
                    }
                }

                level_keys.push(member.identity_key());
                result.push(member);
            }

            seen.extend(level_keys);
        }

        result
    }
}

/// Gathers the members of `kind` of `definition` and its ancestors.
///
/// # Errors
/// Returns [`Error::RecursionLimit`] if the inheritance chain is longer than
/// [`InspectionOptions::max_inheritance_depth`]
pub fn collect<S>(
    source: &S,
    definition: &TypeDef,
    kind: MemberKind,
    want_static: bool,
    options: &InspectionOptions,
) -> Result<Vec<MemberRecord>>
where
    S: MetadataSource + ?Sized,
{
    Ok(InheritanceWalker::new(source, definition, options)?.collect(kind, want_static))
}

fn resolve_ancestors<S>(source: &S, root: &TypeDef, max_depth: usize) -> Result<Vec<AncestorLevel>>
where
    S: MetadataSource + ?Sized,
{
    let mut ancestors: Vec<AncestorLevel> = Vec::new();
    let mut base = root.base.clone();
    let mut map = SubstitutionMap::default();

    while let Some(base_sig) = base {
        if ancestors.len() >= max_depth {
            return Err(Error::RecursionLimit(max_depth));
        }

        let Some(definition) = resolve_base(source, &base_sig) else {
            break;
        };

        map = SubstitutionMap::for_base(&base_sig, &map);
        base = definition.base.clone();
        ancestors.push(AncestorLevel {
            definition,
            map: map.clone(),
        });
    }

    Ok(ancestors)
}

fn resolve_base<S>(source: &S, base: &TypeSig) -> Option<Arc<TypeDef>>
where
    S: MetadataSource + ?Sized,
{
    let resolved = base.type_name().and_then(|name| source.resolve(name));
    if resolved.is_none() {
        let name = base.raw_name();
        if ROOT_TYPES.contains(&name.as_str()) {
            log::debug!("Inheritance chain ends at unresolved {name}");
        } else {
            log::warn!("Could not resolve base type {name}, stopping the inheritance walk");
        }
    }
    resolved
}

/// Inspects the members of one level, before any filtering
fn inspect_level(
    definition: &TypeDef,
    map: &SubstitutionMap,
    kind: MemberKind,
    ignore_private: bool,
) -> Vec<MemberRecord> {
    let implemented = QuickTypeRecord::from_definition(definition);

    match kind {
        MemberKind::Field => definition
            .fields
            .iter()
            .map(|field| {
                MemberRecord::Field(FieldRecord::new(field, &implemented, map, ignore_private))
            })
            .collect(),
        MemberKind::Property => definition
            .properties
            .iter()
            .map(|property| {
                MemberRecord::Property(PropertyRecord::new(
                    property,
                    definition,
                    &implemented,
                    map,
                    ignore_private,
                ))
            })
            .collect(),
        MemberKind::Event => definition
            .events
            .iter()
            .map(|event| {
                MemberRecord::Event(EventRecord::new(
                    event,
                    definition,
                    &implemented,
                    map,
                    ignore_private,
                ))
            })
            .collect(),
        MemberKind::Method | MemberKind::Constructor | MemberKind::Operator => definition
            .methods
            .iter()
            .map(|method| {
                MethodRecord::new(
                    method,
                    &implemented,
                    definition.is_interface(),
                    map,
                    ignore_private,
                )
            })
            .filter(|method| match kind {
                MemberKind::Constructor => method.is_constructor,
                MemberKind::Operator => method.is_operator,
                _ => !method.is_constructor && !method.is_operator,
            })
            .map(MemberRecord::Method)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            builder::{FieldDefBuilder, MethodDefBuilder, ParamDefBuilder, TypeDefBuilder},
            flags::{FieldAccessFlags, FieldModifiers, MethodAccessFlags, MethodModifiers},
            signature::PrimitiveKind,
            source::MetadataStore,
        },
        test::class_library,
    };

    fn names(members: &[MemberRecord]) -> Vec<String> {
        members.iter().map(|member| member.name().to_string()).collect()
    }

    #[test]
    fn test_generic_substitution_through_levels() {
        let store = class_library();
        let definition = store.find("Game.IntContainer").unwrap();
        let options = InspectionOptions::default();

        let methods = collect(&store, &definition, MemberKind::Method, false, &options).unwrap();
        let get = methods
            .iter()
            .find(|member| member.name() == "Get")
            .unwrap();

        assert_eq!(get.declaration(), "public int Get(int index)");
        assert_eq!(get.doc_id(), "M:Game.Container`1.Get(System.Int32)");
        assert_eq!(get.implemented_type().unlocalized_name, "Game.Container`1");
    }

    #[test]
    fn test_override_suppresses_base_member() {
        let store = class_library();
        let definition = store.find("Game.Knight").unwrap();
        let options = InspectionOptions::default();

        let methods = collect(&store, &definition, MemberKind::Method, false, &options).unwrap();
        let attacks: Vec<&MemberRecord> = methods
            .iter()
            .filter(|member| member.name() == "Attack")
            .collect();

        assert_eq!(attacks.len(), 1);
        assert_eq!(attacks[0].modifier(), "override");
        assert_eq!(attacks[0].implemented_type().name, "Knight");

        let mut keys = HashSet::new();
        for member in &methods {
            assert!(keys.insert(member.identity_key()), "{}", member.identity_key());
        }
    }

    #[test]
    fn test_private_members_by_level() {
        let store = class_library();
        let definition = store.find("Game.Knight").unwrap();

        let fields = collect(
            &store,
            &definition,
            MemberKind::Field,
            false,
            &InspectionOptions::complete(),
        )
        .unwrap();
        let names = names(&fields);

        assert!(names.contains(&"oath".to_string()));
        assert!(!names.contains(&"secret".to_string()));
        assert!(names.contains(&"armor".to_string()));
    }

    #[test]
    fn test_static_split() {
        let store = class_library();
        let definition = store.find("Game.Knight").unwrap();
        let options = InspectionOptions::default();

        let statics = collect(&store, &definition, MemberKind::Method, true, &options).unwrap();
        assert!(statics.iter().all(MemberRecord::is_static));
        assert!(names(&statics).contains(&"Recruit".to_string()));

        let instance = collect(&store, &definition, MemberKind::Method, false, &options).unwrap();
        assert!(!names(&instance).contains(&"Recruit".to_string()));
    }

    #[test]
    fn test_constructors_are_not_inherited() {
        let store = class_library();
        let definition = store.find("Game.Knight").unwrap();
        let ctors = collect(
            &store,
            &definition,
            MemberKind::Constructor,
            false,
            &InspectionOptions::default(),
        )
        .unwrap();

        assert_eq!(ctors.len(), 1);
        assert_eq!(ctors[0].declaration(), "public Knight(string name)");
    }

    #[test]
    fn test_declared_only() {
        let store = class_library();
        let definition = store.find("Game.Knight").unwrap();
        let options = InspectionOptions::declared_only();

        let methods = collect(&store, &definition, MemberKind::Method, false, &options).unwrap();
        assert!(methods
            .iter()
            .all(|member| member.implemented_type().name == "Knight"));
    }

    #[test]
    fn test_cyclic_chain() {
        let store = MetadataStore::new();
        store.insert(
            TypeDefBuilder::class("Broken", "A")
                .extends(TypeSig::named("Broken", "B"))
                .build()
                .unwrap(),
        );
        store.insert(
            TypeDefBuilder::class("Broken", "B")
                .extends(TypeSig::named("Broken", "A"))
                .build()
                .unwrap(),
        );
        let definition = store.find("Broken.A").unwrap();

        let result = collect(
            &store,
            &definition,
            MemberKind::Field,
            false,
            &InspectionOptions::default(),
        );
        assert!(matches!(result, Err(Error::RecursionLimit(64))));
    }

    #[test]
    fn test_unresolved_base_stops_walk() {
        let store = MetadataStore::new();
        store.insert(
            TypeDefBuilder::class("Game", "Plugin")
                .extends(TypeSig::named("Vendor", "PluginBase"))
                .field(FieldDefBuilder::new("Id", PrimitiveKind::I4.into()))
                .build()
                .unwrap(),
        );
        let definition = store.find("Game.Plugin").unwrap();
        let options = InspectionOptions::default();
        let walker = InheritanceWalker::new(&store, &definition, &options).unwrap();

        assert!(walker.ancestors().is_empty());
        assert_eq!(names(&walker.collect(MemberKind::Field, false)), vec!["Id"]);
    }

    #[test]
    fn test_same_level_overloads_kept() {
        let store = MetadataStore::new();
        store.insert(
            TypeDefBuilder::class("Game", "Logger")
                .method(
                    MethodDefBuilder::new("Write")
                        .param(ParamDefBuilder::new("text", PrimitiveKind::String.into())),
                )
                .method(
                    MethodDefBuilder::new("Write")
                        .param(ParamDefBuilder::new("value", PrimitiveKind::I4.into())),
                )
                .method(MethodDefBuilder::new("Flush").access(MethodAccessFlags::PRIVATE))
                .field(
                    FieldDefBuilder::new("level", PrimitiveKind::I4.into())
                        .access(FieldAccessFlags::PRIVATE)
                        .modifiers(FieldModifiers::INIT_ONLY),
                )
                .method(
                    MethodDefBuilder::new("Create")
                        .modifiers(MethodModifiers::STATIC)
                        .returns(TypeSig::named("Game", "Logger")),
                )
                .build()
                .unwrap(),
        );
        let definition = store.find("Game.Logger").unwrap();
        let methods = collect(
            &store,
            &definition,
            MemberKind::Method,
            false,
            &InspectionOptions::default(),
        )
        .unwrap();

        assert_eq!(names(&methods), vec!["Write", "Write"]);
    }
}
