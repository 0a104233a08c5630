//! Property and indexer records.

use crate::{
    inspector::{
        accessor::Accessor,
        attribute::AttributeRecord,
        docid::{self, DocIdKind},
        generics::SubstitutionMap,
        method::MethodRecord,
        parameter::{self, ParameterRecord},
        quicktype::QuickTypeRecord,
    },
    metadata::definitions::{PropertyDef, TypeDef},
};

/// An inspected property or indexer
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    /// Property name (`Item` for indexers)
    pub name: String,
    /// Property type, after generic substitution
    pub type_info: QuickTypeRecord,
    /// The more visible of the two accessors' access modifiers
    pub accessor: Accessor,
    /// Modifier of the more visible accessor (`static`, `virtual`, `override`, ...)
    pub modifier: String,
    /// Whether the property is static
    pub is_static: bool,
    /// Whether the property takes index parameters
    pub is_indexer: bool,
    /// The getter, if the property has one
    pub getter: Option<MethodRecord>,
    /// The setter, if the property has one
    pub setter: Option<MethodRecord>,
    /// Index parameters
    pub parameters: Vec<ParameterRecord>,
    /// Attributes applied to the property
    pub attributes: Vec<AttributeRecord>,
    /// The type declaring the property
    pub implemented_type: QuickTypeRecord,
    /// Declaration head (`public int Health`, `public string this[int index]`)
    pub declaration: String,
    /// Accessor list (`get; protected set;`), visible accessors only
    pub getset_declaration: String,
    /// Complete declaration (`public int Health { get; set; }`)
    pub full_declaration: String,
    /// Whether the property is hidden by the inspection options
    pub should_ignore: bool,
}

impl PropertyRecord {
    /// Inspects a property declared on `owner`
    #[must_use]
    pub fn new(
        property: &PropertyDef,
        owner: &TypeDef,
        implemented_type: &QuickTypeRecord,
        map: &SubstitutionMap,
        ignore_private: bool,
    ) -> Self {
        let accessor_record = |index: Option<usize>| {
            owner.method(index).map(|method| {
                MethodRecord::new(
                    method,
                    implemented_type,
                    owner.is_interface(),
                    map,
                    ignore_private,
                )
            })
        };
        let getter = accessor_record(property.getter);
        let setter = accessor_record(property.setter);

        let visible_getter = getter.as_ref().filter(|method| !method.should_ignore);
        let visible_setter = setter.as_ref().filter(|method| !method.should_ignore);

        let primary = match (visible_getter, visible_setter) {
            (Some(get), Some(set)) if set.accessor > get.accessor => Some(set),
            (Some(get), _) => Some(get),
            (None, set) => set,
        };
        let should_ignore = primary.is_none();
        if getter.is_none() && setter.is_none() {
            log::debug!(
                "Dropping property {}.{} without accessors",
                implemented_type.unlocalized_name,
                property.name
            );
        }
        let accessor = primary.map_or(Accessor::Private, |method| method.accessor);
        let modifier = primary.map_or_else(String::new, |method| method.modifier.clone());
        let is_static = primary.is_some_and(|method| method.is_static);

        let type_info = QuickTypeRecord::from_sig(&property.sig).substitute(map);
        let parameters = ParameterRecord::from_list(&property.params, map);
        let is_indexer = !parameters.is_empty();

        let getset: Vec<String> = [(visible_getter, "get;"), (visible_setter, "set;")]
            .into_iter()
            .filter_map(|(method, keyword)| {
                method.map(|method| {
                    if method.accessor == accessor {
                        keyword.to_string()
                    } else {
                        format!("{} {keyword}", method.accessor)
                    }
                })
            })
            .collect();
        let getset_declaration = getset.join(" ");

        let mut declaration = format!("{accessor} ");
        if !modifier.is_empty() {
            declaration.push_str(&modifier);
            declaration.push(' ');
        }
        declaration.push_str(&type_info.name);
        declaration.push(' ');
        if is_indexer {
            declaration.push_str(&format!(
                "this[{}]",
                parameter::declaration_list(&parameters)
            ));
        } else {
            declaration.push_str(&property.name);
        }
        let full_declaration = format!("{declaration} {{ {getset_declaration} }}");

        PropertyRecord {
            name: property.name.clone(),
            type_info,
            accessor,
            modifier,
            is_static,
            is_indexer,
            getter,
            setter,
            parameters,
            attributes: AttributeRecord::from_list(&property.custom_attributes),
            implemented_type: implemented_type.clone(),
            declaration,
            getset_declaration,
            full_declaration,
            should_ignore,
        }
    }

    /// Key under which an inherited property is hidden by a more derived declaration
    #[must_use]
    pub fn identity_key(&self) -> String {
        if self.is_indexer {
            format!(
                "{}{}",
                self.name,
                docid::resolved_parameter_list(&self.parameters)
            )
        } else {
            self.name.clone()
        }
    }

    /// Documentation identifier (`P:Game.Player.Health`, `P:Game.Bag.Item(System.Int32)`)
    #[must_use]
    pub fn doc_id(&self) -> String {
        let mut id = docid::compose(DocIdKind::Property, &self.implemented_type, &self.name);
        id.push_str(&docid::parameter_list(&self.parameters));
        id
    }
}
