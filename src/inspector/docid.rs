//! Documentation-comment identifiers.
//!
//! Compilers write the prose of `///` comments into an XML file where every entry is keyed by
//! an identifier such as `M:Game.Container`1.Set(`0)`. The identifiers built here follow the
//! same convention bit for bit, so inspected members join their prose by exact string match:
//!
//! - a one-letter kind prefix (`T:`, `M:`, `F:`, `P:`, `E:`)
//! - the unlocalized, namespace-qualified path of the declaring type, nested types joined by `.`
//! - constructors named `#ctor`, methods with own generic parameters suffixed `` ``N ``
//! - parameter types rendered with `{}` argument lists, `` `i `` / ``` ``i ``` positional
//!   references to generic parameters, `[]` / `[0:,0:]` arrays and a trailing `@` for by-ref
//! - conversion operators suffixed with `~` and their return type

use strum::{AsRefStr, Display, EnumIter};

use crate::{
    inspector::{parameter::ParameterRecord, quicktype::QuickTypeRecord},
    metadata::signature::{GenericOwner, TypeSig},
};

/// Kind prefix of a documentation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum DocIdKind {
    /// `T:` types
    #[strum(to_string = "T")]
    Type,
    /// `M:` methods, constructors and operators
    #[strum(to_string = "M")]
    Method,
    /// `F:` fields
    #[strum(to_string = "F")]
    Field,
    /// `P:` properties and indexers
    #[strum(to_string = "P")]
    Property,
    /// `E:` events
    #[strum(to_string = "E")]
    Event,
}

/// Renders a type reference the way it appears inside a documentation identifier
#[must_use]
pub fn type_reference(sig: &TypeSig) -> String {
    match sig {
        TypeSig::Primitive(kind) => kind.full_name().to_string(),
        TypeSig::Named(name) => name.full_name().replace('/', "."),
        TypeSig::GenericInst(base, args) => {
            let Some(name) = base.type_name() else {
                return format!("{}{{{}}}", type_reference(base), argument_list(args));
            };

            let mut rendered = String::new();
            let mut remaining = args.as_slice();
            for (position, segment) in name.chain().into_iter().enumerate() {
                if position == 0 {
                    if !segment.namespace.is_empty() {
                        rendered.push_str(&segment.namespace);
                        rendered.push('.');
                    }
                } else {
                    rendered.push('.');
                }

                let arity = segment.own_arity().min(remaining.len());
                if arity == 0 {
                    rendered.push_str(&segment.name);
                    continue;
                }
                let (own, rest) = remaining.split_at(arity);
                rendered.push_str(segment.plain_name());
                rendered.push('{');
                rendered.push_str(&argument_list(own));
                rendered.push('}');
                remaining = rest;
            }
            rendered
        }
        TypeSig::Array { element, rank } => {
            if *rank <= 1 {
                format!("{}[]", type_reference(element))
            } else {
                let bounds = vec!["0:"; *rank as usize];
                format!("{}[{}]", type_reference(element), bounds.join(","))
            }
        }
        TypeSig::ByRef(element) => format!("{}@", type_reference(element)),
        TypeSig::Pointer(element) => format!("{}*", type_reference(element)),
        TypeSig::GenericParam { owner, index, .. } => match owner {
            GenericOwner::Type => format!("`{index}"),
            GenericOwner::Method => format!("``{index}"),
        },
    }
}

fn argument_list(args: &[TypeSig]) -> String {
    args.iter()
        .map(type_reference)
        .collect::<Vec<_>>()
        .join(",")
}

/// `T:` identifier of a type
#[must_use]
pub fn for_type(info: &QuickTypeRecord) -> String {
    format!("{}:{}", DocIdKind::Type, info.unlocalized_name)
}

/// Identifier of a member `name` declared on `owner`, without a parameter list
#[must_use]
pub fn compose(kind: DocIdKind, owner: &QuickTypeRecord, name: &str) -> String {
    format!("{}:{}.{}", kind, owner.unlocalized_name, name)
}

/// The parenthesized parameter list of a method or indexer identifier, empty when there are
/// no parameters.
///
/// Parameters are rendered from their declared types, so members inherited through a closed
/// generic base keep the identifiers of their declaration.
#[must_use]
pub fn parameter_list(params: &[ParameterRecord]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = params
        .iter()
        .map(|param| {
            let mut reference = type_reference(&param.type_info.declared_sig);
            if param.is_by_ref {
                reference.push('@');
            }
            reference
        })
        .collect();
    format!("({})", rendered.join(","))
}

/// Parameter list from the substituted parameter types, used to recognise overrides
#[must_use]
pub(crate) fn resolved_parameter_list(params: &[ParameterRecord]) -> String {
    let rendered: Vec<String> = params
        .iter()
        .map(|param| {
            let mut reference = type_reference(&param.type_info.sig);
            if param.is_by_ref {
                reference.push('@');
            }
            reference
        })
        .collect();
    format!("({})", rendered.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::signature::{PrimitiveKind, TypeName},
        test::list_of,
    };

    #[test]
    fn test_type_references() {
        assert_eq!(
            type_reference(&PrimitiveKind::I4.into()),
            "System.Int32"
        );
        assert_eq!(
            type_reference(&list_of(TypeSig::type_param(0, "T"))),
            "System.Collections.Generic.List{`0}"
        );
        assert_eq!(
            type_reference(&TypeSig::array(TypeSig::method_param(1, "U"), 2)),
            "``1[0:,0:]"
        );
        assert_eq!(
            type_reference(&TypeSig::by_ref(TypeSig::sz_array(PrimitiveKind::U1.into()))),
            "System.Byte[]@"
        );
    }

    #[test]
    fn test_nested_generic_reference() {
        let inner = TypeName::nested(TypeName::new("Game", "Outer`1"), "Inner`1");
        let sig = TypeSig::generic_inst(
            TypeSig::Named(inner),
            vec![PrimitiveKind::String.into(), TypeSig::type_param(0, "T")],
        );
        assert_eq!(type_reference(&sig), "Game.Outer{System.String}.Inner{`0}");

        let plain = TypeSig::Named(TypeName::nested(TypeName::new("Game", "Outer"), "Inner"));
        assert_eq!(type_reference(&plain), "Game.Outer.Inner");
    }

    #[test]
    fn test_kind_prefixes() {
        assert_eq!(DocIdKind::Method.to_string(), "M");
        assert_eq!(DocIdKind::Event.as_ref(), "E");
    }
}
