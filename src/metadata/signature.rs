//! Structured type references.
//!
//! Every type that appears in a member signature, a base-type list, a constraint or an attribute
//! is described by a [`TypeSig`] tree instead of a pre-rendered string. Generic substitution is a
//! tree rewrite ([`TypeSig::substitute`]) and strings are only produced at the very end, through
//! [`TypeSig::raw_name`], which renders the metadata-style full name:
//!
//! - nested types are separated by `/` (`Outer/Inner`)
//! - generic definitions carry their arity (`` List`1 ``)
//! - instantiations append an argument list (`` List`1<System.Int32> ``)
//! - arrays, by-refs and pointers append `[]`/`[,]`, `&` and `*`
//!
//! # Examples
//!
//! ```rust
//! use docscope::metadata::signature::{TypeName, TypeSig, PrimitiveKind};
//!
//! let list = TypeSig::generic_inst(
//!     TypeSig::named("System.Collections.Generic", "List`1"),
//!     vec![TypeSig::Primitive(PrimitiveKind::I4)],
//! );
//! assert_eq!(list.raw_name(), "System.Collections.Generic.List`1<System.Int32>");
//! ```

use std::fmt;

/// The CLI built-in element types that have a dedicated signature encoding
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Void,
    Boolean,
    Char,
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    I8,
    U8,
    R4,
    R8,
    I,
    U,
    String,
    Object,
    TypedByRef,
}

impl PrimitiveKind {
    /// The namespace-qualified runtime type this element type stands for
    #[must_use]
    pub fn full_name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "System.Void",
            PrimitiveKind::Boolean => "System.Boolean",
            PrimitiveKind::Char => "System.Char",
            PrimitiveKind::I1 => "System.SByte",
            PrimitiveKind::U1 => "System.Byte",
            PrimitiveKind::I2 => "System.Int16",
            PrimitiveKind::U2 => "System.UInt16",
            PrimitiveKind::I4 => "System.Int32",
            PrimitiveKind::U4 => "System.UInt32",
            PrimitiveKind::I8 => "System.Int64",
            PrimitiveKind::U8 => "System.UInt64",
            PrimitiveKind::R4 => "System.Single",
            PrimitiveKind::R8 => "System.Double",
            PrimitiveKind::I => "System.IntPtr",
            PrimitiveKind::U => "System.UIntPtr",
            PrimitiveKind::String => "System.String",
            PrimitiveKind::Object => "System.Object",
            PrimitiveKind::TypedByRef => "System.TypedReference",
        }
    }
}

/// Who declares a generic parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericOwner {
    /// Declared on a type (`!0` in IL, `` `0 `` in documentation identifiers)
    Type,
    /// Declared on a method (`!!0` in IL, ``` ``0 ``` in documentation identifiers)
    Method,
}

/// The name of a type definition or reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeName {
    /// Namespace (empty for nested types, which inherit it from the outermost declaring type)
    pub namespace: String,
    /// Simple name including the arity suffix (e.g. `` Dictionary`2 ``)
    pub name: String,
    /// The enclosing type, if this is a nested type
    pub declaring: Option<Box<TypeName>>,
    /// The assembly this reference resolves to, if known
    pub scope: Option<String>,
}

impl TypeName {
    /// Create a top-level type name
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeName {
            namespace: namespace.into(),
            name: name.into(),
            declaring: None,
            scope: None,
        }
    }

    /// Create the name of a type nested inside `declaring`
    pub fn nested(declaring: TypeName, name: impl Into<String>) -> Self {
        TypeName {
            namespace: String::new(),
            name: name.into(),
            scope: declaring.scope.clone(),
            declaring: Some(Box::new(declaring)),
        }
    }

    /// Attach the assembly that defines this type
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Parse a metadata-style full name (`Namespace.Outer/Inner`) into a `TypeName`
    #[must_use]
    pub fn parse(full_name: &str) -> Self {
        let mut segments = full_name.split('/');
        let top = segments.next().unwrap_or_default();
        let mut current = match top.rfind('.') {
            Some(dot) => TypeName::new(&top[..dot], &top[dot + 1..]),
            None => TypeName::new("", top),
        };
        for segment in segments {
            current = TypeName::nested(current, segment);
        }
        current
    }

    /// Metadata-style full name, `/` separating nested types
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.declaring {
            Some(declaring) => format!("{}/{}", declaring.full_name(), self.name),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// Namespace of the outermost declaring type
    #[must_use]
    pub fn root_namespace(&self) -> &str {
        match &self.declaring {
            Some(declaring) => declaring.root_namespace(),
            None => &self.namespace,
        }
    }

    /// Number of generic parameters declared by this segment alone (the `` `N `` suffix)
    #[must_use]
    pub fn own_arity(&self) -> usize {
        self.name
            .rfind('`')
            .and_then(|tick| self.name[tick + 1..].parse().ok())
            .unwrap_or(0)
    }

    /// The simple name without its arity suffix
    #[must_use]
    pub fn plain_name(&self) -> &str {
        match self.name.rfind('`') {
            Some(tick) => &self.name[..tick],
            None => &self.name,
        }
    }

    /// The chain of names from the outermost declaring type down to this one
    #[must_use]
    pub fn chain(&self) -> Vec<&TypeName> {
        let mut chain = match &self.declaring {
            Some(declaring) => declaring.chain(),
            None => Vec::new(),
        };
        chain.push(self);
        chain
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// A parsed type reference as it appears in signatures
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSig {
    /// A built-in element type
    Primitive(PrimitiveKind),
    /// A class, value type or interface, referenced by name
    Named(TypeName),
    /// A generic type and its arguments
    GenericInst(Box<TypeSig>, Vec<TypeSig>),
    /// An array; rank 1 is a single-dimensional zero-based array
    Array {
        /// The element type
        element: Box<TypeSig>,
        /// The number of dimensions
        rank: u32,
    },
    /// Type by reference (`ref`, `out`, `in` parameters)
    ByRef(Box<TypeSig>),
    /// An unmanaged pointer
    Pointer(Box<TypeSig>),
    /// An open generic parameter
    GenericParam {
        /// Declaring entity
        owner: GenericOwner,
        /// Position in the owner's generic parameter list
        index: u32,
        /// Declared name (e.g. `T`)
        name: String,
    },
}

impl TypeSig {
    /// Reference a type by namespace and (arity-mangled) name
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeSig::Named(TypeName::new(namespace, name))
    }

    /// Reference a type by its metadata-style full name
    #[must_use]
    pub fn parse_named(full_name: &str) -> Self {
        TypeSig::Named(TypeName::parse(full_name))
    }

    /// Instantiate a generic type
    #[must_use]
    pub fn generic_inst(base: TypeSig, args: Vec<TypeSig>) -> Self {
        TypeSig::GenericInst(Box::new(base), args)
    }

    /// Single dimensional array of `element`
    #[must_use]
    pub fn sz_array(element: TypeSig) -> Self {
        TypeSig::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// Multi-dimensional array of `element`
    #[must_use]
    pub fn array(element: TypeSig, rank: u32) -> Self {
        TypeSig::Array {
            element: Box::new(element),
            rank: rank.max(1),
        }
    }

    /// By-reference wrapper of `element`
    #[must_use]
    pub fn by_ref(element: TypeSig) -> Self {
        TypeSig::ByRef(Box::new(element))
    }

    /// Type-level generic parameter
    pub fn type_param(index: u32, name: impl Into<String>) -> Self {
        TypeSig::GenericParam {
            owner: GenericOwner::Type,
            index,
            name: name.into(),
        }
    }

    /// Method-level generic parameter
    pub fn method_param(index: u32, name: impl Into<String>) -> Self {
        TypeSig::GenericParam {
            owner: GenericOwner::Method,
            index,
            name: name.into(),
        }
    }

    /// Renders the metadata-style full name of this reference
    #[must_use]
    pub fn raw_name(&self) -> String {
        match self {
            TypeSig::Primitive(kind) => kind.full_name().to_string(),
            TypeSig::Named(name) => name.full_name(),
            TypeSig::GenericInst(base, args) => {
                let args: Vec<String> = args.iter().map(TypeSig::raw_name).collect();
                format!("{}<{}>", base.raw_name(), args.join(","))
            }
            TypeSig::Array { element, rank } => {
                format!("{}[{}]", element.raw_name(), ",".repeat(rank.saturating_sub(1) as usize))
            }
            TypeSig::ByRef(element) => format!("{}&", element.raw_name()),
            TypeSig::Pointer(element) => format!("{}*", element.raw_name()),
            TypeSig::GenericParam { name, .. } => name.clone(),
        }
    }

    /// The named type at the root of this reference, if any (`List<T>[]` yields `List`1`)
    #[must_use]
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            TypeSig::Named(name) => Some(name),
            TypeSig::GenericInst(base, _) => base.type_name(),
            TypeSig::Array { element, .. } | TypeSig::ByRef(element) | TypeSig::Pointer(element) => {
                element.type_name()
            }
            TypeSig::Primitive(_) | TypeSig::GenericParam { .. } => None,
        }
    }

    /// Namespace of the outermost declaring type of this reference
    #[must_use]
    pub fn namespace(&self) -> String {
        match self {
            TypeSig::Primitive(_) => "System".to_string(),
            TypeSig::GenericParam { .. } => String::new(),
            _ => self
                .type_name()
                .map(|name| name.root_namespace().to_string())
                .unwrap_or_default(),
        }
    }

    /// Removes a top-level by-ref wrapper
    #[must_use]
    pub fn strip_by_ref(&self) -> &TypeSig {
        match self {
            TypeSig::ByRef(element) => element,
            other => other,
        }
    }

    /// Returns true for a top-level by-ref reference
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        matches!(self, TypeSig::ByRef(_))
    }

    /// Returns true for a bare open generic parameter
    #[must_use]
    pub fn is_generic_param(&self) -> bool {
        matches!(self, TypeSig::GenericParam { .. })
    }

    /// Returns true if this reference names the given metadata full name
    #[must_use]
    pub fn is(&self, full_name: &str) -> bool {
        match self {
            TypeSig::Primitive(kind) => kind.full_name() == full_name,
            TypeSig::Named(name) => name.full_name() == full_name,
            _ => false,
        }
    }

    /// Replaces type-level generic parameters with the argument at their position.
    ///
    /// Returns the rewritten tree and whether any parameter was replaced. Parameters whose index
    /// falls outside `type_args` and method-level parameters are left open.
    #[must_use]
    pub fn substitute(&self, type_args: &[TypeSig]) -> (TypeSig, bool) {
        match self {
            TypeSig::GenericParam {
                owner: GenericOwner::Type,
                index,
                ..
            } => match type_args.get(*index as usize) {
                Some(arg) => (arg.clone(), true),
                None => (self.clone(), false),
            },
            TypeSig::GenericInst(base, args) => {
                let (base, mut changed) = base.substitute(type_args);
                let args = args
                    .iter()
                    .map(|arg| {
                        let (arg, arg_changed) = arg.substitute(type_args);
                        changed |= arg_changed;
                        arg
                    })
                    .collect();
                (TypeSig::GenericInst(Box::new(base), args), changed)
            }
            TypeSig::Array { element, rank } => {
                let (element, changed) = element.substitute(type_args);
                (
                    TypeSig::Array {
                        element: Box::new(element),
                        rank: *rank,
                    },
                    changed,
                )
            }
            TypeSig::ByRef(element) => {
                let (element, changed) = element.substitute(type_args);
                (TypeSig::ByRef(Box::new(element)), changed)
            }
            TypeSig::Pointer(element) => {
                let (element, changed) = element.substitute(type_args);
                (TypeSig::Pointer(Box::new(element)), changed)
            }
            TypeSig::Primitive(_) | TypeSig::Named(_) | TypeSig::GenericParam { .. } => {
                (self.clone(), false)
            }
        }
    }

    /// Returns true if any open generic parameter of `owner` occurs in this reference
    #[must_use]
    pub fn mentions(&self, owner: GenericOwner) -> bool {
        match self {
            TypeSig::GenericParam { owner: o, .. } => *o == owner,
            TypeSig::GenericInst(base, args) => {
                base.mentions(owner) || args.iter().any(|arg| arg.mentions(owner))
            }
            TypeSig::Array { element, .. } | TypeSig::ByRef(element) | TypeSig::Pointer(element) => {
                element.mentions(owner)
            }
            TypeSig::Primitive(_) | TypeSig::Named(_) => false,
        }
    }
}

impl From<PrimitiveKind> for TypeSig {
    fn from(kind: PrimitiveKind) -> Self {
        TypeSig::Primitive(kind)
    }
}

impl From<TypeName> for TypeSig {
    fn from(name: TypeName) -> Self {
        TypeSig::Named(name)
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_names() {
        let dict = TypeSig::generic_inst(
            TypeSig::named("System.Collections.Generic", "Dictionary`2"),
            vec![
                PrimitiveKind::String.into(),
                TypeSig::sz_array(TypeSig::type_param(0, "T")),
            ],
        );
        assert_eq!(
            dict.raw_name(),
            "System.Collections.Generic.Dictionary`2<System.String,T[]>"
        );

        let matrix = TypeSig::array(PrimitiveKind::R8.into(), 2);
        assert_eq!(matrix.raw_name(), "System.Double[,]");

        let by_ref = TypeSig::by_ref(PrimitiveKind::I4.into());
        assert_eq!(by_ref.raw_name(), "System.Int32&");
        assert_eq!(by_ref.strip_by_ref().raw_name(), "System.Int32");
    }

    #[test]
    fn test_nested_names() {
        let outer = TypeName::new("Game.Creatures", "Body`1");
        let inner = TypeName::nested(outer, "Part");

        assert_eq!(inner.full_name(), "Game.Creatures.Body`1/Part");
        assert_eq!(inner.root_namespace(), "Game.Creatures");
        assert_eq!(inner.chain().len(), 2);

        let parsed = TypeName::parse("Game.Creatures.Body`1/Part");
        assert_eq!(parsed, inner);
    }

    #[test]
    fn test_arity() {
        let name = TypeName::new("System", "Func`3");
        assert_eq!(name.own_arity(), 3);
        assert_eq!(name.plain_name(), "Func");
        assert_eq!(TypeName::new("System", "String").own_arity(), 0);
    }

    #[test]
    fn test_substitute_nested_arguments() {
        // Dictionary<T, List<T>[]> with T := int
        let sig = TypeSig::generic_inst(
            TypeSig::named("System.Collections.Generic", "Dictionary`2"),
            vec![
                TypeSig::type_param(0, "T"),
                TypeSig::sz_array(TypeSig::generic_inst(
                    TypeSig::named("System.Collections.Generic", "List`1"),
                    vec![TypeSig::type_param(0, "T")],
                )),
            ],
        );

        let (bound, changed) = sig.substitute(&[PrimitiveKind::I4.into()]);
        assert!(changed);
        assert_eq!(
            bound.raw_name(),
            "System.Collections.Generic.Dictionary`2<System.Int32,System.Collections.Generic.List`1<System.Int32>[]>"
        );
    }

    #[test]
    fn test_substitute_leaves_method_params() {
        let sig = TypeSig::by_ref(TypeSig::method_param(0, "U"));
        let (bound, changed) = sig.substitute(&[PrimitiveKind::I4.into()]);
        assert!(!changed);
        assert_eq!(bound, sig);

        let out_of_range = TypeSig::type_param(3, "V");
        assert!(!out_of_range.substitute(&[PrimitiveKind::I4.into()]).1);
    }

    #[test]
    fn test_mentions() {
        let sig = TypeSig::generic_inst(
            TypeSig::named("System", "Func`2"),
            vec![TypeSig::type_param(0, "T"), TypeSig::method_param(0, "U")],
        );
        assert!(sig.mentions(GenericOwner::Type));
        assert!(sig.mentions(GenericOwner::Method));
        assert!(!TypeSig::from(PrimitiveKind::I4).mentions(GenericOwner::Type));
    }
}
