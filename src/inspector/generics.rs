//! Generic parameters, their constraints, and substitution across inheritance levels.
//!
//! When the inheritance walker climbs from `IntContainer : Container<int>` to `Container<T>`,
//! every member declared on `Container<T>` must be displayed with `T` bound to `int`. The
//! binding is a [`SubstitutionMap`]: the type arguments of the closed base reference, indexed
//! by generic parameter position. Maps compose while climbing, since the arguments of the next
//! base reference are themselves rewritten through the current map before they become the next
//! level's map.

use crate::{
    inspector::{names, quicktype::QuickTypeRecord},
    metadata::{
        definitions::GenericParamDef,
        flags::GenericParamAttributes,
        signature::{GenericOwner, TypeSig},
    },
};

/// A generic parameter of a declaration, or a generic argument of an instantiation
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParameterRecord {
    /// Positional name for declared parameters (`` `0 `` on types, ``` ``0 ``` on methods);
    /// the arity-mangled argument name for instantiation arguments
    pub unlocalized_name: String,
    /// Display name (`T`, `int`, `List<string>`)
    pub name: String,
    /// Constraint types, in declaration order
    pub constraints: Vec<QuickTypeRecord>,
    /// Variance and special constraint flags
    pub attributes: GenericParamAttributes,
}

impl GenericParameterRecord {
    /// Record of a declared generic parameter
    #[must_use]
    pub fn from_definition(param: &GenericParamDef) -> Self {
        let prefix = match param.owner {
            GenericOwner::Type => "`",
            GenericOwner::Method => "``",
        };

        GenericParameterRecord {
            unlocalized_name: format!("{prefix}{}", param.index),
            name: names::make_friendly(&param.name),
            constraints: param
                .constraints
                .iter()
                .map(QuickTypeRecord::from_sig)
                .collect(),
            attributes: param.attributes(),
        }
    }

    /// Record of an argument of a generic instantiation
    #[must_use]
    pub fn from_argument(arg: &TypeSig) -> Self {
        let record = QuickTypeRecord::from_sig(arg);

        GenericParameterRecord {
            unlocalized_name: names::unlocalize(&record.full_name),
            name: record.name,
            constraints: Vec::new(),
            attributes: GenericParamAttributes::empty(),
        }
    }

    /// The variance keyword prefix (`out `, `in ` or nothing)
    #[must_use]
    pub fn variance(&self) -> &'static str {
        if self.attributes.contains(GenericParamAttributes::COVARIANT) {
            "out "
        } else if self.attributes.contains(GenericParamAttributes::CONTRAVARIANT) {
            "in "
        } else {
            ""
        }
    }

    /// The constraint list in source order: `class`/`struct`, constraint types, `new()`.
    ///
    /// A `struct` constraint implies both `System.ValueType` and `new()`, which are omitted.
    #[must_use]
    pub fn constraint_list(&self) -> Vec<String> {
        let is_struct = self
            .attributes
            .contains(GenericParamAttributes::NOT_NULLABLE_VALUE_TYPE_CONSTRAINT);
        let mut list = Vec::new();

        if self
            .attributes
            .contains(GenericParamAttributes::REFERENCE_TYPE_CONSTRAINT)
        {
            list.push("class".to_string());
        }
        if is_struct {
            list.push("struct".to_string());
        }
        list.extend(
            self.constraints
                .iter()
                .filter(|constraint| !(is_struct && constraint.is("System.ValueType")))
                .map(|constraint| constraint.name.clone()),
        );
        if !is_struct
            && self
                .attributes
                .contains(GenericParamAttributes::DEFAULT_CONSTRUCTOR_CONSTRAINT)
        {
            list.push("new()".to_string());
        }

        list
    }
}

/// Renders a generic parameter list (`<out T, U>`), empty when there are no parameters
#[must_use]
pub fn declaration(params: &[GenericParameterRecord], with_variance: bool) -> String {
    if params.is_empty() {
        return String::new();
    }

    let names: Vec<String> = params
        .iter()
        .map(|param| {
            if with_variance {
                format!("{}{}", param.variance(), param.name)
            } else {
                param.name.clone()
            }
        })
        .collect();
    format!("<{}>", names.join(", "))
}

/// Renders the `where` clauses of all constrained parameters (` where T : class, new()`)
#[must_use]
pub fn constraint_clause(params: &[GenericParameterRecord]) -> String {
    params
        .iter()
        .filter_map(|param| {
            let list = param.constraint_list();
            (!list.is_empty()).then(|| format!(" where {} : {}", param.name, list.join(", ")))
        })
        .collect()
}

/// Binding of type-level generic parameters to the arguments of a closed base reference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstitutionMap {
    args: Vec<TypeSig>,
}

impl SubstitutionMap {
    /// Creates a map binding parameter `i` to `args[i]`
    #[must_use]
    pub fn new(args: Vec<TypeSig>) -> Self {
        SubstitutionMap { args }
    }

    /// The map for the level reached through `base`, given the map of the current level.
    ///
    /// A non-generic base yields an empty map.
    #[must_use]
    pub fn for_base(base: &TypeSig, current: &SubstitutionMap) -> Self {
        match base {
            TypeSig::GenericInst(_, args) => {
                SubstitutionMap::new(args.iter().map(|arg| current.apply(arg)).collect())
            }
            _ => SubstitutionMap::default(),
        }
    }

    /// The bound arguments
    #[must_use]
    pub fn args(&self) -> &[TypeSig] {
        &self.args
    }

    /// Returns true if the map binds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Rewrites `sig` through the map
    #[must_use]
    pub fn apply(&self, sig: &TypeSig) -> TypeSig {
        self.apply_tracked(sig).0
    }

    /// Rewrites `sig` through the map and reports whether anything was replaced
    #[must_use]
    pub fn apply_tracked(&self, sig: &TypeSig) -> (TypeSig, bool) {
        if self.args.is_empty() {
            return (sig.clone(), false);
        }
        sig.substitute(&self.args)
    }
}
