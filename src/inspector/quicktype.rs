//! Compact, display-ready views of type references.

use crate::{
    inspector::{
        generics::{GenericParameterRecord, SubstitutionMap},
        names,
    },
    metadata::{definitions::TypeDef, signature::TypeSig},
};

/// A quick look at a type reference: every name form the composers need, computed once.
///
/// Records are values: substituting generic arguments produces a fresh record
/// ([`QuickTypeRecord::substitute`]) and never mutates a record another member holds.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickTypeRecord {
    /// Arity-mangled name as found in metadata, nested types joined with `.`
    /// (`` System.Collections.Generic.List`1 ``)
    pub unlocalized_name: String,
    /// The localized full name before any generic substitution took place
    pub non_instanced_full_name: String,
    /// Display name: friendly and without namespaces (`List<int>`)
    pub name: String,
    /// Localized full name (`System.Collections.Generic.List<System.Int32>`)
    pub full_name: String,
    /// Namespace of the outermost declaring type
    pub namespace: String,
    /// Generic parameters of a definition, or the arguments of an instantiation
    pub generic_parameters: Vec<GenericParameterRecord>,
    /// Whether the reference is an open generic parameter
    pub is_generic_type: bool,
    /// The reference this record was computed from
    pub sig: TypeSig,
    /// The reference as written in the declaring member, before substitution
    pub declared_sig: TypeSig,
}

impl QuickTypeRecord {
    /// Computes the record of a type reference; by-ref wrappers are ignored
    #[must_use]
    pub fn from_sig(sig: &TypeSig) -> Self {
        let sig = sig.strip_by_ref();
        let raw = sig.raw_name();

        let localized = match names::localize(&raw, &[]) {
            Ok(localized) => localized,
            Err(error) => {
                log::warn!("Falling back to raw name for {raw}: {error}");
                raw.clone()
            }
        };
        let full_name = names::strip_generic_notation(&localized);

        let generic_parameters = match sig {
            TypeSig::GenericInst(_, args) => args
                .iter()
                .map(GenericParameterRecord::from_argument)
                .collect(),
            _ => Vec::new(),
        };

        QuickTypeRecord {
            unlocalized_name: unlocalized(&raw),
            non_instanced_full_name: full_name.replace('/', "."),
            name: display_name(&full_name),
            full_name: full_name.replace('/', "."),
            namespace: sig.namespace(),
            generic_parameters,
            is_generic_type: sig.is_generic_param(),
            sig: sig.clone(),
            declared_sig: sig.clone(),
        }
    }

    /// Computes the record of a type definition, localized with its declared parameter names
    /// (`Container<T>`)
    #[must_use]
    pub fn from_definition(def: &TypeDef) -> Self {
        let raw = def.full_name();
        let generics: Vec<String> = def
            .generic_params
            .iter()
            .map(|param| param.name.clone())
            .collect();

        let localized = match names::localize(&raw, &generics) {
            Ok(localized) => localized,
            Err(error) => {
                log::warn!("Falling back to raw name for {raw}: {error}");
                raw.clone()
            }
        };
        let full_name = names::strip_generic_notation(&localized);
        let sig = def.self_sig();

        QuickTypeRecord {
            unlocalized_name: raw.replace('/', "."),
            non_instanced_full_name: full_name.replace('/', "."),
            name: display_name(&full_name),
            full_name: full_name.replace('/', "."),
            namespace: def.name.root_namespace().to_string(),
            generic_parameters: def
                .generic_params
                .iter()
                .map(GenericParameterRecord::from_definition)
                .collect(),
            is_generic_type: false,
            declared_sig: sig.clone(),
            sig,
        }
    }

    /// Rewrites the reference through `map`.
    ///
    /// Only the display forms are recomputed: the result keeps the unlocalized name, the
    /// declared reference and the non-instanced full name of `self`. It is flagged as a generic
    /// type when a substitution happened and the unlocalized name equals that non-instanced
    /// full name, which holds for a bare generic parameter (`T` bound to `int`).
    #[must_use]
    pub fn substitute(&self, map: &SubstitutionMap) -> Self {
        let (sig, changed) = map.apply_tracked(&self.sig);
        if !changed {
            return self.clone();
        }

        let mut record = Self::from_sig(&sig);
        record.unlocalized_name = self.unlocalized_name.clone();
        record.is_generic_type = record.unlocalized_name == self.non_instanced_full_name;
        record.non_instanced_full_name = self.non_instanced_full_name.clone();
        record.declared_sig = self.declared_sig.clone();
        record
    }

    /// Returns true if the reference is the given metadata full name
    #[must_use]
    pub fn is(&self, full_name: &str) -> bool {
        self.sig.is(full_name)
    }
}

/// Unlocalized form of a raw name: no argument list, no array suffix, `.` for nesting
fn unlocalized(raw: &str) -> String {
    let head = raw.find('<').map_or(raw, |lt| &raw[..lt]);
    let mut result = String::with_capacity(head.len());
    let mut chars = head.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '[' => {
                while chars.next_if(|next| *next == ',' || *next == ']').is_some() {}
            }
            '&' | '*' => {}
            '/' => result.push('.'),
            other => result.push(other),
        }
    }
    result
}

fn display_name(full_name: &str) -> String {
    names::strip_namespace(&names::make_friendly(full_name)).replace('/', ".")
}
