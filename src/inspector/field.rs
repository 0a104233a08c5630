//! Field records.

use crate::{
    inspector::{
        accessor::Accessor,
        attribute::AttributeRecord,
        docid::{self, DocIdKind},
        generics::SubstitutionMap,
        parameter::default_literal,
        quicktype::QuickTypeRecord,
    },
    metadata::{
        definitions::{FieldDef, COMPILER_GENERATED_ATTRIBUTE},
        flags::FieldModifiers,
    },
};

/// Name of the instance field holding the value of an enum
pub const ENUM_VALUE_FIELD: &str = "value__";

/// An inspected field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRecord {
    /// Field name
    pub name: String,
    /// Field type, after generic substitution
    pub type_info: QuickTypeRecord,
    /// Access modifier
    pub accessor: Accessor,
    /// `const`, `static readonly`, `static`, `readonly` or empty
    pub modifier: String,
    /// Whether the field is static (constants included)
    pub is_static: bool,
    /// Whether the field is a compile-time constant
    pub is_constant: bool,
    /// Whether the field is `readonly`
    pub is_readonly: bool,
    /// The constant value, or the raw initial data decoded as ASCII
    pub value: String,
    /// Attributes applied to the field
    pub attributes: Vec<AttributeRecord>,
    /// The type declaring the field
    pub implemented_type: QuickTypeRecord,
    /// Source-level declaration (`public const int Max = 10`)
    pub declaration: String,
    /// Whether the field is the enum backing field or compiler generated
    pub is_generated: bool,
    /// Whether the field is hidden by the inspection options
    pub should_ignore: bool,
}

impl FieldRecord {
    /// Inspects a field declared on `implemented_type`
    #[must_use]
    pub fn new(
        field: &FieldDef,
        implemented_type: &QuickTypeRecord,
        map: &SubstitutionMap,
        ignore_private: bool,
    ) -> Self {
        let accessor = Accessor::from_field(field.access());
        let modifiers = field.modifiers();
        let is_constant = field.constant.is_some() || modifiers.contains(FieldModifiers::LITERAL);
        let is_static = modifiers.contains(FieldModifiers::STATIC);
        let is_readonly = modifiers.contains(FieldModifiers::INIT_ONLY);

        let modifier = if is_constant {
            "const"
        } else if is_static && is_readonly {
            "static readonly"
        } else if is_static {
            "static"
        } else if is_readonly {
            "readonly"
        } else {
            ""
        };

        let value = match &field.constant {
            Some(constant) => constant.to_string(),
            None => field
                .initial_value
                .iter()
                .map(|byte| if byte.is_ascii() { char::from(*byte) } else { '?' })
                .collect(),
        };

        let type_info = QuickTypeRecord::from_sig(&field.sig).substitute(map);

        let mut declaration = format!("{accessor} ");
        if !modifier.is_empty() {
            declaration.push_str(modifier);
            declaration.push(' ');
        }
        declaration.push_str(&type_info.name);
        declaration.push(' ');
        declaration.push_str(&field.name);
        if let Some(constant) = &field.constant {
            declaration.push_str(" = ");
            declaration.push_str(&default_literal(constant));
        }

        FieldRecord {
            name: field.name.clone(),
            type_info,
            accessor,
            modifier: modifier.to_string(),
            is_static,
            is_constant,
            is_readonly,
            value,
            attributes: AttributeRecord::from_list(&field.custom_attributes),
            implemented_type: implemented_type.clone(),
            declaration,
            is_generated: field.name == ENUM_VALUE_FIELD
                || field.has_attribute(COMPILER_GENERATED_ATTRIBUTE),
            should_ignore: accessor.is_hidden(ignore_private),
        }
    }

    /// Key under which an inherited field is hidden by a more derived declaration
    #[must_use]
    pub fn identity_key(&self) -> String {
        self.name.clone()
    }

    /// Documentation identifier (`F:Game.Stats.Max`)
    #[must_use]
    pub fn doc_id(&self) -> String {
        docid::compose(DocIdKind::Field, &self.implemented_type, &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        builder::{FieldDefBuilder, TypeDefBuilder},
        definitions::ConstantValue,
        flags::FieldAccessFlags,
        signature::{PrimitiveKind, TypeSig},
    };

    fn owner() -> QuickTypeRecord {
        QuickTypeRecord::from_definition(&TypeDefBuilder::class("Game", "Stats").build().unwrap())
    }

    #[test]
    fn test_modifiers() {
        let map = SubstitutionMap::default();
        let cases = [
            (
                FieldDefBuilder::new("Max", PrimitiveKind::I4.into())
                    .constant(ConstantValue::I4(10)),
                "public const int Max = 10",
            ),
            (
                FieldDefBuilder::new("Title", PrimitiveKind::String.into())
                    .constant(ConstantValue::String("Hero".into())),
                "public const string Title = \"Hero\"",
            ),
            (
                FieldDefBuilder::new("Empty", TypeSig::named("Game", "Stats"))
                    .modifiers(FieldModifiers::STATIC | FieldModifiers::INIT_ONLY),
                "public static readonly Stats Empty",
            ),
            (
                FieldDefBuilder::new("count", PrimitiveKind::U2.into())
                    .access(FieldAccessFlags::FAMILY)
                    .modifiers(FieldModifiers::INIT_ONLY),
                "protected readonly ushort count",
            ),
            (
                FieldDefBuilder::new("Shared", PrimitiveKind::Boolean.into())
                    .modifiers(FieldModifiers::STATIC),
                "public static bool Shared",
            ),
        ];

        for (builder, expected) in cases {
            let record = FieldRecord::new(&builder.build().unwrap(), &owner(), &map, true);
            assert_eq!(record.declaration, expected);
            assert!(!record.should_ignore);
        }
    }

    #[test]
    fn test_ignored_fields() {
        let map = SubstitutionMap::default();
        let hidden = FieldDefBuilder::new("secret", PrimitiveKind::I4.into())
            .access(FieldAccessFlags::PRIVATE)
            .build()
            .unwrap();
        assert!(FieldRecord::new(&hidden, &owner(), &map, true).should_ignore);
        assert!(!FieldRecord::new(&hidden, &owner(), &map, false).should_ignore);

        let backing = FieldDefBuilder::new("<Health>k__BackingField", PrimitiveKind::I4.into())
            .access(FieldAccessFlags::PRIVATE)
            .compiler_generated()
            .build()
            .unwrap();
        assert!(FieldRecord::new(&backing, &owner(), &map, false).is_generated);
    }

    #[test]
    fn test_initial_value() {
        let field = FieldDefBuilder::new("Magic", TypeSig::sz_array(PrimitiveKind::U1.into()))
            .modifiers(FieldModifiers::STATIC)
            .initial_value(b"DOCS".to_vec())
            .build()
            .unwrap();
        let record = FieldRecord::new(&field, &owner(), &SubstitutionMap::default(), true);

        assert_eq!(record.value, "DOCS");
        assert_eq!(record.declaration, "public static byte[] Magic");
        assert!(!record.is_constant);
        assert_eq!(record.doc_id(), "F:Game.Stats.Magic");
    }
}
