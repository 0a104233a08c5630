//! Parameter records.

use crate::{
    inspector::{attribute::AttributeRecord, generics::SubstitutionMap, quicktype::QuickTypeRecord},
    metadata::{
        definitions::{ConstantValue, ParamDef},
        flags::ParamAttributes,
    },
};

/// An inspected method, indexer or delegate parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    /// Parameter name
    pub name: String,
    /// Parameter type, after generic substitution and without the by-ref wrapper
    pub type_info: QuickTypeRecord,
    /// `ref`, `out`, `in`, `params` or empty
    pub modifier: String,
    /// Whether the parameter is passed by reference
    pub is_by_ref: bool,
    /// Whether the parameter is optional
    pub is_optional: bool,
    /// Default value as a source literal
    pub default_value: Option<String>,
    /// Attributes applied to the parameter
    pub attributes: Vec<AttributeRecord>,
    /// Declaration as written in a parameter list (`out int count`, `string name = "x"`)
    pub declaration: String,
}

impl ParameterRecord {
    /// Inspects a parameter, binding type-level generic parameters through `map`
    #[must_use]
    pub fn new(param: &ParamDef, map: &SubstitutionMap) -> Self {
        let flags = param.attributes();
        let is_by_ref = param.sig.is_by_ref();

        let modifier = if is_by_ref {
            if flags.contains(ParamAttributes::OUT) {
                "out"
            } else if flags.contains(ParamAttributes::IN) {
                "in"
            } else {
                "ref"
            }
        } else if param.is_param_array() {
            "params"
        } else {
            ""
        };

        let type_info = QuickTypeRecord::from_sig(&param.sig).substitute(map);
        let default_value = param.default.as_ref().map(default_literal);

        let mut declaration = String::new();
        if !modifier.is_empty() {
            declaration.push_str(modifier);
            declaration.push(' ');
        }
        declaration.push_str(&type_info.name);
        declaration.push(' ');
        declaration.push_str(&param.name);
        if let Some(value) = &default_value {
            declaration.push_str(" = ");
            declaration.push_str(value);
        }

        ParameterRecord {
            name: param.name.clone(),
            type_info,
            modifier: modifier.to_string(),
            is_by_ref,
            is_optional: flags.contains(ParamAttributes::OPTIONAL) || default_value.is_some(),
            default_value,
            attributes: AttributeRecord::from_list(&param.custom_attributes),
            declaration,
        }
    }

    /// Inspects a parameter list
    #[must_use]
    pub fn from_list(params: &[ParamDef], map: &SubstitutionMap) -> Vec<Self> {
        params
            .iter()
            .map(|param| ParameterRecord::new(param, map))
            .collect()
    }
}

/// Renders a default value the way it is written in source
pub(crate) fn default_literal(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Null => "null".to_string(),
        ConstantValue::String(text) => quote(text, '"'),
        ConstantValue::Char(ch) => quote(&ch.to_string(), '\''),
        ConstantValue::Bool(flag) => flag.to_string(),
        other => other.to_string(),
    }
}

/// Wraps `text` in `delimiter`, escaping the delimiter, backslashes and control characters
pub(crate) fn quote(text: &str, delimiter: char) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\0' => quoted.push_str("\\0"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            ch if ch == delimiter => {
                quoted.push('\\');
                quoted.push(ch);
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push(delimiter);
    quoted
}

/// Joins the declarations of a parameter list (`int x, string y`)
#[must_use]
pub fn declaration_list(params: &[ParameterRecord]) -> String {
    params
        .iter()
        .map(|param| param.declaration.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        definitions::PARAM_ARRAY_ATTRIBUTE,
        signature::{PrimitiveKind, TypeSig},
    };

    fn make(name: &str, sig: TypeSig, flags: ParamAttributes, default: Option<ConstantValue>) -> ParamDef {
        ParamDef {
            name: name.to_string(),
            flags: flags.bits(),
            sig,
            default,
            custom_attributes: Vec::new(),
        }
    }

    #[test]
    fn test_modifiers() {
        let map = SubstitutionMap::default();
        let by_ref = TypeSig::by_ref(PrimitiveKind::I4.into());

        let out = ParameterRecord::new(&make("count", by_ref.clone(), ParamAttributes::OUT, None), &map);
        assert_eq!(out.declaration, "out int count");
        assert_eq!(out.type_info.name, "int");

        let input = ParameterRecord::new(&make("value", by_ref.clone(), ParamAttributes::IN, None), &map);
        assert_eq!(input.modifier, "in");

        let reference = ParameterRecord::new(&make("slot", by_ref, ParamAttributes::empty(), None), &map);
        assert_eq!(reference.declaration, "ref int slot");

        let mut items = make(
            "items",
            TypeSig::sz_array(PrimitiveKind::Object.into()),
            ParamAttributes::empty(),
            None,
        );
        items.custom_attributes.push(
            crate::metadata::builder::CustomAttributeBuilder::named(PARAM_ARRAY_ATTRIBUTE).build(),
        );
        assert_eq!(
            ParameterRecord::new(&items, &map).declaration,
            "params object[] items"
        );
    }

    #[test]
    fn test_defaults() {
        let map = SubstitutionMap::default();
        let cases = [
            (PrimitiveKind::String, ConstantValue::String("hero".into()), "string name = \"hero\""),
            (PrimitiveKind::Boolean, ConstantValue::Bool(false), "bool name = false"),
            (PrimitiveKind::Char, ConstantValue::Char('x'), "char name = 'x'"),
            (PrimitiveKind::Object, ConstantValue::Null, "object name = null"),
            (PrimitiveKind::R8, ConstantValue::R8(0.5), "double name = 0.5"),
        ];

        for (kind, value, expected) in cases {
            let record = ParameterRecord::new(
                &make("name", kind.into(), ParamAttributes::OPTIONAL | ParamAttributes::HAS_DEFAULT, Some(value)),
                &map,
            );
            assert_eq!(record.declaration, expected);
            assert!(record.is_optional);
        }
    }

    #[test]
    fn test_escaped_defaults() {
        let map = SubstitutionMap::default();
        let cases = [
            (PrimitiveKind::String, ConstantValue::String("say \"hi\"".into()), r#"string name = "say \"hi\"""#),
            (PrimitiveKind::String, ConstantValue::String(r"C:\saves".into()), r#"string name = "C:\\saves""#),
            (PrimitiveKind::String, ConstantValue::String("it's\n".into()), r#"string name = "it's\n""#),
            (PrimitiveKind::Char, ConstantValue::Char('\''), r"char name = '\''"),
            (PrimitiveKind::Char, ConstantValue::Char('\\'), r"char name = '\\'"),
            (PrimitiveKind::Char, ConstantValue::Char('"'), r#"char name = '"'"#),
        ];

        for (kind, value, expected) in cases {
            let record = ParameterRecord::new(
                &make("name", kind.into(), ParamAttributes::OPTIONAL | ParamAttributes::HAS_DEFAULT, Some(value)),
                &map,
            );
            assert_eq!(record.declaration, expected);
        }
    }

    #[test]
    fn test_substituted_type() {
        let map = SubstitutionMap::new(vec![PrimitiveKind::I8.into()]);
        let record = ParameterRecord::new(
            &make("item", TypeSig::type_param(0, "T"), ParamAttributes::empty(), None),
            &map,
        );
        assert_eq!(record.declaration, "long item");
        assert_eq!(record.type_info.declared_sig, TypeSig::type_param(0, "T"));
    }
}
