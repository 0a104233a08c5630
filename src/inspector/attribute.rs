//! Custom attribute records and their source-level declarations.

use crate::{
    inspector::{parameter::quote, quicktype::QuickTypeRecord},
    metadata::definitions::{CustomAttribute, CustomAttributeArgument},
};

/// One constructor argument or named field/property assignment of an attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArgumentRecord {
    /// Constructor parameter name, or the assigned field/property name
    pub name: String,
    /// The value as a source literal (`"text"`, `true`, `typeof(int)`)
    pub value: String,
    /// Type of the argument
    pub type_info: QuickTypeRecord,
    /// Whether a named argument targets a field rather than a property
    pub is_field: bool,
}

/// An inspected custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRecord {
    /// The attribute class
    pub type_info: QuickTypeRecord,
    /// Positional constructor arguments
    pub constructor_args: Vec<AttributeArgumentRecord>,
    /// Named field and property assignments
    pub named_args: Vec<AttributeArgumentRecord>,
    /// Argument list as written inside the parentheses
    pub parameter_declaration: String,
    /// Complete declaration (`[System.ObsoleteAttribute("Use Move", true)]`)
    pub declaration: String,
}

impl AttributeRecord {
    /// Inspects one custom attribute
    #[must_use]
    pub fn new(attribute: &CustomAttribute) -> Self {
        let constructor_args: Vec<AttributeArgumentRecord> = attribute
            .fixed_args
            .iter()
            .enumerate()
            .map(|(index, arg)| AttributeArgumentRecord {
                name: attribute
                    .constructor_params
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| format!("arg{index}")),
                value: literal(arg),
                type_info: QuickTypeRecord::from_sig(&arg.type_sig()),
                is_field: false,
            })
            .collect();

        let named_args: Vec<AttributeArgumentRecord> = attribute
            .named_args
            .iter()
            .map(|named| AttributeArgumentRecord {
                name: named.name.clone(),
                value: literal(&named.value),
                type_info: QuickTypeRecord::from_sig(&named.value.type_sig()),
                is_field: named.is_field,
            })
            .collect();

        let parameters: Vec<String> = constructor_args
            .iter()
            .map(|arg| arg.value.clone())
            .chain(
                named_args
                    .iter()
                    .map(|arg| format!("{} = {}", arg.name, arg.value)),
            )
            .collect();
        let parameter_declaration = parameters.join(", ");

        let type_info = QuickTypeRecord::from_sig(&attribute.attribute_type);
        let declaration = if parameter_declaration.is_empty() {
            format!("[{}]", type_info.full_name)
        } else {
            format!("[{}({})]", type_info.full_name, parameter_declaration)
        };

        AttributeRecord {
            type_info,
            constructor_args,
            named_args,
            parameter_declaration,
            declaration,
        }
    }

    /// Inspects a list of custom attributes
    #[must_use]
    pub fn from_list(attributes: &[CustomAttribute]) -> Vec<Self> {
        attributes.iter().map(AttributeRecord::new).collect()
    }
}

/// Renders an attribute argument as a source literal
fn literal(arg: &CustomAttributeArgument) -> String {
    match arg {
        CustomAttributeArgument::Null => "null".to_string(),
        CustomAttributeArgument::Bool(value) => value.to_string(),
        CustomAttributeArgument::Char(value) => quote(&value.to_string(), '\''),
        CustomAttributeArgument::I1(value) => value.to_string(),
        CustomAttributeArgument::U1(value) => value.to_string(),
        CustomAttributeArgument::I2(value) => value.to_string(),
        CustomAttributeArgument::U2(value) => value.to_string(),
        CustomAttributeArgument::I4(value) => value.to_string(),
        CustomAttributeArgument::U4(value) => value.to_string(),
        CustomAttributeArgument::I8(value) => value.to_string(),
        CustomAttributeArgument::U8(value) => value.to_string(),
        CustomAttributeArgument::R4(value) => value.to_string(),
        CustomAttributeArgument::R8(value) => value.to_string(),
        CustomAttributeArgument::String(value) => quote(value, '"'),
        CustomAttributeArgument::Type(sig) => {
            format!("typeof({})", QuickTypeRecord::from_sig(sig).name)
        }
        CustomAttributeArgument::Enum(sig, value) => {
            format!("({}){}", QuickTypeRecord::from_sig(sig).name, literal(value))
        }
        CustomAttributeArgument::Array(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("new[] {{ {} }}", items.join(", "))
        }
    }
}
