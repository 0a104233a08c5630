//! Name algebra over rendered type names.
//!
//! Type references are kept as [`TypeSig`](crate::metadata::signature::TypeSig) trees for as long
//! as possible, but records expose several string forms of every name:
//!
//! - the *unlocalized* name, arity-mangled as in metadata (`` List`1 ``)
//! - the *localized* name, with arity placeholders replaced by argument lists (`List<T>`)
//! - the *friendly* name, with framework types replaced by their keywords (`List<int>`)
//! - the *display* name, without namespaces (`Dictionary<string, int>`)
//!
//! The functions here convert between those forms. They only ever look at top-level brackets,
//! so nested instantiations (`Dictionary<string,List<int>>`) are handled correctly.

use std::{
    borrow::Cow,
    sync::LazyLock,
};

use regex::{Captures, Regex};

use crate::{Error, Result};

static GENERIC_NOTATION: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"`+(\d+)").ok());
static NAMESPACE_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+\.)+").ok());
static ARGUMENT_SEPARATOR: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r",(\w)").ok());
static NAMESPACE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(.*)\..*$").ok());
static NAME_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9_.`]+").ok());

fn replace_all<'t>(
    regex: &LazyLock<Option<Regex>>,
    text: &'t str,
    replacement: impl regex::Replacer,
) -> Cow<'t, str> {
    match regex.as_ref() {
        Some(regex) => regex.replace_all(text, replacement),
        None => Cow::Borrowed(text),
    }
}

/// Maps a framework type full name to its source keyword
#[must_use]
pub fn friendly_alias(full_name: &str) -> Option<&'static str> {
    Some(match full_name {
        "System.Boolean" => "bool",
        "System.Char" => "char",
        "System.Byte" => "byte",
        "System.SByte" => "sbyte",
        "System.UInt16" => "ushort",
        "System.Int16" => "short",
        "System.UInt32" => "uint",
        "System.Int32" => "int",
        "System.UInt64" => "ulong",
        "System.Int64" => "long",
        "System.Single" => "float",
        "System.Double" => "double",
        "System.Decimal" => "decimal",
        "System.String" => "string",
        "System.Object" => "object",
        "System.ValueType" => "struct",
        "System.Enum" => "enum",
        "System.Void" => "void",
        _ => return None,
    })
}

/// Returns the byte index of the `>` closing the `<` at `open`
fn matching_close(name: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, ch) in name[open..].char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits `inner` at commas that are not nested inside angle brackets
fn split_top_level(inner: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();

    for ch in inner.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    args.push(current.trim().to_string());
    args
}

/// Converts a localized name back to its arity-mangled form.
///
/// The arity is the number of top-level arguments inside the first angle-bracket group:
/// `Dictionary<string,List<int>>` becomes `` Dictionary`2 `` and `Pair<A>.Inner<B,C>` becomes
/// `` Pair`1 ``. Nested types separated by `/` keep their own arity (`Outer<A>/Inner<B>`
/// becomes `` Outer`1/Inner`1 ``). Names without brackets are returned unchanged.
#[must_use]
pub fn unlocalize(name: &str) -> String {
    let Some(lt) = name.find('<') else {
        return name.to_string();
    };
    let gt = matching_close(name, lt).unwrap_or(name.len());
    let count = split_top_level(&name[lt + 1..gt]).len();

    let unlocalized = format!("{}`{}", &name[..lt], count);
    match name.get(gt + 1..) {
        Some(rest) if rest.starts_with('/') => format!("{unlocalized}{}", unlocalize(rest)),
        _ => unlocalized,
    }
}

/// Replaces framework type names with their source keywords (`System.Int32` becomes `int`).
///
/// Only whole dotted names are replaced, wherever they occur (including inside argument
/// lists), so the operation is idempotent and never touches names like `System.ObjectModel`.
#[must_use]
pub fn make_friendly(name: &str) -> String {
    replace_all(&NAME_TOKEN, name, |caps: &Captures| {
        friendly_alias(&caps[0]).map_or_else(|| caps[0].to_string(), str::to_string)
    })
    .into_owned()
}

/// Replaces arity placeholders with argument lists.
///
/// If `name` already carries an argument list (`` List`1<System.Int32> ``) that list is used
/// and `generics` is ignored; otherwise arguments are consumed from the front of `generics`,
/// one placeholder at a time, so nested generic types receive their own slice
/// (`` Outer`1/Inner`1 `` with `[A, B]` becomes `Outer<A>/Inner<B>`). Arguments are localized
/// recursively and any suffix after the argument list (`[]`, `&`) is kept.
///
/// # Errors
/// Returns [`Error::MalformedGenericName`] if the placeholders ask for more arguments than
/// are available, or if the brackets are unbalanced.
pub fn localize(name: &str, generics: &[String]) -> Result<String> {
    if generics.is_empty() && !name.contains('<') {
        return Ok(name.to_string());
    }

    let (head, args, tail, explicit) = match name.find('<') {
        Some(lt) => {
            let gt = matching_close(name, lt)
                .ok_or_else(|| Error::MalformedGenericName(name.to_string()))?;
            let args = split_top_level(&name[lt + 1..gt])
                .iter()
                .map(|arg| localize(arg, &[]))
                .collect::<Result<Vec<_>>>()?;
            (&name[..lt], args, &name[gt + 1..], true)
        }
        None => (name, generics.to_vec(), "", false),
    };

    let Some(notation) = GENERIC_NOTATION.as_ref() else {
        return Ok(name.to_string());
    };

    let mut localized = String::with_capacity(name.len() + 16);
    let mut consumed = 0;
    let mut last = 0;
    for caps in notation.captures_iter(head) {
        let (Some(whole), Some(count)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let count: usize = count
            .as_str()
            .parse()
            .map_err(|_| Error::MalformedGenericName(name.to_string()))?;
        if consumed + count > args.len() {
            return Err(Error::MalformedGenericName(name.to_string()));
        }

        localized.push_str(&head[last..whole.start()]);
        localized.push('<');
        localized.push_str(&args[consumed..consumed + count].join(","));
        localized.push('>');
        consumed += count;
        last = whole.end();
    }
    localized.push_str(&head[last..]);

    if consumed == 0 && explicit {
        localized.push('<');
        localized.push_str(&args.join(","));
        localized.push('>');
    }
    localized.push_str(tail);

    Ok(localized)
}

/// Removes every namespace qualifier and spaces out argument separators
/// (`System.Collections.Generic.Dictionary<System.String,T>` becomes
/// `Dictionary<String, T>`).
#[must_use]
pub fn strip_namespace(name: &str) -> String {
    let stripped = replace_all(&NAMESPACE_PREFIX, name, "");
    replace_all(&ARGUMENT_SEPARATOR, &stripped, ", $1").into_owned()
}

/// Everything before the last `.` of an unlocalized name, or an empty string
#[must_use]
pub fn namespace_of(unlocalized: &str) -> String {
    if !unlocalized.contains('.') {
        return String::new();
    }
    replace_all(&NAMESPACE_NAME, unlocalized, "$1").into_owned()
}

/// Removes arity placeholders (`` List`1 `` becomes `List`)
#[must_use]
pub fn strip_generic_notation(name: &str) -> String {
    replace_all(&GENERIC_NOTATION, name, "").into_owned()
}

/// Top-level arguments of the first argument list in `name`
#[must_use]
pub fn generic_arguments(name: &str) -> Vec<String> {
    let Some(lt) = name.find('<') else {
        return Vec::new();
    };
    let gt = matching_close(name, lt).unwrap_or(name.len());
    split_top_level(&name[lt + 1..gt])
}
