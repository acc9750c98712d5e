//! API-level model: categories, functions, enums and the aggregate [`Api`].
//!
//! Nothing here knows about C syntax; rendering lives in `codegen`/`emit`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::synonyms::SynonymMap;

/// Where a declaration came from.
///
/// The derived ordering is the category precedence used everywhere: every
/// version sorts before every extension, versions ascend numerically and
/// extensions compare by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// A core version, stored in tenths (`2.1` -> `21`).
    Version(u32),
    /// An extension, by full name (`GL_ARB_vertex_buffer_object`).
    Extension(String),
}

impl Category {
    /// Decode a category attribute. Decimal numbers are versions; anything
    /// else names an extension.
    pub fn decode(name: &str) -> Self {
        parse_version_tenths(name).map_or_else(|| Self::Extension(name.to_string()), Self::Version)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(tenths) => write!(f, "GL {}.{}", tenths / 10, tenths % 10),
            Self::Extension(name) => f.write_str(name),
        }
    }
}

/// `"1.5"` -> 15, `"2"` -> 20. Further fractional digits round the tenths.
fn parse_version_tenths(name: &str) -> Option<u32> {
    let trimmed = name.trim();
    let (major, minor) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(major) || !all_digits(minor) || (major.is_empty() && minor.is_empty()) {
        return None;
    }
    let digit = |index: usize| minor.as_bytes().get(index).map_or(0, |b| u32::from(b - b'0'));
    let major: u32 = if major.is_empty() { 0 } else { major.parse().ok()? };
    let round_up = u32::from(digit(1) >= 5);
    major.checked_mul(10)?.checked_add(digit(0) + round_up)
}

/// One formal argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Argument name, used by the stub when forwarding the call.
    pub name: String,
    /// C type text, carried through untouched.
    pub ty: String,
}

/// Parameters and return type of a function. Padding parameters are already
/// removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// C return type; `None` means `void`.
    pub return_type: Option<String>,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
}

/// A single function declaration under one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Declared name, without the native prefix.
    pub name: String,
    /// Parameters and return type.
    pub signature: Signature,
    /// Another function this one is synonymous with.
    pub alias: Option<String>,
    /// Category the declaration appeared under.
    pub category: Category,
}

/// An enumerated constant, emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    /// Declared name, without the native prefix.
    pub name: String,
    /// Value text, decimal or hex, as written.
    pub value: String,
}

/// Everything read from the declaration fragments.
#[derive(Debug, Clone, Default)]
pub struct Api {
    functions: Vec<Function>,
    by_name: BTreeMap<String, Vec<usize>>,
    enums: Vec<Enum>,
    synonyms: SynonymMap,
    extensions: BTreeSet<String>,
}

impl Api {
    /// Record a function declaration and its alias edge, if any.
    pub fn add_function(&mut self, function: Function) {
        match &function.alias {
            Some(alias) => self.synonyms.add_alias(&function.name, alias),
            None => {
                self.synonyms.add_singleton(&function.name);
            }
        }
        self.by_name
            .entry(function.name.clone())
            .or_default()
            .push(self.functions.len());
        self.functions.push(function);
    }

    /// Record an enum declaration.
    pub fn add_enum(&mut self, value: Enum) {
        self.enums.push(value);
    }

    /// Note that an extension category was seen. Duplicates are absorbed.
    pub fn add_extension(&mut self, name: &str) {
        if !self.extensions.contains(name) {
            self.extensions.insert(name.to_string());
        }
    }

    /// Every function declaration in load order, re-declarations included.
    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Every declaration of `name`, in load order. Empty for names that only
    /// appear as an alias target.
    pub fn declarations_of<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Function> + use<'a> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(|&index| &self.functions[index])
    }

    /// Distinct declared function names, ascending.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Enums in declaration order.
    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    /// Extension names, ascending.
    pub fn extensions(&self) -> &BTreeSet<String> {
        &self.extensions
    }

    /// Synonym classes over function names.
    pub fn synonyms(&self) -> &SynonymMap {
        &self.synonyms
    }

    /// One declaration per distinct name (the first one loaded), sorted by
    /// name. This is the set of functions that get a pointer typedef.
    pub fn unique_functions(&self) -> Vec<&Function> {
        self.by_name
            .values()
            .filter_map(|indices| indices.first())
            .map(|&index| &self.functions[index])
            .collect()
    }
}
