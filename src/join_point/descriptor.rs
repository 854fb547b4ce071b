use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};

/// How a type can be instantiated.
///
/// Traits are always `Interface`. `Abstract` is for host frameworks that
/// describe types which exist only as a base for other types.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Concrete,
    Abstract,
    Interface,
}

/// Runtime identity of a type, keyed by its fully qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    full_name: String,
    simple_name: String,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describe a concrete type
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::named(std::any::type_name::<T>(), TypeKind::Concrete)
    }

    /// Describe a trait, usually written as `TypeDescriptor::interface::<dyn MyTrait>()`
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self::named(std::any::type_name::<T>(), TypeKind::Interface)
    }

    /// Describe a type that must not be used as a processor directly
    pub fn abstract_type<T: ?Sized + 'static>() -> Self {
        Self::named(std::any::type_name::<T>(), TypeKind::Abstract)
    }

    /// Describe a type by name, for hosts that configure processors from data
    pub fn named(full_name: impl Into<String>, kind: TypeKind) -> Self {
        let full_name = full_name.into();
        let simple_name = simple_name_of(&full_name);
        Self {
            full_name,
            simple_name,
            kind,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The type name without module path, generic arguments or `dyn` prefix
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_concrete(&self) -> bool {
        self.kind == TypeKind::Concrete
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

fn simple_name_of(full_name: &str) -> String {
    let name = full_name.trim();
    if name.starts_with(['(', '[', '&', '*']) {
        return strip_paths(name);
    }
    let name = name.split('<').next().unwrap_or(name);
    let name = name.split(" + ").next().unwrap_or(name);
    let name = name.trim().trim_start_matches("dyn ");
    name.rsplit("::").next().unwrap_or(name).to_string()
}

/// Drop the module path of every component of a compound type name,
/// keeping the surrounding punctuation: `(a::A, [b::B; 2])` -> `(A, [B; 2])`
fn strip_paths(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    // Start of the path segment currently being written to `out`
    let mut segment_start = 0;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}
