//! Method input descriptors, raw form values, and rebuilt method arguments.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between path segments in form keys unless configured otherwise.
pub const DEFAULT_SEPARATOR: char = ':';

// ─── ABI input descriptor ─────────────────────────────────────────────────────

/// One argument of a contract method, as declared in the ABI JSON.
///
/// The serde shape is the ABI one (`name`, `type`, `internalType`,
/// `components`), so descriptors can be read straight out of an ABI file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInput {
    #[serde(default)]
    pub name: String,
    /// Canonical ABI type, e.g. `uint256`, `address[3]`, `tuple[]`
    #[serde(rename = "type")]
    pub ty: String,
    /// Source-level type, e.g. `struct Pool.Key[]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    /// Tuple members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<MethodInput>>,
}

impl MethodInput {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            internal_type: None,
            components: None,
        }
    }

    pub fn with_internal_type(mut self, internal_type: impl Into<String>) -> Self {
        self.internal_type = Some(internal_type.into());
        self
    }

    pub fn with_components(mut self, components: Vec<MethodInput>) -> Self {
        self.components = Some(components);
        self
    }
}

// ─── Form state ───────────────────────────────────────────────────────────────

/// A leaf value held by a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    String(String),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Flat form state: path key → value. `None` marks a field that is present
/// in the form but has no value (a blank optional input, or the leftover of
/// a removed array row). In JSON it is written as `null`.
pub type FormFields = IndexMap<String, Option<FieldValue>>;

// ─── Rebuilt arguments ────────────────────────────────────────────────────────

/// A node of the nested argument tree rebuilt from form state.
///
/// Serializes as plain JSON: strings, booleans, arrays, objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    String(String),
    List(Vec<ArgValue>),
    Map(IndexMap<String, ArgValue>),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, ArgValue>> {
        match self {
            ArgValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// `true` for strings and booleans.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ArgValue::Bool(_) | ArgValue::String(_))
    }

    /// Walk a sequence of path segments. List segments must parse as indices.
    pub fn get_segments<'a, I>(&self, segments: I) -> Option<&ArgValue>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments.into_iter().try_fold(self, |node, seg| match node {
            ArgValue::List(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
            ArgValue::Map(entries) => entries.get(seg),
            _ => None,
        })
    }

    /// Look up a path in the default `:` syntax, e.g. `"0:amounts:1"`.
    pub fn get_path(&self, path: &str) -> Option<&ArgValue> {
        self.get_path_with(path, DEFAULT_SEPARATOR)
    }

    /// Look up a path whose segments are joined by `separator`.
    pub fn get_path_with(&self, path: &str, separator: char) -> Option<&ArgValue> {
        self.get_segments(path.split(separator))
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<FieldValue> for ArgValue {
    fn from(v: FieldValue) -> Self {
        match v {
            FieldValue::Bool(b) => ArgValue::Bool(b),
            FieldValue::String(s) => ArgValue::String(s),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::String(s) => write!(f, "{s}"),
            ArgValue::List(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            ArgValue::Map(entries) => {
                let parts: Vec<_> = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}
