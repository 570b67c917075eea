//! Flat form state ↔ nested method arguments.
//!
//! A contract form names each input by its position in the argument tree,
//! joined by a separator: `"0"` is the first argument, `"1:2"` the third
//! element of the second argument, `"2:to"` a named member. Rebuilding the
//! argument list walks every key, creating lists or maps on demand, then
//! squeezes out the holes left behind by array rows the user removed.
//!
//! A segment is a list index only in canonical form (`0`, `17`, never `007`);
//! anything else is a map key.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::FormConfig;
use crate::error::FormError;
use crate::types::{ArgValue, FieldValue, FormFields};

/// The rebuilt argument tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArgs {
    root: ArgValue,
    separator: char,
}

impl MethodArgs {
    pub fn root(&self) -> &ArgValue {
        &self.root
    }

    pub fn into_inner(self) -> ArgValue {
        self.root
    }

    /// Separator of the form keys these arguments were rebuilt from.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Look up a path in the same syntax as the form keys, e.g. `"1:0"`.
    pub fn get_path(&self, path: &str) -> Option<&ArgValue> {
        self.root.get_path_with(path, self.separator)
    }

    /// Number of top-level arguments (or named entries for a keyed root).
    pub fn len(&self) -> usize {
        match &self.root {
            ArgValue::List(items) => items.len(),
            ArgValue::Map(entries) => entries.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The arguments in call order. Fails if the form keyed its top level
    /// by name instead of by position.
    pub fn into_positional(self) -> Result<Vec<ArgValue>, FormError> {
        match self.root {
            ArgValue::List(items) => Ok(items),
            _ => Err(FormError::NotPositional),
        }
    }
}

/// Rebuild method arguments from form state using the default config.
pub fn transform_form_data_to_method_args(fields: &FormFields) -> Result<MethodArgs, FormError> {
    unflatten(fields, &FormConfig::default())
}

/// Rebuild method arguments from form state.
///
/// Fields without a value are skipped. The root is a list unless no key
/// starts with an index and some key nests under a name. Named fields at a
/// list root, such as the native value input, are not method arguments and
/// are dropped.
pub fn unflatten(fields: &FormFields, config: &FormConfig) -> Result<MethodArgs, FormError> {
    let mut entries = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let Some(value) = value else {
            trace!(key = %key, "skipping empty form field");
            continue;
        };
        entries.push((key.as_str(), split_path(key, config.separator)?, value));
    }

    let keyed = !entries.iter().any(|(_, segments, _)| parse_index(segments[0]).is_some())
        && entries.iter().any(|(_, segments, _)| segments.len() > 1);
    let mut root = if keyed {
        Node::Map(IndexMap::new())
    } else {
        Node::Seq(Vec::new())
    };

    let mut assigned = 0usize;
    for (key, segments, value) in entries {
        if !keyed && parse_index(segments[0]).is_none() {
            trace!(key, "dropping named field at positional root");
            continue;
        }
        assign(&mut root, &segments, value.clone(), key, config)?;
        assigned += 1;
    }

    let mut holes = 0usize;
    let root = compact(root, &mut holes);
    debug!(fields = fields.len(), assigned, holes, "rebuilt method arguments from form");
    Ok(MethodArgs {
        root,
        separator: config.separator,
    })
}

/// Write an argument tree back out as flat form state.
///
/// A bare leaf at the root has no path and is not emitted.
pub fn flatten_args(args: &ArgValue, config: &FormConfig) -> FormFields {
    let mut out = FormFields::new();
    let mut prefix = String::new();
    flatten_into(args, &mut prefix, config.separator, &mut out);
    out
}

fn flatten_into(value: &ArgValue, prefix: &mut String, separator: char, out: &mut FormFields) {
    match value {
        ArgValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                descend(&i.to_string(), item, prefix, separator, out);
            }
        }
        ArgValue::Map(entries) => {
            for (k, v) in entries {
                descend(k, v, prefix, separator, out);
            }
        }
        ArgValue::Bool(b) if !prefix.is_empty() => {
            out.insert(prefix.clone(), Some(FieldValue::Bool(*b)));
        }
        ArgValue::String(s) if !prefix.is_empty() => {
            out.insert(prefix.clone(), Some(FieldValue::String(s.clone())));
        }
        _ => {}
    }
}

fn descend(
    segment: &str,
    child: &ArgValue,
    prefix: &mut String,
    separator: char,
    out: &mut FormFields,
) {
    let len = prefix.len();
    if !prefix.is_empty() {
        prefix.push(separator);
    }
    prefix.push_str(segment);
    flatten_into(child, prefix, separator, out);
    prefix.truncate(len);
}

// ─── Path walking ─────────────────────────────────────────────────────────────

/// Working tree: lists may still contain holes.
enum Node {
    Leaf(FieldValue),
    Seq(Vec<Option<Node>>),
    Map(IndexMap<String, Node>),
}

impl Node {
    /// The container a path continues into, chosen by its next segment.
    fn container_for(segment: &str) -> Node {
        if parse_index(segment).is_some() {
            Node::Seq(Vec::new())
        } else {
            Node::Map(IndexMap::new())
        }
    }

    fn is_container(&self) -> bool {
        !matches!(self, Node::Leaf(_))
    }
}

fn split_path(key: &str, separator: char) -> Result<Vec<&str>, FormError> {
    if key.is_empty() {
        return Err(FormError::InvalidPath {
            path: key.to_string(),
            reason: "empty key".into(),
        });
    }
    let segments: Vec<&str> = key.split(separator).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(FormError::InvalidPath {
            path: key.to_string(),
            reason: "empty path segment".into(),
        });
    }
    Ok(segments)
}

/// `Some(n)` for a canonical non-negative decimal.
fn parse_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

fn assign(
    node: &mut Node,
    segments: &[&str],
    value: FieldValue,
    key: &str,
    config: &FormConfig,
) -> Result<(), FormError> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(());
    };
    let conflict = || FormError::PathConflict { path: key.to_string() };

    let slot: &mut Option<Node> = match node {
        Node::Seq(items) => {
            let index = parse_index(head).ok_or_else(conflict)?;
            if let Some(max) = config.max_index.filter(|max| index > *max) {
                return Err(FormError::IndexOutOfRange {
                    path: key.to_string(),
                    index,
                    max,
                });
            }
            if items.len() <= index {
                items.resize_with(index + 1, || None);
            }
            &mut items[index]
        }
        Node::Map(entries) => {
            if rest.is_empty() {
                if entries.get(*head).is_some_and(Node::is_container) {
                    return Err(conflict());
                }
                entries.insert(head.to_string(), Node::Leaf(value));
                return Ok(());
            }
            let child = entries
                .entry(head.to_string())
                .or_insert_with(|| Node::container_for(rest[0]));
            return assign(child, rest, value, key, config);
        }
        Node::Leaf(_) => return Err(conflict()),
    };

    if rest.is_empty() {
        if slot.as_ref().is_some_and(Node::is_container) {
            return Err(conflict());
        }
        *slot = Some(Node::Leaf(value));
        return Ok(());
    }
    let child = slot.get_or_insert_with(|| Node::container_for(rest[0]));
    assign(child, rest, value, key, config)
}

/// Drop holes depth-first, keeping the order of what remains.
fn compact(node: Node, holes: &mut usize) -> ArgValue {
    match node {
        Node::Leaf(v) => v.into(),
        Node::Seq(items) => {
            let before = items.len();
            let kept: Vec<ArgValue> = items
                .into_iter()
                .flatten()
                .map(|child| compact(child, holes))
                .collect();
            *holes += before - kept.len();
            ArgValue::List(kept)
        }
        Node::Map(entries) => ArgValue::Map(
            entries
                .into_iter()
                .map(|(k, child)| (k, compact(child, holes)))
                .collect(),
        ),
    }
}
