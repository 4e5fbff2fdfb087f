//! Resource tree: the nested shape of a translation bundle.
//!
//! Bundles are arbitrarily nested JSON objects. Instead of indexing into raw
//! `serde_json::Value`s, every bundle is converted into a `Node` tree so that
//! branches and leaves are distinguished by type and the dotted-path resolver
//! has a single place to live.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A nested mapping from key segment to node. Ordered so that assembled
/// tables compare and print deterministically.
pub type ResourceMap = BTreeMap<String, Node>;

/// A single position in a resource tree.
///
/// `Value` never holds a JSON object: objects are always converted into
/// `Branch`. Arrays, numbers, booleans and `null` stay as opaque leaf values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Branch(ResourceMap),
    Value(Value),
}

impl Node {
    /// Create a string leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Value(Value::String(value.into()))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn as_branch(&self) -> Option<&ResourceMap> {
        match self {
            Node::Branch(map) => Some(map),
            Node::Value(_) => None,
        }
    }

    /// Render a leaf as translation text.
    ///
    /// Strings are returned as-is, numbers and booleans are stringified.
    /// Branches, arrays and `null` have no text form.
    pub fn leaf_text(&self) -> Option<String> {
        match self {
            Node::Value(Value::String(s)) => Some(s.clone()),
            Node::Value(Value::Number(n)) => Some(n.to_string()),
            Node::Value(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Short name of the JSON kind held by this node, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Branch(_) => "object",
            Node::Value(value) => json_kind(value),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(object) => Node::Branch(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Node::from(value)))
                    .collect(),
            ),
            other => Node::Value(other),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::text(value)
    }
}

/// Name of a JSON value's kind ("string", "array", ...).
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Walk a dot-delimited key path through a resource map.
///
/// There is no escape for literal dots: a segment that itself contains `.`
/// can never be addressed. An empty key resolves to nothing.
pub fn resolve_path<'a>(root: &'a ResourceMap, key: &str) -> Option<&'a Node> {
    if key.is_empty() {
        return None;
    }

    let mut segments = key.split('.');
    let first = segments.next()?;
    let mut current = root.get(first)?;

    for segment in segments {
        current = current.as_branch()?.get(segment)?;
    }

    Some(current)
}

/// Flatten a resource map into `(dotted path, leaf)` pairs in key order.
///
/// Empty branches contribute nothing.
pub fn leaves(root: &ResourceMap) -> Vec<(String, &Node)> {
    let mut out = Vec::new();
    collect_leaves(root, "", &mut out);
    out
}

fn collect_leaves<'a>(map: &'a ResourceMap, prefix: &str, out: &mut Vec<(String, &'a Node)>) {
    for (key, node) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match node {
            Node::Branch(children) => collect_leaves(children, &path, out),
            Node::Value(_) => out.push((path, node)),
        }
    }
}
