//! Deep merge of resource maps.
//!
//! Merging is right-biased: the source wins on every colliding key, except
//! when both sides hold a branch, in which case the branches are merged
//! recursively. Arrays and `null` are leaves like any other scalar, so an
//! overlay can replace a list but never patch it element-wise.

use crate::i18n::node::{Node, ResourceMap};

/// Merge `source` over `target`, returning a new map. Neither input is touched.
pub fn deep_merge(target: &ResourceMap, source: &ResourceMap) -> ResourceMap {
    let mut merged = target.clone();

    for (key, incoming) in source {
        let value = match (merged.get(key), incoming) {
            (Some(Node::Branch(existing)), Node::Branch(overlay)) => {
                Node::Branch(deep_merge(existing, overlay))
            }
            _ => incoming.clone(),
        };
        merged.insert(key.clone(), value);
    }

    merged
}
