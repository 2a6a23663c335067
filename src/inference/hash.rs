use std::collections::HashSet;

use crate::ir::{quote, TypeNode};

/// Canonical fingerprint: two nodes are structurally equal iff their hashes
/// are equal. Object entries and union members are sorted before joining,
/// so the input order of either never shows up in the result.
///
/// - `s` `n` `b` `null` `any` for the leaves, `ref:Name` for references
/// - `[item]` for arrays, `(a|b)` for unions
/// - `{"key"?:h,...}` for objects; the `?` keeps optional and required apart
pub fn structural_hash(node: &TypeNode) -> String {
    match node {
        TypeNode::String => "s".to_string(),
        TypeNode::Number => "n".to_string(),
        TypeNode::Boolean => "b".to_string(),
        TypeNode::Null => "null".to_string(),
        TypeNode::Any => "any".to_string(),
        TypeNode::Reference { name } => format!("ref:{name}"),
        TypeNode::Array { item_type } => format!("[{}]", structural_hash(item_type)),
        TypeNode::Union { types } => {
            let mut members = types.iter().map(structural_hash).collect::<Vec<_>>();
            members.sort();
            format!("({})", members.join("|"))
        }
        TypeNode::Object(shape) => {
            // keys are JSON-quoted so `:` `,` `?` inside a key can't forge a match
            let mut entries = shape
                .properties
                .iter()
                .map(|p| {
                    let marker = if p.optional { "?" } else { "" };
                    let entry = format!("{}{marker}:{}", quote(&p.key), structural_hash(&p.ty));
                    (p.key.as_str(), entry)
                })
                .collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let body = entries.into_iter().map(|(_, e)| e).collect::<Vec<_>>();
            format!("{{{}}}", body.join(","))
        }
    }
}

/// Unique nodes by structural hash, first-seen order.
pub fn dedup<I>(nodes: I) -> Vec<TypeNode>
where
    I: IntoIterator<Item = TypeNode>,
{
    let mut seen = HashSet::new();
    nodes
        .into_iter()
        .filter(|node| seen.insert(structural_hash(node)))
        .collect()
}
