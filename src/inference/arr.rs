use serde_json::Value;

use super::{dedup, merge_objects};
use crate::ir::TypeNode;

pub(super) fn infer_array(xs: &[Value]) -> TypeNode {
    let items = xs.iter().map(super::infer).collect::<Vec<_>>();
    TypeNode::array(unify_items(items))
}

/// Fold the element types of one array into a single item type:
/// - nothing observed → `any`
/// - one distinct shape → that shape
/// - only objects → one merged object (keys missing somewhere become optional)
/// - otherwise → union of the distinct shapes, first-seen order
pub fn unify_items(items: Vec<TypeNode>) -> TypeNode {
    let mut unique = dedup(items);
    match unique.len() {
        0 => TypeNode::Any,
        1 => unique.remove(0),
        _ => {
            let shapes = unique.iter().filter_map(TypeNode::as_object).collect::<Vec<_>>();
            if shapes.len() == unique.len() {
                TypeNode::Object(merge_objects(&shapes))
            } else {
                TypeNode::union(unique)
            }
        }
    }
}
