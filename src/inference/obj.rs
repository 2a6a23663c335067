use std::collections::BTreeMap;

use super::dedup;
use crate::ir::{Property, Shape, TypeNode};

/// Merge sibling object shapes into one.
///
/// The result carries every key seen in any input. A key is optional when at
/// least one input lacks it. The types seen for
/// a key are deduplicated and then reconciled by `merge_property_types`.
pub fn merge_objects(shapes: &[&Shape]) -> Shape {
    let total = shapes.len();
    let mut by_key: BTreeMap<&str, FieldC> = BTreeMap::new();
    for shape in shapes {
        for p in &shape.properties {
            let field = by_key.entry(p.key.as_str()).or_default();
            field.types.push(p.ty.clone());
            field.present_in += 1;
        }
    }

    let properties = by_key
        .into_iter()
        .map(|(key, field)| Property {
            key: key.to_string(),
            optional: field.present_in < total,
            ty: merge_property_types(field.types),
        })
        .collect();

    Shape::new(properties)
}

#[derive(Default)]
struct FieldC {
    types: Vec<TypeNode>,
    present_in: usize,
}

fn merge_property_types(types: Vec<TypeNode>) -> TypeNode {
    let mut unique = dedup(types);

    // several object variants → one object
    if unique.len() > 1 && unique.iter().all(|t| t.as_object().is_some()) {
        let shapes = unique.iter().filter_map(TypeNode::as_object).collect::<Vec<_>>();
        unique = vec![TypeNode::Object(merge_objects(&shapes))];
    }

    // several arrays of objects → one array of the merged object
    if unique.len() > 1 {
        let items = unique
            .iter()
            .filter_map(|t| t.item_type()?.as_object())
            .collect::<Vec<_>>();
        if items.len() == unique.len() {
            unique = vec![TypeNode::array(TypeNode::Object(merge_objects(&items)))];
        }
    }

    // a concrete element type beats `any[]`
    let has_any_array = unique.iter().any(TypeNode::is_any_array);
    let has_concrete_array = unique
        .iter()
        .any(|t| t.item_type().is_some_and(|item| *item != TypeNode::Any));
    if has_any_array && has_concrete_array {
        unique.retain(|t| !t.is_any_array());
    }

    match unique.len() {
        0 => TypeNode::Any,
        1 => unique.remove(0),
        _ => TypeNode::union(unique),
    }
}
