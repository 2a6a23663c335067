//! JSON value → raw type tree.
//!
//! Bottom-up and total: every JSON value maps to some `TypeNode`, nothing
//! here can fail. Names and references are not this module's business; the
//! only unification performed is across array elements, which dedups by
//! structural hash and folds object variants into one shape.
//!
//! Design goals:
//! - Canonical output: object keys sorted, unions unique by hash.
//! - Hash-based equality is independent of property/member order.
//! - Optional properties arise only from merging sibling objects.
pub mod arr;
pub mod hash;
pub mod obj;

use serde_json::{Map, Value};

use crate::ir::{Property, TypeNode};

pub use arr::unify_items;
pub use hash::{dedup, structural_hash};
pub use obj::merge_objects;

// ------------------------------ Observe ---------------------------------- //

pub fn infer(v: &Value) -> TypeNode {
    match v {
        Value::Null => TypeNode::Null,
        Value::Bool(_) => TypeNode::Boolean,
        Value::Number(_) => TypeNode::Number,
        Value::String(_) => TypeNode::String,
        Value::Array(xs) => arr::infer_array(xs),
        Value::Object(m) => infer_object(m),
    }
}

/// A missing value is untyped (`any`), which is not the same thing as an
/// optional property.
pub fn infer_optional(v: Option<&Value>) -> TypeNode {
    v.map_or(TypeNode::Any, infer)
}

fn infer_object(map: &Map<String, Value>) -> TypeNode {
    let properties = map
        .iter()
        .map(|(k, v)| Property::required(k.clone(), infer(v)))
        .collect();
    TypeNode::object(properties)
}

// ------------------------------- Tests ------------------------------------ //
