//! Naming pass: pull every object shape out of the raw tree into a registry
//! under a deterministic, collision-free name, leaving a reference in its
//! place.
//!
//! Names are threaded top-down: a property's shape is named after its key,
//! an array item after the singular of its container, union member `i` after
//! `<Container>Union<i>`. Children register before their parent, so the
//! registry reads leaves-first.
pub mod naming;

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::ir::{Property, Registry, Shape, TypeNode};

pub use naming::{capitalize, singular, TypeName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// `Reference` when the input root was an object.
    pub root: TypeNode,
    pub registry: Registry,
}

/// The root name is claimed up front: a top-level object is registered under
/// exactly `root_name`, and no nested shape can take it (for non-object roots
/// it is the alias name).
pub fn transform(tree: TypeNode, root_name: &str) -> Transformed {
    let mut cx = NamingContext::default();
    cx.used.insert(root_name.to_string(), 1);
    cx.taken.insert(root_name.to_string());
    let root = match tree {
        TypeNode::Object(shape) => {
            let shape = cx.extract_children(shape);
            cx.registry.insert(root_name.to_string(), shape);
            TypeNode::reference(root_name)
        }
        other => cx.traverse(other, root_name),
    };
    trace!(root = root_name, shapes = cx.registry.len(), "extracted object shapes");
    Transformed { root, registry: cx.registry }
}

/// Lives for exactly one `transform` call.
#[derive(Default)]
struct NamingContext {
    registry: Registry,
    used: HashMap<String, usize>,
    /// Every name handed out so far, the root name included.
    taken: HashSet<String>,
}

impl NamingContext {
    fn traverse(&mut self, node: TypeNode, suggested: &str) -> TypeNode {
        match node {
            TypeNode::Object(shape) => {
                let shape = self.extract_children(shape);
                let name = self.unique_name(suggested);
                self.registry.insert(name.clone(), shape);
                TypeNode::reference(name)
            }
            TypeNode::Array { item_type } => {
                TypeNode::array(self.traverse(*item_type, &singular(suggested)))
            }
            TypeNode::Union { types } => TypeNode::union(
                types
                    .into_iter()
                    .enumerate()
                    .map(|(i, t)| self.traverse(t, &format!("{suggested}Union{i}")))
                    .collect(),
            ),
            leaf @ (TypeNode::String
            | TypeNode::Number
            | TypeNode::Boolean
            | TypeNode::Null
            | TypeNode::Any
            | TypeNode::Reference { .. }) => leaf,
        }
    }

    fn extract_children(&mut self, shape: Shape) -> Shape {
        let properties = shape
            .properties
            .into_iter()
            .map(|p| {
                let ty = self.traverse(p.ty, &capitalize(&p.key));
                Property { ty, ..p }
            })
            .collect();
        Shape::new(properties)
    }

    /// `base`, else `base1`, `base2`, ... whichever is free first.
    fn unique_name(&mut self, base: &str) -> String {
        let next = self.used.entry(base.to_string()).or_insert(0);
        loop {
            let candidate = match *next {
                0 => base.to_string(),
                n => format!("{base}{n}"),
            };
            *next += 1;
            if self.taken.insert(candidate.clone()) {
                if candidate != base {
                    trace!(base, resolved = %candidate, "name collision");
                }
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer;
    use serde_json::json;

    fn names(t: &Transformed) -> Vec<&str> {
        t.registry.names().collect()
    }

    #[test]
    fn extracts_simple_object() {
        let t = transform(infer(&json!({"name": "x", "age": 1})), "User");
        assert_eq!(t.root, TypeNode::reference("User"));
        assert_eq!(names(&t), ["User"]);
    }

    #[test]
    fn nested_objects_register_children_first() {
        let t = transform(infer(&json!({"user": {"name": "x"}, "active": true})), "Response");
        assert_eq!(names(&t), ["User", "Response"]);
        let response = t.registry.get("Response").unwrap();
        assert_eq!(response.get("user").unwrap().ty, TypeNode::reference("User"));
    }

    #[test]
    fn array_items_take_singular_names() {
        let t = transform(infer(&json!({"users": [{"name": "x"}]})), "ApiResponse");
        assert_eq!(names(&t), ["User", "ApiResponse"]);
        let root = t.registry.get("ApiResponse").unwrap();
        assert_eq!(root.get("users").unwrap().ty, TypeNode::array(TypeNode::reference("User")));
    }

    #[test]
    fn non_object_root_is_returned_transformed() {
        let t = transform(infer(&json!([1, 2])), "Numbers");
        assert_eq!(t.root, TypeNode::array(TypeNode::Number));
        assert!(t.registry.is_empty());

        let t = transform(infer(&json!([{"a": 1}])), "Items");
        assert_eq!(t.root, TypeNode::array(TypeNode::reference("Item")));
        assert_eq!(names(&t), ["Item"]);
    }

    #[test]
    fn union_members_are_numbered() {
        let t = transform(infer(&json!([{"a": 1}, "x"])), "Rows");
        assert_eq!(
            t.root,
            TypeNode::array(TypeNode::union(vec![
                TypeNode::reference("RowUnion0"),
                TypeNode::String,
            ]))
        );
    }

    #[test]
    fn colliding_names_get_numeric_suffixes() {
        let t = transform(
            infer(&json!({
                "a": {"item": {"x": 1}},
                "b": {"item": {"y": 2}},
                "c": {"item": {"z": 3}}
            })),
            "Root",
        );
        assert_eq!(names(&t), ["Item", "A", "Item1", "B", "Item2", "C", "Root"]);
    }

    #[test]
    fn suffix_skips_names_already_taken_literally() {
        // `item1` claims `Item1` before the second `Item` collides
        let t = transform(
            infer(&json!({
                "a": {"item1": {"q": 1}},
                "b": {"item": {"x": 1}},
                "c": {"item": {"y": 2}}
            })),
            "Root",
        );
        assert_eq!(names(&t), ["Item1", "A", "Item", "B", "Item2", "C", "Root"]);
    }

    #[test]
    fn unrelated_identical_shapes_are_not_merged() {
        let t = transform(infer(&json!({"user": {"name": "x"}, "admin": {"name": "y"}})), "Root");
        assert_eq!(names(&t), ["Admin", "User", "Root"]);
        assert_eq!(t.registry.get("Admin"), t.registry.get("User"));
    }

    #[test]
    fn punctuation_only_keys_fall_back() {
        let t = transform(infer(&json!({"--": {"a": 1}, "@@": {"b": 1}})), "Root");
        assert_eq!(names(&t), ["Field", "Field1", "Root"]);
    }

    #[test]
    fn root_name_is_reserved() {
        let t = transform(infer(&json!({"root": {"a": 1}})), "Root");
        assert_eq!(t.root, TypeNode::reference("Root"));
        assert_eq!(names(&t), ["Root1", "Root"]);

        // array root: the alias keeps `Root`, the element shape moves aside
        let t = transform(infer(&json!([{"a": 1}])), "Root");
        assert_eq!(t.root, TypeNode::array(TypeNode::reference("Root1")));
        assert_eq!(names(&t), ["Root1"]);
    }

    #[test]
    fn suffixed_candidate_skips_reserved_root_name() {
        let nested = json!({"a": {"item": {"x": 1}}, "b": {"item": {"y": 2}}});
        let t = transform(infer(&nested), "Item1");
        assert_eq!(t.root, TypeNode::reference("Item1"));
        assert_eq!(names(&t), ["Item", "A", "Item2", "B", "Item1"]);
        let b = t.registry.get("B").unwrap();
        assert_eq!(b.get("item").unwrap().ty, TypeNode::reference("Item2"));
        assert_eq!(t.registry.get("Item1").unwrap().properties.len(), 2);

        // array root: `Item1` stays free for the alias
        let t = transform(infer(&json!([nested])), "Item1");
        assert_eq!(t.root, TypeNode::array(TypeNode::reference("Item11")));
        assert_eq!(names(&t), ["Item", "A", "Item2", "B", "Item11"]);
        assert!(!t.registry.contains("Item1"));
    }

    #[test]
    fn fresh_context_per_call() {
        let tree = infer(&json!({"meta": {"x": 1}}));
        let first = transform(tree.clone(), "Root");
        let second = transform(tree, "Root");
        assert_eq!(first, second);
    }
}
