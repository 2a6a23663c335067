//! TypeScript declarations from a transformed tree: one `export interface`
//! per registry entry (registry order), then an `export type` alias for the
//! root unless the root already is one of those interfaces.

use crate::ir::{Property, Registry, Shape, TypeNode};
use crate::transform::naming::is_safe_identifier;

#[derive(Debug, Default)]
pub struct Codegen {
    decls: Vec<String>,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, root: &TypeNode, registry: &Registry, root_name: &str) {
        for (name, shape) in registry.iter() {
            self.decls.push(interface_decl(name, shape));
        }
        if !matches!(root, TypeNode::Reference { .. }) {
            self.decls.push(format!("export type {root_name} = {};", render(root)));
        }
    }

    /// Declarations separated by a blank line, no trailing newline.
    pub fn into_string(self) -> String {
        self.decls.join("\n\n")
    }
}

pub fn emit(root: &TypeNode, registry: &Registry, root_name: &str) -> String {
    let mut cg = Codegen::new();
    cg.emit(root, registry, root_name);
    cg.into_string()
}

fn interface_decl(name: &str, shape: &Shape) -> String {
    if shape.properties.is_empty() {
        return format!("export interface {name} {{}}");
    }
    let body = shape
        .properties
        .iter()
        .map(|p| format!("  {};", property(p)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("export interface {name} {{\n{body}\n}}")
}

/// `key: T` / `key?: T`, quoting keys that aren't bare identifiers.
fn property(p: &Property) -> String {
    let key = if is_safe_identifier(&p.key) { p.key.clone() } else { p.quoted_key() };
    let marker = if p.optional { "?" } else { "" };
    format!("{key}{marker}: {}", render(&p.ty))
}

pub fn render(node: &TypeNode) -> String {
    match node {
        TypeNode::String => "string".to_string(),
        TypeNode::Number => "number".to_string(),
        TypeNode::Boolean => "boolean".to_string(),
        TypeNode::Null => "null".to_string(),
        TypeNode::Any => "any".to_string(),
        TypeNode::Reference { name } => name.clone(),
        TypeNode::Array { item_type } => match &**item_type {
            TypeNode::Union { .. } => format!("({})[]", render(item_type)),
            _ => format!("{}[]", render(item_type)),
        },
        TypeNode::Union { types } if types.is_empty() => "never".to_string(),
        TypeNode::Union { types } => types.iter().map(render).collect::<Vec<_>>().join(" | "),
        // only reachable for trees that skipped `transform`
        TypeNode::Object(shape) if shape.properties.is_empty() => "{}".to_string(),
        TypeNode::Object(shape) => {
            let props = shape.properties.iter().map(property).collect::<Vec<_>>();
            format!("{{ {} }}", props.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry(entries: Vec<(&str, Vec<Property>)>) -> Registry {
        entries
            .into_iter()
            .map(|(name, props)| (name.to_string(), Shape::new(props)))
            .collect()
    }

    #[test]
    fn simple_alias() {
        assert_eq!(
            emit(&TypeNode::String, &Registry::new(), "MyString"),
            "export type MyString = string;"
        );
    }

    #[test]
    fn array_alias() {
        let root = TypeNode::array(TypeNode::Number);
        assert_eq!(emit(&root, &Registry::new(), "Numbers"), "export type Numbers = number[];");
    }

    #[test]
    fn union_alias() {
        let root = TypeNode::union(vec![TypeNode::String, TypeNode::Number]);
        assert_eq!(
            emit(&root, &Registry::new(), "StringOrNumber"),
            "export type StringOrNumber = string | number;"
        );
    }

    #[test]
    fn union_items_are_parenthesized() {
        let root = TypeNode::array(TypeNode::union(vec![TypeNode::String, TypeNode::Number]));
        assert_eq!(
            emit(&root, &Registry::new(), "Mixed"),
            "export type Mixed = (string | number)[];"
        );
    }

    #[test]
    fn reference_root_emits_no_alias() {
        let reg = registry(vec![
            ("User", vec![Property::required("name", TypeNode::String)]),
            ("Response", vec![Property::required("user", TypeNode::reference("User"))]),
        ]);
        let code = emit(&TypeNode::reference("Response"), &reg, "Response");
        assert_eq!(
            code,
            "export interface User {\n  name: string;\n}\n\n\
             export interface Response {\n  user: User;\n}"
        );
    }

    #[test]
    fn optional_and_quoted_properties() {
        let reg = registry(vec![(
            "Special",
            vec![
                Property::required("user-name", TypeNode::String),
                Property::required("123", TypeNode::String),
                Property::optional("age", TypeNode::Number),
                Property::required("say \"hi\"", TypeNode::Null),
            ],
        )]);
        let code = emit(&TypeNode::reference("Special"), &reg, "Special");
        assert_eq!(
            code,
            [
                "export interface Special {",
                "  \"123\": string;",
                "  age?: number;",
                "  \"say \\\"hi\\\"\": null;",
                "  \"user-name\": string;",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn empty_interface() {
        let reg = registry(vec![("Empty", vec![])]);
        assert_eq!(emit(&TypeNode::reference("Empty"), &reg, "Empty"), "export interface Empty {}");
    }

    #[test]
    fn alias_follows_registry_declarations() {
        let reg = registry(vec![("Item", vec![Property::required("a", TypeNode::Number)])]);
        let root = TypeNode::array(TypeNode::reference("Item"));
        assert_eq!(
            emit(&root, &reg, "Items"),
            "export interface Item {\n  a: number;\n}\n\nexport type Items = Item[];"
        );
    }

    #[test]
    fn inline_objects_render_as_literals() {
        let node = TypeNode::array(TypeNode::object(vec![
            Property::required("x", TypeNode::Number),
            Property::optional("my-key", TypeNode::Any),
        ]));
        assert_eq!(render(&node), "{ \"my-key\"?: any; x: number }[]");
        assert_eq!(render(&TypeNode::object(vec![])), "{}");
        assert_eq!(render(&TypeNode::union(vec![])), "never");
    }

    #[test]
    fn codegen_accumulates_across_emits() {
        let mut cg = Codegen::new();
        cg.emit(&TypeNode::Boolean, &Registry::new(), "Flag");
        cg.emit(&TypeNode::Null, &Registry::new(), "Nothing");
        assert_eq!(cg.into_string(), "export type Flag = boolean;\n\nexport type Nothing = null;");
    }
}
