// Type tree shared by inference, naming and codegen. No serde_json::Value here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeNode {
    String,
    Number,
    Boolean,
    Null,
    Any, // empty arrays, absent values
    Array {
        #[serde(rename = "itemType")]
        item_type: Box<TypeNode>,
    },
    Object(Shape), // properties key-sorted
    Union {
        types: Vec<TypeNode>, // unique by structural hash, first-seen order
    },
    Reference {
        name: String, // only ever produced by `transform`
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    pub optional: bool, // only ever set by object merging
}

impl TypeNode {
    pub fn array(item: TypeNode) -> Self {
        TypeNode::Array { item_type: Box::new(item) }
    }
    pub fn object(properties: Vec<Property>) -> Self {
        TypeNode::Object(Shape::new(properties))
    }
    pub fn union(types: Vec<TypeNode>) -> Self {
        TypeNode::Union { types }
    }
    pub fn reference(name: impl Into<String>) -> Self {
        TypeNode::Reference { name: name.into() }
    }
    pub fn as_object(&self) -> Option<&Shape> {
        match self {
            TypeNode::Object(shape) => Some(shape),
            _ => None,
        }
    }
    pub fn item_type(&self) -> Option<&TypeNode> {
        match self {
            TypeNode::Array { item_type } => Some(item_type),
            _ => None,
        }
    }
    pub fn is_any_array(&self) -> bool {
        matches!(self.item_type(), Some(TypeNode::Any))
    }
}

impl Shape {
    /// Sorts by key; callers hand in unique keys.
    pub fn new(mut properties: Vec<Property>) -> Self {
        properties.sort_by(|a, b| a.key.cmp(&b.key));
        Self { properties }
    }
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.properties
            .binary_search_by(|p| p.key.as_str().cmp(key))
            .ok()
            .map(|ix| &self.properties[ix])
    }
}

impl Property {
    pub fn required(key: impl Into<String>, ty: TypeNode) -> Self {
        Self { key: key.into(), ty, optional: false }
    }
    pub fn optional(key: impl Into<String>, ty: TypeNode) -> Self {
        Self { key: key.into(), ty, optional: true }
    }
    /// The key as a JSON string literal (escaped, double-quoted).
    pub fn quoted_key(&self) -> String {
        quote(&self.key)
    }
}

pub(crate) fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Extracted object shapes in insertion order. Names are unique per registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry(IndexMap<String, Shape>);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.0.get(name)
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Shape)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
    pub(crate) fn insert(&mut self, name: String, shape: Shape) {
        debug_assert!(!self.0.contains_key(&name), "duplicate registry name {name}");
        self.0.insert(name, shape);
    }
}

impl FromIterator<(String, Shape)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, Shape)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
