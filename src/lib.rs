//! Infer TypeScript declarations from a JSON value.
//!
//! ```text
//! serde_json::Value ─infer─▶ raw TypeNode ─transform─▶ {root, registry} ─emit─▶ source text
//! ```
//!
//! Every stage is pure and allocates its own state; nothing is shared between
//! calls, so independent inputs can be processed on independent threads.
pub mod cli;
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod transform;

use serde::Serialize;
use serde_json::Value;

pub use codegen::{emit, render, Codegen};
pub use error::{Error, Result};
pub use inference::{dedup, infer, infer_optional, merge_objects, structural_hash};
pub use ir::{Property, Registry, Shape, TypeNode};
pub use transform::{transform, TypeName, Transformed};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Transformed root; a reference when the input was an object.
    pub root_type: TypeNode,
    pub registry: Registry,
    /// Generated declarations.
    pub code: String,
    pub type_name: String,
}

/// Run the whole pipeline on one value.
///
/// `root_name` is used as given; validate it with [`TypeName::parse`] first
/// when it comes from a user.
pub fn infer_type(value: &Value, root_name: &str) -> ParseResult {
    let raw = infer(value);
    let Transformed { root, registry } = transform(raw, root_name);
    let code = emit(&root, &registry, root_name);
    tracing::debug!(
        root_name,
        shapes = registry.len(),
        bytes = code.len(),
        "generated declarations"
    );
    ParseResult { root_type: root, registry, code, type_name: root_name.to_string() }
}
