//! Errors raised around the pipeline: reading sources, parsing JSON, picking a
//! subnode, validating the root name. Inference itself is total and never
//! produces one of these.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON source ({source_name}): {source}")]
    JsonParse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "invalid type name '{name}': must start with an uppercase letter and contain only alphanumeric characters"
    )]
    InvalidTypeName { name: String },

    #[error("JSON pointer '{pointer}' selects nothing in {source_name}")]
    PointerNotFound { pointer: String, source_name: String },

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("glob pattern matched no files: {pattern}")]
    NoMatches { pattern: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
