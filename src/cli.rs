//! Minimal CLI: infer → (ts | schema)
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::transform::TypeName;
use crate::{infer_type, ParseResult};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer structure from JSON and output either TypeScript declarations or a JSON debug view
#[derive(Parser, Debug)]
#[command(name = "json-ts-types", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit TypeScript declarations
    Ts(TsOut),
    /// infer and print the transformed type tree and registry as JSON
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// top-level type name
    #[arg(long, short, default_value = "RootType", value_parser = TypeName::parse)]
    name: TypeName,
}

#[derive(clap::Parser, Debug)]
struct TsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Stdin,
    Path(PathBuf),
}

#[derive(Serialize)]
struct SchemaDump<'a> {
    source: String,
    #[serde(flatten)]
    result: &'a ParseResult,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Source {
    fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|source| Error::Io { path: PathBuf::from("-"), source })?;
                Ok(buf)
            }
            Source::Path(path) => std::fs::read_to_string(path)
                .map_err(|source| Error::Io { path: path.clone(), source }),
        }
    }
}

impl InputSettings {
    fn load(&self, source: &Source) -> Result<Value> {
        let text = source.read()?;
        let json_value = serde_json::from_str::<Value>(&text).map_err(|source_err| {
            Error::JsonParse { source_name: source.to_string(), source: source_err }
        })?;
        match self.json_pointer.as_deref() {
            None => Ok(json_value),
            Some(pointer) => json_value.pointer(pointer).cloned().ok_or_else(|| {
                Error::PointerNotFound {
                    pointer: pointer.to_string(),
                    source_name: source.to_string(),
                }
            }),
        }
    }

    /// Each input is an independent pipeline run; results keep input order.
    fn process(&self) -> Result<Vec<(Source, ParseResult)>> {
        let sources = resolve_sources(&self.input)?;
        info!(inputs = sources.len(), root = %self.name, "processing");
        sources
            .into_par_iter()
            .map(|source| -> Result<(Source, ParseResult)> {
                let value = self.load(&source)?;
                debug!(%source, "inferring");
                let result = infer_type(&value, self.name.as_str());
                Ok((source, result))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Ts(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let results = target.input_settings.process()?;
                let ts_src = if results.len() == 1 {
                    results[0].1.code.clone()
                } else {
                    results
                        .iter()
                        .map(|(source, result)| format!("// {source}\n{}", result.code))
                        .collect::<Vec<_>>()
                        .join("\n\n")
                };
                write_output(target.out.as_deref(), &ts_src)
            }
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let results = target.input_settings.process()?;
                let schema_src = if results.len() == 1 {
                    serde_json::to_string_pretty(&results[0].1)?
                } else {
                    let dumps = results
                        .iter()
                        .map(|(source, result)| SchemaDump { source: source.to_string(), result })
                        .collect::<Vec<_>>();
                    serde_json::to_string_pretty(&dumps)?
                };
                write_output(target.out.as_deref(), &schema_src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    let Some(out) = out else {
        println!("{contents}");
        return Ok(());
    };
    let write_err = |source| Error::Write { path: out.to_path_buf(), source };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(out, format!("{contents}\n")).map_err(write_err)?;
    info!(path = %out.display(), "wrote output");
    Ok(())
}

fn resolve_sources<I>(patterns: I) -> Result<Vec<Source>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<Source>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            // stdin can only be drained once
            if !out.contains(&Source::Stdin) {
                out.push(Source::Stdin);
            }
        } else if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                let path = entry.map_err(|e| {
                    let path = e.path().to_path_buf();
                    Error::Io { path, source: e.into_error() }
                })?;
                matched_any = true;
                out.push(Source::Path(path));
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(Error::NoMatches { pattern: pattern.to_string() });
            }
        } else {
            out.push(Source::Path(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}
