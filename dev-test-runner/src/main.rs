//! Fixture runner: every `<case>.json` in the fixture directory is run through
//! the pipeline (root name = PascalCase of `<case>`) and compared against
//! `<case>.ts`.
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use json_ts_types::{infer_type, TypeName};

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fixtures"));

    let cases = collect_cases(&dir)?;
    let mut failed = 0usize;
    for case in &cases {
        match run_case(case)? {
            Outcome::Pass => eprintln!("{} {}", "✅ pass".green(), case.display()),
            Outcome::Fail { expected, actual } => {
                failed += 1;
                eprintln!("{} {}", "❌ fail".red(), case.display());
                eprintln!("{}\n{expected}", "—— expected ——".dimmed());
                eprintln!("{}\n{actual}", "—— actual ——".dimmed());
            }
        }
    }

    eprintln!("{} cases, {} failed", cases.len(), failed);
    if failed > 0 {
        bail!("{failed} fixture(s) failed");
    }
    Ok(())
}

enum Outcome {
    Pass,
    Fail { expected: String, actual: String },
}

fn collect_cases(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut cases = std::fs::read_dir(dir)
        .with_context(|| format!("reading fixture dir {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    cases.sort();
    Ok(cases)
}

fn run_case(json_path: &Path) -> Result<Outcome> {
    let source = std::fs::read_to_string(json_path)
        .with_context(|| format!("reading {}", json_path.display()))?;
    let value = serde_json::from_str::<serde_json::Value>(&source)
        .with_context(|| format!("parsing {}", json_path.display()))?;
    let expected_path = json_path.with_extension("ts");
    let expected = std::fs::read_to_string(&expected_path)
        .with_context(|| format!("reading {}", expected_path.display()))?;

    let stem = json_path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let root_name = TypeName::parse(&to_pascal_case(stem)).unwrap_or_default();
    let actual = infer_type(&value, root_name.as_str()).code;

    let expected = expected.trim_end().to_string();
    if actual == expected {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail { expected, actual })
    }
}

fn to_pascal_case(value: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = true;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if capitalize_next {
                result.push(ch.to_ascii_uppercase());
                capitalize_next = false;
            } else {
                result.push(ch);
            }
        } else {
            capitalize_next = true;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_from_stems() {
        assert_eq!(to_pascal_case("order_list"), "OrderList");
        assert_eq!(to_pascal_case("special-keys"), "SpecialKeys");
        assert_eq!(to_pascal_case("already"), "Already");
    }

    #[test]
    fn bundled_fixtures_pass() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures");
        let cases = collect_cases(&dir).unwrap();
        assert!(!cases.is_empty());
        for case in cases {
            match run_case(&case).unwrap() {
                Outcome::Pass => {}
                Outcome::Fail { expected, actual } => {
                    panic!("{}:\nexpected:\n{expected}\nactual:\n{actual}", case.display())
                }
            }
        }
    }
}
