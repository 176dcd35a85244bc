use std::path::Path;

use tracing::{debug, info};

use crate::cli::config::GenerateOptions;
use crate::codegen::{LookupApi, translate};
use crate::spec::spec_model::{Test, TestFile};

// ============================================================================
// generate subcommand
// ============================================================================

/// Translate one test description and write template + header + script.
///
/// The script is built in memory first, so a failed translation writes nothing.
pub fn cmd_generate(
    file: &str,
    options: &GenerateOptions,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(file)?;
    let test = parse_test(file, &source)?;

    let template = std::fs::read_to_string(&options.template)
        .map_err(|e| format!("Error while reading {}: {}", options.template, e))?;

    let script = render_script(&template, file, &source, &test, options.api)?;

    match output {
        Some(path) => {
            std::fs::write(path, &script)?;
            info!(input = file, output = path, steps = test.steps.len(), "generated script");
        }
        None => print!("{}", script),
    }

    Ok(())
}

/// Assemble the complete script text for a decoded test.
pub fn render_script(
    template: &str,
    file: &str,
    source: &str,
    test: &Test,
    api: LookupApi,
) -> Result<String, Box<dyn std::error::Error>> {
    let body = translate(test, api)?;

    let mut script = String::with_capacity(template.len() + body.len() + 128);
    script.push_str(template);
    if !template.is_empty() && !template.ends_with('\n') {
        script.push('\n');
    }
    script.push_str(&format!("# Generated from {}\n", file));
    script.push_str(&format!("# Source sha1: {}\n", source_fingerprint(source)));
    script.push_str(&body);
    Ok(script)
}

/// Hex SHA-1 of the description source, so stale scripts can be spotted.
pub fn source_fingerprint(source: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// check subcommand
// ============================================================================

/// Outcome of checking a single description file.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub path: String,
    pub steps: usize,
    pub error: Option<String>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Translate every description at `path` and return whether all succeeded.
pub fn cmd_check(path: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let outcomes = check_path(path)?;

    if outcomes.is_empty() {
        eprintln!("No test descriptions found at: {}", path);
        return Ok(true);
    }

    for outcome in &outcomes {
        match &outcome.error {
            None => println!("ok    {} ({} steps)", outcome.path, outcome.steps),
            Some(e) => println!("FAIL  {}: {}", outcome.path, e),
        }
    }

    Ok(outcomes.iter().all(CheckOutcome::passed))
}

/// Check a file, or every description file in a directory (sorted by name).
pub fn check_path(path: &str) -> Result<Vec<CheckOutcome>, Box<dyn std::error::Error>> {
    let files = description_files(path)?;
    Ok(files.iter().map(|f| check_file(f)).collect())
}

fn check_file(path: &str) -> CheckOutcome {
    let result = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|source| parse_test(path, &source).map_err(|e| e.to_string()))
        .and_then(|test| {
            translate(&test, LookupApi::default())
                .map(|_| test.steps.len())
                .map_err(|e| e.to_string())
        });

    debug!(path, ok = result.is_ok(), "checked description");

    match result {
        Ok(steps) => CheckOutcome {
            path: path.to_string(),
            steps,
            error: None,
        },
        Err(e) => CheckOutcome {
            path: path.to_string(),
            steps: 0,
            error: Some(e),
        },
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Decode a description: JSON when the file name ends in `.json`, YAML otherwise.
pub fn parse_test(path: &str, source: &str) -> Result<Test, Box<dyn std::error::Error>> {
    let doc: TestFile = if has_extension(Path::new(path), &["json"]) {
        serde_json::from_str(source)?
    } else {
        serde_yaml::from_str(source)?
    };
    Ok(doc.test)
}

/// Load a single description file.
pub fn load_test(path: &str) -> Result<Test, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    parse_test(path, &source)
}

/// Description files at `path`: the path itself, or the `.yml`/`.yaml`/`.json`
/// entries of a directory sorted by file name.
pub fn description_files(path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_string()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let p = entry?.path();
        if p.is_file() && has_extension(&p, &["yml", "yaml", "json"]) {
            files.push(p.display().to_string());
        }
    }
    // Sort for deterministic order
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| extensions.contains(&e))
}
