use clap::Parser;
use pretty_assertions::assert_eq;

use test_gen::cli::commands::{
    check_path, cmd_generate, description_files, load_test, parse_test, render_script,
    source_fingerprint,
};
use test_gen::cli::config::{
    AppConfig, Cli, Commands, GenerateOptions, load_config, resolve_generate_options,
};
use test_gen::codegen::LookupApi;

use crate::common::fixtures::{LOGIN_SCRIPT, LOGIN_YAML, login_test};

mod common;

const TEMPLATE: &str = "from selenium.common.exceptions import NoSuchElementException\n";

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_generate_minimal() {
    let cli = Cli::parse_from(["test-gen", "generate", "--file", "login.yml"]);
    match cli.command {
        Commands::Generate {
            file,
            template,
            output,
            api,
        } => {
            assert_eq!(file, "login.yml");
            assert!(template.is_none());
            assert!(output.is_none());
            assert!(api.is_none());
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_parse_generate_all_args() {
    let cli = Cli::parse_from([
        "test-gen",
        "generate",
        "-f",
        "login.yml",
        "--template",
        "prefix.py",
        "-o",
        "test_login.py",
        "--api",
        "by",
    ]);
    match cli.command {
        Commands::Generate {
            file,
            template,
            output,
            api,
        } => {
            assert_eq!(file, "login.yml");
            assert_eq!(template.as_deref(), Some("prefix.py"));
            assert_eq!(output.as_deref(), Some("test_login.py"));
            assert_eq!(api, Some(LookupApi::By));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_parse_check() {
    let cli = Cli::parse_from(["test-gen", "check", "--file", "tests/"]);
    match cli.command {
        Commands::Check { file } => assert_eq!(file, "tests/"),
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "test-gen", "-vv", "--config", "custom.yaml", "check", "--file", "a.yml",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
}

#[test]
fn cli_generate_requires_file() {
    assert!(Cli::try_parse_from(["test-gen", "generate"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config.generate.template, "template.py");
    assert_eq!(config.generate.api, LookupApi::Legacy);
}

#[test]
fn config_partial_yaml() {
    let config: AppConfig = serde_yaml::from_str("generate:\n  api: by\n").unwrap();
    assert_eq!(config.generate.api, LookupApi::By);
    assert_eq!(config.generate.template, "template.py");
}

#[test]
fn config_malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test-gen.yaml");
    std::fs::write(&path, "generate: [not, a, map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.generate.template, "template.py");
}

#[test]
fn cli_flags_override_config() {
    let config: AppConfig =
        serde_yaml::from_str("generate:\n  template: base.py\n  api: by\n").unwrap();

    let from_config = resolve_generate_options(&config, None, None);
    assert_eq!(
        from_config,
        GenerateOptions {
            template: "base.py".into(),
            api: LookupApi::By,
        }
    );

    let from_cli = resolve_generate_options(&config, Some("other.py"), Some(LookupApi::Legacy));
    assert_eq!(from_cli.template, "other.py");
    assert_eq!(from_cli.api, LookupApi::Legacy);
}

// ============================================================================
// Script assembly
// ============================================================================

#[test]
fn source_fingerprint_is_sha1_hex() {
    assert_eq!(
        source_fingerprint("abc"),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
}

#[test]
fn render_script_prepends_template_and_header() {
    let script = render_script(TEMPLATE, "login.yml", "abc", &login_test(), LookupApi::Legacy)
        .unwrap();
    let expected = format!(
        "{}# Generated from login.yml\n# Source sha1: a9993e364706816aba3e25717850c26c9cd0d89d\n{}",
        TEMPLATE, LOGIN_SCRIPT
    );
    assert_eq!(script, expected);
}

#[test]
fn render_script_terminates_unterminated_template() {
    let script = render_script("import os", "t.yml", "", &login_test(), LookupApi::Legacy).unwrap();
    assert!(script.starts_with("import os\n# Generated from t.yml\n"));
}

// ============================================================================
// File-based commands
// ============================================================================

#[test]
fn generate_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("login.yml");
    let template = dir.path().join("template.py");
    let output = dir.path().join("test_login.py");
    std::fs::write(&input, LOGIN_YAML).unwrap();
    std::fs::write(&template, TEMPLATE).unwrap();

    let options = GenerateOptions {
        template: template.display().to_string(),
        api: LookupApi::Legacy,
    };
    let input_path = input.display().to_string();
    cmd_generate(&input_path, &options, output.to_str()).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(TEMPLATE));
    assert!(written.contains(&format!("# Generated from {}\n", input_path)));
    assert!(written.contains(&format!("# Source sha1: {}\n", source_fingerprint(LOGIN_YAML))));
    assert!(written.ends_with(LOGIN_SCRIPT));
}

#[test]
fn generate_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.yml");
    let template = dir.path().join("template.py");
    let output = dir.path().join("test_bad.py");
    std::fs::write(&input, LOGIN_YAML.replace("until: url_changed", "until: never")).unwrap();
    std::fs::write(&template, TEMPLATE).unwrap();

    let options = GenerateOptions {
        template: template.display().to_string(),
        api: LookupApi::Legacy,
    };
    let err = cmd_generate(input.to_str().unwrap(), &options, output.to_str()).unwrap_err();

    assert!(err.to_string().contains("never"));
    assert!(!output.exists());
}

#[test]
fn generate_missing_template_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("login.yml");
    std::fs::write(&input, LOGIN_YAML).unwrap();

    let options = GenerateOptions {
        template: dir.path().join("missing.py").display().to_string(),
        api: LookupApi::Legacy,
    };
    let err = cmd_generate(input.to_str().unwrap(), &options, None).unwrap_err();
    assert!(err.to_string().contains("Error while reading"));
}

#[test]
fn parse_test_picks_decoder_by_extension() {
    let json = r#"{"test": {"name": "J", "base_url": "https://example.com", "steps": []}}"#;
    assert_eq!(parse_test("t.json", json).unwrap().name, "J");
    assert!(parse_test("t.yml", LOGIN_YAML).is_ok());
}

#[test]
fn load_test_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("login.yaml");
    std::fs::write(&path, LOGIN_YAML).unwrap();

    let test = load_test(path.to_str().unwrap()).unwrap();
    assert_eq!(test.name, "Login Flow");
    assert_eq!(test.steps.len(), 4);
}

#[test]
fn check_directory_reports_each_file_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b_login.yml"), LOGIN_YAML).unwrap();
    std::fs::write(
        dir.path().join("a_broken.yaml"),
        LOGIN_YAML.replace("assertionType: textExists", "assertionType: nope"),
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let dir_path = dir.path().display().to_string();
    let files = description_files(&dir_path).unwrap();
    assert_eq!(files.len(), 2);

    let outcomes = check_path(&dir_path).unwrap();
    assert_eq!(outcomes.len(), 2);

    assert!(outcomes[0].path.ends_with("a_broken.yaml"));
    assert!(!outcomes[0].passed());
    assert!(outcomes[0].error.as_deref().unwrap().contains("nope"));

    assert!(outcomes[1].path.ends_with("b_login.yml"));
    assert!(outcomes[1].passed());
    assert_eq!(outcomes[1].steps, 4);
}

#[test]
fn check_single_file_with_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    std::fs::write(&path, "test: [").unwrap();

    let outcomes = check_path(path.to_str().unwrap()).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].passed());
}
