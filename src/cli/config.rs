use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codegen::LookupApi;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "test-gen",
    version,
    about = "Generate Selenium test scripts from declarative test descriptions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: test-gen.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a test description into a Python script
    Generate {
        /// Test description file (YAML, or JSON by extension)
        #[arg(short, long)]
        file: String,

        /// Boilerplate prefix prepended to the script (default: template.py)
        #[arg(short, long)]
        template: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Element lookup call syntax
        #[arg(long, value_enum)]
        api: Option<LookupApi>,
    },

    /// Translate test descriptions without writing anything, reporting failures
    Check {
        /// Test description file or directory of description files
        #[arg(short, long)]
        file: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `test-gen.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default)]
    pub api: LookupApi,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            api: LookupApi::default(),
        }
    }
}

fn default_template() -> String {
    "template.py".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("test-gen.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Option resolution (CLI > config > default)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub template: String,
    pub api: LookupApi,
}

pub fn resolve_generate_options(
    config: &AppConfig,
    template: Option<&str>,
    api: Option<LookupApi>,
) -> GenerateOptions {
    GenerateOptions {
        template: template
            .map(str::to_string)
            .unwrap_or_else(|| config.generate.template.clone()),
        api: api.unwrap_or(config.generate.api),
    }
}
