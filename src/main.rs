use clap::Parser;
use test_gen::cli::commands::{cmd_check, cmd_generate};
use test_gen::cli::config::{Cli, Commands, load_config, resolve_generate_options};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Generate {
            file,
            template,
            output,
            api,
        } => {
            // Resolve settings: CLI > config > defaults
            let options = resolve_generate_options(&config, template.as_deref(), api);
            cmd_generate(&file, &options, output.as_deref())?;
        }
        Commands::Check { file } => {
            let all_passed = cmd_check(&file)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only the generated script.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
