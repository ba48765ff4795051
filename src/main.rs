use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod package;
mod scan;
mod script;
mod settings;
mod sfc;
mod source;
mod template;
mod theme;
mod util;
mod validate;

use cli::{Command, GenerateArgs, RootArgs, ValidateArgs};
use validate::{validate_theme, validator_command_line, ValidationOutcome, ValidatorCommand};

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Generate(args) => cmd_generate(&args),
        Command::Validate(args) => cmd_validate(&args),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_generate(args: &GenerateArgs) -> Result<ExitCode> {
    let config = config::resolve_generate_config(args)?;
    let theme = theme::build_theme(&config)?;
    let path = theme::write_theme(&theme, &config.output_dir)?;
    println!("Wrote theme.json to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_validate(args: &ValidateArgs) -> Result<ExitCode> {
    let theme_dir = config::resolve_theme_dir(&args.theme_dir)?;
    let validator = ValidatorCommand::parse(&validator_command_line(args.validator.as_deref()))?;
    match validate_theme(&theme_dir, args.schema.as_deref(), &validator)? {
        ValidationOutcome::Passed(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            println!("theme.json is valid");
            Ok(ExitCode::SUCCESS)
        }
        ValidationOutcome::Failed(report) => {
            eprintln!("{report}");
            eprintln!("theme.json failed validation");
            Ok(ExitCode::FAILURE)
        }
    }
}
