//! CLI argument parsing for theme generation and validation.
//!
//! Flag names keep the camelCase spellings theme tooling already uses
//! (`--themeDir`, `--outputDir`) with kebab-case aliases.
use crate::settings::MissingInput;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ls-theme",
    version,
    about = "Generate and validate storefront theme.json manifests",
    after_help = "Examples:\n  ls-theme generate --themeDir ./my-theme --outputDir ./my-theme\n  ls-theme generate -t ./my-theme --missing-input text\n  ls-theme validate -t ./my-theme",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log each processed component to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    Validate(ValidateArgs),
}

/// Generate command inputs.
#[derive(Parser, Debug)]
#[command(about = "Generate a theme.json from a theme's wedges and elements")]
pub struct GenerateArgs {
    /// Path to a theme directory (contains package.json and wedges/)
    #[arg(
        long = "themeDir",
        short = 't',
        visible_alias = "theme-dir",
        value_name = "DIR",
        default_value = "./"
    )]
    pub theme_dir: PathBuf,

    /// Directory the generated theme.json is written to
    #[arg(
        long = "outputDir",
        short = 'o',
        visible_alias = "output-dir",
        value_name = "DIR",
        default_value = "./"
    )]
    pub output_dir: PathBuf,

    /// Element components directory (relative paths resolve against the theme dir)
    #[arg(long, value_name = "DIR")]
    pub elements_dir: Option<PathBuf>,

    /// Wedge components directory (relative paths resolve against the theme dir)
    #[arg(long, value_name = "DIR")]
    pub wedges_dir: Option<PathBuf>,

    /// Handling of props without `input` metadata: drop them or emit text settings
    #[arg(long, value_enum, value_name = "POLICY")]
    pub missing_input: Option<MissingInput>,
}

/// Validate command inputs.
#[derive(Parser, Debug)]
#[command(about = "Validate a theme.json against the theme schema")]
pub struct ValidateArgs {
    /// Path to a theme directory containing theme.json
    #[arg(
        long = "themeDir",
        short = 't',
        visible_alias = "theme-dir",
        value_name = "DIR",
        default_value = "./"
    )]
    pub theme_dir: PathBuf,

    /// JSON Schema to validate against (defaults to the bundled theme schema)
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Validator command line, invoked as `<cmd> -s <schema> -d <theme.json>`
    /// (defaults to $LS_THEME_VALIDATOR, then `ajv` on PATH)
    #[arg(long, value_name = "CMD")]
    pub validator: Option<String>,
}
