use clap::{Args, Parser, Subcommand};
use molrow::core::descriptors::DescriptorKind;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "molrow",
    author = "The molrow developers",
    version,
    about = "molrow CLI - Annotates rows of a CSV table with 3D molecular descriptors computed from the structure each row references.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute descriptors for every row of a CSV table and write them as new columns.
    Annotate(AnnotateArgs),
    /// List the weighting schemes (and output column titles) of a descriptor.
    Schemes(SchemesArgs),
}

/// Arguments for the `annotate` subcommand.
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    // --- Core Arguments ---
    /// Path to the input CSV table. Structure cells hold BGF paths relative to this file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the annotated output CSV table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Input Overrides ---
    /// Column holding the structure, by header name or zero-based index.
    #[arg(short = 's', long, value_name = "NAME_OR_INDEX")]
    pub structure_column: Option<String>,

    /// Column used to identify rows in progress and error messages.
    #[arg(short = 'k', long, value_name = "NAME_OR_INDEX")]
    pub key_column: Option<String>,

    // --- Descriptor Overrides ---
    /// Descriptor to compute (whim, composition).
    #[arg(short, long, value_name = "KIND")]
    pub descriptor: Option<DescriptorKind>,

    /// Output column titles; each must name a weighting scheme of the descriptor.
    /// Defaults to every scheme of the descriptor.
    #[arg(long = "column", value_name = "TITLE", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Fragment kept for disconnected structures (first, largest).
    #[arg(long, value_name = "SELECTION")]
    pub fragment: Option<String>,

    /// Keep output columns that match no scheme and leave them empty.
    #[arg(long)]
    pub fill_unmatched: bool,

    /// Emit empty cells for rows that fail instead of aborting the run.
    #[arg(long)]
    pub keep_going: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S descriptor.fragment-selection=largest
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `schemes` subcommand.
#[derive(Args, Debug)]
pub struct SchemesArgs {
    /// Only list the schemes of this descriptor.
    #[arg(short, long, value_name = "KIND")]
    pub descriptor: Option<DescriptorKind>,
}
