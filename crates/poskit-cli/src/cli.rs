use crate::utils::parser::parse_coordinate_mode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use poskit::core::models::structure::CoordinateMode;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "poskit - Convert, edit and interpolate POSCAR crystal-structure files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Run the command but do not write any output files
    #[arg(short = 'n', long = "no-write", global = true)]
    pub no_write: bool,

    /// Path to an optional configuration file in TOML format
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S interpolate.images=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the ion position mode of a structure.
    Convert(ConvertArgs),
    /// Add vacuum layers along the lattice vectors.
    Vacuum(VacuumArgs),
    /// Assemble a POTCAR from a structure or a list of potentials.
    Potcar(PotcarArgs),
    /// Change the selective dynamics flags of all ions inside a box.
    Freeze(FreezeArgs),
    /// Linearly interpolate images between two structures for an NEB calculation.
    Interpolate(InterpolateArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Cartesian,
    Direct,
    Toggle,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input structure file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Target coordinate mode.
    #[arg(short, long, value_enum, default_value_t = ModeArg::Toggle)]
    pub mode: ModeArg,

    /// Wrap ions into the unit cell before converting.
    #[arg(short, long)]
    pub wrap: bool,

    /// Output file [default: <stem>_convert<suffix> next to the input]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `vacuum` subcommand.
#[derive(Args, Debug)]
pub struct VacuumArgs {
    /// Input structure file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Vacuum depth in length units along a, b and c.
    #[arg(
        num_args = 3,
        value_names = ["DA", "DB", "DC"],
        required = true,
        allow_negative_numbers = true
    )]
    pub depth: Vec<f64>,

    /// Output file [default: <stem>_vacuum<suffix> next to the input]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `potcar` subcommand.
#[derive(Args, Debug)]
pub struct PotcarArgs {
    /// Structure whose species are used, or 'none' to use --potentials alone.
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// List of potentials, for potentials whose names differ from the species labels.
    #[arg(short, long, num_args = 1.., value_name = "NAME")]
    pub potentials: Vec<String>,

    /// Directory of POTCAR folders; may name GGA or LDA directly.
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Output file.
    #[arg(short, long, value_name = "PATH", default_value = "POTCAR")]
    pub output: PathBuf,
}

/// Arguments for the `freeze` subcommand.
#[derive(Args, Debug)]
pub struct FreezeArgs {
    /// Input structure file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Allow motion along a, b and c: three of T or F.
    #[arg(num_args = 3, value_names = ["A", "B", "C"], required = true)]
    pub dimensions: Vec<String>,

    /// Lower and upper x range.
    #[arg(short = 'x', long = "x-range", num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub x_range: Option<Vec<f64>>,

    /// Lower and upper y range.
    #[arg(short = 'y', long = "y-range", num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub y_range: Option<Vec<f64>>,

    /// Lower and upper z range.
    #[arg(short = 'z', long = "z-range", num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub z_range: Option<Vec<f64>>,

    /// Ranges are given in cartesian or direct coordinates [default: mode of the input]
    #[arg(short, long, value_parser = parse_coordinate_mode, value_name = "MODE")]
    pub mode: Option<CoordinateMode>,

    /// Keep the flags of ions outside the box instead of freeing them.
    #[arg(short, long, overrides_with = "no_preserve_unspecified")]
    pub preserve_unspecified: bool,

    /// Free ions outside the box even if the configuration preserves them.
    #[arg(long, overrides_with = "preserve_unspecified")]
    pub no_preserve_unspecified: bool,

    /// Output file [default: <stem>_frozen<suffix> next to the input]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `interpolate` subcommand.
#[derive(Args, Debug)]
pub struct InterpolateArgs {
    /// First anchor structure.
    #[arg(value_name = "FILE1")]
    pub first: PathBuf,

    /// Second anchor structure.
    #[arg(value_name = "FILE2")]
    pub second: PathBuf,

    /// Number of intermediate images to create.
    #[arg(short, long, value_name = "INT")]
    pub images: Option<usize>,

    /// Directory that receives the numbered image folders.
    #[arg(short, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}
