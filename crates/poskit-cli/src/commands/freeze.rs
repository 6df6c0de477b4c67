use crate::cli::FreezeArgs;
use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::parser::{exact, parse_flags};
use crate::utils::paths::resolve_output_path;
use poskit::engine::config::{SelectionBox, SelectionBoxBuilder};
use poskit::workflows::freeze::{self, FreezeConfig};
use poskit::workflows::WorkflowError;
use tracing::info;

const OUTPUT_TAG: &str = "_frozen";

fn build_selection(args: &FreezeArgs) -> Result<SelectionBox> {
    let mut builder = SelectionBoxBuilder::new().maybe_mode(args.mode);
    for (axis, range) in [&args.x_range, &args.y_range, &args.z_range]
        .into_iter()
        .enumerate()
    {
        if let Some(values) = range {
            let [lower, upper] = exact::<2>(values, "a range")?;
            builder = builder.axis(axis, lower, upper);
        }
    }
    builder
        .build()
        .map_err(|e| CliError::Workflow(WorkflowError::Config(e)))
}

/// The command-line switches win over the configured default; the last switch given wins.
fn preserve_unspecified(args: &FreezeArgs, config: &AppConfig) -> bool {
    if args.preserve_unspecified {
        true
    } else if args.no_preserve_unspecified {
        false
    } else {
        config.freeze_preserve_unspecified
    }
}

pub fn run(args: FreezeArgs, config: &AppConfig) -> Result<()> {
    let flags = parse_flags(&args.dimensions)?;
    let selection = build_selection(&args)?;
    let freeze_config = FreezeConfig {
        selection,
        flags,
        preserve_unspecified: preserve_unspecified(&args, config),
    };
    info!("Creating frozen structure from {}", args.input.display());

    let output = resolve_output_path(args.output, &args.input, OUTPUT_TAG);
    let target = (!config.no_write).then_some(output.as_path());
    let result = freeze::run(&args.input, &freeze_config, target)?;

    println!(
        "Applied selective dynamics {} to {} of {} ions",
        args.dimensions.join(" "),
        result.selected.len(),
        result.structure.len()
    );
    match target {
        Some(path) => println!("Changes written to {}", path.display()),
        None => println!("No changes written"),
    }
    Ok(())
}
