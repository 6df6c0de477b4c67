use crate::cli::PotcarArgs;
use crate::config::models::AppConfig;
use crate::error::Result;
use poskit::workflows::potcar::{self, SpeciesSource};
use tracing::info;

pub fn run(args: PotcarArgs, config: &AppConfig) -> Result<()> {
    let source = SpeciesSource::from_arguments(&args.input, args.potentials)?;
    let directory = args
        .directory
        .unwrap_or_else(|| config.potcar_directory.clone());
    if let SpeciesSource::Structure(path) = &source {
        info!("Creating a POTCAR from {}", path.display());
    }

    let target = (!config.no_write).then_some(args.output.as_path());
    let species = potcar::run(&source, &directory, target)?;

    match target {
        Some(path) => println!(
            "Wrote potentials for {} to {}",
            species.join(" "),
            path.display()
        ),
        None => println!("No changes written"),
    }
    Ok(())
}
