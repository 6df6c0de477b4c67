use crate::cli::InterpolateArgs;
use crate::config::models::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use poskit::engine::config::InterpolationConfigBuilder;
use poskit::engine::progress::ProgressReporter;
use poskit::workflows::WorkflowError;
use poskit::workflows::interpolate::{self, image_path};
use tracing::info;

pub fn run(args: InterpolateArgs, config: &AppConfig) -> Result<()> {
    let images = args.images.unwrap_or(config.interpolate_images);
    let interpolation = InterpolationConfigBuilder::new()
        .images(images)
        .build()
        .map_err(WorkflowError::from)?;
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.interpolate_output_directory.clone());
    info!(
        "Interpolating {} image(s) between {} and {}",
        images,
        args.first.display(),
        args.second.display()
    );

    let progress_handler = if config.quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let target = (!config.no_write).then_some(output_dir.as_path());

    let result = interpolate::run(&args.first, &args.second, &interpolation, target, &reporter)?;

    for crossing in &result.crossings {
        println!("Warning: {}", crossing);
    }
    match target {
        Some(root) => println!(
            "Wrote {} structures to {} .. {}",
            result.images.len(),
            image_path(root, 0).display(),
            image_path(root, result.images.len() - 1).display()
        ),
        None => println!("No changes written"),
    }
    Ok(())
}
