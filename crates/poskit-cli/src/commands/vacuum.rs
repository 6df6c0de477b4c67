use crate::cli::VacuumArgs;
use crate::config::models::AppConfig;
use crate::error::Result;
use crate::utils::parser::exact;
use crate::utils::paths::resolve_output_path;
use poskit::workflows::vacuum;

const OUTPUT_TAG: &str = "_vacuum";

pub fn run(args: VacuumArgs, config: &AppConfig) -> Result<()> {
    let depth: [f64; 3] = exact(&args.depth, "vacuum depth")?;
    let output = resolve_output_path(args.output, &args.input, OUTPUT_TAG);
    let target = (!config.no_write).then_some(output.as_path());

    let structure = vacuum::run(&args.input, depth, target)?;

    match target {
        Some(path) => {
            let diag = structure.lattice.diagonal();
            println!(
                "Added vacuum {:?} to {}; lattice diagonal is now [{:.6}, {:.6}, {:.6}]: {}",
                depth,
                args.input.display(),
                diag.x,
                diag.y,
                diag.z,
                path.display()
            );
        }
        None => println!("No changes written"),
    }
    Ok(())
}
