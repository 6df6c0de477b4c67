use crate::cli::{ConvertArgs, ModeArg};
use crate::config::models::AppConfig;
use crate::error::Result;
use crate::utils::paths::resolve_output_path;
use poskit::workflows::convert::{self, ConversionTarget, ConvertOptions};
use tracing::info;

const OUTPUT_TAG: &str = "_convert";

impl From<ModeArg> for ConversionTarget {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Cartesian => ConversionTarget::Cartesian,
            ModeArg::Direct => ConversionTarget::Direct,
            ModeArg::Toggle => ConversionTarget::Toggle,
        }
    }
}

pub fn run(args: ConvertArgs, config: &AppConfig) -> Result<()> {
    let output = resolve_output_path(args.output, &args.input, OUTPUT_TAG);
    let options = ConvertOptions {
        target: args.mode.into(),
        wrap: args.wrap,
    };
    info!("Converting ion position mode of {}", args.input.display());

    let target = (!config.no_write).then_some(output.as_path());
    let structure = convert::run(&args.input, &options, target)?;

    match target {
        Some(path) => println!(
            "Converted {} to {} coordinates: {}",
            args.input.display(),
            structure.mode(),
            path.display()
        ),
        None => println!("No changes written"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_to_derived_path_next_to_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cell.vasp");
        fs::write(&input, "c\n1.0\n2 0 0\n0 2 0\n0 0 2\nSi\n1\nDirect\n0.5 0 0\n").unwrap();
        let args = ConvertArgs {
            input: input.clone(),
            mode: ModeArg::Cartesian,
            wrap: false,
            output: None,
        };
        run(args, &AppConfig::for_tests(false)).unwrap();
        let written = fs::read_to_string(dir.path().join("cell_convert.vasp")).unwrap();
        assert!(written.contains("Cartesian"));
    }

    #[test]
    fn no_write_leaves_directory_untouched() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("POSCAR");
        fs::write(&input, "c\n1.0\n2 0 0\n0 2 0\n0 0 2\n1\nDirect\n0.5 0 0\n").unwrap();
        let args = ConvertArgs {
            input,
            mode: ModeArg::Toggle,
            wrap: false,
            output: None,
        };
        run(args, &AppConfig::for_tests(true)).unwrap();
        assert!(!dir.path().join("POSCAR_convert").exists());
    }
}
