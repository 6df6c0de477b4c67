use super::{WorkflowError, load, store};
use crate::core::models::structure::{CoordinateMode, Structure};
use crate::engine::convert::{constrain, convert, toggle};
use crate::engine::error::TransformError;
use std::path::Path;
use tracing::{info, instrument};

/// The coordinate mode a conversion should end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionTarget {
    Direct,
    Cartesian,
    /// Whichever mode the input is not in.
    #[default]
    Toggle,
}

impl ConversionTarget {
    pub fn apply(self, structure: &Structure) -> Result<Structure, TransformError> {
        match self {
            ConversionTarget::Direct => convert(structure, CoordinateMode::Direct),
            ConversionTarget::Cartesian => convert(structure, CoordinateMode::Cartesian),
            ConversionTarget::Toggle => toggle(structure),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub target: ConversionTarget,
    /// Wrap ions into the unit cell before converting.
    pub wrap: bool,
}

/// Reads `input`, converts it and writes it to `output` if one is given.
#[instrument(skip_all, name = "convert_workflow")]
pub fn run(
    input: &Path,
    options: &ConvertOptions,
    output: Option<&Path>,
) -> Result<Structure, WorkflowError> {
    let structure = load(input)?;
    let from = structure.mode();
    let structure = if options.wrap {
        constrain(&structure)?
    } else {
        structure
    };
    let converted = options.target.apply(&structure)?;
    info!(
        "Converted {} ions from {} to {}",
        converted.len(),
        from,
        converted.mode()
    );
    if let Some(path) = output {
        store(&converted, path)?;
        info!("Changes written to {}", path.display());
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const INPUT: &str = "cell\n1.0\n5 0 0\n0 5 0\n0 0 5\nH\n1\nDirect\n0.5 0.5 1.5\n";

    #[test]
    fn toggle_writes_cartesian_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("POSCAR");
        let output = dir.path().join("out").join("POSCAR_convert");
        fs::write(&input, INPUT).unwrap();

        let result = run(&input, &ConvertOptions::default(), Some(&output)).unwrap();
        assert!(result.is_cartesian());
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("Cartesian"));
        assert!(written.contains(" 2.50000000   2.50000000   7.50000000"));
    }

    #[test]
    fn wrap_constrains_before_converting() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("POSCAR");
        fs::write(&input, INPUT).unwrap();
        let options = ConvertOptions {
            target: ConversionTarget::Direct,
            wrap: true,
        };
        let result = run(&input, &options, None).unwrap();
        assert!(result.is_direct());
        assert_eq!(result.ions()[0].position.z, 0.5);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("POSCAR");
        fs::write(&input, INPUT).unwrap();
        let options = ConvertOptions {
            target: ConversionTarget::Cartesian,
            wrap: false,
        };
        run(&input, &options, None).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_input_reports_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent");
        let err = run(&input, &ConvertOptions::default(), None).unwrap_err();
        assert!(matches!(err, WorkflowError::Read { ref path, .. } if path == &input));
    }
}
