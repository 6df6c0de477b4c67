use super::{WorkflowError, load, store};
use crate::core::models::structure::Structure;
use crate::engine::vacuum::add_vacuum;
use std::path::Path;
use tracing::{info, instrument};

/// Reads `input`, adds `depth` of vacuum along a, b and c, and writes the result.
#[instrument(skip_all, name = "vacuum_workflow")]
pub fn run(
    input: &Path,
    depth: [f64; 3],
    output: Option<&Path>,
) -> Result<Structure, WorkflowError> {
    if depth.iter().any(|d| !d.is_finite()) {
        return Err(WorkflowError::InvalidInput(format!(
            "vacuum depth must be finite, got {:?}",
            depth
        )));
    }
    info!("Adding vacuum depth {:?} to {}", depth, input.display());
    let structure = load(input)?;
    let grown = add_vacuum(&structure, depth)?;
    if let Some(path) = output {
        store(&grown, path)?;
        info!("Changes written to {}", path.display());
    }
    Ok(grown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::poscar::PoscarFile;
    use crate::core::io::traits::StructureFile;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn vacuum_file_round_trip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("slab.vasp");
        let output = dir.path().join("slab_vacuum.vasp");
        fs::write(
            &input,
            "slab\n1.0\n3 0 0\n0 3 0\n0 0 3\nAu\n1\nDirect\n0.0 0.0 0.5\n",
        )
        .unwrap();

        run(&input, [0.0, 0.0, 3.0], Some(&output)).unwrap();

        let grown = PoscarFile::read_from_path(&output).unwrap();
        assert_eq!(grown.lattice[(2, 2)], 6.0);
        assert!((grown.ions()[0].position.z - 0.25).abs() < 1e-8);
    }

    #[test]
    fn non_finite_depth_is_rejected() {
        let dir = tempdir().unwrap();
        let err = run(&dir.path().join("x"), [f64::NAN, 0.0, 0.0], None).unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInput(_)));
    }
}
