use super::{WorkflowError, load, store};
use crate::engine::config::InterpolationConfig;
use crate::engine::interpolate::{Interpolation, interpolate};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const IMAGE_FILE_NAME: &str = "POSCAR";

/// Path of image `index` under `root`: `root/NN/POSCAR`, zero-padded to two digits.
pub fn image_path(root: &Path, index: usize) -> PathBuf {
    root.join(format!("{:02}", index)).join(IMAGE_FILE_NAME)
}

/// Interpolates between the structures in `first` and `second`.
///
/// When `output_dir` is given, every image (anchors included) is written to
/// [`image_path`]. One progress step is reported per image.
#[instrument(skip_all, name = "interpolate_workflow")]
pub fn run(
    first: &Path,
    second: &Path,
    config: &InterpolationConfig,
    output_dir: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<Interpolation, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading anchors",
    });
    let start = load(first)?;
    let end = load(second)?;
    reporter.report(Progress::PhaseFinish);

    let result = interpolate(&start, &end, config.images)?;
    if !result.crossings.is_empty() {
        reporter.report(Progress::Message(format!(
            "{} ion(s) may cross a periodic boundary between anchors",
            result.crossings.len()
        )));
    }

    if let Some(root) = output_dir {
        reporter.report(Progress::TaskStart {
            total_steps: result.images.len() as u64,
        });
        for (index, image) in result.images.iter().enumerate() {
            store(image, &image_path(root, index))?;
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);
        info!(
            "Wrote {} images under {}",
            result.images.len(),
            root.display()
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::poscar::PoscarFile;
    use crate::core::io::traits::StructureFile;
    use crate::engine::config::InterpolationConfigBuilder;
    use crate::engine::error::TransformError;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    const A: &str = "neb\n1.0\n10 0 0\n0 10 0\n0 0 10\nN\n1\nSelective dynamics\nDirect\n0.1 0.1 0.1 F F F\n";
    const B: &str = "neb\n1.0\n10 0 0\n0 10 0\n0 0 10\nN\n1\nDirect\n0.3 0.1 0.1\n";

    #[test]
    fn image_paths_are_zero_padded() {
        let root = Path::new("run");
        assert_eq!(image_path(root, 0), Path::new("run/00/POSCAR"));
        assert_eq!(image_path(root, 12), Path::new("run/12/POSCAR"));
    }

    #[test]
    fn writes_numbered_images_and_reports_progress() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "A", A);
        let b = write(dir.path(), "B", B);
        let out = dir.path().join("images");
        let steps = Mutex::new(0u64);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::TaskIncrement = event {
                *steps.lock().unwrap() += 1;
            }
        }));
        let config = InterpolationConfigBuilder::new().images(1).build().unwrap();

        let result = run(&a, &b, &config, Some(&out), &reporter).unwrap();
        drop(reporter);

        assert_eq!(result.images.len(), 3);
        assert_eq!(steps.into_inner().unwrap(), 3);
        let mid = PoscarFile::read_from_path(image_path(&out, 1)).unwrap();
        assert!((mid.ions()[0].position.x - 0.2).abs() < 1e-8);
        assert!(!mid.selective_dynamics);
        assert!(image_path(&out, 2).is_file());
    }

    #[test]
    fn mismatched_anchors_fail() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "A", A);
        let b = write(
            dir.path(),
            "B",
            "neb\n1.0\n10 0 0\n0 10 0\n0 0 10\nN\n2\nDirect\n0.3 0.1 0.1\n0.4 0.1 0.1\n",
        );
        let config = InterpolationConfigBuilder::new().images(2).build().unwrap();
        let err = run(&a, &b, &config, None, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Transform(TransformError::Shape { left: 1, right: 2 })
        ));
    }
}
