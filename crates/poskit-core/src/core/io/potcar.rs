use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const POTCAR_FILE_NAME: &str = "POTCAR";
const MULTI_SPECIES_SUBDIR: &str = "GGA";
const SINGLE_SPECIES_SUBDIR: &str = "LDA";

#[derive(Debug, Error)]
pub enum PotentialError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Potentials directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("No potential for species '{species}' (expected {})", path.display())]
    MissingPotential { species: String, path: PathBuf },
    #[error("No species given to assemble potentials for")]
    NoSpecies,
}

/// A directory of pseudopotentials laid out as `<dir>/<flavor>/<species>/POTCAR`.
///
/// The flavor subdirectory is chosen automatically unless the catalog root itself
/// is named `GGA` or `LDA` (case-insensitive): `GGA` for multi-species structures,
/// `LDA` for single-species ones.
#[derive(Debug, Clone)]
pub struct PotentialCatalog {
    root: PathBuf,
}

impl PotentialCatalog {
    /// Opens a catalog rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::MissingDirectory`] if `root` does not exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PotentialError> {
        let root = root.into();
        if !root.exists() {
            return Err(PotentialError::MissingDirectory(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `true` if the catalog root names its flavor explicitly.
    pub fn has_explicit_flavor(&self) -> bool {
        self.root
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case("gga") || n.eq_ignore_ascii_case("lda"))
    }

    /// The directory holding per-species folders for a structure with `species_count` species.
    pub fn resolve_directory(&self, species_count: usize) -> PathBuf {
        if self.has_explicit_flavor() {
            self.root.clone()
        } else if species_count > 1 {
            self.root.join(MULTI_SPECIES_SUBDIR)
        } else {
            self.root.join(SINGLE_SPECIES_SUBDIR)
        }
    }

    /// Paths of the potential files for `species`, in order.
    pub fn potential_paths<S: AsRef<str>>(&self, species: &[S]) -> Vec<PathBuf> {
        let directory = self.resolve_directory(species.len());
        species
            .iter()
            .map(|sp| directory.join(sp.as_ref()).join(POTCAR_FILE_NAME))
            .collect()
    }

    /// Concatenates the potentials for `species`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PotentialError::MissingPotential`] if a species has no potential file,
    /// [`PotentialError::NoSpecies`] if `species` is empty.
    pub fn concatenate<S: AsRef<str>>(&self, species: &[S]) -> Result<String, PotentialError> {
        if species.is_empty() {
            return Err(PotentialError::NoSpecies);
        }
        let mut contents = String::new();
        for (sp, path) in species.iter().zip(self.potential_paths(species)) {
            if !path.is_file() {
                return Err(PotentialError::MissingPotential {
                    species: sp.as_ref().to_string(),
                    path,
                });
            }
            debug!("Reading potential for {} from {:?}", sp.as_ref(), path);
            contents.push_str(&fs::read_to_string(&path)?);
        }
        Ok(contents)
    }

    /// Writes the concatenated potentials to `output`, creating parent directories.
    pub fn write<S: AsRef<str>>(&self, species: &[S], output: &Path) -> Result<(), PotentialError> {
        let contents = self.concatenate(species)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, contents)?;
        Ok(())
    }
}
