use super::{WorkflowError, load};
use crate::core::io::potcar::PotentialCatalog;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Where the ordered species list for a potentials file comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeciesSource {
    /// The species of a structure file, in grouping order.
    Structure(PathBuf),
    /// An explicit list, e.g. potentials whose names differ from the species labels.
    Explicit(Vec<String>),
}

impl SpeciesSource {
    /// Builds the source from a structure path, or from `explicit` when the path is `none`.
    ///
    /// A non-empty `explicit` list overrides the structure's species.
    pub fn from_arguments(input: &str, explicit: Vec<String>) -> Result<Self, WorkflowError> {
        let is_none = Path::new(input)
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s.eq_ignore_ascii_case("none"));
        match (is_none, explicit.is_empty()) {
            (true, true) => Err(WorkflowError::InvalidInput(
                "a potentials list is required when the structure is 'none'".to_string(),
            )),
            (_, false) => Ok(SpeciesSource::Explicit(explicit)),
            (false, true) => Ok(SpeciesSource::Structure(PathBuf::from(input))),
        }
    }

    pub fn resolve(&self) -> Result<Vec<String>, WorkflowError> {
        match self {
            SpeciesSource::Structure(path) => {
                let structure = load(path)?;
                Ok(structure
                    .species()
                    .labels()
                    .into_iter()
                    .map(str::to_string)
                    .collect())
            }
            SpeciesSource::Explicit(list) => Ok(list.clone()),
        }
    }
}

/// Assembles the potentials for `source` from `directory` and writes them to `output`.
///
/// Returns the species used. Without an output path the potentials are still read,
/// so missing files are reported.
#[instrument(skip_all, name = "potcar_workflow")]
pub fn run(
    source: &SpeciesSource,
    directory: &Path,
    output: Option<&Path>,
) -> Result<Vec<String>, WorkflowError> {
    let species = source.resolve()?;
    let catalog = PotentialCatalog::new(directory)?;
    info!(
        "Using species/potentials {:?} from {}",
        species,
        catalog.resolve_directory(species.len()).display()
    );
    match output {
        Some(path) => {
            catalog.write(&species, path)?;
            info!("Changes written to {}", path.display());
        }
        None => {
            catalog.concatenate(&species)?;
        }
    }
    Ok(species)
}
