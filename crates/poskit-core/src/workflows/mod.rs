//! # Workflows Module
//!
//! File-to-file pipelines built from the [`core`](crate::core) I/O layer and the
//! [`engine`](crate::engine) transforms. Each workflow reads its input, applies one
//! operation and, unless no output path is given, writes the result.
//!
//! - **Conversion** ([`convert`]) - Change or toggle the coordinate mode.
//! - **Vacuum** ([`vacuum`]) - Add empty space along the lattice vectors.
//! - **Freezing** ([`freeze`]) - Apply selective dynamics to ions inside a box.
//! - **Interpolation** ([`interpolate`]) - Write a numbered series of images.
//! - **Potentials** ([`potcar`]) - Assemble a potentials file for a structure.

use crate::core::io::poscar::{PoscarError, PoscarFile};
use crate::core::io::potcar::PotentialError;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::engine::config::ConfigError;
use crate::engine::error::TransformError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod convert;
pub mod freeze;
pub mod interpolate;
pub mod potcar;
pub mod vacuum;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to read structure from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PoscarError,
    },

    #[error("Failed to write structure to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: PoscarError,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Potential(#[from] PotentialError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid workflow input: {0}")]
    InvalidInput(String),
}

pub(crate) fn load(path: &Path) -> Result<Structure, WorkflowError> {
    PoscarFile::read_from_path(path).map_err(|source| WorkflowError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn store(structure: &Structure, path: &Path) -> Result<(), WorkflowError> {
    PoscarFile::write_to_path(structure, path).map_err(|source| WorkflowError::Write {
        path: path.to_path_buf(),
        source,
    })
}
