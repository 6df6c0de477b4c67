use super::ion::Ion;
use super::species::{ModelError, SpeciesCounts};
use crate::core::utils::identifiers::canonicalize_species_label;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Absolute tolerance used when comparing scale factors.
pub const SCALE_TOLERANCE: f64 = 1e-8;

/// How ion positions in a [`Structure`] are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    /// Fractional coefficients of the lattice vectors.
    #[default]
    Direct,
    /// Absolute positions in (unscaled) length units.
    Cartesian,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unrecognized coordinate mode descriptor '{0}'")]
pub struct UnknownModeError(pub String);

impl CoordinateMode {
    /// The other mode.
    pub fn flipped(self) -> Self {
        match self {
            CoordinateMode::Direct => CoordinateMode::Cartesian,
            CoordinateMode::Cartesian => CoordinateMode::Direct,
        }
    }
}

impl FromStr for CoordinateMode {
    type Err = UnknownModeError;

    /// Parses a mode descriptor by its leading character.
    ///
    /// `c`/`k` select Cartesian and `d` selects Direct, case-insensitively, so
    /// `"Cartesian"`, `"kart"` and `"direct"` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('c') | Some('k') => Ok(CoordinateMode::Cartesian),
            Some('d') => Ok(CoordinateMode::Direct),
            _ => Err(UnknownModeError(s.trim().to_string())),
        }
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateMode::Direct => write!(f, "Direct"),
            CoordinateMode::Cartesian => write!(f, "Cartesian"),
        }
    }
}

/// Scale factor(s) applied to the lattice: one uniform value or one per Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(Vector3<f64>);

impl Scale {
    pub fn uniform(value: f64) -> Self {
        Self(Vector3::repeat(value))
    }

    pub fn per_axis(values: [f64; 3]) -> Self {
        Self(Vector3::from(values))
    }

    pub fn components(&self) -> &Vector3<f64> {
        &self.0
    }

    pub fn axis(&self, index: usize) -> f64 {
        self.0[index]
    }

    /// `true` if all three components agree within [`SCALE_TOLERANCE`].
    pub fn is_uniform(&self) -> bool {
        let first = self.0[0];
        self.0.iter().all(|v| (v - first).abs() <= SCALE_TOLERANCE)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// A crystal structure as described by a POSCAR file.
///
/// The ion list and the species mapping are kept consistent: the number of ions equals the
/// sum of species counts and ions are grouped contiguously in species order. Fields that
/// cannot break this invariant are public; the ion list, species mapping and coordinate
/// mode are only changed through methods that maintain it.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Free-text first line.
    pub comment: String,
    pub scale: Scale,
    /// Lattice vectors a, b, c as rows, unscaled.
    pub lattice: Matrix3<f64>,
    /// Whether per-ion selective-dynamics flags are written.
    pub selective_dynamics: bool,
    /// Lattice velocities. Not read or written; kept for forward compatibility.
    pub lattice_velocity: Matrix3<f64>,
    /// Trailing molecular-dynamics data. Not read or written; kept for forward compatibility.
    pub md_extra: String,
    species: SpeciesCounts,
    mode: CoordinateMode,
    ions: Vec<Ion>,
}

impl Structure {
    pub fn species(&self) -> &SpeciesCounts {
        &self.species
    }

    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    pub fn ions(&self) -> &[Ion] {
        &self.ions
    }

    pub fn len(&self) -> usize {
        self.ions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ions.is_empty()
    }

    pub fn is_direct(&self) -> bool {
        self.mode == CoordinateMode::Direct
    }

    pub fn is_cartesian(&self) -> bool {
        self.mode == CoordinateMode::Cartesian
    }

    /// Returns a copy with every position replaced by `f(position)` and the mode set to `mode`.
    ///
    /// Ion order, species and flags are untouched. The caller is responsible for the new
    /// positions being meaningful in `mode`.
    pub fn remap_positions<F>(&self, mode: CoordinateMode, mut f: F) -> Structure
    where
        F: FnMut(&Vector3<f64>) -> Vector3<f64>,
    {
        let mut out = self.clone();
        for ion in &mut out.ions {
            ion.position = f(&ion.position);
        }
        out.mode = mode;
        out
    }

    /// Returns a copy whose selective-dynamics flags are replaced per ion by `f(index, ion)`.
    pub fn remap_flags<F>(&self, mut f: F) -> Structure
    where
        F: FnMut(usize, &Ion) -> [bool; 3],
    {
        let mut out = self.clone();
        for (index, ion) in out.ions.iter_mut().enumerate() {
            ion.selective_dynamics = f(index, ion);
        }
        out
    }

    /// Returns a copy with the ions at the given indices overwritten, then reconciled.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] if an index does not address an ion.
    pub fn edit_ions(&self, edits: Vec<(usize, Ion)>) -> Result<Structure, ModelError> {
        let mut ions = self.ions.clone();
        let len = ions.len();
        for (index, ion) in edits {
            let slot = ions
                .get_mut(index)
                .ok_or(ModelError::IndexOutOfRange { index, len })?;
            *slot = ion;
        }
        self.with_reconciled_ions(ions)
    }

    /// Returns a copy without the ions at the given indices, then reconciled.
    ///
    /// Indices refer to the current ion order; duplicates are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IndexOutOfRange`] if an index does not address an ion, or
    /// [`ModelError::NoSpecies`] if no ion would remain.
    pub fn remove_ions(&self, indices: &[usize]) -> Result<Structure, ModelError> {
        let len = self.ions.len();
        let doomed: BTreeSet<usize> = indices.iter().copied().collect();
        if let Some(&index) = doomed.iter().find(|&&i| i >= len) {
            return Err(ModelError::IndexOutOfRange { index, len });
        }
        let ions = self
            .ions
            .iter()
            .enumerate()
            .filter(|(i, _)| !doomed.contains(i))
            .map(|(_, ion)| ion.clone())
            .collect();
        self.with_reconciled_ions(ions)
    }

    fn with_reconciled_ions(&self, ions: Vec<Ion>) -> Result<Structure, ModelError> {
        let (species, ions) = reconcile(ions);
        if species.is_empty() {
            return Err(ModelError::NoSpecies);
        }
        Ok(Structure {
            species,
            ions,
            ..self.clone()
        })
    }
}

/// Canonicalizes labels, derives the species mapping and regroups ions contiguously.
///
/// Species order is order of first appearance; ions keep their relative order within a species.
fn reconcile(mut ions: Vec<Ion>) -> (SpeciesCounts, Vec<Ion>) {
    for ion in &mut ions {
        ion.species = canonicalize_species_label(&ion.species);
    }
    let species = SpeciesCounts::from_ions(&ions);
    let order: Vec<&str> = species.labels();
    let mut grouped: Vec<Ion> = Vec::with_capacity(ions.len());
    for label in &order {
        grouped.extend(ions.iter().filter(|ion| ion.species == *label).cloned());
    }
    (species, grouped)
}

/// Incrementally assembles a [`Structure`].
///
/// If an explicit species mapping is given, the ions are validated against it (this keeps
/// species with a count of zero). Otherwise the mapping is derived from the ions.
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    comment: String,
    scale: Scale,
    lattice: Option<Matrix3<f64>>,
    species: Option<SpeciesCounts>,
    selective_dynamics: bool,
    mode: CoordinateMode,
    ions: Vec<Ion>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn lattice(mut self, lattice: Matrix3<f64>) -> Self {
        self.lattice = Some(lattice);
        self
    }

    pub fn species(mut self, species: SpeciesCounts) -> Self {
        self.species = Some(species);
        self
    }

    pub fn selective_dynamics(mut self, enabled: bool) -> Self {
        self.selective_dynamics = enabled;
        self
    }

    pub fn mode(mut self, mode: CoordinateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn ion(mut self, ion: Ion) -> Self {
        self.ions.push(ion);
        self
    }

    pub fn ions(mut self, ions: impl IntoIterator<Item = Ion>) -> Self {
        self.ions.extend(ions);
        self
    }

    /// Finishes the structure. The lattice defaults to the identity.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if an explicit species mapping disagrees with the ions, or
    /// [`ModelError::NoSpecies`] if the structure would have no species at all.
    pub fn build(self) -> Result<Structure, ModelError> {
        let (species, ions) = match self.species {
            Some(species) => {
                species.validate(&self.ions)?;
                (species, self.ions)
            }
            None => reconcile(self.ions),
        };
        if species.is_empty() {
            return Err(ModelError::NoSpecies);
        }
        Ok(Structure {
            comment: self.comment,
            scale: self.scale,
            lattice: self.lattice.unwrap_or_else(Matrix3::identity),
            selective_dynamics: self.selective_dynamics,
            lattice_velocity: Matrix3::zeros(),
            md_extra: String::new(),
            species,
            mode: self.mode,
            ions,
        })
    }
}
