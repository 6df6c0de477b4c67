//! # Core Models Module
//!
//! Data structures describing a crystal structure as held in a POSCAR file.
//!
//! ## Key Components
//!
//! - [`ion`] - A single ion: position, species label, selective-dynamics flags, velocity
//! - [`species`] - The ordered species-to-count mapping and its consistency checks
//! - [`structure`] - The complete structure: lattice, scale, coordinate mode, ions
//!
//! ## Usage
//!
//! ```ignore
//! use poskit::core::models::{ion::Ion, structure::StructureBuilder};
//!
//! let structure = StructureBuilder::new()
//!     .comment("cubic H")
//!     .lattice(Matrix3::identity() * 5.0)
//!     .ion(Ion::new("H", Vector3::new(0.5, 0.5, 0.5)))
//!     .build()?;
//! ```

pub mod ion;
pub mod species;
pub mod structure;
