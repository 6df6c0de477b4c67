//! # Core Module
//!
//! The foundation of poskit: the structure data model, file I/O, and the pure
//! numerical helpers the transforms are built on.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Ions, species counts, lattice, coordinate mode
//! - **File I/O** ([`io`]) - POSCAR parsing and serialization, pseudopotential assembly
//! - **Numerical Helpers** ([`utils`]) - Coordinate transforms, cell wrapping, species labels

pub mod io;
pub mod models;
pub mod utils;
