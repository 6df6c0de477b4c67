//! Provides input/output functionality for structure files.
//!
//! This module contains the POSCAR reader and writer behind a small trait-based
//! interface, and the potentials catalog that assembles a POTCAR from a directory
//! of per-species pseudopotentials.

pub mod poscar;
pub mod potcar;
pub mod traits;
