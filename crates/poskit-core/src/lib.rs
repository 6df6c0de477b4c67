//! # poskit
//!
//! A library for reading, transforming and writing POSCAR crystal-structure files.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** The `Structure`/`Ion` data model with its species
//!   grouping invariant, the POSCAR parser and serializer, the potentials catalog, and
//!   small geometric helpers.
//!
//! - **[`engine`]: The Transforms.** Pure functions from one `Structure` to another:
//!   coordinate conversion, cell wrapping, vacuum insertion, box selection,
//!   selective-dynamics assignment and image interpolation.
//!
//! - **[`workflows`]: The Public API.** File-to-file pipelines that combine the two
//!   layers above and are what the `poskit` command-line tool calls into.

pub mod core;
pub mod engine;
pub mod workflows;
