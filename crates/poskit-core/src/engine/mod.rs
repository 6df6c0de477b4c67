//! # Engine Module
//!
//! Pure transformations over [`Structure`](crate::core::models::structure::Structure)
//! values. Every operation borrows its input and returns a new structure, so the same
//! structure can be fed to several transforms without aliasing concerns.
//!
//! - **Coordinate conversion** ([`convert`]) - Direct/Cartesian conversion, toggling and
//!   wrapping ions into the unit cell.
//! - **Cell editing** ([`vacuum`]) - Growing the lattice while keeping ions in place.
//! - **Selection** ([`select`]) - Axis-aligned box queries returning ion indices.
//! - **Constraints** ([`freeze`]) - Applying selective-dynamics flags to a selection.
//! - **Interpolation** ([`interpolate`]) - Linear image paths between two anchors.
//! - **Configuration** ([`config`]) - Validated builders for selections and interpolation.

pub mod config;
pub mod convert;
pub mod error;
pub mod freeze;
pub mod interpolate;
pub mod progress;
pub mod select;
pub mod vacuum;
