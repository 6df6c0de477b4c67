use super::convert::{convert, to_cartesian};
use super::error::TransformError;
use crate::core::models::structure::Structure;
use tracing::debug;

/// Grows the cell by `depth` (length units) along each lattice diagonal, keeping ions fixed in space.
///
/// Positions are held in Cartesian coordinates while the lattice changes and are
/// converted back to the input's mode afterwards. Because the stored lattice is
/// unscaled, each depth is divided by the matching scale component.
///
/// # Errors
///
/// Returns [`TransformError::Geometry`] if the grown lattice is singular and the input
/// was in Direct mode.
pub fn add_vacuum(structure: &Structure, depth: [f64; 3]) -> Result<Structure, TransformError> {
    let mut grown = to_cartesian(structure);
    for (axis, d) in depth.iter().enumerate() {
        let delta = d / structure.scale.axis(axis);
        grown.lattice[(axis, axis)] += delta;
    }
    debug!("Added vacuum {:?}; new lattice diagonal {:?}", depth, grown.lattice.diagonal());
    convert(&grown, structure.mode())
}
