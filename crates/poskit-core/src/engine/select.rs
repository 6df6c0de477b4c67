use super::config::SelectionBox;
use super::convert::convert;
use super::error::TransformError;
use crate::core::models::structure::Structure;
use std::borrow::Cow;

/// Indices of the ions of `structure` that lie inside `selection`, in ion order.
///
/// If the box is expressed in a mode other than the structure's, positions are
/// compared on a converted copy; conversion never reorders ions, so the returned
/// indices address `structure` itself.
///
/// # Errors
///
/// Returns [`TransformError::Geometry`] if a Cartesian structure must be converted to
/// Direct and its lattice is singular.
pub fn select_box(
    structure: &Structure,
    selection: &SelectionBox,
) -> Result<Vec<usize>, TransformError> {
    let view = match selection.mode {
        Some(mode) if mode != structure.mode() => Cow::Owned(convert(structure, mode)?),
        _ => Cow::Borrowed(structure),
    };
    Ok(view
        .ions()
        .iter()
        .enumerate()
        .filter(|(_, ion)| selection.contains(&ion.position))
        .map(|(i, _)| i)
        .collect())
}
