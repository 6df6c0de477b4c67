use super::error::TransformError;
use crate::core::models::structure::{CoordinateMode, Structure};
use crate::core::utils::geometry::{
    apply_transform, cartesian_to_direct_matrix, direct_to_cartesian_matrix, wrap_to_cell,
};
use tracing::trace;

/// Returns `structure` with positions in Cartesian coordinates.
///
/// A structure already in Cartesian mode is returned unchanged.
pub fn to_cartesian(structure: &Structure) -> Structure {
    if structure.is_cartesian() {
        return structure.clone();
    }
    let transform = direct_to_cartesian_matrix(&structure.lattice);
    structure.remap_positions(CoordinateMode::Cartesian, |p| apply_transform(&transform, p))
}

/// Returns `structure` with positions in Direct (fractional) coordinates.
///
/// # Errors
///
/// Returns [`TransformError::Geometry`] if the lattice cannot be inverted.
pub fn to_direct(structure: &Structure) -> Result<Structure, TransformError> {
    if structure.is_direct() {
        return Ok(structure.clone());
    }
    let transform = cartesian_to_direct_matrix(&structure.lattice).ok_or(TransformError::Geometry)?;
    Ok(structure.remap_positions(CoordinateMode::Direct, |p| apply_transform(&transform, p)))
}

/// Converts `structure` to `mode`; a no-op if it is already there.
pub fn convert(structure: &Structure, mode: CoordinateMode) -> Result<Structure, TransformError> {
    match mode {
        CoordinateMode::Cartesian => Ok(to_cartesian(structure)),
        CoordinateMode::Direct => to_direct(structure),
    }
}

/// Converts `structure` to the mode it is not in.
pub fn toggle(structure: &Structure) -> Result<Structure, TransformError> {
    let target = structure.mode().flipped();
    trace!("Toggling coordinates from {} to {}", structure.mode(), target);
    convert(structure, target)
}

/// Wraps every ion into the unit cell, i.e. fractional coordinates in `[0, 1)`.
///
/// The result is in the same mode as the input.
pub fn constrain(structure: &Structure) -> Result<Structure, TransformError> {
    let original_mode = structure.mode();
    let direct = to_direct(structure)?;
    let wrapped = direct.remap_positions(CoordinateMode::Direct, wrap_to_cell);
    convert(&wrapped, original_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ion::Ion;
    use crate::core::models::structure::StructureBuilder;
    use nalgebra::{Matrix3, Vector3};

    fn cubic(mode: CoordinateMode, positions: &[[f64; 3]]) -> Structure {
        StructureBuilder::new()
            .lattice(Matrix3::identity() * 5.0)
            .mode(mode)
            .ions(positions.iter().map(|p| Ion::new("H", Vector3::from(*p))))
            .build()
            .unwrap()
    }

    fn triclinic() -> Structure {
        StructureBuilder::new()
            .lattice(Matrix3::new(4.0, 0.0, 0.0, 1.2, 3.8, 0.0, 0.7, -0.4, 6.1))
            .ions([
                Ion::new("Si", Vector3::new(0.1, 0.25, 0.9)),
                Ion::new("O", Vector3::new(0.75, 0.5, 0.33)),
            ])
            .build()
            .unwrap()
    }

    fn assert_positions_close(a: &Structure, b: &Structure, tol: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.ions().iter().zip(b.ions()) {
            assert!(
                (x.position - y.position).norm() < tol,
                "{:?} != {:?}",
                x.position,
                y.position
            );
        }
    }

    #[test]
    fn direct_center_of_cubic_cell_converts_to_cartesian() {
        let s = to_cartesian(&cubic(CoordinateMode::Direct, &[[0.5, 0.5, 0.5]]));
        assert!(s.is_cartesian());
        assert_eq!(s.ions()[0].position, Vector3::new(2.5, 2.5, 2.5));
    }

    #[test]
    fn conversion_uses_lattice_rows_as_vectors() {
        let s = StructureBuilder::new()
            .lattice(Matrix3::new(1.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 3.0))
            .ion(Ion::new("H", Vector3::new(0.0, 1.0, 0.0)))
            .build()
            .unwrap();
        assert_eq!(to_cartesian(&s).ions()[0].position, Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn conversion_is_idempotent() {
        let direct = triclinic();
        let cart = to_cartesian(&direct);
        assert_eq!(to_cartesian(&cart), cart);
        let back = to_direct(&cart).unwrap();
        assert_eq!(to_direct(&back).unwrap(), back);
    }

    #[test]
    fn round_trip_reproduces_fractional_positions() {
        let direct = triclinic();
        let back = to_direct(&to_cartesian(&direct)).unwrap();
        assert!(back.is_direct());
        assert_positions_close(&direct, &back, 1e-8);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let s = triclinic();
        let once = toggle(&s).unwrap();
        assert!(once.is_cartesian());
        let twice = toggle(&once).unwrap();
        assert!(twice.is_direct());
        assert_positions_close(&s, &twice, 1e-8);
    }

    #[test]
    fn tiny_components_are_snapped_to_zero() {
        let s = StructureBuilder::new()
            .lattice(Matrix3::new(1.0, 1e-12, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0))
            .ion(Ion::new("H", Vector3::new(1.0, 0.0, 0.0)))
            .build()
            .unwrap();
        let p = to_cartesian(&s).ions()[0].position;
        assert_eq!(p.y, 0.0);
        assert!(p.y.is_sign_positive());
    }

    #[test]
    fn singular_lattice_fails_to_convert_to_direct() {
        let mut s = cubic(CoordinateMode::Cartesian, &[[1.0, 1.0, 1.0]]);
        s.lattice = Matrix3::new(1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(to_direct(&s), Err(TransformError::Geometry));
    }

    #[test]
    fn singular_lattice_is_irrelevant_when_already_direct() {
        let mut s = cubic(CoordinateMode::Direct, &[[0.1, 0.1, 0.1]]);
        s.lattice = Matrix3::zeros();
        assert!(to_direct(&s).is_ok());
    }

    #[test]
    fn constrain_wraps_direct_positions() {
        let s = cubic(CoordinateMode::Direct, &[[1.25, -0.25, 0.5], [2.0, 0.0, -1.0]]);
        let wrapped = constrain(&s).unwrap();
        assert!(wrapped.is_direct());
        assert_eq!(wrapped.ions()[0].position, Vector3::new(0.25, 0.75, 0.5));
        assert_eq!(wrapped.ions()[1].position, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn constrain_restores_cartesian_mode() {
        let s = cubic(CoordinateMode::Cartesian, &[[6.0, -1.0, 2.5]]);
        let wrapped = constrain(&s).unwrap();
        assert!(wrapped.is_cartesian());
        let p = wrapped.ions()[0].position;
        assert!((p - Vector3::new(1.0, 4.0, 2.5)).norm() < 1e-10);
    }

    #[test]
    fn conversion_leaves_species_and_flags_alone() {
        let s = triclinic().remap_flags(|_, _| [true, false, true]);
        let cart = to_cartesian(&s);
        assert_eq!(cart.species(), s.species());
        assert_eq!(cart.ions()[1].selective_dynamics, [true, false, true]);
    }
}
