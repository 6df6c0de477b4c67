use nalgebra::{Matrix3, Vector3};

/// Components smaller than this in magnitude are snapped to exactly zero after a transform.
pub const ZERO_TOLERANCE: f64 = 1e-8;

/// Applies a 3x3 transform to a position and snaps residual noise to zero.
pub fn apply_transform(transform: &Matrix3<f64>, position: &Vector3<f64>) -> Vector3<f64> {
    snap_to_zero(&(transform * position))
}

pub fn snap_to_zero(v: &Vector3<f64>) -> Vector3<f64> {
    v.map(|x| if x.abs() < ZERO_TOLERANCE { 0.0 } else { x })
}

/// Matrix taking fractional coordinates to Cartesian ones.
///
/// The lattice stores one lattice vector per row, so the transform is its transpose.
pub fn direct_to_cartesian_matrix(lattice: &Matrix3<f64>) -> Matrix3<f64> {
    lattice.transpose()
}

/// Matrix taking Cartesian coordinates to fractional ones, or `None` for a singular lattice.
pub fn cartesian_to_direct_matrix(lattice: &Matrix3<f64>) -> Option<Matrix3<f64>> {
    lattice.transpose().try_inverse()
}

/// Wraps a fractional position into `[0, 1)` on every axis.
pub fn wrap_to_cell(position: &Vector3<f64>) -> Vector3<f64> {
    position - position.map(f64::floor)
}

/// Element-wise sign: `-1`, `0` or `1` per component.
pub fn sign(v: &Vector3<f64>) -> Vector3<f64> {
    v.map(|x| {
        if x > 0.0 {
            1.0
        } else if x < 0.0 {
            -1.0
        } else {
            0.0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed_lattice() -> Matrix3<f64> {
        Matrix3::new(4.0, 0.0, 0.0, 2.0, 3.5, 0.0, 0.5, 0.5, 6.0)
    }

    #[test]
    fn snap_to_zero_clears_only_tiny_components() {
        let v = snap_to_zero(&Vector3::new(1e-9, -5e-9, 2e-8));
        assert_eq!(v, Vector3::new(0.0, 0.0, 2e-8));
    }

    #[test]
    fn direct_to_cartesian_combines_lattice_rows() {
        let lattice = skewed_lattice();
        let frac = Vector3::new(1.0, 0.0, 0.0);
        let cart = apply_transform(&direct_to_cartesian_matrix(&lattice), &frac);
        assert_eq!(cart, Vector3::new(4.0, 0.0, 0.0));

        let frac = Vector3::new(0.0, 1.0, 1.0);
        let cart = apply_transform(&direct_to_cartesian_matrix(&lattice), &frac);
        assert!((cart - Vector3::new(2.5, 4.0, 6.0)).norm() < 1e-12);
    }

    #[test]
    fn cartesian_to_direct_inverts_direct_to_cartesian() {
        let lattice = skewed_lattice();
        let frac = Vector3::new(0.25, 0.6, 0.9);
        let cart = apply_transform(&direct_to_cartesian_matrix(&lattice), &frac);
        let inverse = cartesian_to_direct_matrix(&lattice).unwrap();
        let back = apply_transform(&inverse, &cart);
        assert!((back - frac).norm() < 1e-8);
    }

    #[test]
    fn cartesian_to_direct_matrix_is_none_for_singular_lattice() {
        let singular = Matrix3::new(1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert!(cartesian_to_direct_matrix(&singular).is_none());
    }

    #[test]
    fn wrap_to_cell_keeps_fraction_in_unit_interval() {
        let wrapped = wrap_to_cell(&Vector3::new(1.25, -0.25, 0.5));
        assert!((wrapped - Vector3::new(0.25, 0.75, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn sign_maps_zero_to_zero() {
        assert_eq!(
            sign(&Vector3::new(-2.0, 0.0, 3.0)),
            Vector3::new(-1.0, 0.0, 1.0)
        );
    }
}
