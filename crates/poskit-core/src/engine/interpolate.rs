use super::convert::convert;
use super::error::TransformError;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::sign;
use nalgebra::Vector3;
use std::fmt;
use tracing::{debug, warn};

/// An ion whose coordinates change sign on at least one axis between the two anchors.
///
/// Such an ion has probably been wrapped across a periodic boundary in one of the
/// anchors, so a straight-line path between them is unlikely to be physical.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCrossing {
    pub index: usize,
    pub species: String,
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
}

impl fmt::Display for BoundaryCrossing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ion {} ({}) may cross a periodic boundary: [{:.6}, {:.6}, {:.6}] -> [{:.6}, {:.6}, {:.6}]",
            self.index,
            self.species,
            self.start.x,
            self.start.y,
            self.start.z,
            self.end.x,
            self.end.y,
            self.end.z
        )
    }
}

#[derive(Debug, Clone)]
pub struct Interpolation {
    /// `images + 2` structures; the first and last are the anchors.
    pub images: Vec<Structure>,
    pub crossings: Vec<BoundaryCrossing>,
}

/// Builds `images` evenly spaced structures between `start` and `end`, plus both anchors.
///
/// Images take their cell, comment, species and coordinate mode from `start`; `end`
/// is converted to that mode first if needed. Selective dynamics is switched off on
/// every image. Sign changes between the anchors are reported as [`BoundaryCrossing`]s
/// and logged, but do not stop interpolation.
///
/// # Errors
///
/// Returns [`TransformError::Shape`] if the anchors hold different numbers of ions, or
/// [`TransformError::Geometry`] if `end` cannot be converted to `start`'s mode.
pub fn interpolate(
    start: &Structure,
    end: &Structure,
    images: usize,
) -> Result<Interpolation, TransformError> {
    if start.len() != end.len() {
        return Err(TransformError::Shape {
            left: start.len(),
            right: end.len(),
        });
    }
    let end = convert(end, start.mode())?;

    let crossings = find_boundary_crossings(start, &end);
    for crossing in &crossings {
        warn!("{}", crossing);
    }

    let mut template = start.clone();
    template.selective_dynamics = false;

    // Weighted form keeps both anchors bit-exact at t = 0 and t = 1.
    let segments = (images + 1) as f64;
    let structures: Vec<Structure> = (0..=images + 1)
        .map(|k| {
            let t = k as f64 / segments;
            let mut targets = end.ions().iter().map(|ion| ion.position);
            template.remap_positions(template.mode(), |p| match targets.next() {
                Some(b) => p * (1.0 - t) + b * t,
                None => *p,
            })
        })
        .collect();

    debug!(
        "Generated {} structures with {} possible boundary crossing(s)",
        structures.len(),
        crossings.len()
    );
    Ok(Interpolation {
        images: structures,
        crossings,
    })
}

/// Ions whose element-wise position signs differ between `start` and `end`.
///
/// A coordinate that is exactly zero in either anchor counts as a sign change.
pub fn find_boundary_crossings(start: &Structure, end: &Structure) -> Vec<BoundaryCrossing> {
    start
        .ions()
        .iter()
        .zip(end.ions())
        .enumerate()
        .filter(|(_, (a, b))| sign(&a.position).component_mul(&sign(&b.position)).sum() != 3.0)
        .map(|(index, (a, b))| BoundaryCrossing {
            index,
            species: a.species.clone(),
            start: a.position,
            end: b.position,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ion::Ion;
    use crate::core::models::structure::{CoordinateMode, StructureBuilder};
    use crate::engine::convert::to_cartesian;
    use nalgebra::Matrix3;

    fn anchor(positions: &[[f64; 3]]) -> Structure {
        StructureBuilder::new()
            .comment("anchor")
            .lattice(Matrix3::identity() * 10.0)
            .selective_dynamics(true)
            .ions(positions.iter().map(|p| Ion::new("N", Vector3::from(*p))))
            .build()
            .unwrap()
    }

    #[test]
    fn produces_images_plus_two_with_exact_endpoints() {
        let a = anchor(&[[0.1, 0.1, 0.1], [0.2, 0.2, 0.2]]);
        let b = anchor(&[[0.5, 0.11, 0.3], [0.2, 0.6, 0.2]]);
        for images in 0..10 {
            let result = interpolate(&a, &b, images).unwrap();
            assert_eq!(result.images.len(), images + 2);
            let first = &result.images[0];
            let last = &result.images[images + 1];
            for i in 0..2 {
                assert_eq!(first.ions()[i].position, a.ions()[i].position);
                assert_eq!(last.ions()[i].position, b.ions()[i].position);
            }
        }
    }

    #[test]
    fn midpoint_is_linear() {
        let a = anchor(&[[0.1, 0.2, 0.3]]);
        let b = anchor(&[[0.3, 0.4, 0.5]]);
        let result = interpolate(&a, &b, 1).unwrap();
        let mid = result.images[1].ions()[0].position;
        assert!((mid - Vector3::new(0.2, 0.3, 0.4)).norm() < 1e-12);
    }

    #[test]
    fn zero_images_yields_anchors_only() {
        let a = anchor(&[[0.1, 0.1, 0.1]]);
        let result = interpolate(&a, &a, 0).unwrap();
        assert_eq!(result.images.len(), 2);
        assert!(result.crossings.is_empty());
    }

    #[test]
    fn images_clear_selective_dynamics_and_keep_anchor_metadata() {
        let a = anchor(&[[0.1, 0.1, 0.1]]);
        let b = anchor(&[[0.2, 0.2, 0.2]]);
        let result = interpolate(&a, &b, 2).unwrap();
        for image in &result.images {
            assert!(!image.selective_dynamics);
            assert_eq!(image.comment, "anchor");
            assert_eq!(image.species().labels(), vec!["N"]);
            assert_eq!(image.lattice, a.lattice);
        }
        assert!(a.selective_dynamics);
    }

    #[test]
    fn mismatched_ion_counts_fail() {
        let a = anchor(&[[0.1, 0.1, 0.1]]);
        let b = anchor(&[[0.1, 0.1, 0.1], [0.2, 0.2, 0.2]]);
        assert_eq!(
            interpolate(&a, &b, 1).unwrap_err(),
            TransformError::Shape { left: 1, right: 2 }
        );
    }

    #[test]
    fn sign_flip_is_reported_but_not_fatal() {
        let a = anchor(&[[0.1, 0.1, 0.1], [0.05, 0.2, 0.2]]);
        let b = anchor(&[[0.2, 0.2, 0.2], [-0.05, 0.2, 0.2]]);
        let result = interpolate(&a, &b, 1).unwrap();
        assert_eq!(result.images.len(), 3);
        assert_eq!(result.crossings.len(), 1);
        assert_eq!(result.crossings[0].index, 1);
        assert!(result.crossings[0].to_string().contains("ion 1 (N)"));
    }

    #[test]
    fn zero_coordinate_counts_as_crossing() {
        let a = anchor(&[[0.0, 0.1, 0.1]]);
        let b = anchor(&[[0.1, 0.1, 0.1]]);
        assert_eq!(find_boundary_crossings(&a, &b).len(), 1);
    }

    #[test]
    fn end_anchor_is_converted_to_start_mode() {
        let a = anchor(&[[0.1, 0.1, 0.1]]);
        let b = to_cartesian(&anchor(&[[0.3, 0.3, 0.3]]));
        let result = interpolate(&a, &b, 1).unwrap();
        assert_eq!(result.images[1].mode(), CoordinateMode::Direct);
        let last = result.images[2].ions()[0].position;
        assert!((last - Vector3::new(0.3, 0.3, 0.3)).norm() < 1e-12);
    }
}
