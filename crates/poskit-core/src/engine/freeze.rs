use super::error::TransformError;
use crate::core::models::ion::{ALL_FREE, SelectiveFlags};
use crate::core::models::species::ModelError;
use crate::core::models::structure::Structure;
use std::collections::HashSet;

/// Assigns `flags` to the selected ions and turns selective dynamics on.
///
/// Ions outside `selection` keep their current flags when `preserve_unspecified` is
/// set and are made fully free otherwise.
///
/// # Errors
///
/// Returns [`TransformError::State`] if an index in `selection` does not address an ion.
pub fn apply_selective_dynamics(
    structure: &Structure,
    selection: &[usize],
    flags: SelectiveFlags,
    preserve_unspecified: bool,
) -> Result<Structure, TransformError> {
    let len = structure.len();
    if let Some(&index) = selection.iter().find(|&&i| i >= len) {
        return Err(ModelError::IndexOutOfRange { index, len }.into());
    }
    let selected: HashSet<usize> = selection.iter().copied().collect();
    let mut out = structure.remap_flags(|index, ion| {
        if selected.contains(&index) {
            flags
        } else if preserve_unspecified {
            ion.selective_dynamics
        } else {
            ALL_FREE
        }
    });
    out.selective_dynamics = true;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ion::Ion;
    use crate::core::models::structure::StructureBuilder;
    use nalgebra::Vector3;

    fn structure() -> Structure {
        StructureBuilder::new()
            .ions((0..4).map(|i| {
                Ion::new("Cu", Vector3::new(0.0, 0.0, i as f64 * 0.25))
                    .with_flags([false, true, false])
            }))
            .build()
            .unwrap()
    }

    #[test]
    fn selected_ions_receive_flags_and_others_are_freed() {
        let s = apply_selective_dynamics(&structure(), &[0, 1], [false; 3], false).unwrap();
        assert!(s.selective_dynamics);
        let flags: Vec<_> = s.ions().iter().map(|i| i.selective_dynamics).collect();
        assert_eq!(flags, vec![[false; 3], [false; 3], ALL_FREE, ALL_FREE]);
    }

    #[test]
    fn preserve_unspecified_keeps_existing_flags() {
        let s = apply_selective_dynamics(&structure(), &[3], [true, true, false], true).unwrap();
        assert_eq!(s.ions()[0].selective_dynamics, [false, true, false]);
        assert_eq!(s.ions()[3].selective_dynamics, [true, true, false]);
    }

    #[test]
    fn empty_selection_only_resets_flags() {
        let s = apply_selective_dynamics(&structure(), &[], [false; 3], false).unwrap();
        assert!(s.ions().iter().all(|i| i.selective_dynamics == ALL_FREE));
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let result = apply_selective_dynamics(&structure(), &[4], [false; 3], false);
        assert!(matches!(result, Err(TransformError::State(_))));
    }
}
