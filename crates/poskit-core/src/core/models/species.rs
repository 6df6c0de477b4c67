use super::ion::Ion;
use crate::core::utils::identifiers::{canonicalize_species_label, is_placeholder_label};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Species '{0}' appears more than once")]
    DuplicateSpecies(String),
    #[error("Species counts total {expected} ions but {found} ions were supplied")]
    IonCountMismatch { expected: usize, found: usize },
    #[error("Ion {index} has species '{found}' but species grouping expects '{expected}'")]
    SpeciesOrder {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("Ion index {index} is out of range for a structure with {len} ions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("A structure needs at least one species")]
    NoSpecies,
}

/// Ordered mapping from species label to ion count.
///
/// The order is the order in which species are grouped in the ion list and is part of
/// the structure's invariant, so the mapping is stored as an ordered list of pairs rather
/// than a hash map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesCounts {
    entries: Vec<(String, usize)>,
}

impl SpeciesCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mapping from `(label, count)` pairs, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateSpecies`] if a label appears twice.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut counts = Self::new();
        for (label, count) in pairs {
            counts.push(label.into(), count)?;
        }
        Ok(counts)
    }

    /// Derives the mapping from an ion list: species in order of first appearance.
    ///
    /// Labels are compared after canonicalization.
    pub fn from_ions(ions: &[Ion]) -> Self {
        let mut entries: Vec<(String, usize)> = Vec::new();
        for ion in ions {
            let label = canonicalize_species_label(&ion.species);
            match entries.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => entries.push((label, 1)),
            }
        }
        Self { entries }
    }

    fn push(&mut self, label: String, count: usize) -> Result<(), ModelError> {
        if self.contains(&label) {
            return Err(ModelError::DuplicateSpecies(label));
        }
        self.entries.push((label, count));
        Ok(())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Ordered unique species labels, e.g. for assembling potentials.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(l, _)| l.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, c)| *c).collect()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when every label is a generated placeholder (`H1`, `H2`, ...).
    ///
    /// Such labels were not read from a file and are not written back.
    pub fn all_placeholders(&self) -> bool {
        self.entries.iter().all(|(l, _)| is_placeholder_label(l))
    }

    /// Expands the mapping into one label per ion, in grouping order.
    pub fn expand(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|(l, c)| std::iter::repeat_n(l.as_str(), *c))
    }

    /// Checks that `ions` matches this mapping: same total and contiguous grouping.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::IonCountMismatch`] or [`ModelError::SpeciesOrder`].
    pub fn validate(&self, ions: &[Ion]) -> Result<(), ModelError> {
        let expected = self.total();
        if expected != ions.len() {
            return Err(ModelError::IonCountMismatch {
                expected,
                found: ions.len(),
            });
        }
        for (index, (label, ion)) in self.expand().zip(ions).enumerate() {
            if label != ion.species {
                return Err(ModelError::SpeciesOrder {
                    index,
                    expected: label.to_string(),
                    found: ion.species.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn ion(species: &str) -> Ion {
        Ion::new(species, Vector3::zeros())
    }

    #[test]
    fn from_pairs_preserves_order() {
        let counts = SpeciesCounts::from_pairs([("O", 2), ("Fe", 1)]).unwrap();
        assert_eq!(counts.labels(), vec!["O", "Fe"]);
        assert_eq!(counts.counts(), vec![2, 1]);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.get("Fe"), Some(1));
        assert_eq!(counts.get("H"), None);
    }

    #[test]
    fn from_pairs_rejects_duplicates() {
        let result = SpeciesCounts::from_pairs([("O", 2), ("H", 1), ("O", 1)]);
        assert_eq!(result, Err(ModelError::DuplicateSpecies("O".to_string())));
    }

    #[test]
    fn from_ions_uses_first_appearance_and_canonical_labels() {
        let ions = vec![ion("o"), ion("H"), ion("O"), ion("h")];
        let counts = SpeciesCounts::from_ions(&ions);
        assert_eq!(counts.labels(), vec!["O", "H"]);
        assert_eq!(counts.counts(), vec![2, 2]);
    }

    #[test]
    fn expand_repeats_labels_by_count() {
        let counts = SpeciesCounts::from_pairs([("Ti", 1), ("O", 2)]).unwrap();
        assert_eq!(counts.expand().collect::<Vec<_>>(), vec!["Ti", "O", "O"]);
    }

    #[test]
    fn all_placeholders_detects_generated_labels() {
        let generated = SpeciesCounts::from_pairs([("H1", 1), ("H2", 3)]).unwrap();
        assert!(generated.all_placeholders());
        let real = SpeciesCounts::from_pairs([("H1", 1), ("H", 3)]).unwrap();
        assert!(!real.all_placeholders());
    }

    #[test]
    fn validate_accepts_matching_grouping() {
        let counts = SpeciesCounts::from_pairs([("H", 2), ("O", 1)]).unwrap();
        assert!(counts.validate(&[ion("H"), ion("H"), ion("O")]).is_ok());
    }

    #[test]
    fn validate_rejects_wrong_total() {
        let counts = SpeciesCounts::from_pairs([("H", 2), ("O", 1)]).unwrap();
        assert_eq!(
            counts.validate(&[ion("H"), ion("O")]),
            Err(ModelError::IonCountMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn validate_rejects_interleaved_species() {
        let counts = SpeciesCounts::from_pairs([("H", 2), ("O", 1)]).unwrap();
        let result = counts.validate(&[ion("H"), ion("O"), ion("H")]);
        assert!(matches!(result, Err(ModelError::SpeciesOrder { index: 1, .. })));
    }
}
