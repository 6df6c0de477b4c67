/// Prefix used for species labels generated when a file carries no species-name line.
pub const PLACEHOLDER_PREFIX: char = 'H';

/// Canonicalizes a species label: first letter upper case, the rest lower case.
///
/// # Arguments
///
/// * `label` - The raw label as read from a file or supplied by a user.
///
/// # Return
///
/// The canonical label, e.g. `"fE"` becomes `"Fe"`.
pub fn canonicalize_species_label(label: &str) -> String {
    let mut chars = label.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Builds the placeholder label for the species at `index` (zero-based), e.g. `H1`.
pub fn placeholder_label(index: usize) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, index + 1)
}

/// Returns `true` if `label` is a generated placeholder: `H` followed by one or more digits.
pub fn is_placeholder_label(label: &str) -> bool {
    label
        .strip_prefix(PLACEHOLDER_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Heuristic for the optional species-name line: every non-whitespace character is alphabetic.
///
/// An empty or whitespace-only line is never a species line.
pub fn is_species_line(line: &str) -> bool {
    let mut chars = line.chars().filter(|c| !c.is_whitespace()).peekable();
    chars.peek().is_some() && chars.all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_species_label_normalizes_case() {
        assert_eq!(canonicalize_species_label("fe"), "Fe");
        assert_eq!(canonicalize_species_label("FE"), "Fe");
        assert_eq!(canonicalize_species_label("o"), "O");
        assert_eq!(canonicalize_species_label("  zN "), "Zn");
        assert_eq!(canonicalize_species_label(""), "");
    }

    #[test]
    fn placeholder_labels_are_one_based() {
        assert_eq!(placeholder_label(0), "H1");
        assert_eq!(placeholder_label(11), "H12");
    }

    #[test]
    fn is_placeholder_label_requires_digits_after_prefix() {
        assert!(is_placeholder_label("H1"));
        assert!(is_placeholder_label("H42"));
        assert!(!is_placeholder_label("H"));
        assert!(!is_placeholder_label("He"));
        assert!(!is_placeholder_label("H1a"));
        assert!(!is_placeholder_label("O1"));
    }

    #[test]
    fn is_species_line_detects_alphabetic_lines() {
        assert!(is_species_line("Fe O"));
        assert!(is_species_line("  H\tO  "));
        assert!(!is_species_line("1 2"));
        assert!(!is_species_line("Fe 2"));
        assert!(!is_species_line(""));
        assert!(!is_species_line("   "));
    }
}
