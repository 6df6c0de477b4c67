use poskit::core::models::ion::{FlagParseError, Ion, SelectiveFlags};
use poskit::core::models::structure::CoordinateMode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid coordinate mode '{0}'. Expected 'cartesian' or 'direct' (or 'c', 'k', 'd').")]
    InvalidMode(String),

    #[error("Invalid selective dynamics flags: {0}")]
    InvalidFlags(#[from] FlagParseError),

    #[error("Expected exactly {expected} values for {what}, found {found}.")]
    ValueCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Parses a coordinate-mode argument. Only full words or their standard abbreviations
/// are accepted here, unlike the leading-character rule used for file content.
pub fn parse_coordinate_mode(value: &str) -> Result<CoordinateMode, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "cartesian" | "c" | "k" => Ok(CoordinateMode::Cartesian),
        "direct" | "d" => Ok(CoordinateMode::Direct),
        _ => Err(ParseError::InvalidMode(value.to_string())),
    }
}

pub fn parse_flags(tokens: &[String]) -> Result<SelectiveFlags, ParseError> {
    Ok(Ion::flags_from_tokens(tokens)?)
}

/// Converts a parsed value list into a fixed-size array.
pub fn exact<const N: usize>(values: &[f64], what: &'static str) -> Result<[f64; N], ParseError> {
    values.try_into().map_err(|_| ParseError::ValueCount {
        what,
        expected: N,
        found: values.len(),
    })
}
