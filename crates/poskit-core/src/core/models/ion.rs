use nalgebra::Vector3;
use thiserror::Error;

/// Per-axis selective-dynamics flags; `true` means the ion may move along that lattice axis.
pub type SelectiveFlags = [bool; 3];

/// All axes free, the value assumed when a file carries no flags.
pub const ALL_FREE: SelectiveFlags = [true; 3];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlagParseError {
    #[error("Expected 3 selective dynamics flags, found {0}")]
    WrongCount(usize),
    #[error("Invalid selective dynamics flag '{0}' (expected 'T' or 'F')")]
    InvalidToken(String),
}

/// An ion (atom) held by a [`Structure`](super::structure::Structure).
///
/// The ion carries no knowledge of coordinate mode: `position` is fractional or
/// Cartesian depending on the mode of the structure that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ion {
    /// Position in the owning structure's coordinate mode.
    pub position: Vector3<f64>,
    /// Canonical species label (e.g. `"Fe"`).
    pub species: String,
    /// Per-axis freedom flags used when selective dynamics is enabled.
    pub selective_dynamics: SelectiveFlags,
    /// Velocity vector. Never persisted; always zero after a read.
    pub velocity: Vector3<f64>,
}

impl Ion {
    /// Creates a free, motionless ion of the given species at `position`.
    pub fn new(species: &str, position: Vector3<f64>) -> Self {
        Self {
            position,
            species: species.to_string(),
            selective_dynamics: ALL_FREE,
            velocity: Vector3::zeros(),
        }
    }

    pub fn with_flags(mut self, flags: SelectiveFlags) -> Self {
        self.selective_dynamics = flags;
        self
    }

    /// Strictly parses three `T`/`F` tokens into selective-dynamics flags.
    ///
    /// This is meant for user-supplied flags. File parsing is lenient and treats any
    /// token other than `F` as free; see [`Ion::flags_from_file_tokens`].
    ///
    /// # Errors
    ///
    /// Returns [`FlagParseError`] if there are not exactly three tokens or a token is
    /// neither `T` nor `F` (case-insensitive).
    pub fn flags_from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<SelectiveFlags, FlagParseError> {
        if tokens.len() != 3 {
            return Err(FlagParseError::WrongCount(tokens.len()));
        }
        let mut flags = ALL_FREE;
        for (flag, token) in flags.iter_mut().zip(tokens) {
            *flag = match token.as_ref().trim() {
                "T" | "t" => true,
                "F" | "f" => false,
                other => return Err(FlagParseError::InvalidToken(other.to_string())),
            };
        }
        Ok(flags)
    }

    /// Lenient flag parsing used for file content: only the literal `F` freezes an axis.
    pub fn flags_from_file_tokens(tokens: [&str; 3]) -> SelectiveFlags {
        tokens.map(|t| t != "F")
    }

    pub fn flag_char(free: bool) -> char {
        if free { 'T' } else { 'F' }
    }
}
