use crate::core::models::species::ModelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    #[error("Lattice is singular and cannot be inverted")]
    Geometry,

    #[error("Structures have different ion counts: {left} vs {right}")]
    Shape { left: usize, right: usize },

    #[error("Invalid structure state: {0}")]
    State(String),
}

impl From<ModelError> for TransformError {
    fn from(err: ModelError) -> Self {
        TransformError::State(err.to_string())
    }
}
