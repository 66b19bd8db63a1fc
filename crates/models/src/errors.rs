use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid student id: {0}")]
    InvalidId(String),
    #[error("no data provided for update")]
    EmptyUpdate,
}
