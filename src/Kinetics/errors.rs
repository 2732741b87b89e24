use thiserror::Error;

/// error types for reaction bookkeeping, kinetic laws and the component catalog
#[derive(Debug, Error)]
pub enum KineticsError {
    /// a row lacks a required field or the reaction breaks a law-specific rule
    #[error("Incomplete reaction: {0}")]
    IncompleteReaction(String),
    #[error("Index {index} is out of range for registry of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
    #[error("Component already exists: {0}")]
    DuplicateComponent(String),
    #[error("Invalid component: {0}")]
    InvalidComponent(String),
    #[error("No molar mass or formula for component {0}")]
    MissingMolarMass(String),
    /// kinetic constant left empty (to be found by regression)
    #[error("Kinetic parameter {0} is not set")]
    MissingParameter(String),
    #[error("No concentration given for component {0}")]
    MissingConcentration(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Cannot parse formula: {0}")]
    FormulaError(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type KineticsResult<T> = Result<T, KineticsError>;
