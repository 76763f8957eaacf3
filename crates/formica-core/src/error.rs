//! Error types for Formica operations.
//!
//! Recoverable failures (building a malformed world, bad configuration, a
//! crashed ant thread) are reported through [`FormicaError`]. Broken modeling
//! invariants inside an ant's decision loop are not errors: they panic.

use thiserror::Error;

/// Result type for Formica operations.
pub type Result<T> = std::result::Result<T, FormicaError>;

/// Errors that can occur while building or running a colony.
#[derive(Debug, Clone, Error)]
pub enum FormicaError {
    /// World construction errors.
    #[error("World error: {0}")]
    World(#[from] WorldError),
    /// Configuration errors.
    #[error("Invalid value for {field}: {value} ({reason})")]
    Config {
        field: String,
        value: String,
        reason: String,
    },
    /// The OS refused to start an ant thread.
    #[error("Could not start ant {name}: {message}")]
    ThreadSpawn { name: String, message: String },
    /// An ant thread panicked.
    #[error("Ant {name} panicked: {message}")]
    AntPanicked { name: String, message: String },
    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FormicaError {
    fn from(e: serde_json::Error) -> Self {
        FormicaError::Serialization(e.to_string())
    }
}

/// World construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// No clearing was marked as the anthill.
    #[error("no anthill designated")]
    MissingAnthill,
    /// A clearing name was used twice.
    #[error("duplicate clearing: {0}")]
    DuplicateClearing(String),
    /// A trail references a clearing that was never created.
    #[error("unknown clearing: {0}")]
    UnknownClearing(String),
    /// A trail from a clearing to itself.
    #[error("trail from {0} to itself")]
    SelfLoop(String),
    /// The anthill was given a finite capacity. Spawning never waits, so
    /// the anthill must admit every ant.
    #[error("anthill {0} must have unbounded capacity")]
    BoundedAnthill(String),
}

// Convenience constructors
impl FormicaError {
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FormicaError::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_clearing(name: impl Into<String>) -> Self {
        FormicaError::World(WorldError::UnknownClearing(name.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_errors_convert_and_display() {
        let err: FormicaError = WorldError::MissingAnthill.into();
        assert_eq!(err.to_string(), "World error: no anthill designated");
        assert_eq!(
            FormicaError::unknown_clearing("C9").to_string(),
            "World error: unknown clearing: C9"
        );
        assert_eq!(
            FormicaError::from(WorldError::BoundedAnthill("H".into())).to_string(),
            "World error: anthill H must have unbounded capacity"
        );
    }

    #[test]
    fn config_error_names_the_field() {
        let err = FormicaError::invalid_config("ant_count", "0", "at least one ant is required");
        assert_eq!(
            err.to_string(),
            "Invalid value for ant_count: 0 (at least one ant is required)"
        );
    }
}
