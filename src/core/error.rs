//! Error types for data loading and actor configuration.

use thiserror::Error;

/// Errors that can occur when loading config or definition files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Directory or file could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Startup precondition violations. An actor that fails these never runs
/// its behaviour systems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required rig part (eye, attack root) is missing from the definition.
    #[error("Actor '{actor}' is missing required part: {part}")]
    MissingPart { actor: String, part: &'static str },

    /// A required host component is missing from the spawned entity.
    #[error("Actor '{actor}' has no {component} component")]
    MissingComponent {
        actor: String,
        component: &'static str,
    },

    /// Unknown definition name passed to the spawner.
    #[error("Unknown enemy type: {0}")]
    UnknownEnemyType(String),
}
