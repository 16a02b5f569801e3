
use std::fmt;

use thiserror::Error;

/// Which side of a context an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Object,
    Attribute,
}
impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Object => write!(f, "object"),
            Side::Attribute => write!(f, "attribute"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LecticError {
    #[error("Invalid identifier: unknown {kind} '{identifier}'")]
    InvalidIdentifier { kind: Side, identifier: String },
    #[error("Duplicate identifier: {kind} '{identifier}' is declared more than once")]
    DuplicateIdentifier { kind: Side, identifier: String },
    #[error("Inconsistent relation: {0}")]
    InconsistentRelation(String),
    #[error("Incomplete concept set: {0}")]
    IncompleteConceptSet(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, LecticError>;

// Helper conversions
impl From<config::ConfigError> for LecticError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for LecticError {
    fn from(e: serde_json::Error) -> Self { Self::Export(e.to_string()) }
}
