//! Error types for the simulation.

use crate::types::Location;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Location {0} is outside the field")]
    OutOfBounds(Location),

    #[error("Location {0} is already occupied")]
    Occupied(Location),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
