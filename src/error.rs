//! Error types for puredoc conversions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by conversions, template loading and configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: docx_rs::ReaderError,
    },

    #[error("Failed to pack DOCX: {0}")]
    Pack(#[source] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
