//! Custom error types for ksbuilder
//!
//! Every failure in a run is unrecoverable: each variant maps onto one stage
//! of the pipeline and carries the file or subject it concerns.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for a keystore build
#[derive(Error, Debug)]
pub enum KeystoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Failed to load {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(
        "Cannot have two end-entity certificates in a keystore: already holding '{existing}', found '{rejected}'"
    )]
    DuplicateEndEntity { existing: String, rejected: String },

    #[error("Cannot have two private keys in a keystore")]
    DuplicateKey,

    /// Classification failure, tagged with the file the object came from
    #[error("Rejected an object in {}: {source}", path.display())]
    Rejected {
        path: PathBuf,
        source: Box<KeystoreError>,
    },

    #[error("Private key was set but no matching end-entity certificate was found")]
    MissingEndEntityCert,

    #[error("Failed to encode container: {message}")]
    Encode { message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },
}

/// Result type alias using KeystoreError
pub type Result<T> = std::result::Result<T, KeystoreError>;
