//! Utility modules for ksbuilder
//!
//! This module contains the error types shared by every stage of a build.

pub mod error;

pub use error::{ConfigError, KeystoreError, Result};
