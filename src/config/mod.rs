//! Configuration module for ksbuilder
//!
//! Settings can come from a TOML file; command-line flags and environment
//! variables override them when [`BuildOptions`] are resolved.

pub mod options;
pub mod settings;

pub use options::{BuildOptions, Overrides, DEFAULT_FILE_MODE, DEFAULT_PASSWORD};
pub use settings::Settings;
