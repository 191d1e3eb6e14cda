//! ksbuilder library
//!
//! Builds a password-protected PKCS#12 container from PEM files:
//! - walks directories and explicit files for `.crt`, `.key` and `.pem` inputs
//! - classifies certificates as root CA, intermediate CA or end-entity
//! - accepts at most one private key and one end-entity certificate
//! - writes a keystore when a key is present, a trust store otherwise
//!
//! # Usage
//!
//! ```rust,ignore
//! use ksbuilder::config::{BuildOptions, Overrides, Settings};
//!
//! let overrides = Overrides {
//!     out: Some("keystore.p12".into()),
//!     dirs: vec!["certs".into()],
//!     ..Overrides::default()
//! };
//! let options = BuildOptions::resolve(overrides, Settings::default())?;
//! let summary = ksbuilder::runner::run(&options)?;
//! println!("wrote a {}", summary.mode);
//! ```

pub mod cert_ops;
pub mod cli;
pub mod config;
pub mod input;
pub mod keystore;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use cert_ops::{Certificate, PrivateKey};
pub use cli::Cli;
pub use config::{BuildOptions, Settings};
pub use keystore::{assemble, Aggregate, ContainerMode, Pkcs12Encoder, Role};
pub use utils::{KeystoreError, Result};
