//! CLI argument definitions using clap

use crate::config::{BuildOptions, Overrides, Settings};
use crate::utils::ConfigError;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ksbuilder")]
#[command(version)]
#[command(
    about = "Build a PKCS#12 keystore or trust store from PEM certificates and keys",
    long_about = "Collects certificates and at most one private key from PEM files and writes them \
                  into a password-protected PKCS#12 container. With a private key the output is a \
                  keystore (key, end-entity certificate and chain); without one it is a trust store."
)]
pub struct Cli {
    /// Path to the output file
    #[arg(short, long, value_name = "FILE", env = "KSBUILDER_OUT")]
    pub out: Option<PathBuf>,

    /// Keystore password for the output file (default: changeit)
    #[arg(
        short,
        long,
        value_name = "PASSWORD",
        env = "KSBUILDER_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Directory to add files from
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        env = "KSBUILDER_DIR",
        value_delimiter = ','
    )]
    pub dirs: Vec<PathBuf>,

    /// Certificate or key file to add
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        env = "KSBUILDER_FILE",
        value_delimiter = ','
    )]
    pub files: Vec<PathBuf>,

    /// Recurse into sub-directories
    #[arg(short, long, env = "KSBUILDER_RECURSIVE")]
    pub recursive: bool,

    /// TOML settings file
    #[arg(short, long, value_name = "FILE", env = "KSBUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Merge flags and environment with the settings file, if any
    pub fn resolve(&self) -> Result<BuildOptions, ConfigError> {
        let settings = match &self.config {
            Some(path) => Settings::load_from_file(path)?,
            None => Settings::default(),
        };

        let overrides = Overrides {
            out: self.out.clone(),
            password: self.password.clone(),
            dirs: self.dirs.clone(),
            files: self.files.clone(),
            recursive: self.recursive,
        };

        BuildOptions::resolve(overrides, settings)
    }

    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
