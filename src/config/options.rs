//! Resolved build options
//!
//! Precedence is flag, then environment variable (both handled by clap),
//! then settings file, then built-in default.

use crate::config::Settings;
use crate::keystore::DEFAULT_ALIAS;
use crate::utils::ConfigError;
use std::path::PathBuf;

/// Password used when none is configured
pub const DEFAULT_PASSWORD: &str = "changeit";

/// Permission bits of the written container
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub out: Option<PathBuf>,
    pub password: Option<String>,
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub recursive: bool,
}

/// Everything a build needs, with defaults applied
#[derive(Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub out: PathBuf,
    pub password: String,
    /// True when [`DEFAULT_PASSWORD`] was substituted
    pub password_defaulted: bool,
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub recursive: bool,
    pub file_mode: u32,
    pub default_alias: String,
}

impl std::fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildOptions")
            .field("out", &self.out)
            .field("password", &"<redacted>")
            .field("password_defaulted", &self.password_defaulted)
            .field("dirs", &self.dirs)
            .field("files", &self.files)
            .field("recursive", &self.recursive)
            .field("file_mode", &format_args!("{:o}", self.file_mode))
            .field("default_alias", &self.default_alias)
            .finish()
    }
}

impl BuildOptions {
    pub fn resolve(overrides: Overrides, settings: Settings) -> Result<Self, ConfigError> {
        let out = overrides
            .out
            .or(settings.out)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired {
                key: "output file (use --out $FILE or set KSBUILDER_OUT)".to_string(),
            })?;

        let password = overrides
            .password
            .or(settings.password)
            .filter(|p| !p.is_empty());
        let password_defaulted = password.is_none();
        let password = password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        let mut dirs = non_empty(overrides.dirs);
        if dirs.is_empty() {
            dirs = non_empty(settings.dirs);
        }
        let mut files = non_empty(overrides.files);
        if files.is_empty() {
            files = non_empty(settings.files);
        }
        // Nothing named at all: read the working directory
        if dirs.is_empty() && files.is_empty() {
            dirs.push(PathBuf::from("."));
        }

        Ok(Self {
            out,
            password,
            password_defaulted,
            dirs,
            files,
            recursive: overrides.recursive || settings.recursive.unwrap_or(false),
            file_mode: settings.file_mode.unwrap_or(DEFAULT_FILE_MODE),
            default_alias: settings
                .default_alias
                .unwrap_or_else(|| DEFAULT_ALIAS.to_string()),
        })
    }
}

fn non_empty(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}
