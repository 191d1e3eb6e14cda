//! Settings file
//!
//! Every key is optional:
//!
//! ```toml
//! out = "keystore.p12"
//! password = "secret"
//! dirs = ["certs"]
//! files = ["extra/leaf.pem"]
//! recursive = true
//! file_mode = 420
//! default_alias = "tomcat"
//! ```
//!
//! Relative `out`, `dirs` and `files` paths are taken relative to the
//! directory holding the settings file.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub out: Option<PathBuf>,
    pub password: Option<String>,
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub recursive: Option<bool>,
    /// Unix permission bits for the written container
    pub file_mode: Option<u32>,
    /// Key entry alias used when the end-entity certificate has no CN
    pub default_alias: Option<String>,
}

impl Settings {
    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let mut settings = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            settings.rebase(base);
        }
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    /// Join relative paths onto `base`
    fn rebase(&mut self, base: &Path) {
        let join = |p: &PathBuf| {
            if p.is_relative() && !p.as_os_str().is_empty() {
                base.join(p)
            } else {
                p.clone()
            }
        };
        self.out = self.out.as_ref().map(join);
        self.dirs = self.dirs.iter().map(join).collect();
        self.files = self.files.iter().map(join).collect();
    }
}
