//! Container file writer

use crate::utils::KeystoreError;
use std::io::Write;
use std::path::Path;

/// Write the payload to `path`, replacing any existing file, and set its
/// permission bits to `mode` (Unix only).
pub fn write_container(path: &Path, payload: &[u8], mode: u32) -> Result<(), KeystoreError> {
    let write_error = |e: std::io::Error| KeystoreError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut file = options.open(path).map_err(write_error)?;
    file.write_all(payload).map_err(write_error)?;
    file.flush().map_err(write_error)?;

    // The open mode only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .map_err(write_error)?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}
