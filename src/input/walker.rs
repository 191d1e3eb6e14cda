//! Candidate file collection
//!
//! Explicit files come first, in the order given, followed by the files
//! found under each directory. Directories are read one level deep unless
//! recursion is requested, and entries are visited in file-name order.

use crate::utils::KeystoreError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// File extensions picked up while walking a directory
pub const ALLOWED_EXTENSIONS: &[&str] = &["crt", "key", "pem"];

/// Whether a path ends in one of [`ALLOWED_EXTENSIONS`]
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext))
}

/// Collect the de-duplicated, ordered list of files to read.
///
/// Explicit files are taken as given, whatever their extension.
pub fn collect_candidates(
    dirs: &[PathBuf],
    files: &[PathBuf],
    recursive: bool,
) -> Result<Vec<PathBuf>, KeystoreError> {
    let mut candidates = Candidates::default();

    for file in files {
        candidates.push(file.clone());
    }

    for dir in dirs {
        walk_directory(dir, recursive, &mut candidates)?;
    }

    Ok(candidates.paths)
}

#[derive(Default)]
struct Candidates {
    seen: HashSet<PathBuf>,
    paths: Vec<PathBuf>,
}

impl Candidates {
    fn push(&mut self, path: PathBuf) {
        // Paths that cannot be resolved yet are kept so reading reports them
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if self.seen.insert(key) {
            self.paths.push(path);
        } else {
            debug!("Skipping {}: already added", path.display());
        }
    }
}

fn walk_directory(
    dir: &Path,
    recursive: bool,
    candidates: &mut Candidates,
) -> Result<(), KeystoreError> {
    if !dir.is_dir() {
        return Err(KeystoreError::Walk {
            path: dir.to_path_buf(),
            message: "not a directory or does not exist".to_string(),
        });
    }

    info!("Walking {}...", dir.display());

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| KeystoreError::Walk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf()),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if recursive {
                info!("Descending into {}", path.display());
            } else {
                info!(
                    "Skipping {}: is a directory and recursion is off",
                    path.display()
                );
            }
            continue;
        }

        if !has_allowed_extension(path) {
            info!(
                "Skipping {}: extension is not '.crt', '.key', or '.pem'",
                path.display()
            );
            continue;
        }

        candidates.push(path.to_path_buf());
    }

    info!("Completed walk of {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_extension_filter() {
        assert!(has_allowed_extension(Path::new("a.crt")));
        assert!(has_allowed_extension(Path::new("dir/b.key")));
        assert!(has_allowed_extension(Path::new("c.pem")));
        assert!(!has_allowed_extension(Path::new("d.der")));
        assert!(!has_allowed_extension(Path::new("README")));
        assert!(!has_allowed_extension(Path::new("e.PEM")));
    }

    #[test]
    fn test_non_recursive_walk_skips_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("b.pem"));
        touch(&tmp.path().join("a.crt"));
        touch(&tmp.path().join("notes.txt"));
        touch(&tmp.path().join("nested").join("c.key"));

        let found = collect_candidates(&[tmp.path().to_path_buf()], &[], false).unwrap();
        assert_eq!(names(&found), ["a.crt", "b.pem"]);
    }

    #[test]
    fn test_recursive_walk_descends() {
        let tmp = tempfile::tempdir().unwrap();
        touch(&tmp.path().join("a.crt"));
        touch(&tmp.path().join("nested").join("c.key"));
        touch(&tmp.path().join("nested").join("deeper").join("d.pem"));

        let found = collect_candidates(&[tmp.path().to_path_buf()], &[], true).unwrap();
        assert_eq!(names(&found), ["a.crt", "c.key", "d.pem"]);
    }

    #[test]
    fn test_explicit_files_come_first_and_are_deduplicated() {
        let tmp = tempfile::tempdir().unwrap();
        let leaf = tmp.path().join("z.crt");
        touch(&tmp.path().join("a.crt"));
        touch(&leaf);

        let found = collect_candidates(
            &[tmp.path().to_path_buf(), tmp.path().to_path_buf()],
            &[leaf.clone()],
            false,
        )
        .unwrap();
        assert_eq!(names(&found), ["z.crt", "a.crt"]);
        assert_eq!(found[0], leaf);
    }

    #[test]
    fn test_explicit_files_skip_extension_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let bundle = tmp.path().join("bundle.txt");
        touch(&bundle);

        let found = collect_candidates(&[], &[bundle.clone()], false).unwrap();
        assert_eq!(found, [bundle]);
    }

    #[test]
    fn test_missing_directory_is_a_walk_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        let err = collect_candidates(&[missing.clone()], &[], false).unwrap_err();
        match err {
            KeystoreError::Walk { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
