//! Input discovery
//!
//! Turns the configured directories and files into the ordered list of
//! candidate files to read.

pub mod walker;

pub use walker::{collect_candidates, has_allowed_extension, ALLOWED_EXTENSIONS};
