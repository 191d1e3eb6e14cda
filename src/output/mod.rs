//! Output module
//!
//! Writes the finished container and prints the run summary.

pub mod summary;
pub mod writer;

pub use summary::{print_summary, BuildSummary};
pub use writer::write_container;
