//! Run summary

use crate::cert_ops::Certificate;
use crate::keystore::{Aggregate, ContainerMode};
use console::style;
use std::path::PathBuf;

/// What was written, captured before the aggregate is consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub mode: ContainerMode,
    pub roots: Vec<String>,
    pub intermediates: Vec<String>,
    pub end_entity: Option<String>,
    pub key: Option<String>,
    pub output: PathBuf,
    pub bytes: usize,
}

impl BuildSummary {
    pub fn from_aggregate(aggregate: &Aggregate, output: PathBuf) -> Self {
        Self {
            mode: aggregate.mode(),
            roots: subjects(aggregate.roots()),
            intermediates: subjects(aggregate.intermediates()),
            end_entity: aggregate.end_entity().map(|c| c.subject().to_string()),
            key: aggregate.key().map(|k| k.describe()),
            output,
            bytes: 0,
        }
    }

    /// Whether the end-entity certificate made it into the container
    pub fn includes_end_entity(&self) -> bool {
        self.mode == ContainerMode::Keystore && self.end_entity.is_some()
    }
}

fn subjects(certs: &[Certificate]) -> Vec<String> {
    certs.iter().map(|c| c.subject().to_string()).collect()
}

/// Print the summary to stdout
pub fn print_summary(summary: &BuildSummary) {
    println!(
        "{} {} written to {} ({} bytes)",
        style("✓").green().bold(),
        style(summary.mode.to_string()).bold(),
        style(summary.output.display()).cyan(),
        summary.bytes
    );

    if let Some(key) = &summary.key {
        println!("  {:<14} {}", "Private key:", key);
    }
    if let Some(subject) = &summary.end_entity {
        let note = if summary.includes_end_entity() {
            String::new()
        } else {
            format!(" {}", style("(not included)").yellow())
        };
        println!("  {:<14} {}{}", "End-entity:", subject, note);
    }
    for subject in &summary.roots {
        println!("  {:<14} {}", "Root CA:", subject);
    }
    for subject in &summary.intermediates {
        println!("  {:<14} {}", "Intermediate:", subject);
    }
}
