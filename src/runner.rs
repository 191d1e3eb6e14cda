//! Build runner
//!
//! Wires the pipeline together: collect candidate files, classify every
//! certificate and key they hold, assemble the container and write it. The
//! first error aborts the run before anything is written.

use crate::cert_ops::read_pem_file;
use crate::config::BuildOptions;
use crate::input::collect_candidates;
use crate::keystore::{assemble, Aggregate, ContainerMode, Pkcs12Encoder};
use crate::output::{write_container, BuildSummary};
use crate::utils::{KeystoreError, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Run a complete build
pub fn run(options: &BuildOptions) -> Result<BuildSummary> {
    if options.password_defaulted {
        warn!(
            "Password was not set, defaulting to '{}'",
            crate::config::DEFAULT_PASSWORD
        );
    }

    let candidates = collect_candidates(&options.dirs, &options.files, options.recursive)?;
    info!("Found {} candidate file(s)", candidates.len());

    let aggregate = load_aggregate(&candidates)?;
    if aggregate.is_empty() {
        warn!("No certificates or keys were found; writing an empty trust store");
    }

    let mut summary = BuildSummary::from_aggregate(&aggregate, options.out.clone());
    info!("Assembling {}", summary.mode);

    let encoder = Pkcs12Encoder::new(options.default_alias.clone());
    let payload = assemble(aggregate, &encoder, &options.password)?;

    info!("Writing output file to {}...", options.out.display());
    write_container(&options.out, &payload, options.file_mode)?;
    summary.bytes = payload.len();

    if summary.mode == ContainerMode::TrustStore {
        info!(
            "Saved trust store with {} certificate(s)",
            summary.roots.len() + summary.intermediates.len()
        );
    } else {
        info!("Saved keystore for '{}'", summary.end_entity.as_deref().unwrap_or_default());
    }

    Ok(summary)
}

/// Read and classify every candidate, in file order then block order.
///
/// Within a file, keys are classified before certificates.
pub fn load_aggregate(paths: &[PathBuf]) -> Result<Aggregate> {
    let mut aggregate = Aggregate::new();

    for path in paths {
        let contents = read_pem_file(path)?;

        if contents.block_count == 0 {
            warn!("No PEM blocks found in {}", path.display());
            continue;
        }

        for key in contents.keys {
            let description = key.describe();
            aggregate.add_key(key).map_err(|e| rejected_in(path, e))?;
            debug!("{}: private key, {}", path.display(), description);
        }

        for cert in contents.certificates {
            let subject = cert.subject().to_string();
            let role = aggregate
                .add_certificate(cert)
                .map_err(|e| rejected_in(path, e))?;
            debug!("{}: {} '{}'", path.display(), role, subject);
        }
    }

    Ok(aggregate)
}

fn rejected_in(path: &std::path::Path, err: KeystoreError) -> KeystoreError {
    KeystoreError::Rejected {
        path: path.to_path_buf(),
        source: Box::new(err),
    }
}
