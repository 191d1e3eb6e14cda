//! PEM file reading
//!
//! Splits a PEM file into private keys and certificates. Unrecognized block
//! types are ignored.

use crate::cert_ops::certificate::{parse_certificates, Certificate};
use crate::cert_ops::key::{parse_pkcs1_der, parse_pkcs8_der, PrivateKey};
use crate::utils::KeystoreError;
use std::path::Path;
use tracing::debug;

pub const PKCS8_KEY_TAG: &str = "PRIVATE KEY";
pub const PKCS1_KEY_TAG: &str = "RSA PRIVATE KEY";
pub const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Objects decoded from one PEM file, in block order
#[derive(Debug, Default)]
pub struct PemContents {
    pub keys: Vec<PrivateKey>,
    pub certificates: Vec<Certificate>,
    /// Number of PEM blocks found, recognized or not
    pub block_count: usize,
}

impl PemContents {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.certificates.is_empty()
    }
}

/// Read a file fully and decode its PEM blocks
pub fn read_pem_file(path: &Path) -> Result<PemContents, KeystoreError> {
    let data = std::fs::read(path).map_err(|e| KeystoreError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    decode_pem(&data, path)
}

/// Decode PEM data; `path` is only used to label errors.
///
/// Certificate blocks are concatenated and parsed together, so a bundle file
/// yields all of its certificates in order.
pub fn decode_pem(data: &[u8], path: &Path) -> Result<PemContents, KeystoreError> {
    let pems = ::pem::parse_many(data).map_err(|e| KeystoreError::Parse {
        path: path.to_path_buf(),
        message: format!("Failed to parse PEM: {}", e),
    })?;

    let mut contents = PemContents {
        block_count: pems.len(),
        ..PemContents::default()
    };
    let mut cert_bytes = Vec::new();

    for p in &pems {
        match p.tag() {
            PKCS8_KEY_TAG => contents.keys.push(parse_pkcs8_der(p.contents(), path)?),
            PKCS1_KEY_TAG => contents.keys.push(parse_pkcs1_der(p.contents(), path)?),
            CERTIFICATE_TAG => cert_bytes.extend_from_slice(p.contents()),
            other => debug!("Ignoring '{}' block in {}", other, path.display()),
        }
    }

    contents.certificates = parse_certificates(&cert_bytes, path)?;

    Ok(contents)
}
