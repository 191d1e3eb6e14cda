//! Parsed X.509 certificates
//!
//! Only the attributes classification needs are extracted; the DER bytes are
//! kept so the certificate can be handed to the container encoder unchanged.

use crate::utils::KeystoreError;
use std::path::Path;
use x509_parser::prelude::*;

/// An immutable, parsed certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    subject: String,
    issuer: String,
    is_ca: bool,
    common_name: Option<String>,
    public_key_spki: Vec<u8>,
    der: Vec<u8>,
}

impl Certificate {
    fn from_parsed(
        cert: &X509Certificate<'_>,
        der: &[u8],
        path: &Path,
    ) -> Result<Self, KeystoreError> {
        let subject = cert.subject().to_string();
        let issuer = cert.issuer().to_string();

        // Unreadable basicConstraints (duplicated, malformed) is a parse failure
        let is_ca = cert
            .basic_constraints()
            .map_err(|e| KeystoreError::Parse {
                path: path.to_path_buf(),
                message: format!("Invalid basicConstraints in '{}': {}", subject, e),
            })?
            .map(|ext| ext.value.ca)
            .unwrap_or(false);

        let common_name = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .map(str::to_string);

        Ok(Self {
            subject,
            issuer,
            is_ca,
            common_name,
            public_key_spki: cert.public_key().raw.to_vec(),
            der: der.to_vec(),
        })
    }

    /// Subject distinguished name, rendered as a string
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Issuer distinguished name, rendered as a string
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Whether the basicConstraints extension marks this as an authority
    pub fn is_ca(&self) -> bool {
        self.is_ca
    }

    /// First CN attribute of the subject, if any
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    /// Raw SubjectPublicKeyInfo of the certificate
    pub fn public_key_spki(&self) -> &[u8] {
        &self.public_key_spki
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    #[cfg(test)]
    pub(crate) fn synthetic(subject: &str, issuer: &str, is_ca: bool) -> Self {
        Self {
            subject: subject.to_string(),
            issuer: issuer.to_string(),
            is_ca,
            common_name: None,
            public_key_spki: Vec::new(),
            der: Vec::new(),
        }
    }
}

/// Parse one or more concatenated DER certificates.
///
/// An empty input yields an empty list.
pub fn parse_certificates(data: &[u8], path: &Path) -> Result<Vec<Certificate>, KeystoreError> {
    let mut certs = Vec::new();
    let mut rest = data;

    while !rest.is_empty() {
        let (remaining, cert) =
            X509Certificate::from_der(rest).map_err(|e| KeystoreError::Parse {
                path: path.to_path_buf(),
                message: format!("Failed to parse certificate: {:?}", e),
            })?;
        let consumed = rest.len() - remaining.len();
        certs.push(Certificate::from_parsed(&cert, &rest[..consumed], path)?);
        rest = remaining;
    }

    Ok(certs)
}
