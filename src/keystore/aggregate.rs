//! The keystore-in-progress
//!
//! Certificates and keys are classified into an [`Aggregate`] one at a time,
//! in file-then-block order. Each operation either succeeds or leaves the
//! aggregate untouched.

use crate::cert_ops::{Certificate, PrivateKey};
use crate::utils::KeystoreError;
use std::fmt;

/// Role a certificate plays in the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Root,
    Intermediate,
    EndEntity,
}

impl Role {
    /// Classify a certificate.
    ///
    /// The self-signed test compares the issuer and subject strings only; no
    /// signature is checked, so an authority whose issuer name collides with
    /// its own subject counts as a root.
    pub fn of(cert: &Certificate) -> Self {
        if !cert.is_ca() {
            Role::EndEntity
        } else if cert.issuer() == cert.subject() {
            Role::Root
        } else {
            Role::Intermediate
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Root => write!(f, "root CA"),
            Role::Intermediate => write!(f, "intermediate CA"),
            Role::EndEntity => write!(f, "end-entity"),
        }
    }
}

/// Kind of container assembly will produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerMode {
    /// Private key, its certificate and the supporting chain
    Keystore,
    /// Certificates only
    TrustStore,
}

impl fmt::Display for ContainerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerMode::Keystore => write!(f, "keystore"),
            ContainerMode::TrustStore => write!(f, "trust store"),
        }
    }
}

/// Certificates and key collected so far
#[derive(Debug, Default)]
pub struct Aggregate {
    roots: Vec<Certificate>,
    intermediates: Vec<Certificate>,
    end_entity: Option<Certificate>,
    key: Option<PrivateKey>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a certificate and record it under its role.
    pub fn add_certificate(&mut self, cert: Certificate) -> Result<Role, KeystoreError> {
        let role = Role::of(&cert);
        match role {
            Role::Root => self.roots.push(cert),
            Role::Intermediate => self.intermediates.push(cert),
            Role::EndEntity => {
                if let Some(existing) = &self.end_entity {
                    return Err(KeystoreError::DuplicateEndEntity {
                        existing: existing.subject().to_string(),
                        rejected: cert.subject().to_string(),
                    });
                }
                self.end_entity = Some(cert);
            }
        }
        Ok(role)
    }

    /// Record the private key. Its relationship to any certificate is not
    /// checked here.
    pub fn add_key(&mut self, key: PrivateKey) -> Result<(), KeystoreError> {
        if self.key.is_some() {
            return Err(KeystoreError::DuplicateKey);
        }
        self.key = Some(key);
        Ok(())
    }

    pub fn roots(&self) -> &[Certificate] {
        &self.roots
    }

    pub fn intermediates(&self) -> &[Certificate] {
        &self.intermediates
    }

    pub fn end_entity(&self) -> Option<&Certificate> {
        self.end_entity.as_ref()
    }

    pub fn key(&self) -> Option<&PrivateKey> {
        self.key.as_ref()
    }

    /// Roots in insertion order, followed by intermediates in insertion order
    pub fn chain(&self) -> Vec<&Certificate> {
        self.roots.iter().chain(self.intermediates.iter()).collect()
    }

    pub fn mode(&self) -> ContainerMode {
        if self.key.is_some() {
            ContainerMode::Keystore
        } else {
            ContainerMode::TrustStore
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
            && self.intermediates.is_empty()
            && self.end_entity.is_none()
            && self.key.is_none()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<Certificate>,
        Vec<Certificate>,
        Option<Certificate>,
        Option<PrivateKey>,
    ) {
        (self.roots, self.intermediates, self.end_entity, self.key)
    }
}
