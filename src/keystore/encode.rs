//! PKCS#12 encoding
//!
//! [`ContainerEncoder`] is the seam between assembly and the binary format;
//! [`Pkcs12Encoder`] is the implementation used by the tool.

use crate::cert_ops::{Certificate, PrivateKey};
use crate::utils::KeystoreError;
use sha2::{Digest, Sha256};

/// Alias used for the key entry when the end-entity certificate has no CN
pub const DEFAULT_ALIAS: &str = "entity";

/// Turns classified objects into a password-protected container
pub trait ContainerEncoder {
    /// Bundle a private key, its certificate and the supporting chain.
    fn encode_keystore(
        &self,
        key: &PrivateKey,
        entity: &Certificate,
        chain: &[&Certificate],
        password: &str,
    ) -> Result<Vec<u8>, KeystoreError>;

    /// Bundle trusted certificates only.
    fn encode_trust_store(
        &self,
        chain: &[&Certificate],
        password: &str,
    ) -> Result<Vec<u8>, KeystoreError>;
}

/// PKCS#12 encoder backed by `p12-keystore`
#[derive(Debug, Clone)]
pub struct Pkcs12Encoder {
    default_alias: String,
}

impl Default for Pkcs12Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS)
    }
}

impl Pkcs12Encoder {
    pub fn new(default_alias: impl Into<String>) -> Self {
        Self {
            default_alias: default_alias.into(),
        }
    }

    fn key_alias(&self, entity: &Certificate) -> String {
        entity
            .common_name()
            .map(alias_from)
            .unwrap_or_else(|| self.default_alias.clone())
    }
}

impl ContainerEncoder for Pkcs12Encoder {
    fn encode_keystore(
        &self,
        key: &PrivateKey,
        entity: &Certificate,
        chain: &[&Certificate],
        password: &str,
    ) -> Result<Vec<u8>, KeystoreError> {
        if key.public_key_spki() != entity.public_key_spki() {
            return Err(KeystoreError::Encode {
                message: format!(
                    "private key does not match end-entity certificate '{}'",
                    entity.subject()
                ),
            });
        }

        let mut certs = Vec::with_capacity(chain.len() + 1);
        certs.push(to_p12_certificate(entity)?);
        for cert in chain {
            certs.push(to_p12_certificate(cert)?);
        }

        let local_key_id = Sha256::digest(entity.der()).to_vec();
        let key_chain = p12_keystore::PrivateKeyChain::new(key.pkcs8_der(), &local_key_id, certs);

        let mut keystore = p12_keystore::KeyStore::new();
        keystore.add_entry(
            &self.key_alias(entity),
            p12_keystore::KeyStoreEntry::PrivateKeyChain(key_chain),
        );

        write_keystore(&keystore, password)
    }

    fn encode_trust_store(
        &self,
        chain: &[&Certificate],
        password: &str,
    ) -> Result<Vec<u8>, KeystoreError> {
        let mut keystore = p12_keystore::KeyStore::new();

        // Entries are keyed by alias, so a numeric prefix keeps them in chain order
        for (index, cert) in chain.iter().enumerate() {
            let alias = format!(
                "{:03}-{}",
                index,
                cert.common_name().map(alias_from).unwrap_or_else(|| "ca".to_string())
            );
            keystore.add_entry(
                &alias,
                p12_keystore::KeyStoreEntry::Certificate(to_p12_certificate(cert)?),
            );
        }

        write_keystore(&keystore, password)
    }
}

fn to_p12_certificate(cert: &Certificate) -> Result<p12_keystore::Certificate, KeystoreError> {
    p12_keystore::Certificate::from_der(cert.der()).map_err(|e| KeystoreError::Encode {
        message: format!(
            "Failed to load certificate '{}' for PKCS#12: {}",
            cert.subject(),
            e
        ),
    })
}

fn write_keystore(
    keystore: &p12_keystore::KeyStore,
    password: &str,
) -> Result<Vec<u8>, KeystoreError> {
    keystore
        .writer(password)
        .write()
        .map_err(|e| KeystoreError::Encode {
            message: format!("Failed to serialize PKCS#12: {}", e),
        })
}

fn alias_from(common_name: &str) -> String {
    common_name.trim().to_lowercase()
}
