//! Private key parsing
//!
//! Supports RSA keys in PKCS#8 and PKCS#1 form, and EC P-256 / P-384 keys in
//! PKCS#8 form. Every key is normalized to PKCS#8 DER, which is what the
//! PKCS#12 encoder stores.

use crate::utils::KeystoreError;
use std::fmt;
use std::path::Path;

/// PEM encoding a key was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// "PRIVATE KEY"
    Pkcs8,
    /// Legacy "RSA PRIVATE KEY"
    Pkcs1,
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEncoding::Pkcs8 => write!(f, "PKCS#8"),
            KeyEncoding::Pkcs1 => write!(f, "PKCS#1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    EcP256,
    EcP384,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => write!(f, "RSA"),
            KeyAlgorithm::EcP256 => write!(f, "EC P-256"),
            KeyAlgorithm::EcP384 => write!(f, "EC P-384"),
        }
    }
}

/// A private key, normalized to PKCS#8
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pkcs8_der: Vec<u8>,
    public_key_spki: Vec<u8>,
    algorithm: KeyAlgorithm,
    encoding: KeyEncoding,
}

// Key material stays out of debug output.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl PrivateKey {
    /// PKCS#8 DER encoding of the key
    pub fn pkcs8_der(&self) -> &[u8] {
        &self.pkcs8_der
    }

    /// SubjectPublicKeyInfo derived from the private key
    pub fn public_key_spki(&self) -> &[u8] {
        &self.public_key_spki
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    pub fn encoding(&self) -> KeyEncoding {
        self.encoding
    }

    /// Short description such as "EC P-256 (PKCS#8)"
    pub fn describe(&self) -> String {
        format!("{} ({})", self.algorithm, self.encoding)
    }

    #[cfg(test)]
    pub(crate) fn synthetic(algorithm: KeyAlgorithm) -> Self {
        Self {
            pkcs8_der: Vec::new(),
            public_key_spki: vec![0x30, 0x00],
            algorithm,
            encoding: KeyEncoding::Pkcs8,
        }
    }
}

/// Parse a PKCS#8 DER-encoded private key
pub fn parse_pkcs8_der(der: &[u8], path: &Path) -> Result<PrivateKey, KeystoreError> {
    use pkcs8::DecodePrivateKey;

    // Try RSA first
    if let Ok(rsa_key) = rsa::RsaPrivateKey::from_pkcs8_der(der) {
        use rsa::pkcs8::EncodePublicKey;
        let spki = rsa::RsaPublicKey::from(&rsa_key)
            .to_public_key_der()
            .map_err(|e| key_error(path, format!("Failed to encode RSA public key: {}", e)))?;
        return Ok(PrivateKey {
            pkcs8_der: der.to_vec(),
            public_key_spki: spki.as_ref().to_vec(),
            algorithm: KeyAlgorithm::Rsa,
            encoding: KeyEncoding::Pkcs8,
        });
    }

    // Try EC P-256
    if let Ok(ec_key) = p256::SecretKey::from_pkcs8_der(der) {
        use p256::pkcs8::EncodePublicKey;
        let spki = ec_key.public_key().to_public_key_der().map_err(|e| {
            key_error(path, format!("Failed to encode EC P-256 public key: {}", e))
        })?;
        return Ok(PrivateKey {
            pkcs8_der: der.to_vec(),
            public_key_spki: spki.as_ref().to_vec(),
            algorithm: KeyAlgorithm::EcP256,
            encoding: KeyEncoding::Pkcs8,
        });
    }

    // Try EC P-384
    if let Ok(ec_key) = p384::SecretKey::from_pkcs8_der(der) {
        use p384::pkcs8::EncodePublicKey;
        let spki = ec_key.public_key().to_public_key_der().map_err(|e| {
            key_error(path, format!("Failed to encode EC P-384 public key: {}", e))
        })?;
        return Ok(PrivateKey {
            pkcs8_der: der.to_vec(),
            public_key_spki: spki.as_ref().to_vec(),
            algorithm: KeyAlgorithm::EcP384,
            encoding: KeyEncoding::Pkcs8,
        });
    }

    Err(key_error(
        path,
        "Unsupported key type in PKCS#8 container (expected RSA, EC P-256 or EC P-384)".to_string(),
    ))
}

/// Parse a PKCS#1 RSA private key and re-encode it as PKCS#8
pub fn parse_pkcs1_der(der: &[u8], path: &Path) -> Result<PrivateKey, KeystoreError> {
    use rsa::pkcs1::DecodeRsaPrivateKey;
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};

    let rsa_key = rsa::RsaPrivateKey::from_pkcs1_der(der)
        .map_err(|e| key_error(path, format!("Failed to parse PKCS#1 RSA key: {}", e)))?;

    let pkcs8 = rsa_key
        .to_pkcs8_der()
        .map_err(|e| key_error(path, format!("Failed to re-encode RSA key as PKCS#8: {}", e)))?;

    let spki = rsa::RsaPublicKey::from(&rsa_key)
        .to_public_key_der()
        .map_err(|e| key_error(path, format!("Failed to encode RSA public key: {}", e)))?;

    Ok(PrivateKey {
        pkcs8_der: pkcs8.as_bytes().to_vec(),
        public_key_spki: spki.as_ref().to_vec(),
        algorithm: KeyAlgorithm::Rsa,
        encoding: KeyEncoding::Pkcs1,
    })
}

fn key_error(path: &Path, message: String) -> KeystoreError {
    KeystoreError::Parse {
        path: path.to_path_buf(),
        message,
    }
}
