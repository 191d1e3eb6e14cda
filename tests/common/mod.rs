//! Shared fixtures: a throwaway PKI generated with rcgen, plus helpers to
//! write PEM files and decode the containers ksbuilder produces.

#![allow(dead_code)]

use ksbuilder::cert_ops::{decode_pem, Certificate, PrivateKey};
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, Issuer, KeyPair,
};
use std::path::{Path, PathBuf};

pub const ROOT_CN: &str = "Test Root CA";
pub const INTERMEDIATE_CN: &str = "Test Intermediate CA";
pub const LEAF_CN: &str = "leaf.example.com";

/// A certificate and the key it was issued for
pub struct Issued {
    pub cert_pem: String,
    pub cert_der: Vec<u8>,
    pub key_pem: String,
    pub key_der: Vec<u8>,
}

impl Issued {
    fn new(cert: &rcgen::Certificate, key: &KeyPair) -> Self {
        Self {
            cert_pem: cert.pem(),
            cert_der: cert.der().to_vec(),
            key_pem: key.serialize_pem(),
            key_der: key.serialize_der(),
        }
    }

    pub fn certificate(&self) -> Certificate {
        parse_certificate(&self.cert_pem)
    }

    pub fn private_key(&self) -> PrivateKey {
        parse_key(&self.key_pem)
    }
}

/// Root CA -> intermediate CA -> leaf
pub struct TestPki {
    pub root: Issued,
    pub intermediate: Issued,
    pub leaf: Issued,
    root_issuer: Issuer<'static, KeyPair>,
}

fn distinguished_name(cn: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::OrganizationName, "ksbuilder tests");
    dn.push(DnType::CommonName, cn);
    dn
}

fn ca_params(cn: &str) -> CertificateParams {
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.distinguished_name = distinguished_name(cn);
    params
}

fn leaf_params(cn: &str) -> CertificateParams {
    let mut params = CertificateParams::new(vec![cn.to_string()]).unwrap();
    params.distinguished_name = distinguished_name(cn);
    params
}

impl TestPki {
    pub fn generate() -> Self {
        let root_key = KeyPair::generate().unwrap();
        let root_params = ca_params(ROOT_CN);
        let root_cert = root_params.clone().self_signed(&root_key).unwrap();
        let root = Issued::new(&root_cert, &root_key);
        let root_issuer = Issuer::new(root_params, root_key);

        let intermediate_key = KeyPair::generate().unwrap();
        let intermediate_params = ca_params(INTERMEDIATE_CN);
        let intermediate_cert = intermediate_params
            .clone()
            .signed_by(&intermediate_key, &root_issuer)
            .unwrap();
        let intermediate = Issued::new(&intermediate_cert, &intermediate_key);
        let intermediate_issuer = Issuer::new(intermediate_params, intermediate_key);

        let leaf_key = KeyPair::generate().unwrap();
        let leaf_cert = leaf_params(LEAF_CN)
            .signed_by(&leaf_key, &intermediate_issuer)
            .unwrap();
        let leaf = Issued::new(&leaf_cert, &leaf_key);

        Self {
            root,
            intermediate,
            leaf,
            root_issuer,
        }
    }

    /// Another end-entity certificate, issued by the root
    pub fn issue_leaf(&self, cn: &str) -> Issued {
        let key = KeyPair::generate().unwrap();
        let cert = leaf_params(cn).signed_by(&key, &self.root_issuer).unwrap();
        Issued::new(&cert, &key)
    }

    /// An end-entity certificate issued by the root for an existing key
    pub fn issue_leaf_for(&self, cn: &str, key: &KeyPair) -> String {
        leaf_params(cn)
            .signed_by(key, &self.root_issuer)
            .unwrap()
            .pem()
    }

    /// A CA issued by the root that carries the given subject name
    pub fn issue_ca(&self, cn: &str) -> Issued {
        let key = KeyPair::generate().unwrap();
        let cert = ca_params(cn).signed_by(&key, &self.root_issuer).unwrap();
        Issued::new(&cert, &key)
    }
}

pub fn parse_certificate(pem: &str) -> Certificate {
    let mut contents = decode_pem(pem.as_bytes(), Path::new("fixture.pem")).unwrap();
    assert_eq!(contents.certificates.len(), 1);
    contents.certificates.remove(0)
}

pub fn parse_key(pem: &str) -> PrivateKey {
    let mut contents = decode_pem(pem.as_bytes(), Path::new("fixture.key")).unwrap();
    assert_eq!(contents.keys.len(), 1);
    contents.keys.remove(0)
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Lay out the four-file scenario: root, intermediate, key, leaf
pub fn write_scenario(pki: &TestPki, dir: &Path) {
    write_file(dir, "a.crt", &pki.root.cert_pem);
    write_file(dir, "b.pem", &pki.intermediate.cert_pem);
    write_file(dir, "c.key", &pki.leaf.key_pem);
    write_file(dir, "d.crt", &pki.leaf.cert_pem);
}

/// One decoded container entry
#[derive(Debug)]
pub struct DecodedEntry {
    pub alias: String,
    pub key: Option<Vec<u8>>,
    pub certs: Vec<Vec<u8>>,
}

/// Decode a PKCS#12 payload, entries sorted by alias
pub fn decode(payload: &[u8], password: &str) -> Result<Vec<DecodedEntry>, String> {
    let keystore =
        p12_keystore::KeyStore::from_pkcs12(payload, password).map_err(|e| e.to_string())?;

    let mut entries = Vec::new();
    for (alias, entry) in keystore.entries() {
        let decoded = match entry {
            p12_keystore::KeyStoreEntry::PrivateKeyChain(chain) => DecodedEntry {
                alias: alias.to_string(),
                key: Some(chain.key().to_vec()),
                certs: chain.chain().iter().map(|c| c.as_der().to_vec()).collect(),
            },
            p12_keystore::KeyStoreEntry::Certificate(cert) => DecodedEntry {
                alias: alias.to_string(),
                key: None,
                certs: vec![cert.as_der().to_vec()],
            },
            #[allow(unreachable_patterns)]
            _ => continue,
        };
        entries.push(decoded);
    }
    entries.sort_by(|a, b| a.alias.cmp(&b.alias));

    Ok(entries)
}

/// Every certificate in the decoded entries, in entry order
pub fn all_certs(entries: &[DecodedEntry]) -> Vec<Vec<u8>> {
    entries.iter().flat_map(|e| e.certs.iter().cloned()).collect()
}
