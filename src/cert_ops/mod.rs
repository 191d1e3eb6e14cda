//! Certificate and key file operations
//!
//! Decodes PEM files into parsed certificates and normalized private keys.

pub mod certificate;
pub mod key;
pub mod reader;

pub use certificate::{parse_certificates, Certificate};
pub use key::{KeyAlgorithm, KeyEncoding, PrivateKey};
pub use reader::{decode_pem, read_pem_file, PemContents};
