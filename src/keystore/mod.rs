//! Keystore assembly
//!
//! Classifies certificates and keys by role and turns the result into a
//! PKCS#12 keystore or trust store.

pub mod aggregate;
pub mod assemble;
pub mod encode;

pub use aggregate::{Aggregate, ContainerMode, Role};
pub use assemble::assemble;
pub use encode::{ContainerEncoder, Pkcs12Encoder, DEFAULT_ALIAS};
