//! Container assembly
//!
//! Chooses between keystore and trust-store mode and hands the classified
//! objects to a [`ContainerEncoder`].

use crate::keystore::aggregate::Aggregate;
use crate::keystore::encode::ContainerEncoder;
use crate::utils::KeystoreError;
use tracing::warn;

/// Consume the aggregate and produce the serialized container.
///
/// With a private key the result is a keystore holding the key, the
/// end-entity certificate and the chain. Without one it is a trust store of
/// the chain alone; an end-entity certificate collected without a key is
/// left out.
pub fn assemble<E>(
    aggregate: Aggregate,
    encoder: &E,
    password: &str,
) -> Result<Vec<u8>, KeystoreError>
where
    E: ContainerEncoder + ?Sized,
{
    let (roots, intermediates, end_entity, key) = aggregate.into_parts();
    let chain: Vec<_> = roots.iter().chain(intermediates.iter()).collect();

    match key {
        Some(key) => {
            let entity = end_entity.ok_or(KeystoreError::MissingEndEntityCert)?;
            encoder.encode_keystore(&key, &entity, &chain, password)
        }
        None => {
            if let Some(entity) = &end_entity {
                warn!(
                    "No private key found: end-entity certificate '{}' is not included in the trust store",
                    entity.subject()
                );
            }
            encoder.encode_trust_store(&chain, password)
        }
    }
}
