//! Key providers: where signing keys come from.
//!
//! A provider hands out a fresh [`KeyEntry`] per signing operation. The entry
//! owns a copy of the private key and wipes it on drop, so callers should not
//! hold on to it.

use std::collections::HashMap;

use zeroize::Zeroizing;

use crate::crypto::{CurveType, KeyEntry};
use crate::error::KeystoreError;
use crate::shared::Address;

/// Source of signing keys, looked up by account address.
pub trait KeyProvider: Send + Sync {
    fn load(&self, address: &Address) -> Result<KeyEntry, KeystoreError>;
}

/// A single key is its own provider.
impl KeyProvider for KeyEntry {
    fn load(&self, address: &Address) -> Result<KeyEntry, KeystoreError> {
        if &self.address() != address {
            return Err(KeystoreError::KeyNotFound(address.to_hex()));
        }
        Ok(self.clone())
    }
}

/// Process-local keystore holding raw private keys.
///
/// Nothing is persisted.
#[derive(Default)]
pub struct InMemoryKeystore {
    keys: HashMap<Address, (CurveType, Zeroizing<Vec<u8>>)>,
}

impl InMemoryKeystore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a raw private key and return its address.
    ///
    /// Importing the same key twice is a no-op.
    pub fn import(&mut self, curve: CurveType, private_key: &[u8]) -> Result<Address, KeystoreError> {
        let entry = KeyEntry::from_private_key(curve, private_key)?;
        let address = entry.address();
        self.keys
            .insert(address, (curve, Zeroizing::new(private_key.to_vec())));
        tracing::debug!(%address, %curve, "imported key");
        Ok(address)
    }

    /// Import a hex-encoded private key.
    pub fn import_hex(&mut self, curve: CurveType, private_key_hex: &str) -> Result<Address, KeystoreError> {
        let raw = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);
        let bytes = Zeroizing::new(
            hex::decode(raw).map_err(|e| KeystoreError::InvalidHex(e.to_string()))?,
        );
        self.import(curve, &bytes)
    }

    /// Generate and store a fresh key.
    pub fn generate(&mut self, curve: CurveType) -> Result<Address, KeystoreError> {
        let private_key = crate::crypto::generate(curve);
        self.import(curve, &private_key)
    }

    pub fn remove(&mut self, address: &Address) -> bool {
        self.keys.remove(address).is_some()
    }

    pub fn addresses(&self) -> Vec<Address> {
        let mut out: Vec<Address> = self.keys.keys().copied().collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyProvider for InMemoryKeystore {
    fn load(&self, address: &Address) -> Result<KeyEntry, KeystoreError> {
        let (curve, private_key) = self
            .keys
            .get(address)
            .ok_or_else(|| KeystoreError::KeyNotFound(address.to_hex()))?;
        Ok(KeyEntry::from_private_key(*curve, private_key)?)
    }
}

impl std::fmt::Debug for InMemoryKeystore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeystore")
            .field("addresses", &self.addresses())
            .finish()
    }
}
