//! Curve registry: key identification, signing, verification and address
//! derivation for every curve the node accepts.
//!
//! | curve        | public key | signature | address                 |
//! |--------------|-----------:|----------:|-------------------------|
//! | Ed25519      | 32         | 64        | `sha256(pk)[..20]`      |
//! | BLS12-381    | 48         | 96        | `sha256(pk)[..20]`      |
//! | SECP256K1    | 33         | 64        | `sha256(pk)[..20]`      |
//! | ETHSECP256K1 | 64         | 64        | `keccak256(pk)[12..]`   |
//!
//! Private keys are 32 bytes on every curve. Ed25519 also accepts the
//! 64-byte `seed || public key` export form.

pub mod bls;
pub mod ed25519;
pub mod secp256k1;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Keccak256;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::shared::{Address, ADDRESS_LEN};

/// Length of a raw private key, and of the Ed25519 seed.
pub const PRIVATE_KEY_LEN: usize = 32;

// ─── CurveType ───────────────────────────────────────────────────────────────

/// Signature scheme of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveType {
    #[serde(rename = "ED25519")]
    Ed25519,
    #[serde(rename = "BLS12381")]
    Bls12381,
    #[serde(rename = "SECP256K1")]
    Secp256k1,
    #[serde(rename = "ETHSECP256K1")]
    EthSecp256k1,
}

impl CurveType {
    pub const ALL: [CurveType; 4] = [
        CurveType::Ed25519,
        CurveType::Bls12381,
        CurveType::Secp256k1,
        CurveType::EthSecp256k1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ED25519",
            Self::Bls12381 => "BLS12381",
            Self::Secp256k1 => "SECP256K1",
            Self::EthSecp256k1 => "ETHSECP256K1",
        }
    }

    pub fn public_key_len(&self) -> usize {
        match self {
            Self::Ed25519 => ed25519::PUBLIC_KEY_LEN,
            Self::Bls12381 => bls::PUBLIC_KEY_LEN,
            Self::Secp256k1 => secp256k1::COMPRESSED_PUBLIC_KEY_LEN,
            Self::EthSecp256k1 => secp256k1::ETH_PUBLIC_KEY_LEN,
        }
    }

    pub fn signature_len(&self) -> usize {
        match self {
            Self::Ed25519 => ed25519::SIGNATURE_LEN,
            Self::Bls12381 => bls::SIGNATURE_LEN,
            Self::Secp256k1 | Self::EthSecp256k1 => secp256k1::SIGNATURE_LEN,
        }
    }
}

impl std::fmt::Display for CurveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CurveType {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or(CryptoError::UnknownCurveName(s.to_string()))
    }
}

// ─── Registry operations ─────────────────────────────────────────────────────

/// Identify the curve of a public key from its length.
pub fn identify(public_key: &[u8]) -> Result<CurveType, CryptoError> {
    CurveType::ALL
        .into_iter()
        .find(|c| c.public_key_len() == public_key.len())
        .ok_or(CryptoError::UnknownCurve {
            len: public_key.len(),
        })
}

/// Derive the public key for `private_key` in the curve's wire format.
pub fn public_key(curve: CurveType, private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match curve {
        CurveType::Ed25519 => ed25519::public_key(private_key),
        CurveType::Bls12381 => bls::public_key(private_key),
        CurveType::Secp256k1 => secp256k1::public_key(private_key),
        CurveType::EthSecp256k1 => secp256k1::eth_public_key(private_key),
    }
}

/// Sign `message` with `private_key`.
///
/// ECDSA curves hash the message themselves (SHA-256 or Keccak-256); pass the
/// raw sign-bytes.
pub fn sign(curve: CurveType, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match curve {
        CurveType::Ed25519 => ed25519::sign(private_key, message),
        CurveType::Bls12381 => bls::sign(private_key, message),
        CurveType::Secp256k1 => secp256k1::sign(private_key, message),
        CurveType::EthSecp256k1 => secp256k1::eth_sign(private_key, message),
    }
}

/// Check `signature` over `message`. Malformed keys or signatures verify as `false`.
pub fn verify(curve: CurveType, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    match curve {
        CurveType::Ed25519 => ed25519::verify(public_key, message, signature),
        CurveType::Bls12381 => bls::verify(public_key, message, signature),
        CurveType::Secp256k1 => secp256k1::verify(public_key, message, signature),
        CurveType::EthSecp256k1 => secp256k1::eth_verify(public_key, message, signature),
    }
}

/// Derive the 20-byte account address of `public_key`.
pub fn derive_address(curve: CurveType, public_key: &[u8]) -> Result<Address, CryptoError> {
    if public_key.len() != curve.public_key_len() {
        return Err(CryptoError::InvalidPublicKey {
            curve,
            reason: format!(
                "expected {} bytes, got {}",
                curve.public_key_len(),
                public_key.len()
            ),
        });
    }
    let mut out = [0u8; ADDRESS_LEN];
    match curve {
        CurveType::EthSecp256k1 => {
            let hash = Keccak256::digest(public_key);
            out.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
        }
        CurveType::Ed25519 | CurveType::Bls12381 | CurveType::Secp256k1 => {
            let hash = Sha256::digest(public_key);
            out.copy_from_slice(&hash[..ADDRESS_LEN]);
        }
    }
    Ok(Address::new(out))
}

/// Generate a fresh private key.
pub fn generate(curve: CurveType) -> Zeroizing<Vec<u8>> {
    match curve {
        CurveType::Ed25519 => ed25519::generate(),
        CurveType::Bls12381 => bls::generate(),
        CurveType::Secp256k1 | CurveType::EthSecp256k1 => secp256k1::generate(),
    }
}

// ─── KeyEntry ────────────────────────────────────────────────────────────────

/// Key material for one signing operation.
///
/// The private key is wiped when the entry is dropped and never appears in
/// `Debug` output.
#[derive(Clone)]
pub struct KeyEntry {
    private_key: Zeroizing<Vec<u8>>,
    public_key: Vec<u8>,
    address: Address,
    curve: CurveType,
}

impl KeyEntry {
    /// Build an entry from a raw private key, deriving the public key and address.
    pub fn from_private_key(curve: CurveType, private_key: &[u8]) -> Result<Self, CryptoError> {
        let public_key = public_key(curve, private_key)?;
        let address = derive_address(curve, &public_key)?;
        Ok(Self {
            private_key: Zeroizing::new(private_key.to_vec()),
            public_key,
            address,
            curve,
        })
    }

    /// A freshly generated key.
    pub fn generate(curve: CurveType) -> Result<Self, CryptoError> {
        let private_key = generate(curve);
        Self::from_private_key(curve, &private_key)
    }

    pub fn curve(&self) -> CurveType {
        self.curve
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The raw private key. Handle with care.
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        sign(self.curve, &self.private_key, message)
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify(self.curve, &self.public_key, message, signature)
    }
}

impl std::fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEntry")
            .field("curve", &self.curve)
            .field("address", &self.address)
            .field("public_key", &hex::encode(&self.public_key))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_by_length() {
        assert_eq!(identify(&[0u8; 32]).unwrap(), CurveType::Ed25519);
        assert_eq!(identify(&[0u8; 48]).unwrap(), CurveType::Bls12381);
        assert_eq!(identify(&[0u8; 33]).unwrap(), CurveType::Secp256k1);
        assert_eq!(identify(&[0u8; 64]).unwrap(), CurveType::EthSecp256k1);
        assert_eq!(
            identify(&[0u8; 65]),
            Err(CryptoError::UnknownCurve { len: 65 })
        );
    }

    #[test]
    fn test_sign_verify_all_curves() {
        for curve in CurveType::ALL {
            let key = KeyEntry::generate(curve).unwrap();
            assert_eq!(key.public_key().len(), curve.public_key_len());
            assert_eq!(identify(key.public_key()).unwrap(), curve);

            let sig = key.sign(b"canopy").unwrap();
            assert_eq!(sig.len(), curve.signature_len(), "{}", curve);
            assert!(verify(curve, key.public_key(), b"canopy", &sig), "{}", curve);
            assert!(!verify(curve, key.public_key(), b"other", &sig), "{}", curve);
        }
    }

    #[test]
    fn test_eth_address_known_vector() {
        let mut sk = [0u8; 32];
        sk[31] = 1;
        let key = KeyEntry::from_private_key(CurveType::EthSecp256k1, &sk).unwrap();
        assert_eq!(
            key.address().to_hex(),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_sha256_address_rule() {
        let key = KeyEntry::generate(CurveType::Secp256k1).unwrap();
        let expected = Sha256::digest(key.public_key());
        assert_eq!(key.address().as_bytes(), &expected[..20]);
        assert_eq!(
            derive_address(CurveType::Secp256k1, key.public_key()).unwrap(),
            key.address()
        );
    }

    #[test]
    fn test_derive_address_rejects_wrong_length() {
        assert!(matches!(
            derive_address(CurveType::Bls12381, &[0u8; 32]),
            Err(CryptoError::InvalidPublicKey { .. })
        ));
    }

    #[test]
    fn test_curve_from_str() {
        assert_eq!("ed25519".parse::<CurveType>().unwrap(), CurveType::Ed25519);
        assert_eq!("BLS12-381".parse::<CurveType>().unwrap(), CurveType::Bls12381);
        assert_eq!(
            "eth_secp256k1".parse::<CurveType>().unwrap(),
            CurveType::EthSecp256k1
        );
        assert!("rsa".parse::<CurveType>().is_err());
    }

    #[test]
    fn test_key_entry_debug_redacts_private_key() {
        let key = KeyEntry::from_private_key(CurveType::Ed25519, &[7u8; 32]).unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&hex::encode([7u8; 32])));
    }
}
