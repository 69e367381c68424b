//! secp256k1 ECDSA in two flavours.
//!
//! - `SECP256K1`: 33-byte compressed keys, ECDSA over SHA-256 of the message.
//! - `ETHSECP256K1`: 64-byte uncompressed keys without the `0x04` tag, ECDSA
//!   over Keccak-256 of the message.
//!
//! Both use RFC 6979 nonces and emit 64-byte low-S `r || s` signatures.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use super::{CurveType, PRIVATE_KEY_LEN};
use crate::error::CryptoError;

pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;
pub const ETH_PUBLIC_KEY_LEN: usize = 64;
pub const SIGNATURE_LEN: usize = 64;

const UNCOMPRESSED_TAG: u8 = 0x04;

fn signing_key(curve: CurveType, private_key: &[u8]) -> Result<SigningKey, CryptoError> {
    if private_key.len() != PRIVATE_KEY_LEN {
        return Err(CryptoError::InvalidPrivateKey {
            curve,
            reason: format!("expected {} bytes, got {}", PRIVATE_KEY_LEN, private_key.len()),
        });
    }
    SigningKey::from_slice(private_key).map_err(|e| CryptoError::InvalidPrivateKey {
        curve,
        reason: e.to_string(),
    })
}

fn parse_signature(signature: &[u8]) -> Option<Signature> {
    if signature.len() != SIGNATURE_LEN {
        return None;
    }
    Signature::from_slice(signature).ok()
}

// ─── SECP256K1 ───────────────────────────────────────────────────────────────

pub fn public_key(private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let key = signing_key(CurveType::Secp256k1, private_key)?;
    Ok(key.verifying_key().to_encoded_point(true).as_bytes().to_vec())
}

pub fn sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let key = signing_key(CurveType::Secp256k1, private_key)?;
    let signature: Signature = key.try_sign(message).map_err(|e| CryptoError::Signing {
        curve: CurveType::Secp256k1,
        reason: e.to_string(),
    })?;
    Ok(signature.to_bytes().to_vec())
}

pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    if public_key.len() != COMPRESSED_PUBLIC_KEY_LEN {
        return false;
    }
    let Ok(vk) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    let Some(sig) = parse_signature(signature) else {
        return false;
    };
    vk.verify(message, &sig).is_ok()
}

// ─── ETHSECP256K1 ────────────────────────────────────────────────────────────

pub fn eth_public_key(private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let key = signing_key(CurveType::EthSecp256k1, private_key)?;
    let point = key.verifying_key().to_encoded_point(false);
    Ok(point.as_bytes()[1..].to_vec())
}

pub fn eth_sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let key = signing_key(CurveType::EthSecp256k1, private_key)?;
    let hash = Keccak256::digest(message);
    let signature: Signature = key.sign_prehash(&hash).map_err(|e| CryptoError::Signing {
        curve: CurveType::EthSecp256k1,
        reason: e.to_string(),
    })?;
    Ok(signature.to_bytes().to_vec())
}

pub fn eth_verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    if public_key.len() != ETH_PUBLIC_KEY_LEN {
        return false;
    }
    let mut sec1 = Vec::with_capacity(ETH_PUBLIC_KEY_LEN + 1);
    sec1.push(UNCOMPRESSED_TAG);
    sec1.extend_from_slice(public_key);
    let Ok(vk) = VerifyingKey::from_sec1_bytes(&sec1) else {
        return false;
    };
    let Some(sig) = parse_signature(signature) else {
        return false;
    };
    vk.verify_prehash(&Keccak256::digest(message), &sig).is_ok()
}

pub fn generate() -> Zeroizing<Vec<u8>> {
    let key = SigningKey::random(&mut OsRng);
    Zeroizing::new(key.to_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_one() -> [u8; 32] {
        let mut sk = [0u8; 32];
        sk[31] = 1;
        sk
    }

    #[test]
    fn test_generator_point_public_keys() {
        let sk = key_one();
        assert_eq!(
            hex::encode(public_key(&sk).unwrap()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        let eth = eth_public_key(&sk).unwrap();
        assert_eq!(eth.len(), ETH_PUBLIC_KEY_LEN);
        assert_eq!(
            hex::encode(&eth[..32]),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_sign_verify_sha256() {
        let sk = [0x11u8; 32];
        let pk = public_key(&sk).unwrap();
        let sig = sign(&sk, b"canopy").unwrap();
        assert_eq!(sig.len(), SIGNATURE_LEN);
        assert!(verify(&pk, b"canopy", &sig));
        assert!(!verify(&pk, b"canopz", &sig));
    }

    #[test]
    fn test_sign_verify_keccak() {
        let sk = [0x22u8; 32];
        let pk = eth_public_key(&sk).unwrap();
        let sig = eth_sign(&sk, b"canopy").unwrap();
        assert!(eth_verify(&pk, b"canopy", &sig));
        assert!(!eth_verify(&pk, b"canopz", &sig));
    }

    #[test]
    fn test_flavours_do_not_cross_verify() {
        let sk = [0x33u8; 32];
        let sha_sig = sign(&sk, b"m").unwrap();
        assert!(!eth_verify(&eth_public_key(&sk).unwrap(), b"m", &sha_sig));
    }

    #[test]
    fn test_signatures_are_low_s_and_deterministic() {
        let sk = [0x44u8; 32];
        let a = sign(&sk, b"m").unwrap();
        assert_eq!(a, sign(&sk, b"m").unwrap());
        let sig = Signature::from_slice(&a).unwrap();
        assert!(sig.normalize_s().is_none());
    }

    #[test]
    fn test_rejects_zero_key() {
        assert!(matches!(
            public_key(&[0u8; 32]),
            Err(CryptoError::InvalidPrivateKey {
                curve: CurveType::Secp256k1,
                ..
            })
        ));
        assert!(eth_public_key(&[0u8; 31]).is_err());
    }
}
