//! BLS12-381, min-pk variant: 48-byte G1 public keys, 96-byte G2 signatures.

use blst::min_pk::{PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;
use rand::RngCore;
use zeroize::Zeroizing;

use super::CurveType;
use crate::error::CryptoError;

pub const PUBLIC_KEY_LEN: usize = 48;
pub const SIGNATURE_LEN: usize = 96;

/// Domain separation tag of the basic (non-augmented) scheme.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

fn secret_key(private_key: &[u8]) -> Result<SecretKey, CryptoError> {
    SecretKey::from_bytes(private_key).map_err(|e| CryptoError::InvalidPrivateKey {
        curve: CurveType::Bls12381,
        reason: format!("{:?}", e),
    })
}

pub fn public_key(private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    Ok(secret_key(private_key)?.sk_to_pk().compress().to_vec())
}

pub fn sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let signature = secret_key(private_key)?.sign(message, DST, &[]);
    Ok(signature.compress().to_vec())
}

pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(pk) = PublicKey::key_validate(public_key) else {
        return false;
    };
    let Ok(sig) = Signature::sig_validate(signature, true) else {
        return false;
    };
    sig.verify(true, message, DST, &[], &pk, false) == BLST_ERROR::BLST_SUCCESS
}

pub fn generate() -> Zeroizing<Vec<u8>> {
    let mut ikm = Zeroizing::new([0u8; 32]);
    loop {
        rand::rngs::OsRng.fill_bytes(&mut ikm[..]);
        if let Ok(sk) = SecretKey::key_gen(&ikm[..], &[]) {
            return Zeroizing::new(sk.to_bytes().to_vec());
        }
    }
}
