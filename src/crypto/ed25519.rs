//! Ed25519 (RFC 8032). Deterministic signatures over the raw message.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use super::{CurveType, PRIVATE_KEY_LEN};
use crate::error::CryptoError;

pub const PUBLIC_KEY_LEN: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
pub const SIGNATURE_LEN: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Accepts a 32-byte seed, or the 64-byte `seed || public key` form some
/// keystores export.
fn signing_key(private_key: &[u8]) -> Result<SigningKey, CryptoError> {
    let invalid = |reason: String| CryptoError::InvalidPrivateKey {
        curve: CurveType::Ed25519,
        reason,
    };
    let seed: [u8; PRIVATE_KEY_LEN] = match private_key.len() {
        PRIVATE_KEY_LEN | 64 => private_key[..PRIVATE_KEY_LEN]
            .try_into()
            .map_err(|_| invalid("bad seed".into()))?,
        len => return Err(invalid(format!("expected 32 or 64 bytes, got {}", len))),
    };
    let key = SigningKey::from_bytes(&seed);
    if private_key.len() == 64 && key.verifying_key().as_bytes() != &private_key[PRIVATE_KEY_LEN..] {
        return Err(invalid("embedded public key does not match seed".into()));
    }
    Ok(key)
}

pub fn public_key(private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    Ok(signing_key(private_key)?.verifying_key().to_bytes().to_vec())
}

pub fn sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let signature: Signature = signing_key(private_key)?.sign(message);
    Ok(signature.to_bytes().to_vec())
}

pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(pk) = <[u8; PUBLIC_KEY_LEN]>::try_from(public_key) else {
        return false;
    };
    let Ok(vk) = VerifyingKey::from_bytes(&pk) else {
        return false;
    };
    let Ok(sig) = Signature::from_slice(signature) else {
        return false;
    };
    vk.verify(message, &sig).is_ok()
}

pub fn generate() -> Zeroizing<Vec<u8>> {
    let key = SigningKey::generate(&mut OsRng);
    Zeroizing::new(key.to_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032, section 7.1, test 1
    const SECRET: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const SIGNATURE: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

    #[test]
    fn test_rfc8032_vector() {
        let sk = hex::decode(SECRET).unwrap();
        assert_eq!(hex::encode(public_key(&sk).unwrap()), PUBLIC);
        assert_eq!(hex::encode(sign(&sk, b"").unwrap()), SIGNATURE);
        assert!(verify(
            &hex::decode(PUBLIC).unwrap(),
            b"",
            &hex::decode(SIGNATURE).unwrap()
        ));
    }

    #[test]
    fn test_deterministic() {
        let sk = [3u8; 32];
        assert_eq!(sign(&sk, b"msg").unwrap(), sign(&sk, b"msg").unwrap());
    }

    #[test]
    fn test_expanded_private_key() {
        let mut expanded = hex::decode(SECRET).unwrap();
        expanded.extend(hex::decode(PUBLIC).unwrap());
        assert_eq!(hex::encode(public_key(&expanded).unwrap()), PUBLIC);

        expanded[40] ^= 1;
        assert!(public_key(&expanded).is_err());
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(public_key(&[0u8; 31]).is_err());
        assert!(!verify(&[0u8; 31], b"", &[0u8; 64]));
        assert!(!verify(&hex::decode(PUBLIC).unwrap(), b"", &[0u8; 63]));
    }
}
