//! Key encoding: [`PublicKeyJwk`] to `SubjectPublicKeyInfo` PEM.

use crate::jwk::{EcCurve, PublicKeyJwk};
use crate::Error;
use rsa::BigUint;

/// Largest RSA modulus accepted by [`SpkiPemEncoder`], in bits.
const MAX_RSA_BITS: usize = 16384;

/// Turns a structured public key into armored PEM text.
pub trait KeyEncoder {
    /// Encode `key` as a complete PEM document.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedKeyType`] if the key cannot be encoded.
    fn encode_pem(&self, key: &PublicKeyJwk) -> Result<String, Error>;
}

/// [`KeyEncoder`] producing `-----BEGIN PUBLIC KEY-----` documents with LF
/// line endings and 64-character lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpkiPemEncoder;

impl KeyEncoder for SpkiPemEncoder {
    fn encode_pem(&self, key: &PublicKeyJwk) -> Result<String, Error> {
        match key {
            PublicKeyJwk::Ec { crv, .. } => encode_ec(*crv, &key.to_sec1().unwrap_or_default()),
            PublicKeyJwk::Rsa { n, e } => encode_rsa(n, e),
        }
    }
}

fn encode_ec(crv: EcCurve, sec1: &[u8]) -> Result<String, Error> {
    let rejected = || Error::UnsupportedKeyType(format!("{crv} point rejected by encoder"));
    let pem = match crv {
        EcCurve::P256 => {
            let key = p256::PublicKey::from_sec1_bytes(sec1).map_err(|_| rejected())?;
            p256::pkcs8::EncodePublicKey::to_public_key_pem(&key, p256::pkcs8::LineEnding::LF)
        }
        EcCurve::P384 => {
            let key = p384::PublicKey::from_sec1_bytes(sec1).map_err(|_| rejected())?;
            p384::pkcs8::EncodePublicKey::to_public_key_pem(&key, p384::pkcs8::LineEnding::LF)
        }
        EcCurve::P521 => {
            let key = p521::PublicKey::from_sec1_bytes(sec1).map_err(|_| rejected())?;
            p521::pkcs8::EncodePublicKey::to_public_key_pem(&key, p521::pkcs8::LineEnding::LF)
        }
    };
    pem.map_err(|e| Error::UnsupportedKeyType(format!("{crv}: {e}")))
}

fn encode_rsa(n: &[u8], e: &[u8]) -> Result<String, Error> {
    let key = rsa::RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(n),
        BigUint::from_bytes_be(e),
        MAX_RSA_BITS,
    )
    .map_err(|err| Error::UnsupportedKeyType(format!("RSA: {err}")))?;
    rsa::pkcs8::EncodePublicKey::to_public_key_pem(&key, rsa::pkcs8::LineEnding::LF)
        .map_err(|err| Error::UnsupportedKeyType(format!("RSA: {err}")))
}
