//! Key identifiers and public keys for X.509 certificates.
//!
//! This crate turns a base64 certificate (bare DER or PEM-armored) into a
//! short key identifier and a `SubjectPublicKeyInfo` PEM body. The `certkid`
//! command-line tool is a thin driver over it.

use base64::alphabet;
use base64::engine::general_purpose::{
    GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE_NO_PAD,
};
use base64::engine::DecodePaddingMode;
use base64::Engine;
pub(crate) use sha2::{Digest, Sha256};

pub mod armor;
pub use armor::ArmorPolicy;

mod kid;
pub use kid::{derive_kid, derive_kid_with_policy, Kid, KidError};

mod jwk;
pub use jwk::{EcCurve, PublicKeyJwk};

mod parser;
pub use parser::{CertificateParser, X509CertificateParser};

mod encoder;
pub use encoder::{KeyEncoder, SpkiPemEncoder};

mod extract;
pub use extract::{
    encode_public_key, extract_jwk, extract_jwk_with_policy, extract_public_key,
    extract_public_key_with, PublicKeyPem,
};

/// Errors raised while deriving a kid or extracting a public key.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid base64 encoding: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("invalid certificate: {0}")]
    Parse(String),
    #[error("unsupported public key type: {0}")]
    UnsupportedKeyType(String),
    #[error("malformed certificate armor: {0}")]
    MalformedArmor(&'static str),
}

/// Standard alphabet, padding optional on input.
const STANDARD_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as standard base64 (RFC 4648 §4) with padding.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64, ignoring whitespace.
///
/// Line breaks left behind by PEM armor are removed before decoding, and
/// trailing `=` padding may be present or absent.
///
/// # Errors
/// Returns [`Error::Decode`] if the input contains characters outside the
/// standard alphabet or has invalid padding.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, Error> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    Ok(STANDARD_INDIFFERENT.decode(compact)?)
}

/// Encode bytes as base64url (RFC 4648 §5) without padding.
#[must_use]
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
