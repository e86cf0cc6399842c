//! Public key extraction: certificate text to a `SubjectPublicKeyInfo` PEM body.

use crate::armor::{self, ArmorPolicy};
use crate::encoder::{KeyEncoder, SpkiPemEncoder};
use crate::jwk::PublicKeyJwk;
use crate::parser::{CertificateParser, X509CertificateParser};
use crate::{decode_base64, Error};
use std::borrow::Cow;
use std::fmt;

/// PEM block label of an X.509 certificate.
const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// A public key PEM body: base64 lines joined with `\n`, armor removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKeyPem(String);

impl PublicKeyPem {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Restore the public key armor.
    #[must_use]
    pub fn to_pem(&self) -> String {
        armor::add_public_key_armor(&self.0)
    }

    /// Decode the body to `SubjectPublicKeyInfo` DER.
    ///
    /// # Errors
    /// Returns [`Error::Decode`] if the body is not valid base64.
    pub fn to_der(&self) -> Result<Vec<u8>, Error> {
        decode_base64(&self.0)
    }
}

impl fmt::Display for PublicKeyPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PublicKeyPem {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PublicKeyPem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Extract the public key of a certificate as a PEM body.
///
/// Uses [`X509CertificateParser`], [`SpkiPemEncoder`] and the default
/// [`ArmorPolicy`].
///
/// # Errors
/// Returns [`Error::Parse`] if the input is not a PEM or base64 DER
/// certificate, [`Error::UnsupportedKeyType`] if the key cannot be encoded and
/// [`Error::MalformedArmor`] for inconsistent markers.
pub fn extract_public_key(certificate: &str) -> Result<PublicKeyPem, Error> {
    extract_public_key_with(
        &X509CertificateParser,
        &SpkiPemEncoder,
        certificate,
        ArmorPolicy::default(),
    )
}

/// Extract a public key PEM body with explicit parser, encoder and policy.
///
/// # Errors
/// See [`extract_public_key`]; parser and encoder errors are passed through.
pub fn extract_public_key_with<P, E>(
    parser: &P,
    encoder: &E,
    certificate: &str,
    policy: ArmorPolicy,
) -> Result<PublicKeyPem, Error>
where
    P: CertificateParser + ?Sized,
    E: KeyEncoder + ?Sized,
{
    let der = certificate_der(certificate, policy)?;
    let jwk = parser.public_key(&der)?;
    tracing::debug!(kty = jwk.key_type(), "extracted subject public key");
    encode_public_key(encoder, &jwk)
}

/// Encode JWK parameters and strip the resulting public key armor.
///
/// # Errors
/// Passes through errors from `encoder`.
pub fn encode_public_key<E>(encoder: &E, jwk: &PublicKeyJwk) -> Result<PublicKeyPem, Error>
where
    E: KeyEncoder + ?Sized,
{
    let pem = encoder.encode_pem(jwk)?;
    Ok(PublicKeyPem(armor::strip_public_key_armor(&pem)))
}

/// Extract the public key of a certificate as JWK parameters.
///
/// # Errors
/// Same as [`extract_public_key`], minus encoder failures.
pub fn extract_jwk(certificate: &str) -> Result<PublicKeyJwk, Error> {
    extract_jwk_with_policy(certificate, ArmorPolicy::default())
}

/// Extract JWK parameters under an explicit [`ArmorPolicy`].
///
/// # Errors
/// See [`extract_jwk`].
pub fn extract_jwk_with_policy(
    certificate: &str,
    policy: ArmorPolicy,
) -> Result<PublicKeyJwk, Error> {
    let der = certificate_der(certificate, policy)?;
    X509CertificateParser.public_key(&der)
}

/// Armor the input if needed and read the DER out of the PEM block.
fn certificate_der(certificate: &str, policy: ArmorPolicy) -> Result<Vec<u8>, Error> {
    let armored = if !armor::contains_armor(certificate) {
        Cow::Owned(armor::add_armor(certificate))
    } else {
        policy.check(certificate)?;
        if armor::check_armor(certificate).is_ok() {
            Cow::Borrowed(certificate)
        } else {
            // Lenient input with a lone marker: rebuild a well-formed block
            Cow::Owned(armor::add_armor(&armor::strip_armor(certificate)))
        }
    };

    let block = pem::parse(armored.as_bytes())
        .map_err(|e| Error::Parse(format!("invalid PEM: {e}")))?;
    if block.tag() != CERTIFICATE_TAG {
        return Err(Error::Parse(format!(
            "expected a {CERTIFICATE_TAG} block, found {}",
            block.tag()
        )));
    }
    Ok(block.into_contents())
}
