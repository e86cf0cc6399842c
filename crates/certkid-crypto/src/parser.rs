//! Certificate parsing: DER bytes to a [`PublicKeyJwk`].

use crate::jwk::{EcCurve, PublicKeyJwk};
use crate::Error;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

/// Extracts the subject public key of a DER certificate.
pub trait CertificateParser {
    /// Parse `der` and return its subject public key.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if `der` is not a certificate and
    /// [`Error::UnsupportedKeyType`] if its key cannot be represented.
    fn public_key(&self, der: &[u8]) -> Result<PublicKeyJwk, Error>;
}

/// [`CertificateParser`] backed by `x509-parser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct X509CertificateParser;

impl CertificateParser for X509CertificateParser {
    fn public_key(&self, der: &[u8]) -> Result<PublicKeyJwk, Error> {
        let (_, cert) = X509Certificate::from_der(der)
            .map_err(|e| Error::Parse(format!("failed to parse certificate: {e}")))?;

        let spki = cert.public_key();
        let algorithm = spki.algorithm.algorithm.to_id_string();
        tracing::trace!(%algorithm, subject = %cert.subject(), "parsed certificate");

        match spki.parsed() {
            Ok(PublicKey::RSA(rsa)) => Ok(PublicKeyJwk::rsa(rsa.modulus, rsa.exponent)),
            Ok(PublicKey::EC(point)) => {
                let curve = spki
                    .algorithm
                    .parameters
                    .as_ref()
                    .and_then(|params| params.as_oid().ok())
                    .map(|oid| oid.to_id_string())
                    .ok_or_else(|| {
                        Error::UnsupportedKeyType("EC key without a named curve".to_string())
                    })?;
                let crv = EcCurve::from_oid(&curve)
                    .ok_or_else(|| Error::UnsupportedKeyType(format!("EC curve {curve}")))?;
                PublicKeyJwk::ec_from_sec1(crv, point.data())
            }
            Ok(_) => Err(Error::UnsupportedKeyType(format!("algorithm {algorithm}"))),
            Err(e) => Err(Error::Parse(format!("invalid subject public key: {e}"))),
        }
    }
}
