//! JSON Web Key view of a certificate's subject public key.
//!
//! This is the intermediate form between certificate parsing and key
//! encoding. It serializes to RFC 7517 JSON.

use crate::{encode_base64url, Error};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use serde::ser::SerializeMap;
use std::fmt;

/// NIST curves with a `SubjectPublicKeyInfo` encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    P256,
    P384,
    P521,
}

impl EcCurve {
    /// The JWK `crv` name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Length of one affine coordinate in bytes.
    #[must_use]
    pub const fn coordinate_len(self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    /// Look up a curve by its dotted object identifier.
    #[must_use]
    pub fn from_oid(oid: &str) -> Option<Self> {
        match oid {
            // prime256v1 / secp256r1
            "1.2.840.10045.3.1.7" => Some(Self::P256),
            // secp384r1
            "1.3.132.0.34" => Some(Self::P384),
            // secp521r1
            "1.3.132.0.35" => Some(Self::P521),
            _ => None,
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A public key as JWK parameters.
///
/// Integers and coordinates are unsigned big-endian byte strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyJwk {
    Ec { crv: EcCurve, x: Vec<u8>, y: Vec<u8> },
    Rsa { n: Vec<u8>, e: Vec<u8> },
}

impl PublicKeyJwk {
    /// Build an RSA key from DER integers, dropping sign padding.
    #[must_use]
    pub fn rsa(modulus: &[u8], exponent: &[u8]) -> Self {
        Self::Rsa {
            n: trim_leading_zeros(modulus).to_vec(),
            e: trim_leading_zeros(exponent).to_vec(),
        }
    }

    /// Build an EC key from a SEC1 point (compressed or uncompressed).
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the point is not on the curve.
    pub fn ec_from_sec1(crv: EcCurve, point: &[u8]) -> Result<Self, Error> {
        let invalid = || Error::Parse(format!("invalid {crv} public key point"));
        let uncompressed = match crv {
            EcCurve::P256 => p256::PublicKey::from_sec1_bytes(point)
                .ok()
                .map(|key| key.to_encoded_point(false).as_bytes().to_vec()),
            EcCurve::P384 => p384::PublicKey::from_sec1_bytes(point)
                .ok()
                .map(|key| key.to_encoded_point(false).as_bytes().to_vec()),
            EcCurve::P521 => p521::PublicKey::from_sec1_bytes(point)
                .ok()
                .map(|key| key.to_encoded_point(false).as_bytes().to_vec()),
        }
        .ok_or_else(invalid)?;

        // 0x04 || x || y
        let len = crv.coordinate_len();
        match uncompressed.split_first() {
            Some((&0x04, coordinates)) if coordinates.len() == 2 * len => {
                let (x, y) = coordinates.split_at(len);
                Ok(Self::Ec {
                    crv,
                    x: x.to_vec(),
                    y: y.to_vec(),
                })
            }
            _ => Err(invalid()),
        }
    }

    /// The JWK `kty` value.
    #[must_use]
    pub const fn key_type(&self) -> &'static str {
        match self {
            Self::Ec { .. } => "EC",
            Self::Rsa { .. } => "RSA",
        }
    }

    /// Uncompressed SEC1 encoding of an EC key, `None` for RSA.
    #[must_use]
    pub fn to_sec1(&self) -> Option<Vec<u8>> {
        match self {
            Self::Ec { x, y, .. } => {
                let mut point = Vec::with_capacity(1 + x.len() + y.len());
                point.push(0x04);
                point.extend_from_slice(x);
                point.extend_from_slice(y);
                Some(point)
            }
            Self::Rsa { .. } => None,
        }
    }
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len().saturating_sub(1));
    &bytes[start..]
}

impl serde::Serialize for PublicKeyJwk {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ec { crv, x, y } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("kty", self.key_type())?;
                map.serialize_entry("crv", crv.name())?;
                map.serialize_entry("x", &encode_base64url(x))?;
                map.serialize_entry("y", &encode_base64url(y))?;
                map.end()
            }
            Self::Rsa { n, e } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("kty", self.key_type())?;
                map.serialize_entry("n", &encode_base64url(n))?;
                map.serialize_entry("e", &encode_base64url(e))?;
                map.end()
            }
        }
    }
}
