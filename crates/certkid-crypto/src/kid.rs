//! Key Identifier (KID): a short fingerprint of a certificate.
//!
//! A KID is `base64(SHA-256(der)[0:8])` in the standard alphabet with
//! padding, always exactly 12 characters ending in `=`.

use crate::armor::{self, ArmorPolicy};
use crate::{decode_base64, encode_base64, Digest, Error, Sha256};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A validated key identifier.
///
/// Construct via [`Kid::derive`] (from DER bytes), [`derive_kid`] (from
/// certificate text) or [`Kid::from_str`] (from a stored identifier).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Kid {
    bytes: [u8; KID_BYTES],
    encoded: String,
}

/// Error returned when a string is not a valid KID.
#[derive(Debug, thiserror::Error)]
#[error("invalid KID: {reason}")]
pub struct KidError {
    reason: &'static str,
}

/// Number of hash bytes kept in a KID.
const KID_BYTES: usize = 8;
/// Expected length of a KID string (8 bytes base64-encoded with padding).
const KID_LENGTH: usize = 12;

impl Kid {
    /// Derive a KID from raw certificate bytes.
    ///
    /// The bytes are hashed as-is; they do not need to be valid DER.
    #[must_use]
    pub fn derive(der: &[u8]) -> Self {
        let hash = Sha256::digest(der);
        let mut bytes = [0u8; KID_BYTES];
        bytes.copy_from_slice(&hash[..KID_BYTES]);
        Self {
            encoded: encode_base64(&bytes),
            bytes,
        }
    }

    /// Return the KID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Return the truncated hash bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; KID_BYTES] {
        self.bytes
    }

    fn validate(s: &str) -> Result<[u8; KID_BYTES], KidError> {
        if s.len() != KID_LENGTH {
            return Err(KidError {
                reason: "must be exactly 12 characters",
            });
        }
        let decoded = STANDARD.decode(s).map_err(|_| KidError {
            reason: "contains invalid characters (expected padded base64)",
        })?;
        decoded.try_into().map_err(|_| KidError {
            reason: "must decode to exactly 8 bytes",
        })
    }
}

/// Derive the KID of a certificate under the default [`ArmorPolicy`].
///
/// The input is either bare base64 DER or PEM-armored text. Armor is stripped
/// when present, the payload is base64-decoded and [`Kid::derive`] hashes the
/// resulting bytes.
///
/// # Errors
/// Returns [`Error::MalformedArmor`] for inconsistent markers and
/// [`Error::Decode`] if the payload is not valid base64.
pub fn derive_kid(certificate: &str) -> Result<Kid, Error> {
    derive_kid_with_policy(certificate, ArmorPolicy::default())
}

/// Derive the KID of a certificate under an explicit [`ArmorPolicy`].
///
/// # Errors
/// See [`derive_kid`].
pub fn derive_kid_with_policy(certificate: &str, policy: ArmorPolicy) -> Result<Kid, Error> {
    let armored = armor::contains_armor(certificate);
    let payload = if armored {
        policy.check(certificate)?;
        Cow::Owned(armor::strip_armor(certificate))
    } else {
        Cow::Borrowed(certificate)
    };

    let der = decode_base64(&payload)?;
    let kid = Kid::derive(&der);
    tracing::debug!(armored, der_len = der.len(), kid = %kid, "derived kid");
    Ok(kid)
}

impl FromStr for Kid {
    type Err = KidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = Self::validate(s)?;
        Ok(Self {
            bytes,
            encoded: s.to_string(),
        })
    }
}

impl fmt::Display for Kid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl AsRef<str> for Kid {
    fn as_ref(&self) -> &str {
        &self.encoded
    }
}

impl serde::Serialize for Kid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encoded.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Kid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
