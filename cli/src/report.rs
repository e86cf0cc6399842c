//! The values printed for one certificate.

use certkid_crypto::{
    derive_kid_with_policy, encode_public_key, extract_jwk_with_policy, ArmorPolicy, Kid,
    PublicKeyJwk, PublicKeyPem, SpkiPemEncoder,
};
use serde::Serialize;

/// Kid, public key and JWK of one certificate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kid: Kid,
    pub public_key: PublicKeyPem,
    pub jwk: PublicKeyJwk,
}

impl Report {
    /// Compute every value for `certificate`.
    ///
    /// # Errors
    /// Returns the first error from kid derivation or key extraction.
    pub fn build(certificate: &str, policy: ArmorPolicy) -> Result<Self, certkid_crypto::Error> {
        let kid = derive_kid_with_policy(certificate, policy)?;
        let jwk = extract_jwk_with_policy(certificate, policy)?;
        let public_key = encode_public_key(&SpkiPemEncoder, &jwk)?;
        tracing::info!(%kid, kty = jwk.key_type(), "certificate processed");
        Ok(Self {
            kid,
            public_key,
            jwk,
        })
    }

    /// Render the `kid:` / `publicKey:` text layout, optionally followed by
    /// the JWK.
    ///
    /// # Errors
    /// Returns an error if the JWK cannot be serialized.
    pub fn render_text(&self, with_jwk: bool) -> Result<String, serde_json::Error> {
        let mut out = format!(
            "kid:\n{}\n\npublicKey:\n{}\n",
            self.kid, self.public_key
        );
        if with_jwk {
            let jwk = serde_json::to_string_pretty(&self.jwk)?;
            out.push_str(&format!("\njwk:\n{jwk}\n"));
        }
        Ok(out)
    }

    /// Render the report as one pretty-printed JSON object.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}
