//! Known-vector tests against real certificates.
//!
//! `nhs_dsc_p256` is a published document-signer certificate; the other
//! fixtures are self-signed certificates generated for these tests. Each
//! `.pub` file holds the expected PEM body.

use certkid_crypto::armor::add_armor;
use certkid_crypto::{
    derive_kid, derive_kid_with_policy, extract_jwk, extract_jwk_with_policy, extract_public_key,
    ArmorPolicy, EcCurve, Error, Kid, PublicKeyJwk,
};
use p256::pkcs8::DecodePublicKey;

const NHS_DSC_P256: &str = include_str!("fixtures/nhs_dsc_p256.b64");
const NHS_DSC_P256_PUB: &str = include_str!("fixtures/nhs_dsc_p256.pub");
const RSA2048: &str = include_str!("fixtures/rsa2048.b64");
const RSA2048_PEM: &str = include_str!("fixtures/rsa2048.pem");
const RSA2048_PUB: &str = include_str!("fixtures/rsa2048.pub");
const P384: &str = include_str!("fixtures/p384.b64");
const P384_PEM: &str = include_str!("fixtures/p384.pem");
const P384_PUB: &str = include_str!("fixtures/p384.pub");
const P521: &str = include_str!("fixtures/p521.b64");
const P521_PEM: &str = include_str!("fixtures/p521.pem");
const P521_PUB: &str = include_str!("fixtures/p521.pub");
const ED25519: &str = include_str!("fixtures/ed25519.b64");
const ED25519_PEM: &str = include_str!("fixtures/ed25519.pem");

fn sample() -> &'static str {
    NHS_DSC_P256.trim()
}

// =========================================================================
// Sample certificate (P-256)
// =========================================================================

#[test]
fn sample_kid_is_pinned() {
    let kid = derive_kid(sample()).expect("sample decodes");
    assert_eq!(kid.as_str(), "qn/NSxWZEU4=");
    assert_eq!(kid.to_bytes().len(), 8);
}

#[test]
fn sample_kid_survives_armor() {
    let bare = derive_kid(sample()).expect("bare");
    let armored = derive_kid(&add_armor(sample())).expect("armored");
    assert_eq!(bare, armored);
}

#[test]
fn sample_kid_parses_back() {
    let kid: Kid = "qn/NSxWZEU4=".parse().expect("valid kid");
    assert_eq!(kid, derive_kid(sample()).expect("sample decodes"));
}

#[test]
fn sample_public_key_is_pinned() {
    let key = extract_public_key(sample()).expect("sample parses");
    assert_eq!(key.as_str(), NHS_DSC_P256_PUB.trim_end());
    assert!(key.as_str().lines().all(|line| line.len() <= 64));
    assert!(!key.as_str().contains("-----"));
}

#[test]
fn sample_public_key_reparses_as_p256() {
    let key = extract_public_key(sample()).expect("sample parses");
    let parsed = p256::PublicKey::from_public_key_pem(&key.to_pem()).expect("P-256 SPKI");
    let der = key.to_der().expect("body is base64");
    assert_eq!(
        p256::PublicKey::from_public_key_der(&der).expect("P-256 DER"),
        parsed
    );
}

#[test]
fn sample_public_key_same_for_armored_input() {
    let bare = extract_public_key(sample()).expect("bare");
    let armored = extract_public_key(&add_armor(sample())).expect("armored");
    assert_eq!(bare, armored);
}

#[test]
fn sample_jwk_coordinates() {
    let jwk = extract_jwk(sample()).expect("sample parses");
    assert_eq!(jwk.key_type(), "EC");
    let PublicKeyJwk::Ec { crv, .. } = &jwk else {
        panic!("expected an EC key, got {jwk:?}");
    };
    assert_eq!(*crv, EcCurve::P256);

    let json = serde_json::to_value(&jwk).expect("serialize");
    assert_eq!(json["crv"], "P-256");
    assert_eq!(json["x"], "JeaoEKFuWsKvMn_whJuwppdB2YHHVERSLVgxSAc4k2E");
    assert_eq!(json["y"], "FPzbQvL0sr5gPFby7r4e2y-c1mLOqO5KrF6Zkm9y-A8");
}

// =========================================================================
// Other key types
// =========================================================================

#[test]
fn rsa_certificate() {
    assert_eq!(
        derive_kid(RSA2048).expect("decodes").as_str(),
        "TFCUeao5blY="
    );

    let key = extract_public_key(RSA2048).expect("parses");
    assert_eq!(key.as_str(), RSA2048_PUB.trim_end());
    rsa::RsaPublicKey::from_public_key_pem(&key.to_pem()).expect("RSA SPKI");
}

#[test]
fn rsa_certificate_from_pem_file_text() {
    let from_pem = extract_public_key(RSA2048_PEM).expect("parses");
    let from_b64 = extract_public_key(RSA2048).expect("parses");
    assert_eq!(from_pem, from_b64);
    assert_eq!(
        derive_kid(RSA2048_PEM).expect("decodes"),
        derive_kid(RSA2048).expect("decodes")
    );
}

#[test]
fn rsa_jwk_uses_standard_exponent() {
    let json = serde_json::to_value(extract_jwk(RSA2048).expect("parses")).expect("serialize");
    assert_eq!(json["kty"], "RSA");
    assert_eq!(json["e"], "AQAB");
}

#[test]
fn p384_certificate() {
    assert_eq!(derive_kid(P384).expect("decodes").as_str(), "lk2Pt57+bgo=");

    let key = extract_public_key(P384_PEM).expect("parses");
    assert_eq!(key.as_str(), P384_PUB.trim_end());
    p384::PublicKey::from_public_key_pem(&key.to_pem()).expect("P-384 SPKI");
}

#[test]
fn p521_certificate() {
    assert_eq!(derive_kid(P521).expect("decodes").as_str(), "xvg/ggy6RBE=");

    let key = extract_public_key(P521_PEM).expect("parses");
    assert_eq!(key.as_str(), P521_PUB.trim_end());
    p521::PublicKey::from_public_key_pem(&key.to_pem()).expect("P-521 SPKI");

    // bare base64 gives the same body as the PEM file
    assert_eq!(extract_public_key(P521).expect("parses"), key);
}

#[test]
fn p521_jwk_has_66_byte_coordinates() {
    let jwk = extract_jwk(P521).expect("parses");
    let PublicKeyJwk::Ec { crv, x, y } = &jwk else {
        panic!("expected an EC key, got {jwk:?}");
    };
    assert_eq!(*crv, EcCurve::P521);
    assert_eq!((x.len(), y.len()), (66, 66));

    let json = serde_json::to_value(&jwk).expect("serialize");
    assert_eq!(json["crv"], "P-521");
    assert_eq!(
        json["x"],
        "Abr3Buh-ZQfzM4Fb-VlHiWdrqdF0-4FLM-u1iMgnMSGhEoN-VWLCr3sqMyJPJrTwEot_xYFFA2lFI6vCpnbyHpP1"
    );
    assert_eq!(
        json["y"],
        "AOF1v5w6bHJOXzyIahtmGdvsC0LmtRdPZ6cZTkU9UM-QqT35Xgj7V21VxmyFRx8WEg96WaSl0bFSLqr58iR1AukL"
    );
}

#[test]
fn ed25519_certificate_has_kid_but_unsupported_key() {
    assert_eq!(derive_kid(ED25519).expect("decodes").as_str(), "IwTnXPpKbtg=");
    assert!(matches!(
        extract_public_key(ED25519_PEM),
        Err(Error::UnsupportedKeyType(_))
    ));
}

#[test]
fn non_ascii_whitespace_is_ignored_by_both_paths() {
    // U+00A0 after the first 64 characters, as pasted from a web page
    let (head, tail) = sample().split_at(64);
    let pasted = format!("{head}\u{a0}{tail}");

    assert_eq!(derive_kid(&pasted).expect("kid").as_str(), "qn/NSxWZEU4=");
    assert_eq!(
        extract_public_key(&pasted).expect("key").as_str(),
        NHS_DSC_P256_PUB.trim_end()
    );
}

// =========================================================================
// Invalid input
// =========================================================================

#[test]
fn invalid_base64_is_a_decode_error() {
    assert!(matches!(derive_kid("not-base64!!"), Err(Error::Decode(_))));
}

#[test]
fn invalid_certificate_is_a_parse_error() {
    assert!(matches!(
        extract_public_key("not-a-cert"),
        Err(Error::Parse(_))
    ));
}

#[test]
fn truncated_certificate_is_a_parse_error() {
    let truncated = &sample()[..400];
    assert!(matches!(
        extract_public_key(truncated),
        Err(Error::Parse(_))
    ));
}

#[test]
fn end_marker_only_depends_on_policy() {
    let partial = format!("{}-----END CERTIFICATE-----", sample());
    assert!(matches!(
        derive_kid(&partial),
        Err(Error::MalformedArmor(_))
    ));
    let lenient = derive_kid_with_policy(&partial, ArmorPolicy::Lenient).expect("lenient");
    assert_eq!(lenient.as_str(), "qn/NSxWZEU4=");

    assert!(matches!(
        extract_jwk(&partial),
        Err(Error::MalformedArmor(_))
    ));
    let jwk = extract_jwk_with_policy(&partial, ArmorPolicy::Lenient).expect("lenient");
    assert_eq!(jwk, extract_jwk(sample()).expect("bare"));
}
