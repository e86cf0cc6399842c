//! PEM armor detection, removal and generation.
//!
//! Only the armor text is touched; the base64 payload passes through
//! unchanged apart from line wrapping.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Certificate begin marker.
pub const CERT_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
/// Certificate end marker.
pub const CERT_END: &str = "-----END CERTIFICATE-----";
/// Public key begin marker.
pub const PUBLIC_KEY_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";
/// Public key end marker.
pub const PUBLIC_KEY_END: &str = "-----END PUBLIC KEY-----";
/// Characters per payload line in generated armor.
pub const LINE_WIDTH: usize = 64;

/// How inconsistent certificate markers are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorPolicy {
    /// Reject input whose markers do not form a single begin/end pair.
    #[default]
    Strict,
    /// Replace markers literally and leave unmatched ones in place.
    Lenient,
}

impl ArmorPolicy {
    /// Check `text` against this policy.
    ///
    /// # Errors
    /// Returns [`Error::MalformedArmor`] under [`ArmorPolicy::Strict`] when
    /// [`check_armor`] rejects the text.
    pub fn check(self, text: &str) -> Result<(), Error> {
        match self {
            Self::Strict => check_armor(text),
            Self::Lenient => Ok(()),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl fmt::Display for ArmorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if the text contains either certificate marker.
#[must_use]
pub fn contains_armor(text: &str) -> bool {
    text.contains(CERT_BEGIN) || text.contains(CERT_END)
}

/// Remove the first begin marker (with its line break) and the first end marker.
///
/// Interior line breaks are kept. Unmatched markers are removed on their own
/// and nothing else is validated; see [`check_armor`] for that.
#[must_use]
pub fn strip_armor(text: &str) -> String {
    let without_begin = remove_first(text, CERT_BEGIN, true);
    remove_first(&without_begin, CERT_END, false)
}

/// Wrap a base64 payload in certificate armor.
///
/// Whitespace is dropped, the payload is split into lines of [`LINE_WIDTH`]
/// characters, each line ends with `\n`, and the end marker is appended with
/// no trailing newline.
#[must_use]
pub fn add_armor(text: &str) -> String {
    let payload: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut armored = String::with_capacity(
        CERT_BEGIN.len() + CERT_END.len() + payload.len() + payload.len() / LINE_WIDTH + 2,
    );
    armored.push_str(CERT_BEGIN);
    armored.push('\n');
    for line in payload.chunks(LINE_WIDTH) {
        armored.extend(line);
        armored.push('\n');
    }
    armored.push_str(CERT_END);
    armored
}

/// Verify that certificate markers are consistent.
///
/// Text without markers passes. Otherwise exactly one begin marker must be
/// followed by exactly one end marker.
///
/// # Errors
/// Returns [`Error::MalformedArmor`] describing the first inconsistency.
pub fn check_armor(text: &str) -> Result<(), Error> {
    let begins = text.matches(CERT_BEGIN).count();
    let ends = text.matches(CERT_END).count();
    match (begins, ends) {
        (0, 0) => Ok(()),
        (1, 1) if text.find(CERT_BEGIN) < text.find(CERT_END) => Ok(()),
        (1, 1) => Err(Error::MalformedArmor("end marker precedes begin marker")),
        (0, _) => Err(Error::MalformedArmor("end marker without begin marker")),
        (_, 0) => Err(Error::MalformedArmor("begin marker without end marker")),
        _ => Err(Error::MalformedArmor("more than one certificate block")),
    }
}

/// Remove public key armor from a PEM document, leaving the wrapped body.
///
/// The result has no trailing newline.
#[must_use]
pub fn strip_public_key_armor(pem: &str) -> String {
    let without_begin = remove_first(pem, PUBLIC_KEY_BEGIN, true);
    remove_first(&without_begin, PUBLIC_KEY_END, false)
        .trim_end()
        .to_string()
}

/// Wrap a public key body in public key armor (newline-terminated).
#[must_use]
pub fn add_public_key_armor(body: &str) -> String {
    format!("{PUBLIC_KEY_BEGIN}\n{body}\n{PUBLIC_KEY_END}\n")
}

fn remove_first(text: &str, marker: &str, with_line_break: bool) -> String {
    let Some(start) = text.find(marker) else {
        return text.to_string();
    };
    let mut tail = &text[start + marker.len()..];
    if with_line_break {
        tail = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.strip_prefix('\n'))
            .unwrap_or(tail);
    }
    format!("{}{tail}", &text[..start])
}
