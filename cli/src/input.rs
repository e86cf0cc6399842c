//! Where the certificate text comes from.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

/// Document signer certificate used by `--sample`.
pub const SAMPLE_CERTIFICATE: &str = "MIIDIjCCAsigAwIBAgIEYTtGPDAKBggqhkjOPQQDAjBWMQswCQYDVQQGEwJHQjEUMBIGA1UEChMLTkhTIERpZ2l0YWwxFjAUBgNVBAsTDVByZVByb2R1Y3Rpb24xGTAXBgNVBAMTEEVuZ2xhbmQgRENDIENTQ0EwHhcNMjEwOTI3MTYwMjU3WhcNMjMwOTI3MTYzMjU3WjB5MQswCQYDVQQGEwJHQjEUMBIGA1UEChMLTkhTIERpZ2l0YWwxGDAWBgNVBAgMD0VuZ2xhbmQgJiBXYWxlczEWMBQGA1UECxMNUHJlUHJvZHVjdGlvbjEiMCAGA1UEAwwZRFNDX0RDQ19HQl9QUkVQUk9EX0VOR18wMjBZMBMGByqGSM49AgEGCCqGSM49AwEHA0IABCXmqBChblrCrzJ/8ISbsKaXQdmBx1REUi1YMUgHOJNhFPzbQvL0sr5gPFby7r4e2y+c1mLOqO5KrF6Zkm9y+A+jggFfMIIBWzAOBgNVHQ8BAf8EBAMCB4AweAYDVR0SBHEwb4EPcGtpQG5oc3gubmhzLnVrgkpodHRwczovL3d3dy5uaHN4Lm5ocy51ay9rZXktdG9vbHMtYW5kLWluZm8vcHVibGljLWtleS1pbmZyYXN0cnVjdHVyZXMvY3NjYaQQMA4xDDAKBgNVBAcMA0dCUjBiBgNVHR8EWzBZMFegVaBThlFodHRwczovL3N0YWdlLmNvdmlkLXN0YXR1cy5zZXJ2aWNlLm5oc3gubmhzLnVrL0NSTC9QcmVwX05hdGlvbmFsX2VIZWFsdGhfQ1NDQS5jcmwwKwYDVR0QBCQwIoAPMjAyMTA5MjcxNjAyNTdagQ8yMDIyMDMyOTA0MzI1N1owHwYDVR0jBBgwFoAUzJ2RzbC6KMpTliQ6/3OUUj+KlHowHQYDVR0OBBYEFHcd0jk1B6CdFFCkW+v0P5ttY61WMAoGCCqGSM49BAMCA0gAMEUCIQCJ9zyXNHEZLVfXkIl8MqauPGDb/NDalfcntgEAt/y6lwIgcGWI5vIOd6YJURuSSND4WVacewFlb4EPWnNKSXMdXkQ=";

/// Prompt written to stderr before reading an interactive line.
const PROMPT: &str = "certificate (base64 or PEM): ";

/// One certificate source, chosen from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateSource {
    /// Text given directly on the command line.
    Inline(String),
    /// A file holding base64 or PEM text.
    File(PathBuf),
    /// [`SAMPLE_CERTIFICATE`].
    Sample,
    /// Standard input.
    Stdin,
}

/// Errors while obtaining certificate text.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {source_name}: {err}")]
    Io {
        source_name: String,
        #[source]
        err: io::Error,
    },

    #[error("no certificate given on {0}")]
    Empty(String),
}

impl CertificateSource {
    /// Read the certificate text from this source.
    ///
    /// Stdin is read as a single line when it is a terminal and to the end
    /// otherwise, so piped PEM files keep all their lines.
    ///
    /// # Errors
    /// Returns [`InputError`] if the source cannot be read or is blank.
    pub fn read(&self) -> Result<String, InputError> {
        match self {
            Self::Stdin => {
                let stdin = io::stdin();
                let interactive = stdin.is_terminal();
                if interactive {
                    let mut stderr = io::stderr();
                    if let Err(e) = write!(stderr, "{PROMPT}").and_then(|()| stderr.flush()) {
                        tracing::debug!(error = %e, "could not write prompt");
                    }
                }
                self.read_from(stdin.lock(), interactive)
            }
            _ => self.read_from(io::empty(), false),
        }
    }

    /// Read the certificate text, taking stdin from `reader`.
    ///
    /// # Errors
    /// See [`CertificateSource::read`].
    pub fn read_from<R: BufRead>(
        &self,
        mut reader: R,
        single_line: bool,
    ) -> Result<String, InputError> {
        let io_error = |err| InputError::Io {
            source_name: self.to_string(),
            err,
        };

        let text = match self {
            Self::Inline(text) => text.clone(),
            Self::Sample => SAMPLE_CERTIFICATE.to_string(),
            Self::File(path) => std::fs::read_to_string(path).map_err(io_error)?,
            Self::Stdin => {
                let mut buf = String::new();
                if single_line {
                    reader.read_line(&mut buf).map_err(io_error)?;
                } else {
                    reader.read_to_string(&mut buf).map_err(io_error)?;
                }
                buf
            }
        };

        if text.trim().is_empty() {
            return Err(InputError::Empty(self.to_string()));
        }
        tracing::debug!(source = %self, len = text.len(), "read certificate text");
        Ok(text)
    }
}

impl fmt::Display for CertificateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("command line"),
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Sample => f.write_str("built-in sample"),
            Self::Stdin => f.write_str("stdin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_is_returned_unchanged() {
        let source = CertificateSource::Inline("SGVsbG8=".into());
        let text = source.read_from(io::empty(), false).expect("inline");
        assert_eq!(text, "SGVsbG8=");
    }

    #[test]
    fn sample_is_the_builtin_certificate() {
        let text = CertificateSource::Sample
            .read_from(io::empty(), false)
            .expect("sample");
        assert_eq!(text, SAMPLE_CERTIFICATE);
    }

    #[test]
    fn stdin_single_line_stops_at_newline() {
        let input = b"first line\nsecond line\n";
        let text = CertificateSource::Stdin
            .read_from(&input[..], true)
            .expect("stdin");
        assert_eq!(text, "first line\n");
    }

    #[test]
    fn stdin_piped_reads_everything() {
        let input = b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        let text = CertificateSource::Stdin
            .read_from(&input[..], false)
            .expect("stdin");
        assert_eq!(text.as_bytes(), input);
    }

    #[test]
    fn blank_input_is_rejected() {
        let result = CertificateSource::Stdin.read_from(&b"\n"[..], true);
        assert!(matches!(result, Err(InputError::Empty(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let source = CertificateSource::File(PathBuf::from("/nonexistent/cert.pem"));
        let err = source
            .read_from(io::empty(), false)
            .expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/cert.pem"));
    }
}
