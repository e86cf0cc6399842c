use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use crate::input::CertificateSource;
use certkid_crypto::ArmorPolicy;
use clap::Parser;
use std::path::PathBuf;

/// Print the kid and public key of an X.509 certificate.
///
/// Without a certificate argument, `--file` or `--sample`, one certificate is
/// read from stdin.
#[derive(Debug, Clone, Parser)]
#[command(name = "certkid", version, about)]
pub struct Cli {
    /// Certificate as base64 DER or PEM text
    #[arg(allow_hyphen_values = true, conflicts_with_all = ["file", "sample"])]
    pub certificate: Option<String>,

    /// Read the certificate from a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "sample")]
    pub file: Option<PathBuf>,

    /// Use the built-in sample certificate
    #[arg(long)]
    pub sample: bool,

    /// Output format (overrides output.format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Accept inconsistent certificate markers (overrides armor.policy)
    #[arg(long)]
    pub lenient_armor: bool,

    /// Also print the JWK in text output
    #[arg(long)]
    pub jwk: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

impl Cli {
    /// Where to read the certificate from.
    #[must_use]
    pub fn source(&self) -> CertificateSource {
        if let Some(text) = &self.certificate {
            CertificateSource::Inline(text.clone())
        } else if let Some(path) = &self.file {
            CertificateSource::File(path.clone())
        } else if self.sample {
            CertificateSource::Sample
        } else {
            CertificateSource::Stdin
        }
    }

    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.lenient_armor {
            config.armor.policy = ArmorPolicy::Lenient;
        }
    }
}
