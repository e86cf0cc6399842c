#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use anyhow::Context;
use certkid::{
    cli::Cli,
    config::{Config, OutputFormat},
    report::Report,
};
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let mut config = Config::load_from(&cli.config)?;
    cli.apply(&mut config);

    // Logs go to stderr; stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        armor_policy = %config.armor.policy,
        format = ?config.output.format,
        "certkid starting"
    );

    let source = cli.source();
    let certificate = source.read()?;
    let report = Report::build(&certificate, config.armor.policy)
        .with_context(|| format!("failed to process certificate from {source}"))?;

    let rendered = match config.output.format {
        OutputFormat::Text => report.render_text(cli.jwk)?,
        OutputFormat::Json => report.render_json()?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
