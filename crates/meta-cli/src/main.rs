use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use meta_config::MetaConfig;

mod cli;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("metaparse error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = MetaConfig::load().context("failed to load metaparse configuration")?;

    let mut stdout = io::stdout().lock();
    execute(&cli, &config, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Extract the metadata of `cli.input` and write it to `out`.
///
/// Returns whether anything was written. A file without metadata is not an
/// error.
fn execute<W: Write>(cli: &cli::Cli, config: &MetaConfig, out: &mut W) -> anyhow::Result<bool> {
    let options = config.includes.parse_options(&cli.include)?;

    let metadata = meta_parser::describe_file(&cli.input, &options)
        .with_context(|| format!("failed to extract metadata from {}", cli.input.display()))?;
    let Some(metadata) = metadata else {
        tracing::debug!(file = %cli.input.display(), "nothing to report");
        return Ok(false);
    };

    let rendered = output::render(&metadata, cli.format, config.output.indent)?;
    out.write_all(rendered.as_bytes())?;
    Ok(true)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("METAPARSE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
