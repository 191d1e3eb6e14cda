//! ksbuilder - build PKCS#12 keystores and trust stores from PEM files

use clap::Parser;
use console::style;
use ksbuilder::cli::Cli;
use ksbuilder::output::print_summary;
use ksbuilder::runner;
use ksbuilder::utils::Result;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.resolve()?;
    tracing::debug!(?options, "Resolved options");

    let summary = runner::run(&options)?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}
