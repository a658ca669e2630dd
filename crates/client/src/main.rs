//! usbls
//!
//! Discovers USB devices available for remote attachment: devices exported
//! by a peer host over the network, or devices physically present on the
//! local machine. One discovery pass per invocation; any core failure maps
//! to a diagnostic on stderr and a non-zero exit status.

mod config;
mod local;
mod output;
mod remote;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::{NamesDb, setup_logging};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

use config::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "usbls")]
#[command(author, version, about = "List USB devices exported by a remote host or present locally")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List exported or local USB devices
    List {
        /// Parsable list format
        #[arg(short, long)]
        parsable: bool,

        /// List the exported USB devices on <HOST>
        #[arg(
            short,
            long,
            value_name = "HOST",
            conflicts_with = "local",
            required_unless_present = "local"
        )]
        remote: Option<String>,

        /// List the local USB devices
        #[arg(short, long)]
        local: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_or_default()?,
    };

    let log_level = args.log_level.as_deref().unwrap_or(&config.log_level);
    setup_logging(log_level).context("Failed to setup logging")?;

    debug!("usbls v{}", env!("CARGO_PKG_VERSION"));

    // The name database is acquired once here and borrowed by whichever
    // discovery path runs; it is released when this scope exits, on the
    // error paths included.
    let names = NamesDb::load_or_empty(&config.usbids_path);

    match args.command {
        Command::List {
            parsable,
            remote: Some(host),
            ..
        } => {
            let devices = remote::query(&host, &names, &config)
                .with_context(|| format!("failed to list exported devices on {host}"))?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if !parsable {
                writeln!(out, "- {host}")?;
            }
            output::print_devices(&mut out, &devices, parsable)?;
        }
        Command::List { parsable, .. } => {
            let devices = local::enumerate(Path::new(local::DEFAULT_REGISTRY), &names)
                .context("failed to list local devices")?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            output::print_devices(&mut out, &devices, parsable)?;
        }
    }

    Ok(())
}
