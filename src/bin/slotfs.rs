//! slotfs shell
//!
//! Runs the line-oriented namespace protocol on stdin/stdout (or a script
//! file). Logs go to stderr so they never mix with protocol output.

use anyhow::Context;
use clap::Parser;
use slotfs::{Outcome, Shell, ShellConfig};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slotfs")]
#[command(about = "In-memory hierarchical namespace driven by a line protocol")]
struct Args {
    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(short = 's', long)]
    script: Option<PathBuf>,

    /// Log filter directive (overrides the config file; RUST_LOG overrides both)
    #[arg(short = 'l', long)]
    log_filter: Option<String>,

    /// Do not flush stdout after every response
    #[arg(long)]
    no_flush: bool,
}

/// Merge CLI flags over the configuration file
fn load_config(args: &Args) -> anyhow::Result<ShellConfig> {
    let mut config = match &args.config {
        Some(path) => ShellConfig::load(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => ShellConfig::default(),
    };

    if let Some(filter) = &args.log_filter {
        config.log.filter = filter.clone();
    }
    if args.no_flush {
        config.shell.flush_each_response = false;
    }

    Ok(config)
}

fn init_tracing(config: &ShellConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.log.ansi)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_tracing(&config);

    info!("Starting slotfs shell");

    let mut shell = Shell::builder().config(config).build();
    let stdout = io::stdout();

    let outcome = match &args.script {
        Some(path) => {
            info!("Reading commands from {:?}", path);
            let file = File::open(path).with_context(|| format!("failed to open script {:?}", path))?;
            shell.run(BufReader::new(file), stdout.lock())?
        }
        None => shell.run(io::stdin().lock(), stdout.lock())?,
    };

    match outcome {
        Outcome::Exit => info!("Exited on request"),
        Outcome::EndOfInput => info!("Input exhausted"),
    }

    Ok(())
}
