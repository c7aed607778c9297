//! dns-inventory
//!
//! Ansible dynamic inventory script backed by DNS TXT records

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use dnsinv_inventory::{Inventory, build_inventory};
use dnsinv_resolver::{TxtSource, fetch_records};
use eyre::WrapErr;
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

mod config;
mod output;

use config::{Config, Overrides};

/// Ansible dynamic inventory from DNS TXT records
#[derive(Parser, Debug)]
#[command(name = "dns-inventory", version, about)]
struct Args {
    /// Print the whole inventory
    #[arg(long)]
    list: bool,

    /// Print variables for one host (always empty, they are part of --list)
    #[arg(long, value_name = "HOSTNAME")]
    host: Option<String>,

    /// Domain to query, overrides ANSIBLE_INVENTORY_DNS_DOMAIN
    #[arg(long)]
    domain: Option<String>,

    /// DNS lookup timeout in seconds, overrides DNSINV_TIMEOUT_SECS
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Read TXT records from a file in `dig +short` format instead of DNS
    #[arg(long, value_name = "PATH")]
    records_file: Option<PathBuf>,

    /// Fail on malformed records instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    List,
    Host(String),
    Empty,
}

impl Mode {
    fn from_args(args: &Args) -> Self {
        if args.list {
            Mode::List
        } else if let Some(host) = &args.host {
            Mode::Host(host.clone())
        } else {
            Mode::Empty
        }
    }
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            domain: self.domain.clone(),
            timeout_secs: self.timeout,
            records_file: self.records_file.clone(),
            strict: self.strict,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr, stdout carries the inventory
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let inventory = run(&args).await?;
    println!("{}", output::render(&inventory)?);

    Ok(())
}

/// Produce the inventory for the requested mode
async fn run(args: &Args) -> Result<Inventory> {
    match Mode::from_args(args) {
        Mode::List => {
            let config = Config::load(args.overrides())?;
            let source = config.source();
            list(source.as_ref(), &config).await
        }
        Mode::Host(host) => {
            debug!(host = %host, "host variables are served through --list");
            Ok(Inventory::empty())
        }
        Mode::Empty => Ok(Inventory::empty()),
    }
}

/// Fetch records and assemble the full inventory
#[instrument(skip(source, config), fields(domain = %config.domain, source = source.source_type()))]
async fn list(source: &dyn TxtSource, config: &Config) -> Result<Inventory> {
    let records = fetch_records(source, &config.domain)
        .await
        .wrap_err_with(|| format!("failed to fetch inventory records for {}", config.domain))?;

    let assembly = build_inventory(&records, config.mode)?;
    Ok(assembly.inventory)
}
