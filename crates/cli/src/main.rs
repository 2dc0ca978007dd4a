//! The `yaxis` command line tool.

#![deny(unused_must_use, rust_2018_idioms)]

mod commands;

use clap::{Parser, Subcommand};
use std::{
    io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use yaxis_deployments::FileStore;
use yaxis_manifest::{Manifest, ProcessEnv};

/// yAxis deployment configuration.
#[derive(Debug, Parser)]
#[command(name = "yaxis", version, about)]
struct Cli {
    /// Network to operate on. Defaults to the manifest's default network.
    #[arg(long, short, global = true, env = "YAXIS_NETWORK")]
    network: Option<String>,

    /// Manifest file. Defaults to the built-in yAxis manifest.
    #[arg(long, global = true, env = "YAXIS_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Deployment record directory. Defaults to the manifest's deployments
    /// path.
    #[arg(long, global = true)]
    deployments: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the contract addresses for a network.
    Contracts,
    /// Print every named role and its address on a network.
    Roles {
        /// Only print roles that did not resolve.
        #[arg(long)]
        unresolved: bool,
    },
    /// Print the selected network profile.
    Network,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// File the process environment is extended from.
const DOTENV_FILE: &str = ".env";

/// Load variables from a dotenv file into the process environment.
/// Variables already set win. Returns false when the file does not exist.
fn load_dotenv(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

fn main() -> eyre::Result<()> {
    // Before tracing and argument parsing, so `.env` can set both.
    let dotenv = load_dotenv(Path::new(DOTENV_FILE));
    init_tracing();
    match dotenv {
        Ok(loaded) => debug!(loaded, path = DOTENV_FILE, "dotenv"),
        Err(error) => warn!(%error, path = DOTENV_FILE, "ignoring malformed dotenv file"),
    }
    let cli = Cli::parse();

    let manifest = match &cli.manifest {
        Some(path) => Manifest::from_path(path)?,
        None => Manifest::yaxis(),
    };
    let env = ProcessEnv;
    let profile = manifest.select(cli.network.as_deref(), &env)?;
    let out = io::stdout().lock();

    match cli.command {
        Command::Contracts => {
            let root = cli.deployments.unwrap_or_else(|| manifest.paths().deployments.clone());
            commands::contracts(&FileStore::new(root), &profile, out)
        }
        Command::Roles { unresolved } => {
            commands::roles(&manifest, &profile, &env, unresolved, out)
        }
        Command::Network => commands::network(&manifest, &profile, &env, out),
    }
}
