//! counterparty-setup - generate default configs and bootstrap databases
//!
//! ```text
//! counterparty-setup generate-config
//! counterparty-setup bootstrap --confirm
//! counterparty-setup bootstrap --no-overwrite --work-dir /tmp
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use counterparty_setup::utils::init_logging_from_config;
use counterparty_setup::{
    client_config_args, generate_config_files, server_config_args, BootstrapInstaller,
    BootstrapOptions, BootstrapOutcome, GenerateOutcome, HostDirs, HttpFetcher, Platform,
    SetupConfig, SetupPaths, StdinPrompt,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "counterparty-setup",
    version,
    about = "Generate Counterparty server/client config files and bootstrap the database"
)]
struct Cli {
    /// Setup configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter (RUST_LOG takes precedence)
    #[arg(long, global = true, value_name = "FILTER")]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write server.conf and client.conf if they do not exist yet
    GenerateConfig {
        /// Replace existing files
        #[arg(long)]
        overwrite: bool,
    },
    /// Download and install the mainnet and testnet databases
    Bootstrap {
        /// Replace an existing mainnet database (default)
        #[arg(long, conflicts_with = "no_overwrite")]
        overwrite: bool,

        /// Keep an existing mainnet database instead of replacing it
        #[arg(long)]
        no_overwrite: bool,

        /// Ask before downloading
        #[arg(long)]
        confirm: bool,

        /// Directory archives are downloaded to (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<SetupConfig> {
    let config = match path {
        Some(path) => SetupConfig::from_json_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => SetupConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn generate(paths: &SetupPaths, overwrite: bool) -> Result<()> {
    let server_schema = server_config_args();
    let client_schema = client_config_args();

    let report = generate_config_files(paths, &server_schema, &client_schema, overwrite)?;

    for (path, outcome) in [
        (&paths.server_config, report.server),
        (&paths.client_config, report.client),
    ] {
        match outcome {
            GenerateOutcome::Written => println!("Wrote {}", path.display()),
            GenerateOutcome::Skipped => println!("Kept existing {}", path.display()),
        }
    }
    Ok(())
}

async fn bootstrap(
    config: &SetupConfig,
    paths: SetupPaths,
    overwrite: bool,
    ask_confirmation: bool,
    work_dir: Option<PathBuf>,
) -> Result<()> {
    let work_dir = match work_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let options = BootstrapOptions {
        overwrite,
        ask_confirmation,
        work_dir,
    };

    let installer = BootstrapInstaller::new(
        config.bootstrap.clone(),
        paths,
        HttpFetcher::new(),
        StdinPrompt,
    );
    match installer.run(&options).await? {
        BootstrapOutcome::AlreadyPresent => println!("Database already present, nothing to do"),
        BootstrapOutcome::Declined => println!("Bootstrap cancelled"),
        BootstrapOutcome::Installed(databases) => {
            for db in databases {
                println!("Installed {}", db.display());
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_logging_from_config(config.logging.as_ref(), cli.log_filter.as_deref());

    let host = HostDirs::detect()?;
    let paths = SetupPaths::resolve(Platform::current(), &host, &config.naming, &config.legacy);
    info!(version = env!("CARGO_PKG_VERSION"), "counterparty-setup starting");

    match cli.command {
        Commands::GenerateConfig { overwrite } => generate(&paths, overwrite),
        Commands::Bootstrap {
            overwrite,
            no_overwrite,
            confirm,
            work_dir,
        } => bootstrap(&config, paths, overwrite || !no_overwrite, confirm, work_dir).await,
    }
}
