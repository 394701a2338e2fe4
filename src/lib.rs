//! Counterparty setup tooling
//!
//! Prepares a machine to run `counterparty-server` and `counterparty-client`:
//!
//! 1. **Config generation**: writes commented `server.conf` and `client.conf`
//!    files, pre-filled with settings discovered from Bitcoin Core's
//!    `bitcoin.conf` and from a legacy `counterpartyd.conf`.
//! 2. **Bootstrap**: installs pre-built mainnet/testnet databases from the
//!    public snapshot bucket.
//!
//! ## Layout
//!
//! - [`schema`]: option tables and typed values
//! - [`importers`]: legacy and Bitcoin Core config discovery
//! - [`resolver`]: merge precedence, password synthesis, server → client renames
//! - [`generator`]: config file rendering and writing
//! - [`bootstrap`]: snapshot download and install
//! - [`paths`]: platform directory conventions

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod generator;
pub mod importers;
pub mod paths;
pub mod resolver;
pub mod schema;
pub mod utils;

// Re-export config module
pub use config::*;

pub use bootstrap::{
    ArchiveFetcher, BootstrapInstaller, BootstrapOptions, BootstrapOutcome, HttpFetcher, Prompt,
    StdinPrompt,
};
pub use error::{SetupError, SetupResult};
pub use generator::{generate_config_file, render_config, GenerateOutcome};
pub use paths::{HostDirs, Network, Platform, SetupPaths};
pub use resolver::{generate_config_files, GenerateReport};
pub use schema::{client_config_args, server_config_args, ConfigArg, ConfigValue, KnownConfig};
