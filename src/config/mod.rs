//! Configuration management for counterparty-setup
//!
//! Handles naming conventions, bootstrap sources and logging settings.

use crate::paths::Network;
use serde::{Deserialize, Serialize};

/// Application naming that drives directory and database file names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppNaming {
    /// Application name (directory and database prefix)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Vendor name (Windows directory layer)
    #[serde(default = "default_vendor_name")]
    pub vendor_name: String,

    /// Database major version, part of the database file name
    #[serde(default = "default_version_major")]
    pub version_major: u32,
}

fn default_app_name() -> String {
    "counterparty".to_string()
}

fn default_vendor_name() -> String {
    "Counterparty".to_string()
}

fn default_version_major() -> u32 {
    9
}

impl Default for AppNaming {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            vendor_name: default_vendor_name(),
            version_major: default_version_major(),
        }
    }
}

impl AppNaming {
    /// Installed database file name, e.g. `counterparty.9.testnet.db`
    pub fn database_file_name(&self, network: Network) -> String {
        match network {
            Network::Mainnet => format!("{}.{}.db", self.app_name, self.version_major),
            Network::Testnet => format!("{}.{}.testnet.db", self.app_name, self.version_major),
        }
    }
}

/// Naming used by the previous generation of the tool (`counterpartyd`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyNaming {
    #[serde(default = "default_legacy_app_name")]
    pub app_name: String,

    #[serde(default = "default_vendor_name")]
    pub vendor_name: String,
}

fn default_legacy_app_name() -> String {
    "counterpartyd".to_string()
}

impl Default for LegacyNaming {
    fn default() -> Self {
        Self {
            app_name: default_legacy_app_name(),
            vendor_name: default_vendor_name(),
        }
    }
}

/// One downloadable database snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSource {
    /// Absolute URL of the gzip tar archive
    pub url: String,
    /// File name the archive is downloaded to inside the work directory
    pub archive_name: String,
    /// Database file contained in the archive
    pub member_name: String,
}

/// Bootstrap snapshot locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Bucket shown to the user in the confirmation prompt
    #[serde(default = "default_bucket_url")]
    pub bucket_url: String,

    #[serde(default = "default_mainnet_source")]
    pub mainnet: ArchiveSource,

    #[serde(default = "default_testnet_source")]
    pub testnet: ArchiveSource,
}

const BOOTSTRAP_BUCKET: &str = "https://s3.amazonaws.com/counterparty-bootstrap/";

fn default_bucket_url() -> String {
    BOOTSTRAP_BUCKET.to_string()
}

fn default_mainnet_source() -> ArchiveSource {
    ArchiveSource {
        url: format!("{}counterpartyd-db.latest.tar.gz", BOOTSTRAP_BUCKET),
        archive_name: "counterpartyd-db.latest.tar.gz".to_string(),
        member_name: "counterpartyd.9.db".to_string(),
    }
}

fn default_testnet_source() -> ArchiveSource {
    ArchiveSource {
        url: format!("{}counterpartyd-testnet-db.latest.tar.gz", BOOTSTRAP_BUCKET),
        archive_name: "counterpartyd-testnet-db.latest.tar.gz".to_string(),
        member_name: "counterpartyd.9.testnet.db".to_string(),
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            bucket_url: default_bucket_url(),
            mainnet: default_mainnet_source(),
            testnet: default_testnet_source(),
        }
    }
}

impl BootstrapConfig {
    pub fn source(&self, network: Network) -> &ArchiveSource {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "counterparty_setup=debug"); RUST_LOG takes precedence
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON instead of human-readable lines (requires `json-logging` feature)
    #[serde(default)]
    pub json_format: bool,
}

/// Top-level setup configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default)]
    pub naming: AppNaming,

    #[serde(default)]
    pub legacy: LegacyNaming,

    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl SetupConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SetupConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let names = [
            ("naming.app_name", &self.naming.app_name),
            ("naming.vendor_name", &self.naming.vendor_name),
            ("legacy.app_name", &self.legacy.app_name),
            ("legacy.vendor_name", &self.legacy.vendor_name),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("{} must not be empty", field));
            }
        }

        for network in [Network::Mainnet, Network::Testnet] {
            let source = self.bootstrap.source(network);
            if !(source.url.starts_with("https://") || source.url.starts_with("http://")) {
                return Err(anyhow::anyhow!(
                    "bootstrap {} url must be an absolute http(s) URL, got '{}'",
                    network,
                    source.url
                ));
            }
            if source.archive_name.is_empty() || source.member_name.is_empty() {
                return Err(anyhow::anyhow!(
                    "bootstrap {} archive_name and member_name must not be empty",
                    network
                ));
            }
        }

        Ok(())
    }
}
