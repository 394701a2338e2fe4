//! Platform directory conventions
//!
//! Resolution is a pure function of a [`Platform`] and a [`HostDirs`]
//! snapshot, so every branch can be exercised on any host. Only
//! [`HostDirs::detect`] and [`Platform::current`] look at the live system.
//!
//! Conventions (roaming user directories):
//!
//! | platform | user data dir                          | user config dir                |
//! |----------|----------------------------------------|--------------------------------|
//! | macOS    | `~/Library/Application Support/<app>`  | same as data                   |
//! | Windows  | `%APPDATA%\<vendor>\<app>`             | same as data                   |
//! | Unix     | `$XDG_DATA_HOME/<app>` or `~/.local/share/<app>` | `$XDG_CONFIG_HOME/<app>` or `~/.config/<app>` |

use crate::config::{AppNaming, LegacyNaming};
use crate::error::{SetupError, SetupResult};
use crate::utils::env::env_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Operating-system family driving directory conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Windows,
    Unix,
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Snapshot of the host directories that conventions are derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDirs {
    pub home: PathBuf,
    /// `%APPDATA%` (Windows roaming application data)
    pub appdata: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub xdg_data_home: Option<PathBuf>,
}

impl HostDirs {
    /// Read the live home directory and relevant environment variables
    pub fn detect() -> SetupResult<Self> {
        let home = dirs::home_dir().ok_or(SetupError::HomeDirUnavailable)?;
        Ok(Self {
            home,
            appdata: env_path("APPDATA"),
            xdg_config_home: env_path("XDG_CONFIG_HOME"),
            xdg_data_home: env_path("XDG_DATA_HOME"),
        })
    }

    /// Host rooted at `home` with no environment overrides
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            appdata: None,
            xdg_config_home: None,
            xdg_data_home: None,
        }
    }

    fn roaming_appdata(&self) -> PathBuf {
        self.appdata
            .clone()
            .unwrap_or_else(|| self.home.join("AppData").join("Roaming"))
    }
}

/// Per-user application data directory
pub fn user_data_dir(platform: Platform, host: &HostDirs, app: &str, vendor: &str) -> PathBuf {
    match platform {
        Platform::MacOs => host
            .home
            .join("Library")
            .join("Application Support")
            .join(app),
        Platform::Windows => host.roaming_appdata().join(vendor).join(app),
        Platform::Unix => host
            .xdg_data_home
            .clone()
            .unwrap_or_else(|| host.home.join(".local").join("share"))
            .join(app),
    }
}

/// Per-user application config directory
pub fn user_config_dir(platform: Platform, host: &HostDirs, app: &str, vendor: &str) -> PathBuf {
    match platform {
        Platform::MacOs | Platform::Windows => user_data_dir(platform, host, app, vendor),
        Platform::Unix => host
            .xdg_config_home
            .clone()
            .unwrap_or_else(|| host.home.join(".config"))
            .join(app),
    }
}

/// Default location of Bitcoin Core's `bitcoin.conf`
pub fn peer_config_path(platform: Platform, host: &HostDirs) -> PathBuf {
    let dir = match platform {
        Platform::MacOs => host
            .home
            .join("Library")
            .join("Application Support")
            .join("Bitcoin"),
        Platform::Windows => host.roaming_appdata().join("Bitcoin"),
        Platform::Unix => host.home.join(".bitcoin"),
    };
    dir.join("bitcoin.conf")
}

/// Network variant of the bootstrap database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Every on-disk location the setup tooling reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub server_config: PathBuf,
    pub client_config: PathBuf,
    pub legacy_config: PathBuf,
    pub peer_config: PathBuf,
    pub mainnet_database: PathBuf,
    pub testnet_database: PathBuf,
}

impl SetupPaths {
    pub fn resolve(
        platform: Platform,
        host: &HostDirs,
        naming: &AppNaming,
        legacy: &LegacyNaming,
    ) -> Self {
        let config_dir = user_config_dir(platform, host, &naming.app_name, &naming.vendor_name);
        let data_dir = user_data_dir(platform, host, &naming.app_name, &naming.vendor_name);
        let legacy_dir = user_config_dir(platform, host, &legacy.app_name, &legacy.vendor_name);

        let paths = Self {
            server_config: config_dir.join("server.conf"),
            client_config: config_dir.join("client.conf"),
            legacy_config: legacy_dir.join(format!("{}.conf", legacy.app_name)),
            peer_config: peer_config_path(platform, host),
            mainnet_database: data_dir.join(naming.database_file_name(Network::Mainnet)),
            testnet_database: data_dir.join(naming.database_file_name(Network::Testnet)),
            config_dir,
            data_dir,
        };
        debug!(?platform, ?paths, "Resolved setup paths");
        paths
    }

    pub fn database(&self, network: Network) -> &Path {
        match network {
            Network::Mainnet => &self.mainnet_database,
            Network::Testnet => &self.testnet_database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostDirs {
        HostDirs::with_home("/home/alice")
    }

    #[test]
    fn test_peer_config_path_per_platform() {
        assert_eq!(
            peer_config_path(Platform::MacOs, &host()),
            PathBuf::from("/home/alice/Library/Application Support/Bitcoin/bitcoin.conf")
        );
        assert_eq!(
            peer_config_path(Platform::Unix, &host()),
            PathBuf::from("/home/alice/.bitcoin/bitcoin.conf")
        );

        let mut windows = host();
        windows.appdata = Some(PathBuf::from("/appdata"));
        assert_eq!(
            peer_config_path(Platform::Windows, &windows),
            PathBuf::from("/appdata/Bitcoin/bitcoin.conf")
        );
    }

    #[test]
    fn test_windows_falls_back_to_roaming_profile() {
        assert_eq!(
            user_data_dir(Platform::Windows, &host(), "counterparty", "Counterparty"),
            PathBuf::from("/home/alice/AppData/Roaming/Counterparty/counterparty")
        );
    }

    #[test]
    fn test_unix_directories_honor_xdg() {
        let mut h = host();
        assert_eq!(
            user_config_dir(Platform::Unix, &h, "counterparty", "Counterparty"),
            PathBuf::from("/home/alice/.config/counterparty")
        );
        assert_eq!(
            user_data_dir(Platform::Unix, &h, "counterparty", "Counterparty"),
            PathBuf::from("/home/alice/.local/share/counterparty")
        );

        h.xdg_config_home = Some(PathBuf::from("/xdg/config"));
        h.xdg_data_home = Some(PathBuf::from("/xdg/data"));
        assert_eq!(
            user_config_dir(Platform::Unix, &h, "counterparty", "Counterparty"),
            PathBuf::from("/xdg/config/counterparty")
        );
        assert_eq!(
            user_data_dir(Platform::Unix, &h, "counterparty", "Counterparty"),
            PathBuf::from("/xdg/data/counterparty")
        );
    }

    #[test]
    fn test_mac_config_dir_is_data_dir() {
        let config = user_config_dir(Platform::MacOs, &host(), "counterparty", "Counterparty");
        let data = user_data_dir(Platform::MacOs, &host(), "counterparty", "Counterparty");
        assert_eq!(config, data);
        assert_eq!(
            config,
            PathBuf::from("/home/alice/Library/Application Support/counterparty")
        );
    }

    #[test]
    fn test_setup_paths_use_naming() {
        let paths = SetupPaths::resolve(
            Platform::Unix,
            &host(),
            &AppNaming::default(),
            &LegacyNaming::default(),
        );
        assert_eq!(
            paths.server_config,
            PathBuf::from("/home/alice/.config/counterparty/server.conf")
        );
        assert_eq!(
            paths.client_config,
            PathBuf::from("/home/alice/.config/counterparty/client.conf")
        );
        assert_eq!(
            paths.legacy_config,
            PathBuf::from("/home/alice/.config/counterpartyd/counterpartyd.conf")
        );
        assert_eq!(
            paths.database(Network::Mainnet),
            Path::new("/home/alice/.local/share/counterparty/counterparty.9.db")
        );
        assert_eq!(
            paths.database(Network::Testnet),
            Path::new("/home/alice/.local/share/counterparty/counterparty.9.testnet.db")
        );
    }
}
