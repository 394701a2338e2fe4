//! Bitcoin Core `bitcoin.conf` importer
//!
//! Only the RPC connection parameters are carried over, renamed to the
//! server's `backend-*` options.

use crate::error::{IoResultExt, SetupResult};
use crate::schema::{ConfigValue, KnownConfig};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// bitcoind option → server option
pub const PEER_KEY_RENAMES: [(&str, &str); 4] = [
    ("rpcport", "backend-port"),
    ("rpcuser", "backend-user"),
    ("rpcpassword", "backend-password"),
    ("rpcssl", "backend-ssl"),
];

/// Parse `bitcoin.conf` content into the server options it implies
pub fn parse_peer_config(content: &str) -> KnownConfig {
    let mut raw = HashMap::new();
    for line in content.lines() {
        if line.contains('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            raw.insert(key.trim(), value.trim());
        }
    }

    PEER_KEY_RENAMES
        .iter()
        .filter_map(|(peer_key, server_key)| {
            raw.get(peer_key)
                .map(|value| (server_key.to_string(), ConfigValue::from(*value)))
        })
        .collect()
}

/// Read the peer wallet's config file at `path`, if it exists
pub fn import_peer_config(path: &Path) -> SetupResult<KnownConfig> {
    if !path.exists() {
        debug!("No peer wallet config at {}", path.display());
        return Ok(KnownConfig::new());
    }

    let content = std::fs::read_to_string(path).at_path(path)?;
    let config = parse_peer_config(&content);
    info!(
        "Imported {} setting(s) from {}",
        config.len(),
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_projects_rpc_settings() {
        let config = parse_peer_config(
            "rpcuser=alice\nrpcpassword=secret\nrpcport=8332\nrpcssl=1\nextra=ignored\n",
        );
        assert_eq!(config.len(), 4);
        assert_eq!(config["backend-user"], ConfigValue::from("alice"));
        assert_eq!(config["backend-password"], ConfigValue::from("secret"));
        assert_eq!(config["backend-port"], ConfigValue::from("8332"));
        assert_eq!(config["backend-ssl"], ConfigValue::from("1"));
        assert!(!config.contains_key("extra"));
    }

    #[test]
    fn test_skips_comments_and_malformed_lines() {
        let config = parse_peer_config(
            "# rpcuser=commented\nrpcpassword=pa#ss\n[test]\nserver\n  rpcuser = bob  \n",
        );
        assert_eq!(config.len(), 1);
        assert_eq!(config["backend-user"], ConfigValue::from("bob"));
    }

    #[test]
    fn test_splits_on_first_equals_and_last_wins() {
        let config = parse_peer_config("rpcpassword=a=b\nrpcport=1\nrpcport=2\n");
        assert_eq!(config["backend-password"], ConfigValue::from("a=b"));
        assert_eq!(config["backend-port"], ConfigValue::from("2"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let config = import_peer_config(&temp.path().join("bitcoin.conf")).unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bitcoin.conf");
        std::fs::write(&path, "server=1\nrpcuser=alice\n").unwrap();
        let config = import_peer_config(&path).unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config["backend-user"], ConfigValue::from("alice"));
    }

    proptest! {
        #[test]
        fn prop_only_renamed_keys_escape(lines in proptest::collection::vec("[a-z#= ]{0,20}", 0..20)) {
            let config = parse_peer_config(&lines.join("\n"));
            let targets: Vec<&str> = PEER_KEY_RENAMES.iter().map(|(_, to)| *to).collect();
            for key in config.keys() {
                prop_assert!(targets.contains(&key.as_str()));
            }
        }
    }
}
