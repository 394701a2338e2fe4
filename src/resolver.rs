//! Known-configuration resolution and config file generation
//!
//! Sources are merged with fixed precedence: values imported from the legacy
//! `counterpartyd` config win over values imported from `bitcoin.conf`. The
//! client's known configuration is derived from the server's by renaming.

use crate::error::SetupResult;
use crate::generator::{generate_config_file, GenerateOutcome};
use crate::importers::{import_legacy_config, import_peer_config};
use crate::paths::SetupPaths;
use crate::schema::{ConfigArg, ConfigValue, KnownConfig};
use crate::utils::hashing::double_sha256;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, info};

pub const RPC_PASSWORD_KEY: &str = "rpc-password";

/// Server option → client option
pub const SERVER_TO_CLIENT_KEYS: [(&str, &str); 10] = [
    ("backend-connect", "wallet-connect"),
    ("backend-port", "wallet-port"),
    ("backend-user", "wallet-user"),
    ("backend-password", "wallet-password"),
    ("backend-ssl", "wallet-ssl"),
    ("backend-ssl-verify", "wallet-ssl-verify"),
    ("rpc-host", "counterparty-rpc-connect"),
    ("rpc-port", "counterparty-rpc-port"),
    ("rpc-user", "counterparty-rpc-user"),
    ("rpc-password", "counterparty-rpc-password"),
];

/// Overlay `legacy` on top of `peer`; legacy values win on collision
pub fn merge_known_config(peer: KnownConfig, legacy: KnownConfig) -> KnownConfig {
    let mut merged = peer;
    merged.extend(legacy);
    merged
}

/// Hex-encoded double SHA256 of 16 random bytes from the OS RNG
pub fn generate_rpc_password() -> String {
    let mut seed = [0u8; 16];
    OsRng.fill_bytes(&mut seed);
    hex::encode(double_sha256(&seed))
}

/// Insert a random `rpc-password` if none was discovered
///
/// Returns `true` when a password was generated.
pub fn ensure_rpc_password(known: &mut KnownConfig) -> bool {
    if known.contains_key(RPC_PASSWORD_KEY) {
        return false;
    }
    known.insert(
        RPC_PASSWORD_KEY.to_string(),
        ConfigValue::Text(generate_rpc_password()),
    );
    true
}

/// Derive the client's known configuration from the server's
pub fn server_to_client_config(server: &KnownConfig) -> KnownConfig {
    SERVER_TO_CLIENT_KEYS
        .iter()
        .filter_map(|(server_key, client_key)| {
            server
                .get(*server_key)
                .map(|value| (client_key.to_string(), value.clone()))
        })
        .collect()
}

/// Discover and merge everything known about the server configuration
pub fn resolve_server_known_config(paths: &SetupPaths) -> SetupResult<KnownConfig> {
    let peer = import_peer_config(&paths.peer_config)?;
    let legacy = import_legacy_config(&paths.legacy_config)?;
    let mut known = merge_known_config(peer, legacy);

    if ensure_rpc_password(&mut known) {
        debug!("No RPC password discovered, generated a random one");
    }
    Ok(known)
}

/// Outcome of generating both configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateReport {
    pub server: GenerateOutcome,
    pub client: GenerateOutcome,
}

/// Generate `server.conf` and `client.conf`
///
/// Each file is skipped if it already exists, unless `overwrite` is set.
pub fn generate_config_files(
    paths: &SetupPaths,
    server_schema: &[ConfigArg],
    client_schema: &[ConfigArg],
    overwrite: bool,
) -> SetupResult<GenerateReport> {
    let server_known = resolve_server_known_config(paths)?;
    let client_known = server_to_client_config(&server_known);

    let server = generate_config_file(
        &paths.server_config,
        server_schema,
        &server_known,
        overwrite,
    )?;
    let client = generate_config_file(
        &paths.client_config,
        client_schema,
        &client_known,
        overwrite,
    )?;

    info!(?server, ?client, "Configuration files processed");
    Ok(GenerateReport { server, client })
}
