//! Configuration argument schemas
//!
//! An argument schema is the ordered list of options a process role accepts,
//! each with an optional default and a help string. The generator walks a
//! schema in order to render a configuration file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Untyped configuration value, as found in schema defaults and discovered configs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ConfigValue {
    /// Renders the value the way it appears on the right side of `key = value`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(true) => f.write_str("1"),
            ConfigValue::Bool(false) => f.write_str("0"),
            ConfigValue::Int(n) => write!(f, "{}", n),
            ConfigValue::Float(x) => write!(f, "{:.8}", x),
            ConfigValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Int(n)
    }
}

impl From<f64> for ConfigValue {
    fn from(x: f64) -> Self {
        ConfigValue::Float(x)
    }
}

/// Resolved option values keyed by canonical option name
pub type KnownConfig = HashMap<String, ConfigValue>;

/// One configuration option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigArg {
    /// Canonical key, without leading dashes
    pub key: String,
    /// Default used when no value was discovered
    #[serde(default)]
    pub default: Option<ConfigValue>,
    /// Human-readable description, rendered as a comment
    pub help: String,
}

impl ConfigArg {
    pub fn new(key: &str, default: Option<ConfigValue>, help: &str) -> Self {
        Self {
            key: key.to_string(),
            default,
            help: help.to_string(),
        }
    }
}

/// Ordered option list for one process role
pub type ConfigSchema = Vec<ConfigArg>;

fn flag(key: &str, help: &str) -> ConfigArg {
    ConfigArg::new(key, Some(ConfigValue::Bool(false)), help)
}

fn text(key: &str, default: &str, help: &str) -> ConfigArg {
    ConfigArg::new(key, Some(ConfigValue::from(default)), help)
}

fn int(key: &str, default: i64, help: &str) -> ConfigArg {
    ConfigArg::new(key, Some(ConfigValue::Int(default)), help)
}

fn float(key: &str, default: f64, help: &str) -> ConfigArg {
    ConfigArg::new(key, Some(ConfigValue::Float(default)), help)
}

fn unset(key: &str, help: &str) -> ConfigArg {
    ConfigArg::new(key, None, help)
}

pub const DEFAULT_RPC_BATCH_SIZE: i64 = 20;
pub const DEFAULT_REQUESTS_TIMEOUT: i64 = 20;

// Satoshi amounts expressed in BTC (1 BTC = 100_000_000 satoshis)
const UNIT: f64 = 100_000_000.0;
const DEFAULT_FEE_PER_KB: f64 = 25_000.0 / UNIT;
const DEFAULT_REGULAR_DUST_SIZE: f64 = 5_430.0 / UNIT;
const DEFAULT_MULTISIG_DUST_SIZE: f64 = 7_800.0 / UNIT;
const DEFAULT_OP_RETURN_VALUE: f64 = 0.0;

/// Options accepted by `counterparty-server`
pub fn server_config_args() -> ConfigSchema {
    vec![
        flag("verbose", "sets log level to DEBUG instead of WARNING"),
        flag("testnet", "use BTC testnet addresses and block numbers"),
        flag("testcoin", "use the test XCP network on every blockchain"),
        text(
            "customnet",
            "",
            "use a custom network (specify as UNSPENDABLE_ADDRESS|ADDRESSVERSION|P2SH_ADDRESSVERSION with version numbers in hex)",
        ),
        int(
            "api-limit-rows",
            1000,
            "limit api calls to the set results (defaults to 1000). Setting to 0 removes the limit.",
        ),
        text("backend-name", "addrindex", "the backend name to connect to"),
        text(
            "backend-connect",
            "localhost",
            "the hostname or IP of the backend server",
        ),
        unset("backend-port", "the backend port to connect to"),
        text(
            "backend-user",
            "bitcoinrpc",
            "the username used to communicate with backend",
        ),
        unset("backend-password", "the password used to communicate with backend"),
        flag("backend-ssl", "use SSL to connect to backend (default: false)"),
        flag(
            "backend-ssl-no-verify",
            "verify SSL certificate of backend; disallow use of self‐signed certificates (default: true)",
        ),
        float(
            "backend-poll-interval",
            0.5,
            "poll interval, in seconds (default: 0.5)",
        ),
        flag(
            "check-asset-conservation",
            "Skip asset conservation checking (default: false)",
        ),
        unset(
            "p2sh-dust-return-pubkey",
            "pubkey to receive dust when multisig encoding is used for P2SH source (default: none)",
        ),
        text(
            "rpc-host",
            "localhost",
            "the IP of the interface to bind to for providing JSON-RPC API access (0.0.0.0 for all interfaces)",
        ),
        unset(
            "rpc-port",
            "port on which to provide the counterparty JSON-RPC API",
        ),
        text(
            "rpc-user",
            "rpc",
            "required username to use the counterparty JSON-RPC API (via HTTP basic auth)",
        ),
        unset(
            "rpc-password",
            "required password (for rpc-user) to use the counterparty JSON-RPC API (via HTTP basic auth)",
        ),
        flag("rpc-no-allow-cors", "allow ajax cross domain request"),
        int(
            "rpc-batch-size",
            DEFAULT_RPC_BATCH_SIZE,
            "number of RPC queries by batch (default: 20)",
        ),
        int(
            "requests-timeout",
            DEFAULT_REQUESTS_TIMEOUT,
            "timeout value (in seconds) used for all HTTP requests (default: 20)",
        ),
        flag(
            "force",
            "skip backend check, version check, process lock (NOT FOR USE ON PRODUCTION SYSTEMS)",
        ),
        unset("database-file", "the path to the SQLite3 database file"),
        flag(
            "log-file",
            "log to the specified file (specify option without filename to use the default location)",
        ),
        flag(
            "api-log-file",
            "log API requests to the specified file (specify option without filename to use the default location)",
        ),
    ]
}

/// Options accepted by `counterparty-client`
pub fn client_config_args() -> ConfigSchema {
    vec![
        flag("verbose", "sets log level to DEBUG instead of WARNING"),
        flag("testnet", "use BTC testnet addresses and block numbers"),
        flag("testcoin", "use the test XCP network on every blockchain"),
        text(
            "counterparty-rpc-connect",
            "localhost",
            "the hostname or IP of the Counterparty JSON-RPC server",
        ),
        unset(
            "counterparty-rpc-port",
            "the port of the Counterparty JSON-RPC server",
        ),
        text(
            "counterparty-rpc-user",
            "rpc",
            "the username for the Counterparty JSON-RPC server",
        ),
        unset(
            "counterparty-rpc-password",
            "the password for the Counterparty JSON-RPC server",
        ),
        flag(
            "counterparty-rpc-ssl",
            "use SSL to connect to the Counterparty server (default: false)",
        ),
        flag(
            "counterparty-rpc-ssl-verify",
            "verify SSL certificate of the Counterparty server; disallow use of self‐signed certificates (default: false)",
        ),
        text("wallet-name", "bitcoincore", "the wallet name to connect to"),
        text(
            "wallet-connect",
            "localhost",
            "the hostname or IP of the wallet server",
        ),
        unset("wallet-port", "the wallet port to connect to"),
        text(
            "wallet-user",
            "bitcoinrpc",
            "the username used to communicate with wallet",
        ),
        unset("wallet-password", "the password used to communicate with wallet"),
        flag("wallet-ssl", "use SSL to connect to wallet (default: false)"),
        flag(
            "wallet-ssl-verify",
            "verify SSL certificate of wallet; disallow use of self‐signed certificates (default: false)",
        ),
        flag("json-output", "display result in json format"),
        flag(
            "unconfirmed",
            "allow the spending of unconfirmed transaction outputs",
        ),
        text("encoding", "auto", "data encoding method"),
        float("fee-per-kb", DEFAULT_FEE_PER_KB, "fee per kilobyte, in BTC"),
        float(
            "regular-dust-size",
            DEFAULT_REGULAR_DUST_SIZE,
            "value for dust Pay‐to‐Pubkey‐Hash outputs, in BTC",
        ),
        float(
            "multisig-dust-size",
            DEFAULT_MULTISIG_DUST_SIZE,
            "for the bare multisig outputs, in BTC",
        ),
        float(
            "op-return-value",
            DEFAULT_OP_RETURN_VALUE,
            "value for OP_RETURN outputs, in BTC",
        ),
        flag(
            "unsigned",
            "print out unsigned hex of transaction; do not sign or broadcast",
        ),
        int(
            "requests-timeout",
            DEFAULT_REQUESTS_TIMEOUT,
            "timeout value (in seconds) used for all HTTP requests (default: 20)",
        ),
    ]
}
