//! Discovery of configuration values left behind by other installations
//!
//! - [`legacy`]: the previous `counterpartyd` configuration file
//! - [`peer`]: Bitcoin Core's `bitcoin.conf`
//!
//! Both importers return an empty mapping when their file does not exist.

pub mod legacy;
pub mod peer;

pub use legacy::{import_legacy_config, parse_legacy_config};
pub use peer::{import_peer_config, parse_peer_config};
