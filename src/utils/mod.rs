//! Utility modules shared by the setup components

pub mod env;
pub mod fs;
pub mod hashing;
pub mod logging;

// Re-export commonly used items
pub use env::{env_opt, env_path};
pub use fs::{create_app_dir_all, set_owner_group_rw, DIR_MODE, FILE_MODE};
pub use hashing::double_sha256;
#[cfg(feature = "json-logging")]
pub use logging::init_json_logging;
pub use logging::{init_logging, init_logging_from_config};
