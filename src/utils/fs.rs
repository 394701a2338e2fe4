//! Filesystem helpers for the modes of created dirs and files

use crate::error::{IoResultExt, SetupResult};
use std::path::Path;

/// Mode applied to generated config files and installed databases
pub const FILE_MODE: u32 = 0o660;

/// Mode applied to directories created by the setup tooling
pub const DIR_MODE: u32 = 0o755;

/// Create an app config or data `dir` and any missing parents, with `DIR_MODE` on Unix
pub fn create_app_dir_all(dir: &Path) -> SetupResult<()> {
    if dir.exists() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).at_path(dir)
}

/// Restrict `path` to owner/group read-write (no-op off Unix)
pub fn set_owner_group_rw(path: &Path) -> SetupResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path).at_path(path)?.permissions();
        perms.set_mode(FILE_MODE);
        std::fs::set_permissions(path, perms).at_path(path)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
