//! Commented configuration file generation
//!
//! Renders one `[Default]` section with a `# help` comment and a
//! `key = value` line per schema entry. Keys without any value are
//! commented out so the file documents every option.

use crate::error::{IoResultExt, SetupResult};
use crate::schema::{ConfigArg, ConfigValue, KnownConfig};
use crate::utils::fs::{create_app_dir_all, set_owner_group_rw};
use std::path::Path;
use tracing::{debug, info};

/// What `generate_config_file` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    Written,
    /// File already existed and overwrite was not requested
    Skipped,
}

fn resolve_value<'a>(arg: &'a ConfigArg, known: &'a KnownConfig) -> Option<&'a ConfigValue> {
    known.get(&arg.key).or(arg.default.as_ref())
}

/// Render the configuration file content for `schema`
pub fn render_config(schema: &[ConfigArg], known: &KnownConfig) -> String {
    let mut lines = vec!["[Default]".to_string(), String::new()];

    for arg in schema {
        let assignment = match resolve_value(arg, known) {
            Some(value) => format!("{} = {}", arg.key, value),
            None => format!("# {} = ", arg.key),
        };
        lines.push(format!("# {}", arg.help));
        lines.push(assignment);
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Write a commented configuration file for `schema` to `path`
///
/// Existing files are left untouched unless `overwrite` is set.
pub fn generate_config_file(
    path: &Path,
    schema: &[ConfigArg],
    known: &KnownConfig,
    overwrite: bool,
) -> SetupResult<GenerateOutcome> {
    if !overwrite && path.exists() {
        debug!("Config file {} already exists, skipping", path.display());
        return Ok(GenerateOutcome::Skipped);
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_app_dir_all(dir)?;
    }

    std::fs::write(path, render_config(schema, known)).at_path(path)?;
    set_owner_group_rw(path)?;

    info!("Wrote config file {}", path.display());
    Ok(GenerateOutcome::Written)
}
