//! Importer for the previous `counterpartyd` configuration file
//!
//! The legacy file is INI with a `[Default]` section. Option names from that
//! generation are renamed to their current equivalents:
//!
//! - `backend-rpc-*` → `backend-*`
//! - `blockchain-service-name` → `backend-name`
//! - value token `jmcorgan` → `addrindex`

use crate::error::{IoResultExt, SetupError, SetupResult};
use crate::schema::{ConfigValue, KnownConfig};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

const SECTION: &str = "Default";

/// Section whose options apply to every other section
const DEFAULTS_SECTION: &str = "DEFAULT";

const KEY_RENAMES: [(&str, &str); 2] = [
    ("backend-rpc-", "backend-"),
    ("blockchain-service-name", "backend-name"),
];

const VALUE_RENAMES: [(&str, &str); 1] = [("jmcorgan", "addrindex")];

type Section = BTreeMap<String, String>;

/// Parse INI `content` into sections, in the dialect the legacy tool wrote
///
/// `path` is only used for error reporting.
fn parse_ini(content: &str, path: &Path) -> SetupResult<BTreeMap<String, Section>> {
    let mut sections: BTreeMap<String, Section> = BTreeMap::new();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;
    // Blank lines seen since the last option line; kept only if a continuation follows
    let mut pending_blanks = 0usize;

    let error = |line: usize, reason: &str| SetupError::ConfigParse {
        path: path.to_path_buf(),
        line,
        reason: reason.to_string(),
    };

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            pending_blanks += 1;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // Indented line continues the previous option's value
        if raw.starts_with(char::is_whitespace) {
            if let (Some(section), Some(key)) = (&current, &last_key) {
                if let Some(value) = sections.get_mut(section).and_then(|s| s.get_mut(key)) {
                    for _ in 0..pending_blanks {
                        value.push('\n');
                    }
                    pending_blanks = 0;
                    value.push('\n');
                    value.push_str(trimmed);
                    continue;
                }
            }
        }

        pending_blanks = 0;

        if trimmed.starts_with('[') {
            let name = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .ok_or_else(|| error(line_no, "unterminated section header"))?;
            if sections.contains_key(name) {
                return Err(error(line_no, &format!("duplicate section '{}'", name)));
            }
            sections.insert(name.to_string(), Section::new());
            current = Some(name.to_string());
            last_key = None;
            continue;
        }

        let section = current
            .as_ref()
            .ok_or_else(|| error(line_no, "option found before any section header"))?;

        let split = trimmed
            .find(|c: char| c == '=' || c == ':')
            .ok_or_else(|| error(line_no, "expected 'key = value'"))?;
        let key = trimmed[..split].trim().to_lowercase();
        let value = trimmed[split + 1..].trim().to_string();
        if key.is_empty() {
            return Err(error(line_no, "empty option name"));
        }

        let options = sections.entry(section.clone()).or_default();
        if options.contains_key(&key) {
            return Err(error(line_no, &format!("duplicate option '{}'", key)));
        }
        options.insert(key.clone(), value);
        last_key = Some(key);
    }

    Ok(sections)
}

fn rename(input: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Parse legacy config `content` and rename its options to current names
pub fn parse_legacy_config(content: &str, path: &Path) -> SetupResult<KnownConfig> {
    let mut sections = parse_ini(content, path)?;
    let Some(options) = sections.remove(SECTION) else {
        debug!("{} has no [{}] section", path.display(), SECTION);
        return Ok(KnownConfig::new());
    };

    // [DEFAULT] options are inherited; [Default] wins on collision
    let mut merged = sections.remove(DEFAULTS_SECTION).unwrap_or_default();
    merged.extend(options);

    Ok(merged
        .into_iter()
        .map(|(key, value)| {
            (
                rename(&key, &KEY_RENAMES),
                ConfigValue::from(rename(&value, &VALUE_RENAMES)),
            )
        })
        .collect())
}

/// Read the legacy config file at `path`, if it exists
pub fn import_legacy_config(path: &Path) -> SetupResult<KnownConfig> {
    if !path.exists() {
        debug!("No legacy config at {}", path.display());
        return Ok(KnownConfig::new());
    }

    let content = std::fs::read_to_string(path).at_path(path)?;
    let config = parse_legacy_config(&content, path)?;
    info!(
        "Imported {} setting(s) from legacy config {}",
        config.len(),
        path.display()
    );
    Ok(config)
}
