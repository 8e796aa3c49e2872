//! Flat key/value settings loaded from a TOML file.
//!
//! Settings are consumed as a `BTreeMap<String, String>` (see
//! [`Config::from_settings`](crate::Config::from_settings)). The file is a
//! plain TOML table; scalar values are stringified and nested tables are
//! ignored.
//!
//! ```toml
//! autofit = "50%x50%"
//! msg-level = "all=warn,cplayer=info"
//! mpv-options = "--hwdec=auto --ytdl-format=best"
//! volume = 80
//! mpv-config-enable = true
//! mpv-config-file = "~/.config/mpv/mpv.conf"
//! ```

use crate::domain::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Reads a settings file into a flat map.
///
/// A missing file yields an empty map so that every setting falls back to
/// its default.
///
/// # Errors
///
/// Returns [`SyncError::Io`](crate::SyncError::Io) if the file exists but
/// cannot be read and [`SyncError::Toml`](crate::SyncError::Toml) if it is
/// not valid TOML.
pub fn load_file(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path)?;
    let settings = parse(&content)?;

    tracing::debug!(path = %path.display(), keys = settings.len(), "settings loaded");
    Ok(settings)
}

/// Parses TOML text into a flat map.
///
/// # Errors
///
/// Returns [`SyncError::Toml`](crate::SyncError::Toml) on invalid TOML.
pub fn parse(content: &str) -> Result<BTreeMap<String, String>> {
    let table: toml::Table = content.parse()?;

    let settings = table
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                toml::Value::Array(_) | toml::Value::Table(_) => {
                    tracing::debug!(key = %key, "ignoring non-scalar setting");
                    return None;
                }
            };
            Some((key, value))
        })
        .collect();

    Ok(settings)
}
