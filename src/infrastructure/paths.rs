//! Per-user directory resolution.
//!
//! Locations come from the platform's conventions via
//! [`directories::ProjectDirs`] (XDG base directories on Linux) and always end
//! in an application-specific subdirectory.

use crate::domain::{Result, SyncError};
use crate::APP_NAME;
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    require_home(ProjectDirs::from("", "", APP_NAME))
}

fn require_home<T>(dirs: Option<T>) -> Result<T> {
    dirs.ok_or_else(|| SyncError::Config("no home directory to derive user directories from".to_string()))
}

/// Returns the directory for trace files and other runtime data.
///
/// # Returns
///
/// `$XDG_DATA_HOME/mpv-mirror` or `~/.local/share/mpv-mirror` on Linux.
///
/// # Errors
///
/// Returns [`SyncError::Config`] when no home directory can be determined.
///
/// # Examples
///
/// ```
/// use mpv_mirror::infrastructure::get_data_dir;
///
/// if let Ok(dir) = get_data_dir() {
///     assert!(dir.ends_with("mpv-mirror"));
/// }
/// ```
pub fn get_data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Returns the directory holding `settings.toml`. It is also handed to the
/// engine as its `config-dir`.
///
/// # Errors
///
/// Returns [`SyncError::Config`] when no home directory can be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Expands a leading `~` to the home directory.
///
/// Paths from settings (e.g. the engine config file) are written by users
/// and commonly start with `~/`. Without a known home directory the path is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use mpv_mirror::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let base = BaseDirs::new();
    expand_with_home(path, base.as_ref().map(BaseDirs::home_dir))
}

fn expand_with_home(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };

    if path == "~" {
        home.display().to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).display().to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_dirs_are_application_specific() {
        if let (Ok(data), Ok(config)) = (get_data_dir(), get_config_dir()) {
            assert!(data.ends_with(APP_NAME));
            assert!(config.ends_with(APP_NAME));
            assert_ne!(data, config);
        }
    }

    #[test]
    fn missing_home_is_a_config_error() {
        let err = require_home::<PathBuf>(None).unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("no home directory"));
    }

    #[test]
    fn tilde_expansion() {
        let home = Some(Path::new("/home/u"));
        assert_eq!(expand_with_home("~/mpv.conf", home), "/home/u/mpv.conf");
        assert_eq!(expand_with_home("~", home), "/home/u");
        assert_eq!(expand_with_home("~user/x", home), "~user/x");
        assert_eq!(expand_with_home("~/x", None), "~/x");
    }
}
