//! Infrastructure layer for filesystem and environment interactions.
//!
//! - [`paths`]: per-user data and config directories
//! - [`settings`]: TOML settings file loading

pub mod paths;
pub mod settings;

pub use paths::{expand_tilde, get_config_dir, get_data_dir};
pub use settings::{load_file, SETTINGS_FILE};
