//! Path utilities for fishandtips.
//!
//! Operator state lives under `~/.fishandtips/`:
//! - `~/.fishandtips/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the fishandtips home directory (`~/.fishandtips/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fishandtips")
}

/// Returns the default config file path (`~/.fishandtips/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lives_under_fishandtips_home() {
        let config = default_config();
        assert!(config.starts_with(home_dir()));
        assert!(config.to_string_lossy().contains(".fishandtips"));
        assert!(config.ends_with("config.toml"));
    }
}
