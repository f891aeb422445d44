//! Configuration for the menu provider
//!
//! Loads provider settings from environment variables with sensible
//! defaults; CLI flags override individual fields afterwards.

use chrono::Duration;
use std::env;
use std::path::PathBuf;

/// Default cache freshness window in minutes
const DEFAULT_CACHE_TTL_MINUTES: i64 = 30;

/// Provider configuration
///
/// Identifies the remote menu file (store root, folder, file name), an
/// optional list-backed source, and the local cache behavior.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Root URL of the document store
    pub base_url: String,
    /// Server-relative folder holding the menu file
    pub folder_path: String,
    /// Menu file name within the folder
    pub file_name: String,
    /// List name enabling the list-backed source
    pub list_name: Option<String>,
    /// Cache TTL in minutes
    pub cache_ttl_minutes: i64,
    /// Cache directory override; `None` uses the XDG default
    pub cache_dir: Option<PathBuf>,
}

impl ProviderConfig {
    /// Creates a new ProviderConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `MEGANAV_BASE_URL` - Document store root (default: `https://portal.example.com`)
    /// - `MEGANAV_FOLDER` - Menu folder (default: `/shared/config`)
    /// - `MEGANAV_FILE` - Menu file name (default: `mega-menu.ts`)
    /// - `MEGANAV_LIST` - List name for list-backed retrieval (default: unset)
    /// - `MEGANAV_CACHE_TTL_MINUTES` - Cache TTL in minutes (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("MEGANAV_BASE_URL").unwrap_or(defaults.base_url),
            folder_path: env::var("MEGANAV_FOLDER").unwrap_or(defaults.folder_path),
            file_name: env::var("MEGANAV_FILE").unwrap_or(defaults.file_name),
            list_name: env::var("MEGANAV_LIST").ok(),
            cache_ttl_minutes: env::var("MEGANAV_CACHE_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_MINUTES),
            cache_dir: None,
        }
    }

    /// Cache freshness window as a duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::minutes(self.cache_ttl_minutes)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://portal.example.com".to_string(),
            folder_path: "/shared/config".to_string(),
            file_name: "mega-menu.ts".to_string(),
            list_name: None,
            cache_ttl_minutes: DEFAULT_CACHE_TTL_MINUTES,
            cache_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "https://portal.example.com");
        assert_eq!(config.folder_path, "/shared/config");
        assert_eq!(config.file_name, "mega-menu.ts");
        assert!(config.list_name.is_none());
        assert_eq!(config.cache_ttl_minutes, 30);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MEGANAV_BASE_URL");
        env::remove_var("MEGANAV_FOLDER");
        env::remove_var("MEGANAV_FILE");
        env::remove_var("MEGANAV_LIST");
        env::remove_var("MEGANAV_CACHE_TTL_MINUTES");

        let config = ProviderConfig::from_env();
        assert_eq!(config.base_url, "https://portal.example.com");
        assert_eq!(config.folder_path, "/shared/config");
        assert_eq!(config.file_name, "mega-menu.ts");
        assert!(config.list_name.is_none());
        assert_eq!(config.cache_ttl_minutes, 30);
    }

    #[test]
    fn test_cache_ttl_is_minutes_duration() {
        let config = ProviderConfig {
            cache_ttl_minutes: 5,
            ..ProviderConfig::default()
        };
        assert_eq!(config.cache_ttl(), Duration::minutes(5));
    }
}
