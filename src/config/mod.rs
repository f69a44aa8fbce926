use std::{env, path::PathBuf, time::Duration};

/// Maximum number of podcasts requested per search.
pub const SEARCH_LIMIT: u32 = 10;
/// Upper bound for a single feed download.
pub const FEED_TIMEOUT: Duration = Duration::from_secs(10);

pub const LOG_DIR_VAR: &str = "PODCASTS_LOG_DIR";
pub const LOG_FILTER_VAR: &str = "PODCASTS_LOG";

// Settings resolved once at startup. Nothing here changes while the UI runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_dir: PathBuf,
    pub log_file: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("/tmp"),
            log_file: "podcasts.log".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Config, LOG_DIR_VAR, LOG_FILTER_VAR};

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.log_dir, PathBuf::from("/tmp"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn overrides_from_environment() {
        let config = Config::from_lookup(|key| match key {
            LOG_DIR_VAR => Some("/var/log/podcasts".to_string()),
            LOG_FILTER_VAR => Some("podcast_browser=debug".to_string()),
            _ => None,
        });
        assert_eq!(config.log_dir, PathBuf::from("/var/log/podcasts"));
        assert_eq!(config.log_filter, "podcast_browser=debug");
        assert_eq!(config.log_file, "podcasts.log");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }
}
