//! Driver configuration, read from a RON file and overridden by CLI flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use dacanews_engine::FetchSettings;
use dacanews_logging::LogDestination;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dacanews.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Page the widget binds to, e.g. `http://localhost:8000/search/`.
    pub page_url: Option<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            page_url: None,
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            redirect_limit: fetch.redirect_limit,
            max_bytes: fetch.max_bytes,
            log_destination: LogDestination::Terminal,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl WidgetConfig {
    /// Reads `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, and returns the
    /// file actually read. An explicit path that cannot be read is an error; a
    /// missing default file is not.
    pub fn load(path: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok((Self::default(), None));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };

        let config: WidgetConfig = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok((config, Some(path)))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("widget.ron");
        fs::write(
            &path,
            r#"(page_url: Some("http://localhost:8000/search/"), request_timeout_ms: 500, log_destination: both)"#,
        )
        .unwrap();

        let (config, source) = WidgetConfig::load(Some(&path)).unwrap();
        assert_eq!(source.as_deref(), Some(path.as_path()));
        assert_eq!(config.page_url.as_deref(), Some("http://localhost:8000/search/"));
        assert_eq!(config.request_timeout_ms, 500);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.redirect_limit, 5);
        assert_eq!(config.fetch_settings().request_timeout, Duration::from_millis(500));
        assert_eq!(config.fetch_settings().connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = WidgetConfig::load(Some(&temp.path().join("nope.ron"))).unwrap_err();
        assert!(err.to_string().contains("nope.ron"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(redirect_limit: \"many\")").unwrap();
        assert!(WidgetConfig::load(Some(&path)).is_err());
    }
}
