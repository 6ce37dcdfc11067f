// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI settings loaded from the user's config file

use crate::domain::poll::PollOptions;
use crate::infrastructure::constants::{
    CONFIG_DIR_NAME, DEFAULT_CONFIG_FILE, DEFAULT_POLL_INTERVAL_MS, DEFAULT_POLL_JITTER_MS,
    DEFAULT_SERVER,
};
use crate::shared::error::{Result, ZeetError};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub server: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub debug: bool,
    pub poll_interval_ms: u64,
    pub poll_jitter_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            access_token: None,
            debug: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            poll_jitter_ms: DEFAULT_POLL_JITTER_MS,
        }
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server: Option<String>,
    pub access_token: Option<String>,
    pub debug: bool,
}

impl CliConfig {
    /// Load configuration from a YAML or TOML file, chosen by extension
    pub fn from<T: AsRef<Path>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            ZeetError::config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let conf: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ if content.trim().is_empty() => Self::default(),
            _ => serde_yaml::from_str(&content)?,
        };

        Ok(conf)
    }

    /// Load the file if it exists, then apply command line and environment values
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut conf = match path {
            Some(p) if p.exists() => Self::from(p)?,
            Some(p) => {
                tracing::debug!("Config file {} not found, using defaults", p.display());
                Self::default()
            }
            None => Self::default(),
        };

        if let Some(server) = overrides.server {
            conf.server = server;
        }
        if let Some(token) = overrides.access_token {
            conf.access_token = Some(token);
        }
        conf.debug = conf.debug || overrides.debug;

        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.server.starts_with("https://") || self.server.starts_with("http://")) {
            return Err(ZeetError::config_error(format!(
                "server must be an http(s) URL, got '{}'",
                self.server
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(ZeetError::config_error(
                "poll_interval_ms must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Token for API calls; login is handled outside this tool
    pub fn require_token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ZeetError::Unauthorized(
                    "no access token configured (set ZEET_ACCESS_TOKEN or access_token in the config file)"
                        .to_string(),
                )
            })
    }

    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_jitter: Duration::from_millis(self.poll_jitter_ms),
        }
    }
}

/// `<user config dir>/zeet/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", CONFIG_DIR_NAME)
        .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let conf = CliConfig::default();
        assert_eq!(conf.server, DEFAULT_SERVER);
        assert!(conf.access_token.is_none());
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "config.yaml",
            "server: https://api.example.com\naccess_token: abc\npoll_interval_ms: 2000\n",
        );

        let conf = CliConfig::from(&path).unwrap();
        assert_eq!(conf.server, "https://api.example.com");
        assert_eq!(conf.access_token.as_deref(), Some("abc"));
        assert_eq!(conf.poll_interval_ms, 2000);
        assert_eq!(conf.poll_jitter_ms, DEFAULT_POLL_JITTER_MS);
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "config.toml", "debug = true\npoll_jitter_ms = 0\n");

        let conf = CliConfig::from(&path).unwrap();
        assert!(conf.debug);
        assert_eq!(conf.poll_jitter_ms, 0);
        assert_eq!(conf.server, DEFAULT_SERVER);
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "config.yaml", "");
        assert_eq!(CliConfig::from(&path).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "config.yaml", "server: [unclosed\n");
        assert!(CliConfig::from(&path).is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let conf = CliConfig::resolve(
            Some(dir.path().join("absent.yaml").as_path()),
            ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(conf, CliConfig::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "config.yaml",
            "server: https://file.example.com\naccess_token: from-file\n",
        );

        let conf = CliConfig::resolve(
            Some(path.as_path()),
            ConfigOverrides {
                server: Some("http://localhost:8080".to_string()),
                access_token: None,
                debug: true,
            },
        )
        .unwrap();

        assert_eq!(conf.server, "http://localhost:8080");
        assert_eq!(conf.access_token.as_deref(), Some("from-file"));
        assert!(conf.debug);
    }

    #[test]
    fn test_invalid_server_rejected() {
        let result = CliConfig::resolve(
            None,
            ConfigOverrides {
                server: Some("anchor.zeet.co".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ZeetError::ConfigError(_))));
    }

    #[test]
    fn test_require_token() {
        let mut conf = CliConfig::default();
        assert!(matches!(
            conf.require_token(),
            Err(ZeetError::Unauthorized(_))
        ));
        conf.access_token = Some("  ".to_string());
        assert!(conf.require_token().is_err());
        conf.access_token = Some("tok".to_string());
        assert_eq!(conf.require_token().unwrap(), "tok");
    }
}
