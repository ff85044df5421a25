use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::ids::SourceTag;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                  AppleWebKit/537.36 (KHTML, like Gecko) \
                                  Chrome/131.0.0.0 Safari/537.36";

/// Runtime settings, read from `config.toml` and overridable via `COMBINED_SOURCES_*`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub call_timeout_ms: Option<u64>,
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,
    #[serde(default)]
    pub retries: Option<u32>,
    /// Mirror or test-server roots, keyed by source tag.
    #[serde(default)]
    pub base_urls: BTreeMap<SourceTag, String>,
}

impl Config {
    /// Load from `path` (or the default location). A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };
        let mut cfg = match path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(&p)
                    .with_context(|| format!("failed to read config: {}", p.display()))?;
                toml::from_str::<Config>(&raw)
                    .with_context(|| format!("invalid config: {}", p.display()))?
            }
            _ => Config::default(),
        };
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "combined-sources").map(|d| d.config_dir().join("config.toml"))
    }

    fn apply_env(&mut self) {
        if let Ok(ua) = std::env::var("COMBINED_SOURCES_USER_AGENT") {
            if !ua.trim().is_empty() { self.user_agent = Some(ua); }
        }
        if let Some(ms) = std::env::var("COMBINED_SOURCES_TIMEOUT_MS").ok().and_then(|s| s.parse().ok()) {
            self.call_timeout_ms = Some(ms);
        }
        if let Some(ms) = std::env::var("COMBINED_SOURCES_RETRY_DELAY_MS").ok().and_then(|s| s.parse().ok()) {
            self.retry_delay_ms = Some(ms);
        }
    }

    pub fn user_agent(&self) -> &str { self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT) }
    pub fn call_timeout_ms(&self) -> u64 { self.call_timeout_ms.unwrap_or(15_000) }
    pub fn retry_delay_ms(&self) -> u64 { self.retry_delay_ms.unwrap_or(200) }
    pub fn retries(&self) -> u32 { self.retries.unwrap_or(crate::host::RETRY_BUDGET) }

    pub fn base_url(&self, tag: SourceTag) -> Option<&str> {
        self.base_urls
            .get(&tag)
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
    }
}
