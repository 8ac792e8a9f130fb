//! Layered configuration
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file (the
//! platform config directory's `config.toml` unless one is given
//! explicitly), then `TICKET_DESK__SECTION__KEY` environment variables.

use crate::error::Result;
use crate::service::DemoAccount;
use crate::storage::{SESSION_KEY, TICKETS_KEY};
use config::{Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "TICKET_DESK";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub latency: LatencyConfig,
    pub auth: DemoAccount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory of the file-backed store; platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub tickets_key: String,
    pub session_key: String,
    /// Per-value byte limit, unlimited when unset
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

/// Simulated I/O latency in milliseconds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatencyConfig {
    pub load_ms: u64,
    pub auth_ms: u64,
}

impl LatencyConfig {
    #[must_use]
    pub const fn load(&self) -> Duration {
        Duration::from_millis(self.load_ms)
    }

    #[must_use]
    pub const fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn disable(&mut self) {
        self.load_ms = 0;
        self.auth_ms = 0;
    }
}

impl Config {
    /// Load configuration; an explicitly given file must exist
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let account = DemoAccount::default();
        let mut builder = config::Config::builder()
            .set_default("storage.tickets_key", TICKETS_KEY)?
            .set_default("storage.session_key", SESSION_KEY)?
            .set_default("latency.load_ms", 500_i64)?
            .set_default("latency.auth_ms", 1000_i64)?
            .set_default("auth.email", account.email)?
            .set_default("auth.password", account.password)?
            .set_default("auth.name", account.name)?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => match Self::default_config_path() {
                Some(path) => builder.add_source(File::from(path).required(false)),
                None => builder,
            },
        };

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(storage = ?config.storage, latency = ?config.latency, "configuration loaded");
        Ok(config)
    }

    /// `config.toml` in the platform configuration directory
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "ticket-desk", "ticket-desk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Directory the file-backed store writes into
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            ProjectDirs::from("com", "ticket-desk", "ticket-desk").map_or_else(
                || PathBuf::from(".ticket-desk"),
                |dirs| dirs.data_dir().to_path_buf(),
            )
        })
    }
}
