use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use batepapo_api::presence::PresenceConfig;

/// Runtime settings, read from `BATEPAPO_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub presence: PresenceConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("BATEPAPO_DB_PATH").unwrap_or_else(|| "batepapo.db".into());
        let host = lookup("BATEPAPO_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("BATEPAPO_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("BATEPAPO_PORT must be a port number")?;

        let sweep_secs = seconds(&lookup, "BATEPAPO_SWEEP_INTERVAL_SECS", 15)?;
        if sweep_secs == 0 {
            bail!("BATEPAPO_SWEEP_INTERVAL_SECS must be greater than zero");
        }
        let timeout_secs = seconds(&lookup, "BATEPAPO_INACTIVE_TIMEOUT_SECS", 10)?;

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
            presence: PresenceConfig {
                sweep_interval: Duration::from_secs(sweep_secs),
                inactive_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a whole number of seconds")),
        None => Ok(default),
    }
}
