//! Runtime configuration read from the environment.
//!
//! | Variable | Default | Range |
//! |----------|---------|-------|
//! | `M4TCH_SEED` | derived from the clock | any `u32` |
//! | `M4TCH_SESSION_SECS` | 60 | 1..=3600 |
//! | `M4TCH_TICK_MS` | 16 | 1..=100 |
//! | `M4TCH_LOG_PATH` | unset (stderr) | file path |
//!
//! Log filtering follows `RUST_LOG` and defaults to `warn`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::{MAX_SESSION_MS, SESSION_MS, TICK_MS};

pub const SEED_VAR: &str = "M4TCH_SEED";
pub const SESSION_SECS_VAR: &str = "M4TCH_SESSION_SECS";
pub const TICK_MS_VAR: &str = "M4TCH_TICK_MS";
pub const LOG_PATH_VAR: &str = "M4TCH_LOG_PATH";

const MAX_TICK_MS: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: `{value}` is not a number")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var}: {value} is out of range")]
    OutOfRange { var: &'static str, value: u32 },
    #[error("cannot open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Host configuration for one run of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub session_ms: u32,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            session_ms: SESSION_MS,
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match var(SEED_VAR) {
            Some(s) => parse_u32(SEED_VAR, &s)?,
            None => clock_seed(),
        };

        let session_ms = match var(SESSION_SECS_VAR) {
            Some(s) => {
                let secs = parse_u32(SESSION_SECS_VAR, &s)?;
                if secs == 0 || secs > MAX_SESSION_MS / 1000 {
                    return Err(ConfigError::OutOfRange {
                        var: SESSION_SECS_VAR,
                        value: secs,
                    });
                }
                secs * 1000
            }
            None => SESSION_MS,
        };

        let tick_ms = match var(TICK_MS_VAR) {
            Some(s) => {
                let ms = parse_u32(TICK_MS_VAR, &s)?;
                if ms == 0 || ms > MAX_TICK_MS {
                    return Err(ConfigError::OutOfRange {
                        var: TICK_MS_VAR,
                        value: ms,
                    });
                }
                ms
            }
            None => TICK_MS,
        };

        Ok(Self {
            seed,
            session_ms,
            tick_ms,
            log_path: var(LOG_PATH_VAR).map(PathBuf::from),
        })
    }
}

fn parse_u32(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

/// Install `env_logger`, writing to the configured log file when there is
/// one. The terminal is in raw mode while playing, so stderr output lands on
/// top of the board.
pub fn init_logging(config: &AppConfig) -> Result<(), ConfigError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| ConfigError::LogFile {
                path: path.clone(),
                source,
            })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    // A logger installed earlier (tests, embedding hosts) wins.
    let _ = builder.try_init();
    Ok(())
}
