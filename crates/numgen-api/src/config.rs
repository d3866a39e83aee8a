//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use numgen_generator::domain::reveal::{
    DEFAULT_REVEAL_DURATION, DEFAULT_REVEAL_STEPS, RevealPlan,
};

use crate::error::AppError;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind (`HOST`, default `127.0.0.1`).
    pub host: String,
    /// Port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// History file (`HISTORY_PATH`, default `numgen-history.json`).
    pub history_path: PathBuf,
    /// Reveal pacing (`REVEAL_STEPS`, `REVEAL_DURATION_MS`).
    pub reveal: RevealPlan,
    /// Fixed RNG seed (`RNG_SEED`); seeded from the OS when absent.
    pub rng_seed: Option<u64>,
}

fn parse_opt<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} is invalid ({raw:?}): {e}")))
        })
        .transpose()
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 3000_u16)?;
        let history_path = lookup("HISTORY_PATH")
            .map_or_else(|| PathBuf::from("numgen-history.json"), PathBuf::from);
        let steps = parse_or(&lookup, "REVEAL_STEPS", DEFAULT_REVEAL_STEPS)?;
        #[allow(clippy::cast_possible_truncation)]
        let default_ms = DEFAULT_REVEAL_DURATION.as_millis() as u64;
        let duration_ms = parse_or(&lookup, "REVEAL_DURATION_MS", default_ms)?;
        let rng_seed = parse_opt(&lookup, "RNG_SEED")?;

        Ok(Self {
            host,
            port,
            history_path,
            reveal: RevealPlan::new(steps, Duration::from_millis(duration_ms)),
            rng_seed,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
