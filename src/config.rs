use std::{env, fmt::Display, str::FromStr, time::Duration};

use log::{info, warn};
use thiserror::Error;

use crate::quiz::{FIRST_SEASON, LATEST_SEASON};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub match_api_url: String,
    pub match_timeout: Duration,
    pub reveal_delay: Duration,
    pub default_start_year: i32,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let default_start_year: i32 = try_load("DEFAULT_START_YEAR", "2024")?;
        if !(FIRST_SEASON..=LATEST_SEASON).contains(&default_start_year) {
            return Err(ConfigError::Invalid {
                key: "DEFAULT_START_YEAR",
                value: default_start_year.to_string(),
                reason: format!("must be within {FIRST_SEASON}..={LATEST_SEASON}"),
            });
        }

        Ok(Self {
            match_api_url: try_load("MATCH_API_URL", "http://127.0.0.1:8000/api/team-matching")?,
            match_timeout: Duration::from_secs(try_load("MATCH_TIMEOUT_SECS", "10")?),
            reveal_delay: Duration::from_millis(try_load("REVEAL_DELAY_MS", "2000")?),
            default_start_year,
        })
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }
    })
}
