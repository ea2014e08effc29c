//! Process configuration read from `STOCKQUEST_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use stockquest_inventory::DEFAULT_FRESHNESS;
use stockquest_observability::LogFormat;

pub const FIXTURES_DIR_VAR: &str = "STOCKQUEST_FIXTURES_DIR";
pub const CACHE_TTL_VAR: &str = "STOCKQUEST_CACHE_TTL_SECS";
pub const REFRESH_VAR: &str = "STOCKQUEST_REFRESH_SECS";
pub const LOG_FORMAT_VAR: &str = "STOCKQUEST_LOG_FORMAT";

const DEFAULT_FIXTURES_DIR: &str = "./fixtures";
const DEFAULT_REFRESH: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub fixtures_dir: PathBuf,
    pub cache_ttl: Duration,
    pub refresh_every: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            cache_ttl: DEFAULT_FRESHNESS,
            refresh_every: DEFAULT_REFRESH,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset variables take their
    /// default; unparseable ones take their default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let fixtures_dir = lookup(FIXTURES_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.fixtures_dir);

        let cache_ttl = parse_or(&lookup, CACHE_TTL_VAR, defaults.cache_ttl.as_secs())
            .map_or(defaults.cache_ttl, Duration::from_secs);

        // A zero period would make the watch interval panic.
        let refresh_every = parse_or(&lookup, REFRESH_VAR, defaults.refresh_every.as_secs())
            .filter(|secs| *secs > 0)
            .map_or(defaults.refresh_every, Duration::from_secs);

        let log_format = parse_or(&lookup, LOG_FORMAT_VAR, defaults.log_format)
            .unwrap_or(defaults.log_format);

        Self {
            fixtures_dir,
            cache_ttl,
            refresh_every,
            log_format,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Option<T>
where
    T: FromStr + core::fmt::Debug,
    T::Err: core::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Some(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(var = key, value = %raw, ?default, "ignoring invalid setting: {err}");
            None
        }
    }
}
