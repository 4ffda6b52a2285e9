use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 2000;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),
    #[error("Environment variable {name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Settings for talking to CoinATMRadar, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadarConfig {
    pub operator_id: String,
    pub url: String,
    pub timeout: Duration,
    pub max_content_length: usize,
    pub interval: Duration,
}

impl RadarConfig {
    pub fn new(operator_id: &str, url: &str) -> Self {
        RadarConfig {
            operator_id: operator_id.to_string(),
            url: url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let operator_id = lookup("OPERATOR_ID").ok_or(ConfigError::Missing("OPERATOR_ID"))?;
        let url =
            lookup("COIN_ATM_RADAR_URL").ok_or(ConfigError::Missing("COIN_ATM_RADAR_URL"))?;

        let mut config = RadarConfig::new(&operator_id, &url);
        if let Some(ms) = parse_var::<u64, _>(&lookup, "COIN_ATM_RADAR_TIMEOUT_MS")? {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(len) = parse_var::<usize, _>(&lookup, "COIN_ATM_RADAR_MAX_CONTENT_LENGTH")? {
            config.max_content_length = len;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "COIN_ATM_RADAR_INTERVAL_SECS")? {
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    name: "COIN_ATM_RADAR_INTERVAL_SECS",
                    value: secs.to_string(),
                });
            }
            config.interval = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = RadarConfig::from_lookup(lookup(&[
            ("OPERATOR_ID", "op-1"),
            ("COIN_ATM_RADAR_URL", "https://radar.example/api"),
        ]))
        .unwrap();

        assert_eq!(config.operator_id, "op-1");
        assert_eq!(config.url, "https://radar.example/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_content_length, 2000);
        assert_eq!(config.interval, Duration::from_secs(300));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = RadarConfig::from_lookup(lookup(&[
            ("OPERATOR_ID", "op-1"),
            ("COIN_ATM_RADAR_URL", "http://localhost"),
            ("COIN_ATM_RADAR_TIMEOUT_MS", "250"),
            ("COIN_ATM_RADAR_MAX_CONTENT_LENGTH", "64"),
            ("COIN_ATM_RADAR_INTERVAL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.max_content_length, 64);
        assert_eq!(config.interval, Duration::from_secs(60));
    }

    #[test]
    fn missing_operator_id_is_rejected() {
        let err = RadarConfig::from_lookup(lookup(&[("COIN_ATM_RADAR_URL", "http://x")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("OPERATOR_ID"));
    }

    #[test]
    fn garbage_timeout_is_rejected() {
        let err = RadarConfig::from_lookup(lookup(&[
            ("OPERATOR_ID", "op-1"),
            ("COIN_ATM_RADAR_URL", "http://x"),
            ("COIN_ATM_RADAR_TIMEOUT_MS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "COIN_ATM_RADAR_TIMEOUT_MS",
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = RadarConfig::from_lookup(lookup(&[
            ("OPERATOR_ID", "op-1"),
            ("COIN_ATM_RADAR_URL", "http://x"),
            ("COIN_ATM_RADAR_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
