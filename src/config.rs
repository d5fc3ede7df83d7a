use std::{env, time::Duration};
use tracing::warn;

pub const DEFAULT_DEALS_URL: &str = "https://plugin-tracker.up.railway.app/api/plugins";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub deals_url: String,
    pub fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let deals_url = lookup("DEALS_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DEALS_URL.to_string());
        let timeout_secs = parse_or(&lookup, "DEALS_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS);

        Self {
            port,
            deals_url,
            fetch_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring invalid {key}={raw:?}");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.deals_url, DEFAULT_DEALS_URL);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides_and_skips_garbage() {
        let config = config_from(&[
            ("PORT", "9001"),
            ("DEALS_URL", " http://127.0.0.1:5000/api/plugins "),
            ("DEALS_FETCH_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(config.port, 9001);
        assert_eq!(config.deals_url, "http://127.0.0.1:5000/api/plugins");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }
}
