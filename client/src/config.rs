use std::{fs, num::NonZeroUsize, path::Path, thread};

use anyhow::{Context, ensure};
use libgame::rule::Rule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub rule: Rule,

    /// Column partitions aggregated in parallel each generation.
    pub workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            rule: Rule::default(),
            workers: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        Self::from_json(&config_serialized)
    }

    pub fn from_json(config_serialized: &[u8]) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_slice(config_serialized).context("Couldn't deserialize config")?;

        ensure!(
            config.width > 0 && config.height > 0,
            "Board dimensions must be positive, got {}x{}",
            config.width,
            config.height
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = Config::from_json(br#"{ "width": 100, "rule": "B36/S23" }"#).unwrap();

        assert_eq!(config.width, 100);
        assert_eq!(config.height, Config::default().height);
        assert_eq!(config.rule.to_string(), "B36/S23");
        assert!(config.workers >= 1);
    }

    #[test]
    fn rejects_bad_rules_and_sizes() {
        assert!(Config::from_json(br#"{ "rule": "B3S23" }"#).is_err());
        assert!(Config::from_json(br#"{ "width": 0 }"#).is_err());
        assert!(Config::from_json(b"not json").is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config {
            width: 12,
            height: 8,
            rule: "B2/S".parse().unwrap(),
            workers: 3,
        };

        let serialized = serde_json::to_vec(&config).unwrap();
        assert_eq!(Config::from_json(&serialized).unwrap(), config);
    }
}
