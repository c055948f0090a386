use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::pass::Thresholds;
use crate::predict::MAX_WINDOW_DAYS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub satellites: PathBuf,
    pub stations: PathBuf,
    pub tle: TleConfig,
    #[serde(deserialize_with = "deserialize_duration")]
    pub window: Duration,
    pub min_elevation_deg: f64,
    pub qualification: Thresholds,
    pub station_altitude_m: f64,
    #[serde(deserialize_with = "deserialize_offset")]
    pub utc_offset: FixedOffset,
    pub locator_center: bool,
    pub workers: usize,
    pub web: WebConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            satellites: PathBuf::from("satellite.txt"),
            stations: PathBuf::from("websdr.txt"),
            tle: TleConfig::default(),
            window: Duration::from_secs(8 * 3600),
            min_elevation_deg: 40.0,
            qualification: Thresholds::default(),
            station_altitude_m: 10.0,
            utc_offset: Utc.fix(),
            locator_center: false,
            workers: 4,
            web: WebConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TleConfig {
    pub folder: PathBuf,
    pub urls: Vec<String>,
}

impl Default for TleConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("tle"),
            urls: [
                "http://celestrak.com/NORAD/elements/amateur.txt",
                "http://celestrak.com/NORAD/elements/cubesat.txt",
                "http://celestrak.com/NORAD/elements/weather.txt",
                "http://celestrak.com/NORAD/elements/stations.txt",
            ]
            .iter()
            .map(|u| u.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        window_length(self.window).map_err(ConfigError::Invalid)?;
        if !(-90.0..=90.0).contains(&self.min_elevation_deg) {
            return Err(ConfigError::Invalid(format!(
                "min_elevation_deg {} is not an elevation",
                self.min_elevation_deg
            )));
        }
        Ok(())
    }

    pub fn window_duration(&self) -> Result<chrono::Duration, ConfigError> {
        window_length(self.window).map_err(ConfigError::Invalid)
    }
}

/// Check a look-ahead length and convert it for window arithmetic.
pub fn window_length(window: Duration) -> Result<chrono::Duration, String> {
    if window.is_zero() {
        return Err("window must be positive".into());
    }
    let max = chrono::Duration::days(MAX_WINDOW_DAYS);
    match chrono::Duration::from_std(window) {
        Ok(length) if length <= max => Ok(length),
        _ => Err(format!(
            "window {} exceeds {MAX_WINDOW_DAYS} days",
            humantime::format_duration(window)
        )),
    }
}

/// Parse a look-ahead such as `8h` and check it is a usable window length.
pub fn parse_window(s: &str) -> Result<Duration, String> {
    let window = parse_duration(s)?;
    window_length(window)?;
    Ok(window)
}

pub fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

fn deserialize_offset<'de, D>(deserializer: D) -> Result<FixedOffset, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .parse::<FixedOffset>()
        .map_err(|e| serde::de::Error::custom(format!("invalid utc_offset '{s}': {e}")))
}
