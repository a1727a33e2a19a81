use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use waypoint_core::{today_in, MilestoneTable, DEFAULT_TOAST_MS};

use crate::state::ensure_waypoint_home;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
    /// Unit label for display only; no conversion happens.
    pub unit: String,
    /// Built-in milestone table: "shire" or "coast".
    pub milestones: String,
    /// How long a milestone toast stays up in `waypoint session`.
    pub toast_ms: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            unit: "mi".to_string(),
            milestones: "shire".to_string(),
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl Config {
    pub fn milestone_table(&self) -> Result<MilestoneTable> {
        MilestoneTable::preset(&self.milestones).ok_or_else(|| {
            anyhow!(
                "unknown milestone table {:?} (expected one of: {})",
                self.milestones,
                MilestoneTable::preset_names().join(", ")
            )
        })
    }

    pub fn today(&self) -> Result<NaiveDate> {
        Ok(today_in(&self.timezone)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_waypoint_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config("timezone = \"America/Chicago\"\n").unwrap();
        assert_eq!(cfg.timezone, "America/Chicago");
        assert_eq!(cfg.unit, "mi");
        assert_eq!(cfg.toast_ms, DEFAULT_TOAST_MS);
    }

    #[test]
    fn test_round_trip_and_table_lookup() {
        let cfg = Config {
            milestones: "coast".into(),
            unit: "km".into(),
            ..Config::default()
        };
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse_config(&s).unwrap(), cfg);
        assert_eq!(cfg.milestone_table().unwrap().max_threshold(), 192.0);

        let bad = Config {
            milestones: "narnia".into(),
            ..Config::default()
        };
        assert!(bad.milestone_table().is_err());
    }
}
