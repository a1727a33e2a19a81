use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use waypoint_core::{MilestoneTable, TrackerState};

const STATE_FILE: &str = "state.json";

pub fn waypoint_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WAYPOINT_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".waypoint"))
}

pub fn ensure_waypoint_home() -> Result<PathBuf> {
    let dir = waypoint_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn state_path() -> Result<PathBuf> {
    Ok(ensure_waypoint_home()?.join(STATE_FILE))
}

/// Missing, unreadable or malformed files all load as a fresh state.
pub fn load_state_from(path: &Path, today: NaiveDate, table: &MilestoneTable) -> TrackerState {
    let raw = if path.exists() {
        match fs::read_to_string(path) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read saved state");
                None
            }
        }
    } else {
        None
    };
    TrackerState::load_or_fresh(raw.as_deref(), today, table)
}

pub fn save_state_to(path: &Path, state: &TrackerState) -> Result<()> {
    let json = state.to_json().context("serialize state")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
