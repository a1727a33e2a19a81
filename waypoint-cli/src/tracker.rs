//! Loaded state + preferences, with the mutations every surface shares.
//!
//! Each mutation validates first, then writes the state file before returning.
//! Rejected input leaves both the in-memory state and the file untouched.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use waypoint_core::{
    milestone_notice, parse_date, parse_date_or, parse_distance, Entry, MilestoneTable,
    ProgressReport, RampStage, TotalsChange, TrackerState,
};

use crate::config::Config;
use crate::state::{load_state_from, save_state_to, state_path};

pub struct Tracker {
    pub cfg: Config,
    pub table: MilestoneTable,
    pub today: NaiveDate,
    pub state: TrackerState,
    path: PathBuf,
}

impl Tracker {
    pub fn open(cfg: Config) -> Result<Self> {
        let path = state_path()?;
        Self::open_at(cfg, path)
    }

    pub fn open_at(cfg: Config, path: PathBuf) -> Result<Self> {
        let table = cfg.milestone_table()?;
        let today = cfg.today()?;
        let state = load_state_from(&path, today, &table);
        Ok(Self {
            cfg,
            table,
            today,
            state,
            path,
        })
    }

    pub fn save(&self) -> Result<()> {
        save_state_to(&self.path, &self.state)
    }

    pub fn report(&self) -> ProgressReport {
        self.state.report(&self.table, self.today)
    }

    /// Append a distance; returns the milestone notice, if one unlocked.
    pub fn log(&mut self, distance: &str, date: Option<&str>) -> Result<Option<String>> {
        let distance = parse_distance(distance).map_err(rejected)?;
        let date = parse_date_or(date, self.today).map_err(rejected)?;
        let change = self.state.entries.append(distance, date).map_err(rejected)?;
        self.commit(change)
    }

    pub fn edit_last(&mut self, distance: &str) -> Result<Option<String>> {
        let distance = parse_distance(distance).map_err(rejected)?;
        let change = self.state.entries.edit_last(distance).map_err(rejected)?;
        self.commit(change)
    }

    pub fn undo(&mut self) -> Result<Option<Entry>> {
        let removed = self.state.entries.delete_last();
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn delete(&mut self, id: &str) -> Result<Option<Entry>> {
        let removed = self.state.entries.delete_by_id(id);
        if removed.is_some() {
            self.save()?;
        }
        Ok(removed)
    }

    /// Change the goal distance and/or date; both are checked before either is applied.
    pub fn set_goal(&mut self, distance: Option<&str>, date: Option<&str>) -> Result<()> {
        if distance.is_none() && date.is_none() {
            bail!("nothing to change (pass --distance and/or --date)");
        }
        let mut goal = self.state.goal;
        if let Some(d) = distance {
            goal.target_distance = parse_distance(d).map_err(rejected)?;
        }
        if let Some(d) = date {
            goal.target_date = parse_date(d).map_err(rejected)?;
        }
        self.state.goal = goal;
        self.save()
    }

    pub fn set_plan_enabled(&mut self, enabled: bool) -> Result<()> {
        self.state.plan.enabled = enabled;
        self.save()
    }

    /// Numbers outside their ranges are clamped; a bad date or a non-finite cap is rejected.
    pub fn set_plan(
        &mut self,
        start: Option<&str>,
        cap: Option<f64>,
        active_days: Option<u8>,
    ) -> Result<()> {
        let mut plan = self.state.plan.clone();
        if let Some(s) = start {
            plan.start_date = parse_date(s).map_err(rejected)?;
        }
        if let Some(c) = cap {
            if !c.is_finite() {
                bail!("rejected: cap must be a number");
            }
            plan.cap_rate = c;
        }
        if let Some(a) = active_days {
            plan.active_days_per_week = a;
        }
        self.state.plan = plan.clamped();
        self.save()
    }

    pub fn add_stage(&mut self, weeks: u32, rate: f64) -> Result<()> {
        if !rate.is_finite() {
            bail!("rejected: rate must be a number");
        }
        let mut plan = self.state.plan.clone();
        plan.stages.push(RampStage::new(weeks, rate));
        self.state.plan = plan.clamped();
        self.save()
    }

    pub fn clear_stages(&mut self) -> Result<()> {
        self.state.plan.stages.clear();
        self.save()
    }

    fn commit(&self, change: TotalsChange) -> Result<Option<String>> {
        self.save()?;
        Ok(milestone_notice(&self.table, change))
    }
}

fn rejected(e: waypoint_core::ValidationError) -> anyhow::Error {
    anyhow!("rejected: {e}")
}
