//! The single persisted record: ledger + goal + plan.
//!
//! Loading never fails. Anything unreadable or out of shape is treated as
//! "nothing saved yet" and replaced by a fresh state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ledger::{Ledger, TotalsChange};
use crate::milestones::{MilestoneDef, MilestoneTable};
use crate::progress::ProgressReport;
use crate::settings::{GoalConfig, PlanConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackerState {
    pub entries: Ledger,
    pub goal: GoalConfig,
    pub plan: PlanConfig,
}

impl TrackerState {
    /// Empty ledger, a year to finish `table`, default plan starting today.
    pub fn fresh(today: NaiveDate, table: &MilestoneTable) -> Self {
        Self {
            entries: Ledger::new(),
            goal: GoalConfig::one_year_from(today, table.max_threshold()),
            plan: PlanConfig::starting(today),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Parse a saved record, or start fresh if it is missing or malformed.
    pub fn load_or_fresh(raw: Option<&str>, today: NaiveDate, table: &MilestoneTable) -> Self {
        let Some(raw) = raw else {
            debug!("no saved state, starting fresh");
            return Self::fresh(today, table);
        };

        match Self::from_json(raw) {
            Ok(state) if state.is_well_formed() => state,
            Ok(_) => {
                warn!("saved state out of range, starting fresh");
                Self::fresh(today, table)
            }
            Err(e) => {
                warn!(error = %e, "saved state unreadable, starting fresh");
                Self::fresh(today, table)
            }
        }
    }

    /// Values that deserialize but could never have been produced by a valid edit.
    pub fn is_well_formed(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        self.entries.entries().iter().all(|e| positive(e.distance))
            && positive(self.goal.target_distance)
            && self.plan.in_range()
    }

    pub fn report(&self, table: &MilestoneTable, today: NaiveDate) -> ProgressReport {
        ProgressReport::compute(&self.entries, &self.goal, &self.plan, table, today)
    }
}

/// Toast text for the furthest milestone crossed by a ledger change.
pub fn milestone_notice(table: &MilestoneTable, change: TotalsChange) -> Option<String> {
    table
        .furthest_crossed(change.before, change.after)
        .map(notice_text)
}

fn notice_text(m: &MilestoneDef) -> String {
    debug!(milestone = %m.id, "milestone unlocked");
    format!("Milestone unlocked: {}. Reward: {}", m.name, m.reward)
}
