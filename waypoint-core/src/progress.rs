//! Progress aggregation: one fresh snapshot per query.
//!
//! Nothing is cached between calls. Callers recompute after every ledger or
//! config change; the inputs are small enough that this is always cheap.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::Ledger;
use crate::milestones::{MilestoneDef, MilestoneTable};
use crate::ramp::{planned_through, target_for_day};
use crate::settings::{GoalConfig, PlanConfig};

const PACE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    Ahead,
    OnPlan,
    Behind,
}

impl PaceStatus {
    pub fn from_delta(delta: f64) -> Self {
        if delta > PACE_EPSILON {
            PaceStatus::Ahead
        } else if delta < -PACE_EPSILON {
            PaceStatus::Behind
        } else {
            PaceStatus::OnPlan
        }
    }
}

/// Plan-relative figures; only present when the plan is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanProgress {
    /// Planned cumulative distance through `as_of`.
    pub planned_to_date: f64,
    /// Today's planned distance (0 on rest days).
    pub today_target: f64,
    /// Actual minus planned; positive means ahead.
    pub pace_delta: f64,
    pub pace: PaceStatus,
    /// Whether the plan alone would reach the goal by its date.
    pub plan_sufficient: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub as_of: NaiveDate,
    pub total_distance: f64,
    pub percent_to_goal: f64,
    pub remaining: f64,
    pub days_left: i64,
    pub required_rate_per_day: f64,
    pub current_milestone: MilestoneDef,
    pub next_milestone: Option<MilestoneDef>,
    pub distance_to_next: Option<f64>,
    pub plan: Option<PlanProgress>,
}

impl ProgressReport {
    pub fn compute(
        ledger: &Ledger,
        goal: &GoalConfig,
        plan: &PlanConfig,
        table: &MilestoneTable,
        today: NaiveDate,
    ) -> Self {
        let total = ledger.total();
        let target = goal.target_distance;

        let percent_to_goal = (total / target.max(1.0) * 100.0).clamp(0.0, 100.0);
        let remaining = (target - total).max(0.0);
        let days_left = (goal.target_date - today).num_days().max(0);
        let required_rate_per_day = if days_left > 0 {
            remaining / days_left as f64
        } else {
            remaining
        };

        let plan = plan.enabled.then(|| {
            let planned_to_date = planned_through(plan, today);
            let pace_delta = total - planned_to_date;
            PlanProgress {
                planned_to_date,
                today_target: target_for_day(plan, today),
                pace_delta,
                pace: PaceStatus::from_delta(pace_delta),
                plan_sufficient: planned_through(plan, goal.target_date) >= target,
            }
        });

        Self {
            as_of: today,
            total_distance: total,
            percent_to_goal,
            remaining,
            days_left,
            required_rate_per_day,
            current_milestone: table.current(total).clone(),
            next_milestone: table.next(total).cloned(),
            distance_to_next: table.distance_to_next(total),
            plan,
        }
    }
}
