//! Ramp-plan engine: planned distance per day from a staged rate schedule.
//!
//! Days are counted as offsets from `start_date` (offset 0 is the start date
//! itself). Stage i covers `weeks_i * 7` consecutive offsets after stage i-1;
//! past the last stage the plan runs at `cap_rate` forever. A day only counts
//! if `offset % 7 < active_days_per_week`, so the start date always opens a
//! week.
//!
//! No rounding happens here; formatting is the caller's business.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::settings::PlanConfig;

/// Rate of the stage containing `day_offset`, or the cap once stages run out.
pub fn rate_at(plan: &PlanConfig, day_offset: u32) -> f64 {
    let mut stage_end = 0u32;
    for stage in &plan.stages {
        stage_end = stage_end.saturating_add(stage.days());
        if day_offset < stage_end {
            return stage.rate_per_day;
        }
    }
    plan.cap_rate
}

pub fn is_active_day(day_offset: u32, active_days_per_week: u8) -> bool {
    day_offset % 7 < u32::from(active_days_per_week)
}

/// Whole days from `a` to `b`, counting both ends.
pub fn days_between_inclusive(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days() + 1
}

fn offset_of(plan: &PlanConfig, date: NaiveDate) -> Option<u32> {
    u32::try_from((date - plan.start_date).num_days()).ok()
}

/// Cumulative planned distance from `start_date` through `date` inclusive.
pub fn planned_through(plan: &PlanConfig, date: NaiveDate) -> f64 {
    if date < plan.start_date {
        return 0.0;
    }
    let days = days_between_inclusive(plan.start_date, date);
    let days = u32::try_from(days).unwrap_or(u32::MAX);

    (0..days)
        .filter(|&d| is_active_day(d, plan.active_days_per_week))
        .map(|d| rate_at(plan, d))
        .sum()
}

/// Planned distance for `date` alone (0 before the start or on a rest day).
pub fn target_for_day(plan: &PlanConfig, date: NaiveDate) -> f64 {
    match offset_of(plan, date) {
        Some(d) if is_active_day(d, plan.active_days_per_week) => rate_at(plan, d),
        _ => 0.0,
    }
}

/// Calendar window for one stage of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageWindow {
    /// 1-based stage number; `None` for the open-ended cap stage.
    pub stage: Option<usize>,
    pub first_day: NaiveDate,
    /// `None` for the cap stage, which never ends.
    pub last_day: Option<NaiveDate>,
    pub rate_per_day: f64,
}

/// The schedule laid out on the calendar, ending with the cap stage.
pub fn stage_windows(plan: &PlanConfig) -> Vec<StageWindow> {
    let mut out = Vec::with_capacity(plan.stages.len() + 1);
    let mut first_day = plan.start_date;

    for (i, stage) in plan.stages.iter().enumerate() {
        let days = i64::from(stage.days());
        out.push(StageWindow {
            stage: Some(i + 1),
            first_day,
            last_day: Some(first_day + Duration::days(days - 1)),
            rate_per_day: stage.rate_per_day,
        });
        first_day += Duration::days(days);
    }

    out.push(StageWindow {
        stage: None,
        first_day,
        last_day: None,
        rate_per_day: plan.cap_rate,
    });
    out
}
