//! Goal + ramp-plan configuration.
//!
//! These are plain values handed to the engines on every call. Input coming
//! from the UI goes through `clamped()` so each parameter lands in its range;
//! the engines themselves accept any value, including degenerate ones.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MIN_WEEKS: u32 = 1;
pub const MAX_WEEKS: u32 = 52;
pub const MIN_RATE: f64 = 0.5;
pub const MAX_CAP_RATE: f64 = 100.0;
pub const MIN_ACTIVE_DAYS: u8 = 1;
pub const MAX_ACTIVE_DAYS: u8 = 7;

/// Distance to cover and the date to cover it by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalConfig {
    pub target_distance: f64,
    pub target_date: NaiveDate,
}

impl GoalConfig {
    pub fn new(target_distance: f64, target_date: NaiveDate) -> Self {
        Self {
            target_distance,
            target_date,
        }
    }

    /// One year from `today` to cover `target_distance`.
    pub fn one_year_from(today: NaiveDate, target_distance: f64) -> Self {
        Self::new(target_distance, today + Duration::days(365))
    }
}

/// One step of the ramp: `rate_per_day` for `weeks * 7` calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RampStage {
    pub weeks: u32,
    pub rate_per_day: f64,
}

impl RampStage {
    pub fn new(weeks: u32, rate_per_day: f64) -> Self {
        Self {
            weeks,
            rate_per_day,
        }
    }

    pub fn days(&self) -> u32 {
        self.weeks.saturating_mul(7)
    }

    /// Weeks into 1..=52, rate into MIN_RATE..=cap.
    pub fn clamped(&self, cap_rate: f64) -> Self {
        Self {
            weeks: self.weeks.clamp(MIN_WEEKS, MAX_WEEKS),
            rate_per_day: self.rate_per_day.max(MIN_RATE).min(cap_rate),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanConfig {
    pub enabled: bool,
    pub start_date: NaiveDate,
    /// Rate used once every stage has run out.
    pub cap_rate: f64,
    /// Days counted per 7-day week, aligned so `start_date` is day 0.
    pub active_days_per_week: u8,
    pub stages: Vec<RampStage>,
}

impl PlanConfig {
    /// A gentle eight-week build starting on `start`, six days a week.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            enabled: true,
            start_date: start,
            cap_rate: 5.0,
            active_days_per_week: 6,
            stages: vec![
                RampStage::new(2, 1.0),
                RampStage::new(2, 2.0),
                RampStage::new(4, 3.0),
            ],
        }
    }

    /// Total calendar days covered by the explicit stages.
    pub fn staged_days(&self) -> u32 {
        self.stages
            .iter()
            .map(RampStage::days)
            .fold(0, u32::saturating_add)
    }

    /// True if every value lies in a range `clamped()` could produce.
    /// Zero active days is degenerate but allowed.
    pub fn in_range(&self) -> bool {
        (MIN_RATE..=MAX_CAP_RATE).contains(&self.cap_rate)
            && self.active_days_per_week <= MAX_ACTIVE_DAYS
            && self.stages.iter().all(|s| {
                (MIN_WEEKS..=MAX_WEEKS).contains(&s.weeks)
                    && (MIN_RATE..=self.cap_rate).contains(&s.rate_per_day)
            })
    }

    /// Every parameter forced into its input range.
    pub fn clamped(&self) -> Self {
        let cap_rate = self.cap_rate.clamp(MIN_RATE, MAX_CAP_RATE);
        Self {
            enabled: self.enabled,
            start_date: self.start_date,
            cap_rate,
            active_days_per_week: self
                .active_days_per_week
                .clamp(MIN_ACTIVE_DAYS, MAX_ACTIVE_DAYS),
            stages: self.stages.iter().map(|s| s.clamped(cap_rate)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_stage_clamping() {
        assert_eq!(RampStage::new(0, 0.1).clamped(5.0), RampStage::new(1, 0.5));
        assert_eq!(RampStage::new(80, 9.0).clamped(5.0), RampStage::new(52, 5.0));
        assert_eq!(RampStage::new(3, 2.5).clamped(5.0), RampStage::new(3, 2.5));
    }

    #[test]
    fn test_plan_clamping() {
        let mut plan = PlanConfig::starting(d(2026, 1, 1));
        plan.cap_rate = 0.1;
        plan.active_days_per_week = 0;
        plan.stages = vec![RampStage::new(2, 3.0)];

        let c = plan.clamped();
        assert_eq!(c.cap_rate, MIN_RATE);
        assert_eq!(c.active_days_per_week, 1);
        // stage rate may not exceed the clamped cap
        assert_eq!(c.stages[0].rate_per_day, MIN_RATE);

        plan.active_days_per_week = 12;
        plan.cap_rate = 500.0;
        let c = plan.clamped();
        assert_eq!(c.active_days_per_week, 7);
        assert_eq!(c.cap_rate, MAX_CAP_RATE);
    }

    #[test]
    fn test_in_range() {
        let plan = PlanConfig::starting(d(2026, 1, 1));
        assert!(plan.in_range());

        let mut p = plan.clone();
        p.active_days_per_week = 0;
        assert!(p.in_range());
        p.active_days_per_week = 8;
        assert!(!p.in_range());

        let mut p = plan.clone();
        p.stages.push(RampStage::new(53, 1.0));
        assert!(!p.in_range());

        let mut p = plan.clone();
        p.stages.push(RampStage::new(1, 6.0));
        assert!(!p.in_range());

        let mut p = plan.clone();
        p.cap_rate = f64::NAN;
        assert!(!p.in_range());
    }

    #[test]
    fn test_days_saturate() {
        assert_eq!(RampStage::new(u32::MAX, 1.0).days(), u32::MAX);
    }

    #[test]
    fn test_defaults() {
        let plan = PlanConfig::starting(d(2026, 1, 1));
        assert_eq!(plan.staged_days(), 56);
        assert_eq!(plan.clamped(), plan);

        let goal = GoalConfig::one_year_from(d(2026, 1, 1), 1779.0);
        assert_eq!(goal.target_date, d(2027, 1, 1));
    }
}
