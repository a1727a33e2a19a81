//! waypoint-core: distance ledger, milestone unlocks and ramp-plan pacing

pub mod error;
pub mod ledger;
pub mod milestones;
pub mod notify;
pub mod progress;
pub mod ramp;
pub mod settings;
pub mod state;
pub mod time;

pub use error::ValidationError;
pub use ledger::{parse_distance, Entry, Ledger, TotalsChange};
pub use milestones::{MilestoneDef, MilestoneTable};
pub use notify::{Notifier, Toast, DEFAULT_TOAST_MS, MAX_TOAST_MS};
pub use progress::{PaceStatus, PlanProgress, ProgressReport};
pub use ramp::{
    days_between_inclusive, is_active_day, planned_through, rate_at, stage_windows,
    target_for_day, StageWindow,
};
pub use settings::{GoalConfig, PlanConfig, RampStage};
pub use state::{milestone_notice, TrackerState};
pub use time::{local_date, parse_date, parse_date_or, today_in};
