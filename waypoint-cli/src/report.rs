//! Plain-text rendering for the terminal.

use std::fmt::Write;
use waypoint_core::{Entry, PaceStatus, PlanConfig, ProgressReport, StageWindow};

pub fn render_status(r: &ProgressReport, unit: &str) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# Progress as of {}\n", r.as_of);
    let _ = writeln!(
        s,
        "Total: {:.1} {unit} ({:.1}% of goal, {:.1} {unit} to go)",
        r.total_distance, r.percent_to_goal, r.remaining
    );
    let _ = writeln!(
        s,
        "Days left: {} | needed per day: {:.2} {unit}",
        r.days_left, r.required_rate_per_day
    );

    let _ = writeln!(s, "\n## {}", r.current_milestone.name);
    let _ = writeln!(s, "{}", r.current_milestone.narrative);
    match (&r.next_milestone, r.distance_to_next) {
        (Some(next), Some(left)) => {
            let _ = writeln!(s, "Next: {} in {:.1} {unit}", next.name, left);
        }
        _ => {
            let _ = writeln!(s, "Journey complete.");
        }
    }

    if let Some(p) = &r.plan {
        let pace = match p.pace {
            PaceStatus::Ahead => "ahead of",
            PaceStatus::OnPlan => "on",
            PaceStatus::Behind => "behind",
        };
        let _ = writeln!(s, "\n## Plan");
        let _ = writeln!(s, "Today's target: {:.1} {unit}", p.today_target);
        let _ = writeln!(
            s,
            "Planned so far: {:.1} {unit} | {:+.1} {unit} ({pace} plan)",
            p.planned_to_date, p.pace_delta
        );
        if !p.plan_sufficient {
            let _ = writeln!(s, "Heads up: the plan alone won't reach the goal by its date.");
        }
    }

    s
}

pub fn render_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>, unit: &str) -> String {
    let mut s = String::new();
    for e in entries {
        let edited = if e.edited { " (edited)" } else { "" };
        let _ = writeln!(s, "{}  {:>7.2} {unit}{edited}  {}", e.date, e.distance, e.id);
    }
    if s.is_empty() {
        s.push_str("No entries yet.\n");
    }
    s
}

pub fn render_plan(plan: &PlanConfig, windows: &[StageWindow], unit: &str) -> String {
    let mut s = String::new();
    let state = if plan.enabled { "enabled" } else { "disabled" };
    let _ = writeln!(s, "Plan ({state}), starting {}", plan.start_date);
    let _ = writeln!(
        s,
        "Active days per week: {} | cap: {:.1} {unit}/day",
        plan.active_days_per_week, plan.cap_rate
    );
    let _ = writeln!(s, "Ramp length: {} days before cap\n", plan.staged_days());
    for w in windows {
        match (w.stage, w.last_day) {
            (Some(n), Some(last)) => {
                let _ = writeln!(
                    s,
                    "Stage {n}: {} .. {}  {:.1} {unit}/day",
                    w.first_day, last, w.rate_per_day
                );
            }
            _ => {
                let _ = writeln!(s, "Cap:     {} onward  {:.1} {unit}/day", w.first_day, w.rate_per_day);
            }
        }
    }
    s
}
